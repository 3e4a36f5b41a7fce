// ============================================================
// Layer 4 — One-Hot Label Encoder
// ============================================================
// Star ratings are class indices; the classifier wants one-hot
// rows. The width is fixed ONCE from the training labels:
//
//   width = 1 + max(train_labels)
//
// and reused for validation and test. A later label that does
// not fit (e.g. 7 against width 6) is an error. It is never
// truncated or silently written out of bounds.

use serde::{Deserialize, Serialize};

use crate::domain::error::PipelineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OneHotEncoder {
    width: usize,
}

impl OneHotEncoder {
    /// Derive the width from the training partition's labels.
    pub fn fit(train_labels: &[u32]) -> Result<Self, PipelineError> {
        let max = train_labels.iter().copied().max().ok_or(PipelineError::EmptyLabels)?;
        Ok(Self { width: max as usize + 1 })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn encode_one(&self, label: u32) -> Result<Vec<f32>, PipelineError> {
        let position = label as usize;
        if position >= self.width {
            return Err(PipelineError::LabelOutOfRange { label, width: self.width });
        }
        let mut row = vec![0.0f32; self.width];
        row[position] = 1.0;
        Ok(row)
    }

    pub fn encode(&self, labels: &[u32]) -> Result<Vec<Vec<f32>>, PipelineError> {
        labels.iter().map(|&l| self.encode_one(l)).collect()
    }
}

/// Index of the largest value; the predicted class of a
/// probability row, or the label of a one-hot row.
pub fn argmax(row: &[f32]) -> Option<usize> {
    row.iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f32)>, (i, &v)| match best {
            Some((_, b)) if b >= v => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_from_training_labels() {
        let enc = OneHotEncoder::fit(&[0, 1, 2, 3, 4, 5]).unwrap();
        assert_eq!(enc.width(), 6);
    }

    #[test]
    fn test_encodes_single_set_bit() {
        let enc = OneHotEncoder::fit(&[0, 1, 2, 3, 4, 5]).unwrap();
        assert_eq!(enc.encode_one(2).unwrap(), vec![0.0, 0.0, 1.0, 0.0, 0.0, 0.0]);

        for row in enc.encode(&[5, 0, 3]).unwrap() {
            assert_eq!(row.len(), 6);
            assert_eq!(row.iter().filter(|&&v| v == 1.0).count(), 1);
        }
    }

    #[test]
    fn test_label_beyond_width_is_an_error() {
        let enc = OneHotEncoder::fit(&[0, 1, 2, 3, 4, 5]).unwrap();
        assert_eq!(
            enc.encode(&[1, 7]),
            Err(PipelineError::LabelOutOfRange { label: 7, width: 6 })
        );
        assert!(enc.encode_one(6).is_err());
    }

    #[test]
    fn test_empty_training_labels_are_rejected() {
        assert_eq!(OneHotEncoder::fit(&[]), Err(PipelineError::EmptyLabels));
    }

    #[test]
    fn test_width_ignores_label_order_and_gaps() {
        let enc = OneHotEncoder::fit(&[4, 1, 4]).unwrap();
        assert_eq!(enc.width(), 5);
        assert_eq!(enc.encode_one(0).unwrap()[0], 1.0);
    }

    #[test]
    fn test_argmax() {
        assert_eq!(argmax(&[0.1, 0.7, 0.2]), Some(1));
        assert_eq!(argmax(&[0.0, 0.0, 1.0]), Some(2));
        // ties resolve to the first position
        assert_eq!(argmax(&[0.5, 0.5]), Some(0));
        assert_eq!(argmax(&[]), None);
    }
}
