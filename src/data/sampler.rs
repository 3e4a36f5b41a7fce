// ============================================================
// Layer 4 — Class Sampler
// ============================================================
// Star ratings are heavily imbalanced (most reviews are 3–4
// stars). Resampling the TRAINING partition evens that out:
//
//   undersampling   every class cut to the smallest class
//   oversampling    every class repeated up to the largest
//   mediansampling  every class brought to the median size
//   none            input returned untouched
//
// Classes are visited in order of first appearance. A class
// that is too big keeps its first k members; one that is too
// small is cycled (a, b, c, a, b, ...) up to k. The combined
// result is shuffled with a seeded RNG so runs are repeatable.

use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt, str::FromStr};

use crate::domain::error::PipelineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SamplingMethod {
    #[default]
    None,
    Undersampling,
    Oversampling,
    Mediansampling,
}

impl FromStr for SamplingMethod {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "none"           => Ok(SamplingMethod::None),
            "undersampling"  => Ok(SamplingMethod::Undersampling),
            "oversampling"   => Ok(SamplingMethod::Oversampling),
            "mediansampling" => Ok(SamplingMethod::Mediansampling),
            other => Err(PipelineError::UnknownSamplingMethod(other.to_string())),
        }
    }
}

impl fmt::Display for SamplingMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SamplingMethod::None           => "none",
            SamplingMethod::Undersampling  => "undersampling",
            SamplingMethod::Oversampling   => "oversampling",
            SamplingMethod::Mediansampling => "mediansampling",
        };
        f.write_str(name)
    }
}

/// Resample `(x, y)` so every class has the same number of samples.
pub fn sample_class_data<X: Clone>(
    x:      Vec<X>,
    y:      Vec<u32>,
    method: SamplingMethod,
    seed:   u64,
) -> Result<(Vec<X>, Vec<u32>), PipelineError> {
    if x.len() != y.len() {
        return Err(PipelineError::LengthMismatch { features: x.len(), labels: y.len() });
    }
    if x.is_empty() {
        return Ok((x, y));
    }

    // ── Group sample positions by class, in first-appearance order ────────────
    let mut slot_of: HashMap<u32, usize> = HashMap::new();
    let mut classes: Vec<Vec<usize>>     = Vec::new();
    for (i, label) in y.iter().enumerate() {
        let slot = *slot_of.entry(*label).or_insert_with(|| {
            classes.push(Vec::new());
            classes.len() - 1
        });
        classes[slot].push(i);
    }

    let sizes: Vec<usize> = classes.iter().map(Vec::len).collect();
    let per_class = match method {
        SamplingMethod::Undersampling  => sizes.iter().copied().min().unwrap_or(0),
        SamplingMethod::Oversampling   => sizes.iter().copied().max().unwrap_or(0),
        SamplingMethod::Mediansampling => median(&sizes) as usize,
        SamplingMethod::None           => return Ok((x, y)),
    };

    // ── Cut or cycle each class to `per_class` members ────────────────────────
    let mut picked: Vec<usize> = classes
        .iter()
        .flat_map(|members| members.iter().copied().cycle().take(per_class))
        .collect();

    picked.shuffle(&mut StdRng::seed_from_u64(seed));

    tracing::debug!(
        "{} sampling: {} classes × {} = {} samples (from {})",
        method,
        classes.len(),
        per_class,
        picked.len(),
        y.len()
    );

    let xs = picked.iter().map(|&i| x[i].clone()).collect();
    let ys = picked.iter().map(|&i| y[i]).collect();
    Ok((xs, ys))
}

/// Middle value, or the mean of the two middle values.
fn median(values: &[usize]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_unstable();
    let n = sorted.len();
    if n == 0 {
        return 0.0;
    }
    if n % 2 == 1 {
        sorted[n / 2] as f64
    } else {
        (sorted[n / 2 - 1] + sorted[n / 2]) as f64 / 2.0
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn class_counts(y: &[u32]) -> HashMap<u32, usize> {
        let mut counts = HashMap::new();
        for label in y {
            *counts.entry(*label).or_insert(0) += 1;
        }
        counts
    }

    // class 0 ×1, class 1 ×2, class 2 ×5
    fn imbalanced() -> (Vec<usize>, Vec<u32>) {
        let y = vec![2, 1, 2, 0, 2, 1, 2, 2];
        ((0..y.len()).collect(), y)
    }

    #[test]
    fn test_none_returns_input_unchanged() {
        let (x, y) = imbalanced();
        let (sx, sy) = sample_class_data(x.clone(), y.clone(), SamplingMethod::None, 42).unwrap();
        assert_eq!(sx, x);
        assert_eq!(sy, y);
    }

    #[test]
    fn test_undersampling_uses_smallest_class() {
        let (x, y)   = imbalanced();
        let (sx, sy) = sample_class_data(x, y, SamplingMethod::Undersampling, 42).unwrap();
        assert_eq!(sx.len(), 3);
        assert!(class_counts(&sy).values().all(|&c| c == 1));
    }

    #[test]
    fn test_oversampling_repeats_small_classes() {
        let (x, y)   = imbalanced();
        let (sx, sy) = sample_class_data(x, y, SamplingMethod::Oversampling, 42).unwrap();
        assert_eq!(sx.len(), 15);
        assert!(class_counts(&sy).values().all(|&c| c == 5));
        // the lone class-0 sample (position 3) is repeated five times
        assert_eq!(sx.iter().filter(|&&i| i == 3).count(), 5);
    }

    #[test]
    fn test_mediansampling() {
        let (x, y)   = imbalanced();
        let (sx, sy) = sample_class_data(x, y, SamplingMethod::Mediansampling, 42).unwrap();
        assert_eq!(sx.len(), 6);
        assert!(class_counts(&sy).values().all(|&c| c == 2));
    }

    #[test]
    fn test_median_of_even_count_is_truncated() {
        // sizes 1 and 4 → median 2.5 → 2 per class
        let y = vec![0, 1, 1, 1, 1];
        let x: Vec<usize> = (0..5).collect();
        let (_, sy) = sample_class_data(x, y, SamplingMethod::Mediansampling, 1).unwrap();
        assert_eq!(sy.len(), 4);
    }

    #[test]
    fn test_features_stay_paired_with_labels() {
        let (x, y)   = imbalanced();
        let original = y.clone();
        let (sx, sy) = sample_class_data(x, y, SamplingMethod::Oversampling, 9).unwrap();
        for (xi, yi) in sx.iter().zip(&sy) {
            assert_eq!(original[*xi], *yi);
        }
    }

    #[test]
    fn test_seeded_shuffle_is_repeatable() {
        let (x, y) = imbalanced();
        let a = sample_class_data(x.clone(), y.clone(), SamplingMethod::Oversampling, 5).unwrap();
        let b = sample_class_data(x, y, SamplingMethod::Oversampling, 5).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        assert!(sample_class_data(vec![1, 2], vec![0], SamplingMethod::Undersampling, 0).is_err());
    }

    #[test]
    fn test_parse_method_names() {
        assert_eq!("Oversampling".parse::<SamplingMethod>().unwrap(), SamplingMethod::Oversampling);
        assert!("random".parse::<SamplingMethod>().is_err());
        assert_eq!(SamplingMethod::Mediansampling.to_string(), "mediansampling");
    }
}
