// ============================================================
// Layer 3 — Review Domain Types
// ============================================================
// One movie review moves through three shapes:
//
//   RawRecord         url, stars and text straight from the TSV
//   NormalizedRecord  cleaned text plus its normalised tokens
//   LabeledVectors    dense features with one-hot targets,
//                     the form handed to a classifier trainer
//
// Only NormalizedRecord is ever written to disk (as part of
// the preprocessed dataset). The other two are transient.

use serde::{Deserialize, Serialize};

/// A review row that passed the structural checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawRecord {
    /// Address of the review page, used as an identifier
    pub url: String,

    /// Star rating given by the reviewer
    pub stars: u32,

    /// Review body, with any stray delimiter-split fields rejoined
    pub text: String,
}

impl RawRecord {
    pub fn new(url: impl Into<String>, stars: u32, text: impl Into<String>) -> Self {
        Self {
            url:  url.into(),
            stars,
            text: text.into(),
        }
    }
}

/// A review after cleaning and token transformation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    pub url:    String,
    pub stars:  u32,
    /// Repetition-collapsed text with newlines replaced by spaces
    pub text:   String,
    /// Output of the tokenize → filter → lemmatize → stem chain
    pub tokens: Vec<String>,
}

/// Dense feature rows paired with one-hot targets.
///
/// `features[i]` and `targets[i]` describe the same review.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LabeledVectors {
    pub features: Vec<Vec<f32>>,
    pub targets:  Vec<Vec<f32>>,
}

impl LabeledVectors {
    pub fn new(features: Vec<Vec<f32>>, targets: Vec<Vec<f32>>) -> Self {
        Self { features, targets }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Width of a feature row, 0 when empty
    pub fn input_dim(&self) -> usize {
        self.features.first().map(Vec::len).unwrap_or(0)
    }

    /// Width of a one-hot target, 0 when empty
    pub fn num_classes(&self) -> usize {
        self.targets.first().map(Vec::len).unwrap_or(0)
    }
}
