// ============================================================
// Layer 4 — Datasets
// ============================================================
// Three views of the same reviews:
//
//   PreprocessedDataset  column-oriented, persisted as JSON
//                        { url, text_transformed, text, stars }
//   ReviewDataset        the Dataset Builder's output: tokens,
//                        texts, dense vectors and labels
//   RatingDataset        Burn Dataset of (features, one-hot)
//                        samples for the training DataLoader
//
// Position i in every column describes the same review.

use burn::data::dataset::Dataset;
use serde::{Deserialize, Serialize};

use crate::domain::error::PipelineError;
use crate::domain::review::{LabeledVectors, NormalizedRecord};
use crate::infra::vector_store::VectorStore;

// ─── PreprocessedDataset ──────────────────────────────────────────────────────
/// Four parallel columns of equal length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreprocessedDataset {
    pub url:    Vec<String>,
    #[serde(rename = "text_transformed")]
    pub tokens: Vec<Vec<String>>,
    pub text:   Vec<String>,
    pub stars:  Vec<u32>,
}

impl PreprocessedDataset {
    pub fn from_records(records: Vec<NormalizedRecord>) -> Self {
        let mut ds = Self::default();
        for r in records {
            ds.push(r);
        }
        ds
    }

    /// Append one record to all four columns at once
    pub fn push(&mut self, record: NormalizedRecord) {
        self.url.push(record.url);
        self.tokens.push(record.tokens);
        self.text.push(record.text);
        self.stars.push(record.stars);
    }

    pub fn len(&self) -> usize {
        self.url.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Errors unless all four columns have the same length.
    pub fn validate(&self) -> Result<(), PipelineError> {
        let n = self.url.len();
        if self.tokens.len() != n || self.text.len() != n || self.stars.len() != n {
            return Err(PipelineError::MisalignedColumns {
                url:    self.url.len(),
                text:   self.text.len(),
                tokens: self.tokens.len(),
                stars:  self.stars.len(),
            });
        }
        Ok(())
    }
}

// ─── ReviewDataset (Dataset Builder output) ───────────────────────────────────
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReviewDataset {
    pub tokens:  Vec<Vec<String>>,
    pub texts:   Vec<String>,
    pub vectors: Vec<Vec<f32>>,
    pub labels:  Vec<u32>,
}

impl ReviewDataset {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Pair every preprocessed review with its row in the vector store.
///
/// Order is preserved and nothing is skipped. The store must have
/// at least as many rows as the dataset; surplus rows are ignored.
pub fn build_dataset(
    data:    &PreprocessedDataset,
    vectors: &VectorStore,
) -> Result<ReviewDataset, PipelineError> {
    data.validate()?;

    if vectors.len() < data.len() {
        return Err(PipelineError::NotEnoughVectors {
            vectors: vectors.len(),
            records: data.len(),
        });
    }

    let vectors: Vec<Vec<f32>> = (0..data.len()).map(|i| vectors.row(i)).collect();

    Ok(ReviewDataset {
        tokens:  data.tokens.clone(),
        texts:   data.text.clone(),
        vectors,
        labels:  data.stars.clone(),
    })
}

// ─── RatingDataset (Burn) ─────────────────────────────────────────────────────
/// One training sample: a dense review vector and its one-hot target.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingSample {
    pub features: Vec<f32>,
    pub target:   Vec<f32>,
}

pub struct RatingDataset {
    samples: Vec<RatingSample>,
}

impl RatingDataset {
    pub fn new(samples: Vec<RatingSample>) -> Self {
        Self { samples }
    }
}

impl From<&LabeledVectors> for RatingDataset {
    fn from(set: &LabeledVectors) -> Self {
        let samples = set
            .features
            .iter()
            .zip(&set.targets)
            .map(|(features, target)| RatingSample {
                features: features.clone(),
                target:   target.clone(),
            })
            .collect();
        Self { samples }
    }
}

impl Dataset<RatingSample> for RatingDataset {
    fn get(&self, index: usize) -> Option<RatingSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}
