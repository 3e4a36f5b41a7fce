// ============================================================
// Layer 3 — Pipeline Errors
// ============================================================
// Configuration and input-shape errors that callers may want to
// match on. Each variant carries the sizes or labels involved so
// the message points at the offending input.
//
// Record-level validation failures are NOT errors: those rows
// are dropped and counted by the normaliser instead.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("unsupported text encoding '{0}' (only utf-8 is supported)")]
    UnsupportedEncoding(String),

    #[error("unknown language '{0}'")]
    UnknownLanguage(String),

    #[error("unknown sampling method '{0}' (expected none, undersampling, oversampling or mediansampling)")]
    UnknownSamplingMethod(String),

    #[error("cannot split {0} samples into train/validation/test, at least 3 are required")]
    DatasetTooSmall(usize),

    #[error("features and labels differ in length ({features} vs {labels})")]
    LengthMismatch { features: usize, labels: usize },

    #[error("cannot derive a one-hot width from an empty set of training labels")]
    EmptyLabels,

    #[error("label {label} exceeds the one-hot width {width} derived from the training labels")]
    LabelOutOfRange { label: u32, width: usize },

    #[error("vector store holds {vectors} rows but the dataset has {records} records")]
    NotEnoughVectors { vectors: usize, records: usize },

    #[error("vector row {row} has {found} values, expected {expected}")]
    RaggedVectors { row: usize, found: usize, expected: usize },

    #[error(
        "preprocessed dataset columns are misaligned \
         (url={url}, text={text}, text_transformed={tokens}, stars={stars})"
    )]
    MisalignedColumns {
        url:    usize,
        text:   usize,
        tokens: usize,
        stars:  usize,
    },
}
