// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the raw review TSV and tensor batches.
//
//   filmstarts.tsv
//       │
//       ▼
//   TsvLoader            → raw rows of string fields
//       │
//       ▼
//   TextNormalizer       → filters, collapses repetitions,
//       │                  transforms tokens
//       ▼
//   PreprocessedDataset  → persisted as JSON (infra)
//       │
//       ▼
//   build_dataset        → pairs reviews with their vectors
//       │
//       ▼
//   split_dataset        → seeded 70 / 15 / 15 partitions
//       │
//       ▼
//   sample_class_data    → optional class rebalancing (train only)
//       │
//       ▼
//   OneHotEncoder        → fixed-width one-hot targets
//       │
//       ▼
//   RatingBatcher        → tensor batches for the trainer
//
// Each module is responsible for exactly one step.

/// Reads delimited rows from disk
pub mod loader;

/// Regex-based collapsing of repeated fragments
pub mod repetition;

/// Cleans one raw row into a normalised record
pub mod normalizer;

/// Preprocessed columns, the dataset builder and Burn's Dataset impl
pub mod dataset;

/// Seeded train/validation/test split
pub mod splitter;

/// Class rebalancing for the training partition
pub mod sampler;

/// Integer labels → one-hot rows
pub mod label_encoder;

/// Implements Burn's Batcher trait to create tensor batches
pub mod batcher;
