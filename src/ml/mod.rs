// ============================================================
// Layer 5 — ML / Model Layer (Burn)
// ============================================================
// All Burn model code lives here. The data layer only touches
// Burn through its Dataset and Batcher traits.
//
//   model.rs      — RatingClassifier: a one-hidden-layer MLP
//                   (Linear → ReLU → Dropout → Linear) plus the
//                   soft-label cross-entropy it is trained with
//
//   trainer.rs    — BurnTrainer: Adam training loop with a
//                   validation pass and metrics.csv per epoch
//
//   inferencer.rs — Predictor: loads a checkpoint and returns
//                   softmax class probabilities
//
// Reference: Burn Book §3 (Building Blocks)
//            Burn Book §5 (Training)

/// MLP rating classifier and its loss
pub mod model;

/// Training loop with validation and checkpointing
pub mod trainer;

/// Inference — loads a checkpoint and predicts class probabilities
pub mod inferencer;
