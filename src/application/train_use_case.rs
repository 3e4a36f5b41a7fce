// ============================================================
// Layer 2 — TrainUseCase
// ============================================================
// Orchestrates the training pipeline in order:
//
//   Step 1: Load preprocessed JSON + vector store  (Layer 6 - infra)
//   Step 2: Build the aligned dataset              (Layer 4 - data)
//   Step 3: Seeded 70/15/15 split                  (Layer 4 - data)
//   Step 4: Class sampling, training part only     (Layer 4 - data)
//   Step 5: One-hot labels, width from training    (Layer 4 - data)
//   Step 6: Save config                            (Layer 6 - infra)
//   Step 7: Train                                  (Layer 5 - ml)
//   Step 8: Test accuracy                          (Layer 5 - ml)
//
// Reference: Burn Book §5 (Training)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::data::{
    dataset::build_dataset,
    label_encoder::{argmax, OneHotEncoder},
    sampler::{sample_class_data, SamplingMethod},
    splitter::split_dataset,
};
use crate::domain::review::LabeledVectors;
use crate::domain::traits::{Classifier, ClassifierTrainer};
use crate::infra::{
    checkpoint::CheckpointManager,
    dataset_store::load_preprocessed,
    metrics::MetricsLogger,
    vector_store::VectorStore,
};
use crate::ml::trainer::BurnTrainer;

// ─── Training Configuration ──────────────────────────────────────────────────
// Everything a training run depends on. Saved next to the model
// weights so a run can be reproduced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainConfig {
    pub data_path:     String,
    pub vectors_path:  String,
    pub model_dir:     String,
    pub model_name:    String,
    pub seed:          u64,
    pub sampling:      SamplingMethod,
    pub batch_size:    usize,
    pub epochs:        usize,
    pub learning_rate: f64,
    pub hidden_dim:    usize,
    pub dropout:       f64,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_path:     "data/preprocessed.json".to_string(),
            vectors_path:  "data/vectors.npz".to_string(),
            model_dir:     "models".to_string(),
            model_name:    "rating_classifier".to_string(),
            seed:          42,
            sampling:      SamplingMethod::None,
            batch_size:    32,
            epochs:        10,
            learning_rate: 1e-3,
            hidden_dim:    64,
            dropout:       0.2,
        }
    }
}

/// Sizes and final score of a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainReport {
    pub train_size:    usize,
    pub val_size:      usize,
    pub test_size:     usize,
    pub num_classes:   usize,
    pub test_accuracy: f64,
}

pub struct TrainUseCase {
    config: TrainConfig,
}

impl TrainUseCase {
    pub fn new(config: TrainConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<TrainReport> {
        let cfg = &self.config;

        // ── Step 1: Load inputs ───────────────────────────────────────────────
        tracing::info!("Loading '{}' and '{}'", cfg.data_path, cfg.vectors_path);
        let data    = load_preprocessed(Path::new(&cfg.data_path))?;
        let vectors = VectorStore::load_npz(Path::new(&cfg.vectors_path))?;

        // ── Step 2: Aligned dataset ───────────────────────────────────────────
        let dataset = build_dataset(&data, &vectors)?;
        tracing::info!("Dataset: {} reviews, {} dims", dataset.len(), vectors.dims());

        // ── Step 3: Split ─────────────────────────────────────────────────────
        let split = split_dataset(&dataset.vectors, &dataset.labels, cfg.seed)?;
        tracing::info!(
            "Split: {} train, {} validation, {} test",
            split.train_x.len(),
            split.val_x.len(),
            split.test_x.len(),
        );

        // ── Step 4: Class sampling ────────────────────────────────────────────
        let (train_x, train_y) =
            sample_class_data(split.train_x, split.train_y, cfg.sampling, cfg.seed)?;
        if cfg.sampling != SamplingMethod::None {
            tracing::info!("{} sampling: {} training samples", cfg.sampling, train_x.len());
        }

        // ── Step 5: One-hot labels ────────────────────────────────────────────
        let encoder = OneHotEncoder::fit(&train_y)?;
        let train   = LabeledVectors::new(train_x, encoder.encode(&train_y)?);
        let val     = LabeledVectors::new(split.val_x, encoder.encode(&split.val_y)?);
        tracing::info!("{} rating classes", encoder.width());

        // ── Step 6: Save config ───────────────────────────────────────────────
        let ckpt    = CheckpointManager::new(&cfg.model_dir, cfg.model_name.as_str())?;
        let metrics = MetricsLogger::new(Path::new(&cfg.model_dir))?;
        ckpt.save_train_config(cfg)?;

        // ── Step 7: Train ─────────────────────────────────────────────────────
        let predictor = BurnTrainer::new(cfg, &ckpt, &metrics).fit(&train, &val)?;

        // ── Step 8: Held-out test accuracy ────────────────────────────────────
        let test_accuracy = accuracy(&predictor.predict(&split.test_x)?, &split.test_y);
        tracing::info!("Test accuracy: {:.1}%", test_accuracy * 100.0);

        Ok(TrainReport {
            train_size:  train.len(),
            val_size:    val.len(),
            test_size:   split.test_x.len(),
            num_classes: encoder.width(),
            test_accuracy,
        })
    }
}

/// Fraction of rows whose most probable class equals the label.
pub fn accuracy(probabilities: &[Vec<f32>], labels: &[u32]) -> f64 {
    if labels.is_empty() {
        return 0.0;
    }
    let hits = probabilities
        .iter()
        .zip(labels)
        .filter(|(p, label)| argmax(p) == Some(**label as usize))
        .count();
    hits as f64 / labels.len() as f64
}
