// ============================================================
// Layer 6 — Checkpoint Manager
// ============================================================
// Saves and restores a trained rating classifier by name.
//
// What gets saved per model:
//   1. {name}.mpk.gz            — model weights (CompactRecorder)
//   2. {name}.json              — RatingClassifierConfig, needed
//                                 to rebuild the architecture
//                                 before loading the weights
//   3. {name}.train_config.json — the TrainConfig of the run,
//                                 kept for reproducibility
//
// Burn's CompactRecorder serialises parameters to MessagePack
// and gzips them. Loading fails if the architecture does not
// match the saved record.
//
// Directory layout:
//   models/
//     rating_classifier.mpk.gz
//     rating_classifier.json
//     rating_classifier.train_config.json
//     metrics.csv

use anyhow::{Context, Result};
use burn::{
    prelude::*,
    record::{CompactRecorder, Recorder},
};
use std::{fs, path::PathBuf};

use crate::application::train_use_case::TrainConfig;
use crate::ml::model::{RatingClassifier, RatingClassifierConfig};

pub struct CheckpointManager {
    dir:  PathBuf,
    name: String,
}

impl CheckpointManager {
    /// Checkpoint files for model `name` inside `dir`.
    /// Creates the directory if it does not exist yet.
    pub fn new(dir: impl Into<PathBuf>, name: impl Into<String>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)
            .with_context(|| format!("Cannot create model directory '{}'", dir.display()))?;
        Ok(Self { dir, name: name.into() })
    }

    pub fn dir(&self) -> &PathBuf {
        &self.dir
    }

    /// Weights path without extension — the recorder adds `.mpk.gz`
    fn weights_path(&self) -> PathBuf {
        self.dir.join(&self.name)
    }

    fn model_config_path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.name))
    }

    fn train_config_path(&self) -> PathBuf {
        self.dir.join(format!("{}.train_config.json", self.name))
    }

    pub fn save_model<B: Backend>(&self, model: &RatingClassifier<B>) -> Result<()> {
        let path = self.weights_path();
        CompactRecorder::new()
            .record(model.clone().into_record(), path.clone())
            .with_context(|| format!("Failed to save model to '{}'", path.display()))?;

        tracing::debug!("Saved model weights to '{}.mpk.gz'", path.display());
        Ok(())
    }

    /// Load saved weights into `model`, which must have the
    /// architecture the checkpoint was written with.
    pub fn load_model<B: Backend>(
        &self,
        model:  RatingClassifier<B>,
        device: &B::Device,
    ) -> Result<RatingClassifier<B>> {
        let path   = self.weights_path();
        let record = CompactRecorder::new()
            .load(path.clone(), device)
            .with_context(|| {
                format!(
                    "Cannot load model '{}'. Have you trained it first?",
                    path.display()
                )
            })?;

        Ok(model.load_record(record))
    }

    pub fn save_model_config(&self, cfg: &RatingClassifierConfig) -> Result<()> {
        let path = self.model_config_path();
        fs::write(&path, serde_json::to_string_pretty(cfg)?)
            .with_context(|| format!("Cannot write model config to '{}'", path.display()))?;
        Ok(())
    }

    pub fn load_model_config(&self) -> Result<RatingClassifierConfig> {
        let path = self.model_config_path();
        let json = fs::read_to_string(&path).with_context(|| {
            format!(
                "Cannot read model config from '{}'. \
                 Make sure you have run 'train' before 'predict'.",
                path.display()
            )
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save_train_config(&self, cfg: &TrainConfig) -> Result<()> {
        let path = self.train_config_path();
        fs::write(&path, serde_json::to_string_pretty(cfg)?)
            .with_context(|| format!("Cannot write config to '{}'", path.display()))?;

        tracing::debug!("Saved training config to '{}'", path.display());
        Ok(())
    }

    pub fn load_train_config(&self) -> Result<TrainConfig> {
        let path = self.train_config_path();
        let json = fs::read_to_string(&path)
            .with_context(|| format!("Cannot read config from '{}'", path.display()))?;
        Ok(serde_json::from_str(&json)?)
    }
}
