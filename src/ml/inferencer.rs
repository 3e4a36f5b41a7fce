// ============================================================
// Layer 5 — Predictor
// ============================================================
// Wraps a trained RatingClassifier on the plain NdArray backend
// and turns review vectors into per-class probabilities.
use anyhow::Result;
use burn::{prelude::*, tensor::activation::softmax};

use crate::domain::error::PipelineError;
use crate::domain::traits::Classifier;
use crate::infra::checkpoint::CheckpointManager;
use crate::ml::model::{RatingClassifier, RatingClassifierConfig};

pub type InferBackend = burn::backend::NdArray;

pub struct Predictor {
    model:  RatingClassifier<InferBackend>,
    config: RatingClassifierConfig,
    device: burn::backend::ndarray::NdArrayDevice,
}

impl Predictor {
    pub fn new(
        model:  RatingClassifier<InferBackend>,
        config: RatingClassifierConfig,
        device: burn::backend::ndarray::NdArrayDevice,
    ) -> Self {
        Self { model, config, device }
    }

    /// Rebuild the architecture from the saved config, then load the weights.
    pub fn load(ckpt_manager: &CheckpointManager) -> Result<Self> {
        let device = burn::backend::ndarray::NdArrayDevice::default();
        let config = ckpt_manager.load_model_config()?;
        let model: RatingClassifier<InferBackend> = config.init(&device);
        let model = ckpt_manager.load_model(model, &device)?;
        tracing::info!(
            "Model loaded from checkpoint: input_dim={}, classes={}",
            config.input_dim,
            config.num_classes,
        );
        Ok(Self { model, config, device })
    }

    pub fn input_dim(&self) -> usize {
        self.config.input_dim
    }
}

impl Classifier for Predictor {
    fn num_classes(&self) -> usize {
        self.config.num_classes
    }

    fn predict(&self, features: &[Vec<f32>]) -> Result<Vec<Vec<f32>>> {
        if features.is_empty() {
            return Ok(Vec::new());
        }
        let expected = self.config.input_dim;
        for (row, v) in features.iter().enumerate() {
            if v.len() != expected {
                return Err(PipelineError::RaggedVectors { row, found: v.len(), expected }.into());
            }
        }

        let flat: Vec<f32> = features.iter().flatten().copied().collect();
        let input = Tensor::<InferBackend, 2>::from_data(
            TensorData::new(flat, [features.len(), expected]),
            &self.device,
        );

        let probs: Vec<f32> = softmax(self.model.forward(input), 1)
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| anyhow::anyhow!("Cannot read class probabilities: {e:?}"))?;

        Ok(probs
            .chunks(self.config.num_classes)
            .map(|row| row.to_vec())
            .collect())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn predictor() -> Predictor {
        let device = Default::default();
        let config = RatingClassifierConfig::new(3, 4).with_hidden_dim(5);
        Predictor::new(config.init(&device), config, device)
    }

    #[test]
    fn test_probabilities_sum_to_one() {
        let p     = predictor();
        let probs = p.predict(&[vec![0.1, 0.2, 0.3], vec![1.0, -1.0, 0.0]]).unwrap();
        assert_eq!(probs.len(), 2);
        for row in probs {
            assert_eq!(row.len(), 4);
            let sum: f32 = row.iter().sum();
            assert!((sum - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_wrong_width_is_rejected() {
        let err = predictor().predict(&[vec![0.1, 0.2]]).unwrap_err();
        assert_eq!(
            err.downcast_ref::<PipelineError>(),
            Some(&PipelineError::RaggedVectors { row: 0, found: 2, expected: 3 })
        );
    }

    #[test]
    fn test_load_restores_saved_model() {
        let dir  = tempfile::tempdir().unwrap();
        let ckpt = CheckpointManager::new(dir.path(), "m").unwrap();
        let p    = predictor();
        ckpt.save_model(&p.model).unwrap();
        ckpt.save_model_config(&p.config).unwrap();

        let loaded = Predictor::load(&ckpt).unwrap();
        let input  = [vec![0.3, 0.1, 0.7]];
        assert_eq!(loaded.num_classes(), 4);
        assert_eq!(loaded.predict(&input).unwrap(), p.predict(&input).unwrap());
    }
}
