// ============================================================
// Layer 4 — Rating Batcher
// ============================================================
// Implements Burn's Batcher trait: stacks a Vec<RatingSample>
// into two float tensors.
//
//   Input:  N samples, each with D features and C target values
//   Output: features [N, D], targets [N, C]
//
// Every review vector has the same width and every one-hot row
// the same number of classes, so rows are flattened and shaped
// with TensorData directly.

use burn::{data::dataloader::batcher::Batcher, prelude::*};

use crate::data::dataset::RatingSample;

#[derive(Debug, Clone)]
pub struct RatingBatch<B: Backend> {
    /// Dense review vectors — shape: [batch_size, input_dim]
    pub features: Tensor<B, 2>,

    /// One-hot star ratings — shape: [batch_size, num_classes]
    pub targets: Tensor<B, 2>,
}

#[derive(Clone, Debug)]
pub struct RatingBatcher<B: Backend> {
    pub device: B::Device,
}

impl<B: Backend> RatingBatcher<B> {
    pub fn new(device: B::Device) -> Self {
        Self { device }
    }
}

impl<B: Backend> Batcher<RatingSample, RatingBatch<B>> for RatingBatcher<B> {
    fn batch(&self, items: Vec<RatingSample>) -> RatingBatch<B> {
        let batch_size  = items.len();
        let input_dim   = items.first().map(|s| s.features.len()).unwrap_or(0);
        let num_classes = items.first().map(|s| s.target.len()).unwrap_or(0);

        let features_flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.features.iter().copied())
            .collect();

        let targets_flat: Vec<f32> = items
            .iter()
            .flat_map(|s| s.target.iter().copied())
            .collect();

        let features = Tensor::<B, 2>::from_data(
            TensorData::new(features_flat, [batch_size, input_dim]),
            &self.device,
        );
        let targets = Tensor::<B, 2>::from_data(
            TensorData::new(targets_flat, [batch_size, num_classes]),
            &self.device,
        );

        RatingBatch { features, targets }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use burn::backend::NdArray;

    #[test]
    fn test_batch_shapes() {
        let batcher = RatingBatcher::<NdArray>::new(Default::default());
        let items   = vec![
            RatingSample { features: vec![0.1, 0.2, 0.3], target: vec![1.0, 0.0] },
            RatingSample { features: vec![0.4, 0.5, 0.6], target: vec![0.0, 1.0] },
        ];

        let batch = batcher.batch(items);

        assert_eq!(batch.features.dims(), [2, 3]);
        assert_eq!(batch.targets.dims(), [2, 2]);

        let targets: Vec<f32> = batch.targets.into_data().to_vec().unwrap();
        assert_eq!(targets, vec![1.0, 0.0, 0.0, 1.0]);
    }
}
