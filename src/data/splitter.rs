// ============================================================
// Layer 4 — Train/Validation/Test Splitter
// ============================================================
// Partitions a labelled dataset into three disjoint sets:
//   - Training set:   updates the model weights
//   - Validation set: tracks generalisation during training
//   - Test set:       measured once, after training
//
// Two seeded stages:
//   1. Shuffle all indices with StdRng(seed); the first 70% are
//      training, the remaining 30% are held out.
//   2. Shuffle the held-out indices with an RNG whose seed is
//      drawn from the stage-1 RNG, then cut them in half.
//
// Same seed + same input → bit-identical split, so different
// training configurations can be compared on the same data.
//
// Rounding (N = number of samples, N >= 3):
//   train = floor(70 * N / 100), clamped to [1, N - 2]
//   held  = N - train
//   val   = floor(held / 2)
//   test  = held - val
//
// The clamp guarantees all three partitions are non-empty.

use rand::{rngs::StdRng, seq::SliceRandom, Rng, SeedableRng};

use crate::domain::error::PipelineError;

/// Share of the samples that go to training, in percent
pub const TRAIN_PERCENT: usize = 70;

/// Which input positions landed in which partition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitIndices {
    pub train:      Vec<usize>,
    pub validation: Vec<usize>,
    pub test:       Vec<usize>,
}

/// Features and labels for each of the three partitions.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSplit<X, Y> {
    pub train_x: Vec<X>,
    pub train_y: Vec<Y>,
    pub val_x:   Vec<X>,
    pub val_y:   Vec<Y>,
    pub test_x:  Vec<X>,
    pub test_y:  Vec<Y>,
}

/// Sizes of (train, validation, test) for `n` samples.
pub fn partition_sizes(n: usize) -> Result<(usize, usize, usize), PipelineError> {
    if n < 3 {
        return Err(PipelineError::DatasetTooSmall(n));
    }

    // Integer arithmetic keeps the floor exact for every n
    let train = (n * TRAIN_PERCENT / 100).clamp(1, n - 2);
    let held  = n - train;
    let val   = held / 2;

    Ok((train, val, held - val))
}

/// Seeded two-stage permutation of `0..n`.
pub fn split_indices(n: usize, seed: u64) -> Result<SplitIndices, PipelineError> {
    let (train_len, val_len, _) = partition_sizes(n)?;

    // ── Stage 1: train vs held-out ────────────────────────────────────────────
    let mut rng = StdRng::seed_from_u64(seed);
    let mut train: Vec<usize> = (0..n).collect();
    train.shuffle(&mut rng);
    let mut held = train.split_off(train_len);

    // ── Stage 2: validation vs test, on a derived seed ────────────────────────
    let stage_two_seed: u64 = rng.gen();
    held.shuffle(&mut StdRng::seed_from_u64(stage_two_seed));
    let test = held.split_off(val_len);

    tracing::debug!(
        "Split {} samples: {} train, {} validation, {} test",
        n,
        train.len(),
        held.len(),
        test.len()
    );

    Ok(SplitIndices {
        train,
        validation: held,
        test,
    })
}

/// Split parallel feature/label sequences into train/validation/test.
pub fn split_dataset<X: Clone, Y: Clone>(
    features: &[X],
    labels:   &[Y],
    seed:     u64,
) -> Result<DatasetSplit<X, Y>, PipelineError> {
    if features.len() != labels.len() {
        return Err(PipelineError::LengthMismatch {
            features: features.len(),
            labels:   labels.len(),
        });
    }

    let idx = split_indices(features.len(), seed)?;

    Ok(DatasetSplit {
        train_x: gather(features, &idx.train),
        train_y: gather(labels, &idx.train),
        val_x:   gather(features, &idx.validation),
        val_y:   gather(labels, &idx.validation),
        test_x:  gather(features, &idx.test),
        test_y:  gather(labels, &idx.test),
    })
}

fn gather<T: Clone>(items: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|&i| items[i].clone()).collect()
}
