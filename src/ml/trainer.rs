// ============================================================
// Layer 5 — Training Loop
// ============================================================
// Train + validation loop using Burn's DataLoader and Adam.
//
//   - Training runs on TrainBackend (Autodiff<NdArray>) for gradients
//   - model.valid() returns the model on InferBackend (NdArray)
//     with dropout disabled
//   - The validation batcher must also use InferBackend
//
// After the last epoch the weights and the architecture config
// are written through the CheckpointManager, and the trained
// model is handed back as a Predictor.

use anyhow::{bail, Result};
use burn::{
    data::dataloader::DataLoaderBuilder,
    module::AutodiffModule,
    optim::{AdamConfig, GradientsParams, Optimizer},
    prelude::*,
};

use crate::application::train_use_case::TrainConfig;
use crate::data::{batcher::RatingBatcher, dataset::RatingDataset};
use crate::domain::review::LabeledVectors;
use crate::domain::traits::ClassifierTrainer;
use crate::infra::{
    checkpoint::CheckpointManager,
    metrics::{EpochMetrics, MetricsLogger},
};
use crate::ml::inferencer::{InferBackend, Predictor};
use crate::ml::model::{count_correct, RatingClassifier, RatingClassifierConfig};

pub type TrainBackend = burn::backend::Autodiff<InferBackend>;

pub struct BurnTrainer<'a> {
    cfg:     &'a TrainConfig,
    ckpt:    &'a CheckpointManager,
    metrics: &'a MetricsLogger,
}

impl<'a> BurnTrainer<'a> {
    pub fn new(cfg: &'a TrainConfig, ckpt: &'a CheckpointManager, metrics: &'a MetricsLogger) -> Self {
        Self { cfg, ckpt, metrics }
    }
}

impl ClassifierTrainer for BurnTrainer<'_> {
    type Model = Predictor;

    fn fit(&self, train: &LabeledVectors, validation: &LabeledVectors) -> Result<Predictor> {
        if train.is_empty() {
            bail!("Cannot train on an empty training partition");
        }
        let cfg    = self.cfg;
        let device = burn::backend::ndarray::NdArrayDevice::default();
        TrainBackend::seed(cfg.seed);

        // ── Build model ───────────────────────────────────────────────────────
        let model_cfg = RatingClassifierConfig::new(train.input_dim(), train.num_classes())
            .with_hidden_dim(cfg.hidden_dim)
            .with_dropout(cfg.dropout);
        let mut model: RatingClassifier<TrainBackend> = model_cfg.init(&device);
        tracing::info!(
            "Model ready: input_dim={}, hidden_dim={}, classes={}",
            model_cfg.input_dim,
            model_cfg.hidden_dim,
            model_cfg.num_classes,
        );

        // ── Adam optimiser ────────────────────────────────────────────────────
        let mut optim = AdamConfig::new().with_epsilon(1e-8).init();

        // ── Data loaders ──────────────────────────────────────────────────────
        let train_loader = DataLoaderBuilder::new(RatingBatcher::<TrainBackend>::new(device.clone()))
            .batch_size(cfg.batch_size)
            .shuffle(cfg.seed)
            .num_workers(1)
            .build(RatingDataset::from(train));

        let val_loader = DataLoaderBuilder::new(RatingBatcher::<InferBackend>::new(device.clone()))
            .batch_size(cfg.batch_size)
            .num_workers(1)
            .build(RatingDataset::from(validation));

        // ── Epoch loop ────────────────────────────────────────────────────────
        let mut best_val_loss = f64::INFINITY;
        for epoch in 1..=cfg.epochs {
            let mut train_loss_sum = 0.0f64;
            let mut train_batches  = 0usize;
            let mut train_correct  = 0usize;
            let mut train_seen     = 0usize;

            for batch in train_loader.iter() {
                train_seen += batch.targets.dims()[0];

                let (loss, logits) = model.forward_loss(batch.features, batch.targets.clone());
                train_loss_sum += loss.clone().into_scalar().elem::<f64>();
                train_batches  += 1;
                train_correct  += count_correct(logits, batch.targets);

                let grads = loss.backward();
                let grads = GradientsParams::from_grads(grads, &model);
                model = optim.step(cfg.learning_rate, model, grads);
            }

            let model_valid = model.valid();

            let mut val_loss_sum = 0.0f64;
            let mut val_batches  = 0usize;
            let mut val_correct  = 0usize;
            let mut val_seen     = 0usize;

            for batch in val_loader.iter() {
                val_seen += batch.targets.dims()[0];

                let (loss, logits) = model_valid.forward_loss(batch.features, batch.targets.clone());
                val_loss_sum += loss.into_scalar().elem::<f64>();
                val_batches  += 1;
                val_correct  += count_correct(logits, batch.targets);
            }

            let row = EpochMetrics {
                epoch,
                train_loss: mean(train_loss_sum, train_batches),
                val_loss:   mean(val_loss_sum, val_batches),
                train_acc:  ratio(train_correct, train_seen),
                val_acc:    ratio(val_correct, val_seen),
            };
            self.metrics.log(&row)?;
            if row.is_improvement(best_val_loss) {
                best_val_loss = row.val_loss;
                tracing::debug!("Epoch {} has the best validation loss so far", epoch);
            }

            tracing::info!(
                "Epoch {:>3}/{} | train_loss={:.4} | val_loss={:.4} | train_acc={:.1}% | val_acc={:.1}%",
                epoch,
                cfg.epochs,
                row.train_loss,
                row.val_loss,
                row.train_acc * 100.0,
                row.val_acc * 100.0,
            );
        }

        let trained = model.valid();
        self.ckpt.save_model(&trained)?;
        self.ckpt.save_model_config(&model_cfg)?;
        tracing::info!("Training complete, model saved to '{}'", self.ckpt.dir().display());

        Ok(Predictor::new(trained, model_cfg, device))
    }
}

fn mean(sum: f64, count: usize) -> f64 {
    if count > 0 { sum / count as f64 } else { f64::NAN }
}

fn ratio(hits: usize, total: usize) -> f64 {
    if total > 0 { hits as f64 / total as f64 } else { 0.0 }
}
