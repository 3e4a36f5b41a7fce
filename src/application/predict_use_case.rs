// ============================================================
// Layer 2 — PredictUseCase
// ============================================================
// Rates free review text with a trained model:
//
//   text → clean + tokenize (same normaliser settings as
//          preprocessing) → hash embedding with the model's
//          input width → class probabilities
//
// Unlike preprocessing, nothing is dropped here: the language
// filter is not applied to a single text the user asked about.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::application::{
    embed_use_case::embedding_input,
    preprocess_use_case::build_tokenizer,
};
use crate::data::{
    label_encoder::argmax,
    normalizer::{Capabilities, NormalizerConfig, TextNormalizer},
};
use crate::domain::traits::{Classifier, Embedder};
use crate::infra::{
    checkpoint::CheckpointManager,
    embedder::HashingEmbedder,
    language_id::WhatlangIdentifier,
    stemmer::SnowballStemmer,
    tokenizer::WordTokenizer,
};
use crate::ml::inferencer::Predictor;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictConfig {
    pub model_dir:   String,
    pub model_name:  String,
    pub lemma_table: Option<String>,
    pub normalizer:  NormalizerConfig,
}

/// Predicted rating with the full class distribution.
#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub tokens:        Vec<String>,
    pub stars:         usize,
    pub probabilities: Vec<f32>,
}

pub struct PredictUseCase {
    config:    PredictConfig,
    tokenizer: WordTokenizer,
    predictor: Predictor,
}

impl PredictUseCase {
    pub fn new(config: PredictConfig) -> Result<Self> {
        let tokenizer = build_tokenizer(config.normalizer.language, config.lemma_table.as_deref())?;
        let ckpt      = CheckpointManager::new(&config.model_dir, config.model_name.as_str())?;
        let predictor = Predictor::load(&ckpt)?;
        Ok(Self { config, tokenizer, predictor })
    }

    pub fn predict(&self, text: &str) -> Result<Prediction> {
        let stemmer     = SnowballStemmer::new();
        let language_id = WhatlangIdentifier::new();
        let caps = Capabilities {
            tokenizer:   &self.tokenizer,
            stemmer:     &stemmer,
            language_id: &language_id,
        };
        let normalizer = TextNormalizer::new(self.config.normalizer.clone(), caps)?;

        let cleaned = normalizer.clean_text(text);
        let tokens  = normalizer.transform_tokens(&cleaned)?;
        tracing::debug!("Tokens: {:?}", tokens);

        let embedder = HashingEmbedder::new(self.predictor.input_dim());
        let vector   = embedder.vector(&embedding_input(&tokens, &cleaned));

        let probabilities = self
            .predictor
            .predict(&[vector])?
            .into_iter()
            .next()
            .unwrap_or_default();
        let stars = argmax(&probabilities).unwrap_or(0);

        Ok(Prediction { tokens, stars, probabilities })
    }
}
