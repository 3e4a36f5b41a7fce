// ============================================================
// Layer 2 — EmbedUseCase
// ============================================================
// Intermediate JSON → .npz vector store, one row per record,
// in record order so the Dataset Builder can pair them up.
//
// A record is embedded from its normalised tokens joined by
// spaces. Records whose token list came out empty fall back to
// the cleaned text so every row still carries a signal.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::domain::traits::Embedder;
use crate::infra::{
    dataset_store::load_preprocessed,
    embedder::{HashingEmbedder, DEFAULT_DIMS},
    vector_store::VectorStore,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedConfig {
    pub data_path:    String,
    pub vectors_path: String,
    pub dims:         usize,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            data_path:    "data/preprocessed.json".to_string(),
            vectors_path: "data/vectors.npz".to_string(),
            dims:         DEFAULT_DIMS,
        }
    }
}

/// Text a record is embedded from.
pub fn embedding_input(tokens: &[String], text: &str) -> String {
    if tokens.is_empty() {
        text.to_string()
    } else {
        tokens.join(" ")
    }
}

pub struct EmbedUseCase {
    config: EmbedConfig,
}

impl EmbedUseCase {
    pub fn new(config: EmbedConfig) -> Self {
        Self { config }
    }

    /// Returns the number of vectors written.
    pub fn execute(&self) -> Result<usize> {
        let cfg = &self.config;

        let data     = load_preprocessed(Path::new(&cfg.data_path))?;
        let embedder = HashingEmbedder::new(cfg.dims);
        tracing::info!("Embedding {} records into {} dimensions", data.len(), embedder.dims());

        let rows: Vec<Vec<f32>> = data
            .tokens
            .iter()
            .zip(&data.text)
            .map(|(tokens, text)| embedder.vector(&embedding_input(tokens, text)))
            .collect();

        let store = VectorStore::from_rows(&rows, embedder.dims())?;
        store.save_npz(Path::new(&cfg.vectors_path))?;
        tracing::info!("Wrote vector store to '{}'", cfg.vectors_path);

        Ok(store.len())
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::dataset::PreprocessedDataset;
    use crate::domain::review::NormalizedRecord;
    use crate::infra::dataset_store::save_preprocessed;

    #[test]
    fn test_embedding_input_falls_back_to_text() {
        assert_eq!(embedding_input(&[], "roh"), "roh");
        assert_eq!(embedding_input(&["a".into(), "b".into()], "roh"), "a b");
    }

    #[test]
    fn test_embed_writes_one_row_per_record() {
        let dir  = tempfile::tempdir().unwrap();
        let json = dir.path().join("pre.json");
        let npz  = dir.path().join("vec.npz");

        let records = (0..3)
            .map(|i| NormalizedRecord {
                url:    format!("u{i}"),
                stars:  i,
                text:   format!("text {i}"),
                tokens: vec![format!("tok{i}")],
            })
            .collect();
        save_preprocessed(&json, &PreprocessedDataset::from_records(records)).unwrap();

        let cfg = EmbedConfig {
            data_path:    json.to_string_lossy().into_owned(),
            vectors_path: npz.to_string_lossy().into_owned(),
            dims:         16,
        };
        assert_eq!(EmbedUseCase::new(cfg).execute().unwrap(), 3);

        let store = VectorStore::load_npz(&npz).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.dims(), 16);
    }
}
