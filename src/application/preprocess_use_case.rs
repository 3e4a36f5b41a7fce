// ============================================================
// Layer 2 — PreprocessUseCase
// ============================================================
// Raw TSV reviews → intermediate JSON:
//
//   Step 1: Read delimited rows          (Layer 4 - data)
//   Step 2: Build the NLP capabilities   (Layer 6 - infra)
//   Step 3: Normalise every row          (Layer 4 - data)
//   Step 4: Write the parallel columns   (Layer 6 - infra)
//
// Dropped rows are reported once, as a summary, at info level.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::data::{
    dataset::PreprocessedDataset,
    loader::TsvLoader,
    normalizer::{Capabilities, NormalizeStats, NormalizerConfig, TextNormalizer},
};
use crate::domain::language::Language;
use crate::domain::traits::RecordSource;
use crate::infra::{
    dataset_store::save_preprocessed,
    language_id::WhatlangIdentifier,
    stemmer::SnowballStemmer,
    tokenizer::WordTokenizer,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreprocessConfig {
    pub input_path:  String,
    pub output_path: String,
    pub delimiter:   char,
    pub encoding:    String,
    /// Optional `form<TAB>lemma` file used for lemmatization
    pub lemma_table: Option<String>,
    pub normalizer:  NormalizerConfig,
}

impl Default for PreprocessConfig {
    fn default() -> Self {
        Self {
            input_path:  "data/reviews.tsv".to_string(),
            output_path: "data/preprocessed.json".to_string(),
            delimiter:   '\t',
            encoding:    "utf-8".to_string(),
            lemma_table: None,
            normalizer:  NormalizerConfig::default(),
        }
    }
}

/// Default tokenizer for `language`, with lemmas when a table is given.
pub fn build_tokenizer(language: Language, lemma_table: Option<&str>) -> Result<WordTokenizer> {
    let tokenizer = WordTokenizer::new(language);
    Ok(match lemma_table {
        Some(path) => tokenizer.with_lemmas(WordTokenizer::load_lemma_table(Path::new(path))?),
        None       => tokenizer,
    })
}

pub struct PreprocessUseCase {
    config: PreprocessConfig,
}

impl PreprocessUseCase {
    pub fn new(config: PreprocessConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<NormalizeStats> {
        let cfg = &self.config;

        let Ok(delimiter) = u8::try_from(cfg.delimiter) else {
            bail!("Delimiter '{}' is not a single-byte character", cfg.delimiter);
        };

        // ── Step 1: Read raw rows ─────────────────────────────────────────────
        tracing::info!("Reading reviews from '{}'", cfg.input_path);
        let rows = TsvLoader::new(&cfg.input_path)
            .with_delimiter(delimiter)
            .with_encoding(cfg.encoding.as_str())
            .load_rows()?;
        tracing::info!("Read {} rows", rows.len());

        // ── Step 2: Capabilities, built once ──────────────────────────────────
        let tokenizer   = build_tokenizer(cfg.normalizer.language, cfg.lemma_table.as_deref())?;
        let stemmer     = SnowballStemmer::new();
        let language_id = WhatlangIdentifier::new();
        let caps = Capabilities {
            tokenizer:   &tokenizer,
            stemmer:     &stemmer,
            language_id: &language_id,
        };

        // ── Step 3: Normalise ─────────────────────────────────────────────────
        let normalizer         = TextNormalizer::new(cfg.normalizer.clone(), caps)?;
        let (records, stats)   = normalizer.normalize_all(&rows)?;
        tracing::info!(
            "Kept {} of {} rows (dropped: {} malformed, {} invalid stars, {} wrong language)",
            stats.kept,
            stats.seen,
            stats.malformed,
            stats.invalid_stars,
            stats.wrong_language,
        );

        // ── Step 4: Persist ───────────────────────────────────────────────────
        let dataset = PreprocessedDataset::from_records(records);
        save_preprocessed(Path::new(&cfg.output_path), &dataset)?;
        tracing::info!("Wrote {} records to '{}'", dataset.len(), cfg.output_path);

        Ok(stats)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::dataset_store::load_preprocessed;

    #[test]
    fn test_preprocess_writes_only_valid_rows() {
        let dir   = tempfile::tempdir().unwrap();
        let input = dir.path().join("reviews.tsv");
        let out   = dir.path().join("pre.json");
        std::fs::write(
            &input,
            "http://a\t5\tDas war super super toll\n\
             http://b\t\tbad\n\
             x\n\
             http://c\t2\tLangweilig, \"viel\" zu lang\tund laut\n",
        )
        .unwrap();

        let cfg = PreprocessConfig {
            input_path:  input.to_string_lossy().into_owned(),
            output_path: out.to_string_lossy().into_owned(),
            ..PreprocessConfig::default()
        };
        let stats = PreprocessUseCase::new(cfg).execute().unwrap();

        assert_eq!(stats.seen, 4);
        assert_eq!(stats.kept, 2);
        assert_eq!(stats.malformed, 2);

        let data = load_preprocessed(&out).unwrap();
        assert_eq!(data.url, vec!["http://a", "http://c"]);
        assert_eq!(data.stars, vec![5, 2]);
        assert_eq!(data.text[1], "Langweilig, \"viel\" zu lang und laut");
        assert!(!data.tokens[0].is_empty());
    }

    #[test]
    fn test_multibyte_delimiter_is_rejected() {
        let cfg = PreprocessConfig { delimiter: '→', ..PreprocessConfig::default() };
        assert!(PreprocessUseCase::new(cfg).execute().is_err());
    }
}
