// ============================================================
// Layer 3 — Core Traits (Capabilities)
// ============================================================
// The pipeline never reaches for a global NLP handle. Every
// collaborator is constructed once at startup and passed in by
// reference, which keeps the normaliser testable with mocks.
//
//   RecordSource        → TsvLoader
//   Tokenizer           → WordTokenizer (HuggingFace pre-tokenizer)
//   Stemmer             → SnowballStemmer
//   LanguageIdentifier  → WhatlangIdentifier
//   Embedder            → HashingEmbedder
//   ClassifierTrainer   → BurnTrainer
//   Classifier          → Predictor

use anyhow::Result;

use crate::domain::language::Language;
use crate::domain::review::LabeledVectors;

// ─── RecordSource ─────────────────────────────────────────────────────────────
/// Anything that can produce raw delimited rows.
pub trait RecordSource {
    /// Every row as an ordered list of string fields. No validation.
    fn load_rows(&self) -> Result<Vec<Vec<String>>>;
}

// ─── Tokenizer ────────────────────────────────────────────────────────────────
/// One token as seen by the transformation chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Surface form exactly as it appeared in the text
    pub text:     String,
    /// Dictionary base form
    pub lemma:    String,
    pub is_stop:  bool,
    pub is_punct: bool,
}

impl Token {
    pub fn new(text: impl Into<String>, lemma: impl Into<String>, is_stop: bool, is_punct: bool) -> Self {
        Self {
            text:  text.into(),
            lemma: lemma.into(),
            is_stop,
            is_punct,
        }
    }
}

pub trait Tokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>>;
}

// ─── Stemmer ──────────────────────────────────────────────────────────────────
pub trait Stemmer {
    fn stem(&self, token: &str, language: Language) -> String;
}

// ─── LanguageIdentifier ───────────────────────────────────────────────────────
pub trait LanguageIdentifier {
    /// Predicted ISO 639-3 language code and confidence in [0, 1],
    /// or None when the text gives no usable signal.
    fn classify(&self, text: &str) -> Option<(String, f64)>;
}

// ─── Embedder ─────────────────────────────────────────────────────────────────
pub trait Embedder {
    /// Length of every vector this embedder returns
    fn dims(&self) -> usize;

    fn vector(&self, text: &str) -> Vec<f32>;
}

// ─── Classifier ───────────────────────────────────────────────────────────────
/// A trained model mapping feature rows to class probabilities.
pub trait Classifier {
    fn num_classes(&self) -> usize;

    /// One probability vector (summing to 1) per input row
    fn predict(&self, features: &[Vec<f32>]) -> Result<Vec<Vec<f32>>>;
}

/// Trains a classifier from one-hot labelled vectors.
pub trait ClassifierTrainer {
    type Model: Classifier;

    fn fit(&self, train: &LabeledVectors, validation: &LabeledVectors) -> Result<Self::Model>;
}
