// ============================================================
// Layer 4 — Text Normalizer
// ============================================================
// Turns one raw TSV row into zero or one NormalizedRecord.
//
// Steps (applied in order, any filter may drop the row):
//   1. Structural filter   fewer than 3 fields, or a blank url,
//                          stars or text field → drop
//   2. Field coalescing    fields[2..] joined with one space
//   3. Stars parsing       must be a non-negative integer → drop
//   4. Language filter     optional, drop if not the target
//   5. Repetition collapse "hahaha" → "ha"
//   6. Newlines            replaced by single spaces
//   7. Tokens              tokenize, then per token:
//                            stopword filter
//                            punctuation filter
//                            lemmatize
//                            stem
//                          and drop empty / placeholder tokens
//
// Every transformation flag is independent. When lemmatization
// and stemming are both on, the lemma is what gets stemmed.
//
// Dropped rows are not errors. They are counted per reason in
// NormalizeStats so the caller can report them.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::repetition::RepetitionCollapser;
use crate::domain::language::Language;
use crate::domain::review::{NormalizedRecord, RawRecord};
use crate::domain::traits::{LanguageIdentifier, Stemmer, Tokenizer};

/// Which per-token transformations to apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransformFlags {
    pub stemming:            bool,
    pub lemmatization:       bool,
    pub stopword_removal:    bool,
    pub punctuation_removal: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizerConfig {
    pub flags: TransformFlags,

    /// Run language identification and drop foreign-language reviews.
    /// Expensive, so off by default.
    pub language_filter: bool,

    /// Target language for the filter and the stemmer
    pub language: Language,
}

/// Why a row was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Too few fields, or a blank url / stars / text
    Malformed,
    /// Stars field is not a non-negative integer
    InvalidStars,
    /// Language filter predicted another language
    WrongLanguage,
}

/// Per-run counters, one bucket per rejection reason.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NormalizeStats {
    pub seen:           usize,
    pub kept:           usize,
    pub malformed:      usize,
    pub invalid_stars:  usize,
    pub wrong_language: usize,
}

impl NormalizeStats {
    pub fn dropped(&self) -> usize {
        self.malformed + self.invalid_stars + self.wrong_language
    }

    fn record(&mut self, rejection: Rejection) {
        match rejection {
            Rejection::Malformed     => self.malformed += 1,
            Rejection::InvalidStars  => self.invalid_stars += 1,
            Rejection::WrongLanguage => self.wrong_language += 1,
        }
    }
}

/// The NLP collaborators the normaliser borrows.
#[derive(Clone, Copy)]
pub struct Capabilities<'a> {
    pub tokenizer:   &'a dyn Tokenizer,
    pub stemmer:     &'a dyn Stemmer,
    pub language_id: &'a dyn LanguageIdentifier,
}

pub struct TextNormalizer<'a> {
    config:    NormalizerConfig,
    caps:      Capabilities<'a>,
    collapser: RepetitionCollapser,
}

impl<'a> TextNormalizer<'a> {
    pub fn new(config: NormalizerConfig, caps: Capabilities<'a>) -> Result<Self> {
        let collapser = RepetitionCollapser::new()
            .context("Cannot compile repetition patterns")?;
        Ok(Self { config, caps, collapser })
    }

    /// Normalise one row; `Ok(None)` means the row was dropped.
    pub fn normalize(&self, row: &[String]) -> Result<Option<NormalizedRecord>> {
        Ok(self.normalize_checked(row)?.ok())
    }

    /// Normalise every row, preserving order, and count the drops.
    pub fn normalize_all(&self, rows: &[Vec<String>]) -> Result<(Vec<NormalizedRecord>, NormalizeStats)> {
        let mut stats   = NormalizeStats::default();
        let mut records = Vec::with_capacity(rows.len());

        for row in rows {
            stats.seen += 1;
            match self.normalize_checked(row)? {
                Ok(record) => {
                    stats.kept += 1;
                    records.push(record);
                }
                Err(rejection) => {
                    tracing::debug!("Dropped row {} ({:?})", stats.seen, rejection);
                    stats.record(rejection);
                }
            }
        }

        Ok((records, stats))
    }

    /// Outer Result: capability failure. Inner Result: kept or dropped.
    fn normalize_checked(&self, row: &[String]) -> Result<Result<NormalizedRecord, Rejection>> {
        let raw = match parse_raw_record(row) {
            Ok(raw)        => raw,
            Err(rejection) => return Ok(Err(rejection)),
        };

        if self.config.language_filter && !self.is_target_language(&raw.text) {
            return Ok(Err(Rejection::WrongLanguage));
        }

        let text   = self.clean_text(&raw.text);
        let tokens = self.transform_tokens(&text)?;

        Ok(Ok(NormalizedRecord {
            url:   raw.url,
            stars: raw.stars,
            text,
            tokens,
        }))
    }

    fn is_target_language(&self, text: &str) -> bool {
        match self.caps.language_id.classify(text) {
            Some((code, confidence)) => {
                let keep = code == self.config.language.code();
                if !keep {
                    tracing::debug!("Language '{}' ({:.2}) is not the target", code, confidence);
                }
                keep
            }
            None => false,
        }
    }

    /// Repetition collapse followed by newline normalisation.
    pub fn clean_text(&self, text: &str) -> String {
        normalize_newlines(&self.collapser.collapse(text))
    }

    /// Tokenize `text` and apply the configured transformations.
    pub fn transform_tokens(&self, text: &str) -> Result<Vec<String>> {
        let flags    = self.config.flags;
        let language = self.config.language;
        let tokens   = self.caps.tokenizer.tokenize(text)?;

        let out = tokens
            .into_iter()
            .filter(|t| !(flags.stopword_removal && t.is_stop))
            .filter(|t| !(flags.punctuation_removal && t.is_punct))
            .map(|t| {
                let form = if flags.lemmatization { t.lemma } else { t.text };
                if flags.stemming {
                    self.caps.stemmer.stem(&form, language)
                } else {
                    form
                }
            })
            .filter(|form| !is_placeholder(form))
            .collect();

        Ok(out)
    }
}

/// Structural filter, field coalescing and stars parsing.
pub fn parse_raw_record(row: &[String]) -> Result<RawRecord, Rejection> {
    if row.len() < 3 || row[..3].iter().any(|f| f.trim().is_empty()) {
        return Err(Rejection::Malformed);
    }

    let stars: u32 = row[1]
        .trim()
        .parse()
        .map_err(|_| Rejection::InvalidStars)?;

    let text = if row.len() > 3 {
        row[2..].join(" ")
    } else {
        row[2].clone()
    };

    Ok(RawRecord::new(row[0].trim(), stars, text))
}

/// Every line break becomes exactly one space.
pub fn normalize_newlines(text: &str) -> String {
    text.replace("\r\n", " ").replace(['\n', '\r'], " ")
}

/// Tokens that carry nothing once transformed.
fn is_placeholder(token: &str) -> bool {
    let t = token.trim();
    t.is_empty() || t == "-"
}
