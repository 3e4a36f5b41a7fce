// ============================================================
// Layer 6 — Word Tokenizer
// ============================================================
// Default Tokenizer capability, built on the HuggingFace
// `tokenizers` Whitespace pre-tokenizer (pattern \w+|[^\w\s]+):
//
//   "Ein Film, der überzeugt!"
//     → ["Ein", "Film", ",", "der", "überzeugt", "!"]
//
// Each piece becomes a Token with:
//   lemma     lemma-table entry for the lowercase form, or the
//             lowercase form itself when the table has none
//   is_stop   lowercase form is in the language's stopword list
//   is_punct  no alphanumeric character at all
//
// Lemma tables are plain text, one `form<TAB>lemma` pair per
// line; blank lines and lines starting with '#' are skipped.

use anyhow::{Context, Result};
use std::{
    collections::{HashMap, HashSet},
    fs,
    path::Path,
};
use tokenizers::pre_tokenizers::whitespace::Whitespace;
use tokenizers::{OffsetReferential, OffsetType, PreTokenizedString, PreTokenizer};

use crate::domain::language::Language;
use crate::domain::traits::{Token, Tokenizer};
use crate::infra::stopwords;

pub struct WordTokenizer {
    pre_tokenizer: Whitespace,
    stopwords:     HashSet<String>,
    lemmas:        HashMap<String, String>,
}

impl WordTokenizer {
    /// Tokenizer with the built-in stopwords for `language` and no lemma table
    pub fn new(language: Language) -> Self {
        Self {
            pre_tokenizer: Whitespace::default(),
            stopwords:     stopwords::for_language(language),
            lemmas:        HashMap::new(),
        }
    }

    pub fn with_lemmas(mut self, lemmas: HashMap<String, String>) -> Self {
        self.lemmas = lemmas;
        self
    }

    /// Read a `form<TAB>lemma` table; forms are lowercased.
    pub fn load_lemma_table(path: &Path) -> Result<HashMap<String, String>> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Cannot read lemma table '{}'", path.display()))?;

        let mut lemmas = HashMap::new();
        for (n, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.split_once('\t') {
                Some((form, lemma)) if !form.trim().is_empty() && !lemma.trim().is_empty() => {
                    lemmas.insert(form.trim().to_lowercase(), lemma.trim().to_string());
                }
                _ => tracing::warn!("Skipping malformed lemma table line {}: '{}'", n + 1, line),
            }
        }

        tracing::info!("Loaded {} lemma entries from '{}'", lemmas.len(), path.display());
        Ok(lemmas)
    }

    fn make_token(&self, piece: &str) -> Token {
        let lower    = piece.to_lowercase();
        let is_punct = !piece.chars().any(char::is_alphanumeric);
        let is_stop  = self.stopwords.contains(&lower);
        let lemma    = self.lemmas.get(&lower).cloned().unwrap_or(lower);
        Token::new(piece, lemma, is_stop, is_punct)
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize(&self, text: &str) -> Result<Vec<Token>> {
        let mut pretokenized = PreTokenizedString::from(text);
        self.pre_tokenizer
            .pre_tokenize(&mut pretokenized)
            .map_err(|e| anyhow::anyhow!("Pre-tokenisation error: {e}"))?;

        let tokens = pretokenized
            .get_splits(OffsetReferential::Original, OffsetType::Char)
            .into_iter()
            .map(|(piece, _, _)| self.make_token(piece))
            .collect();

        Ok(tokens)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn texts(tokens: &[Token]) -> Vec<&str> {
        tokens.iter().map(|t| t.text.as_str()).collect()
    }

    #[test]
    fn test_splits_words_and_punctuation() {
        let tok    = WordTokenizer::new(Language::German);
        let tokens = tok.tokenize("Ein Film, der überzeugt!").unwrap();
        assert_eq!(texts(&tokens), vec!["Ein", "Film", ",", "der", "überzeugt", "!"]);
    }

    #[test]
    fn test_flags_stopwords_and_punctuation() {
        let tok    = WordTokenizer::new(Language::German);
        let tokens = tok.tokenize("Der Film !").unwrap();
        assert!(tokens[0].is_stop);
        assert!(!tokens[1].is_stop);
        assert!(tokens[2].is_punct);
        assert!(!tokens[1].is_punct);
    }

    #[test]
    fn test_lemma_defaults_to_lowercase() {
        let tok    = WordTokenizer::new(Language::German);
        let tokens = tok.tokenize("Schauspieler").unwrap();
        assert_eq!(tokens[0].lemma, "schauspieler");
        assert_eq!(tokens[0].text, "Schauspieler");
    }

    #[test]
    fn test_lemma_table_lookup() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("lemmas.tsv");
        fs::write(&path, "# form\tlemma\nFilme\tFilm\nwar\tsein\nbroken line\n").unwrap();

        let lemmas = WordTokenizer::load_lemma_table(&path).unwrap();
        assert_eq!(lemmas.len(), 2);

        let tok    = WordTokenizer::new(Language::German).with_lemmas(lemmas);
        let tokens = tok.tokenize("Die Filme war").unwrap();
        assert_eq!(tokens[1].lemma, "Film");
        assert_eq!(tokens[2].lemma, "sein");
    }

    #[test]
    fn test_empty_text_gives_no_tokens() {
        let tok = WordTokenizer::new(Language::English);
        assert!(tok.tokenize("   ").unwrap().is_empty());
    }
}
