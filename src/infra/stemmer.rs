// Snowball stemmer capability (rust-stemmers).
//
// Snowball expects lowercase input, so tokens are lowercased
// before stemming. One stemmer per supported language is built
// up front.

use rust_stemmers::{Algorithm, Stemmer as Snowball};

use crate::domain::language::Language;
use crate::domain::traits::Stemmer;

pub struct SnowballStemmer {
    german:  Snowball,
    english: Snowball,
}

impl SnowballStemmer {
    pub fn new() -> Self {
        Self {
            german:  Snowball::create(Algorithm::German),
            english: Snowball::create(Algorithm::English),
        }
    }
}

impl Default for SnowballStemmer {
    fn default() -> Self {
        Self::new()
    }
}

impl Stemmer for SnowballStemmer {
    fn stem(&self, token: &str, language: Language) -> String {
        let stemmer = match language {
            Language::German  => &self.german,
            Language::English => &self.english,
        };
        stemmer.stem(&token.to_lowercase()).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_german_suffixes() {
        let s = SnowballStemmer::new();
        assert_eq!(s.stem("Filme", Language::German), "film");
        assert_eq!(s.stem("laufen", Language::German), "lauf");
    }

    #[test]
    fn test_english_suffixes() {
        let s = SnowballStemmer::new();
        assert_eq!(s.stem("running", Language::English), "run");
    }

    #[test]
    fn test_stemming_is_stable_on_stems() {
        let s    = SnowballStemmer::new();
        let once = s.stem("Filme", Language::German);
        assert_eq!(s.stem(&once, Language::German), once);
    }
}
