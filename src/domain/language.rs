use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::domain::error::PipelineError;

/// Languages the default tokenizer, stemmer and stopword lists support.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    German,
    English,
}

impl Language {
    /// ISO 639-3 code, the form language identifiers report.
    pub fn code(&self) -> &'static str {
        match self {
            Language::German  => "deu",
            Language::English => "eng",
        }
    }
}

impl FromStr for Language {
    type Err = PipelineError;

    /// Accepts ISO 639-1, ISO 639-3 and English names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "de" | "deu" | "ger" | "german"  => Ok(Language::German),
            "en" | "eng" | "english"         => Ok(Language::English),
            other => Err(PipelineError::UnknownLanguage(other.to_string())),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Language::German  => "german",
            Language::English => "english",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_short_and_long_codes() {
        assert_eq!("de".parse::<Language>().unwrap(),      Language::German);
        assert_eq!("DEU".parse::<Language>().unwrap(),     Language::German);
        assert_eq!("english".parse::<Language>().unwrap(), Language::English);
    }

    #[test]
    fn test_unknown_language_is_rejected() {
        assert!(matches!(
            "klingon".parse::<Language>(),
            Err(PipelineError::UnknownLanguage(_))
        ));
    }

    #[test]
    fn test_code_is_iso_639_3() {
        assert_eq!(Language::German.code(), "deu");
        assert_eq!(Language::English.code(), "eng");
    }
}
