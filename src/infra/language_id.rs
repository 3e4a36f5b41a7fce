// Language identification capability backed by whatlang.
//
// whatlang reports ISO 639-3 codes ("deu", "eng", ...), the same
// form Language::code() uses, so the normaliser can compare them
// directly.

use crate::domain::traits::LanguageIdentifier;

#[derive(Debug, Clone, Copy, Default)]
pub struct WhatlangIdentifier;

impl WhatlangIdentifier {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageIdentifier for WhatlangIdentifier {
    fn classify(&self, text: &str) -> Option<(String, f64)> {
        whatlang::detect(text).map(|info| (info.lang().code().to_string(), info.confidence()))
    }
}
