// ============================================================
// Layer 4 — Repetition Collapser
// ============================================================
// Some reviews are nothing but one fragment typed over and over:
//
//   "hahahaha"            → "ha"
//   "super super"         → "super"
//   "hallo, hallo"        → "hallo"
//
// The whole string must be the fragment repeated. Up to two
// filler characters may sit after the first occurrence only,
// so "lol lol lol" is left alone. Text with no such
// structure ("wunderbar") passes through unchanged.
//
// Two passes:
//   1. DETECT   ^(.+?).{0,2}\1+?$      cheap yes/no check
//   2. EXTRACT  ^(.+?)(.{0,2}\1)+?$    capture the shortest prefix
//
// Both need backreferences, which the `regex` crate does not
// support, so this uses fancy-regex's backtracking engine. The
// extraction pass only runs when detection says there is
// something to extract.
//
// The lazy prefix makes the result the SHORTEST fragment that
// reproduces the text, so collapsing is idempotent:
//   collapse(collapse(s)) == collapse(s)

use fancy_regex::Regex;

const DETECT_PATTERN:  &str = r"^(.+?).{0,2}\1+?$";
const EXTRACT_PATTERN: &str = r"^(.+?)(.{0,2}\1)+?$";

#[derive(Debug, Clone)]
pub struct RepetitionCollapser {
    detect:  Regex,
    extract: Regex,
}

impl RepetitionCollapser {
    pub fn new() -> Result<Self, fancy_regex::Error> {
        Ok(Self {
            detect:  Regex::new(DETECT_PATTERN)?,
            extract: Regex::new(EXTRACT_PATTERN)?,
        })
    }

    /// Returns the repeated fragment, or `text` unchanged.
    ///
    /// If the backtracking engine hits its limit on a very long
    /// input the text is treated as non-repetitive.
    pub fn collapse(&self, text: &str) -> String {
        match self.detect.is_match(text) {
            Ok(true)  => {}
            Ok(false) => return text.to_string(),
            Err(e) => {
                tracing::debug!("Repetition check skipped ({} chars): {e}", text.len());
                return text.to_string();
            }
        }

        match self.extract.captures(text) {
            Ok(Some(caps)) => caps
                .get(1)
                .map(|m| m.as_str().to_string())
                .unwrap_or_else(|| text.to_string()),
            Ok(None) => text.to_string(),
            Err(e) => {
                tracing::debug!("Repetition extraction skipped ({} chars): {e}", text.len());
                text.to_string()
            }
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn collapser() -> RepetitionCollapser {
        RepetitionCollapser::new().unwrap()
    }

    #[test]
    fn test_collapses_laughter() {
        assert_eq!(collapser().collapse("hahaha"), "ha");
    }

    #[test]
    fn test_collapses_with_filler_after_first_fragment() {
        let c = collapser();
        assert_eq!(c.collapse("super super"), "super");
        assert_eq!(c.collapse("hallo, hallo"), "hallo");
        assert_eq!(c.collapse("abcabcabc"), "abc");
    }

    #[test]
    fn test_filler_between_later_repeats_blocks_collapse() {
        let c = collapser();
        assert_eq!(c.collapse("lol lol lol"), "lol lol lol");
        assert_eq!(c.collapse("gut, gut, gut"), "gut, gut, gut");
    }

    #[test]
    fn test_single_character_runs() {
        assert_eq!(collapser().collapse("aaaaaa"), "a");
    }

    #[test]
    fn test_plain_text_is_unchanged() {
        let c = collapser();
        assert_eq!(c.collapse("wunderbar"), "wunderbar");
        assert_eq!(c.collapse("Das war super super toll"), "Das war super super toll");
        assert_eq!(c.collapse(""), "");
        assert_eq!(c.collapse("x"), "x");
    }

    #[test]
    fn test_trailing_garbage_blocks_collapse() {
        // The repetition has to cover the whole string
        assert_eq!(collapser().collapse("abab!!!"), "abab!!!");
    }

    #[test]
    fn test_collapse_is_idempotent() {
        let c = collapser();
        let inputs = [
            "hahaha",
            "lol lol lol",
            "abcabcabc",
            "aaaa",
            "wunderbar",
            "super super",
            "nein nein nein nein!",
            "",
            "Ein ganz normaler Satz.",
        ];
        for s in inputs {
            let once  = c.collapse(s);
            let twice = c.collapse(&once);
            assert_eq!(once, twice, "not idempotent for {s:?}");
        }
    }
}
