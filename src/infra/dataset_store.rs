// ============================================================
// Layer 6 — Preprocessed Dataset Store
// ============================================================
// Persists the normaliser's output as one JSON object:
//
//   {
//     "url":              ["http://a", ...],
//     "text_transformed": [["super", "film"], ...],
//     "text":             ["Super Film!", ...],
//     "stars":            [5, ...]
//   }
//
// Column alignment is checked on save AND on load, so a file
// edited by hand cannot slip misaligned rows into training.

use anyhow::{Context, Result};
use std::{fs, path::Path};

use crate::data::dataset::PreprocessedDataset;

pub fn save_preprocessed(path: &Path, data: &PreprocessedDataset) -> Result<()> {
    data.validate()?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Cannot create directory '{}'", parent.display()))?;
    }

    let json = serde_json::to_string(data)?;
    fs::write(path, json)
        .with_context(|| format!("Cannot write preprocessed data to '{}'", path.display()))?;

    tracing::debug!("Saved {} preprocessed records to '{}'", data.len(), path.display());
    Ok(())
}

pub fn load_preprocessed(path: &Path) -> Result<PreprocessedDataset> {
    let json = fs::read_to_string(path).with_context(|| {
        format!(
            "Cannot read preprocessed data from '{}'. Have you run 'preprocess' first?",
            path.display()
        )
    })?;

    let data: PreprocessedDataset = serde_json::from_str(&json)
        .with_context(|| format!("'{}' is not a preprocessed dataset", path.display()))?;
    data.validate()?;

    Ok(data)
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::PipelineError;
    use crate::domain::review::NormalizedRecord;

    fn sample() -> PreprocessedDataset {
        PreprocessedDataset::from_records(vec![NormalizedRecord {
            url:    "http://a".to_string(),
            stars:  4,
            text:   "Gute Unterhaltung".to_string(),
            tokens: vec!["gut".to_string(), "unterhaltung".to_string()],
        }])
    }

    #[test]
    fn test_save_then_load() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("preprocessed_data.json");

        save_preprocessed(&path, &sample()).unwrap();
        assert_eq!(load_preprocessed(&path).unwrap(), sample());
    }

    #[test]
    fn test_reads_plain_json_layout() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.json");
        fs::write(
            &path,
            r#"{"url":["u1","u2"],"text_transformed":[["a"],[]],"text":["A","B"],"stars":[1,5]}"#,
        )
        .unwrap();

        let data = load_preprocessed(&path).unwrap();
        assert_eq!(data.len(), 2);
        assert!(data.tokens[1].is_empty());
        assert_eq!(data.stars, vec![1, 5]);
    }

    #[test]
    fn test_misaligned_file_is_rejected() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(
            &path,
            r#"{"url":["u1","u2"],"text_transformed":[["a"]],"text":["A","B"],"stars":[1,5]}"#,
        )
        .unwrap();

        let err = load_preprocessed(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PipelineError>(),
            Some(PipelineError::MisalignedColumns { tokens: 1, .. })
        ));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(load_preprocessed(Path::new("/no/such/preprocessed.json")).is_err());
    }
}
