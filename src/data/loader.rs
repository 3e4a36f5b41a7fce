// ============================================================
// Layer 4 — Record Parser (TSV Loader)
// ============================================================
// Reads a delimited text file into raw rows of string fields.
//
// Input format (one review per line):
//   url<TAB>stars<TAB>review text
//
// The review text may itself contain the delimiter, so rows are
// read "flexibly" (any number of fields) and quote characters
// are NOT interpreted: a review like  So "toll" war es  must
// survive unchanged. Joining the extra fields back together is
// the normaliser's job, not ours.
//
// Any I/O or decoding problem is fatal and surfaced immediately.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::domain::error::PipelineError;
use crate::domain::traits::RecordSource;

/// Loads raw rows from a delimited file.
/// Implements the RecordSource trait from Layer 3.
#[derive(Debug, Clone)]
pub struct TsvLoader {
    path:      PathBuf,
    delimiter: u8,
    encoding:  String,
}

impl TsvLoader {
    /// Tab-delimited, UTF-8 loader for `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path:      path.into(),
            delimiter: b'\t',
            encoding:  "utf-8".to_string(),
        }
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_encoding(mut self, encoding: impl Into<String>) -> Self {
        self.encoding = encoding.into();
        self
    }
}

impl RecordSource for TsvLoader {
    fn load_rows(&self) -> Result<Vec<Vec<String>>> {
        load_rows(&self.path, self.delimiter, &self.encoding)
    }
}

/// Split every line of `path` on `delimiter`.
pub fn load_rows(path: &Path, delimiter: u8, encoding: &str) -> Result<Vec<Vec<String>>> {
    check_encoding(encoding)?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_path(path)
        .with_context(|| format!("Cannot open '{}'", path.display()))?;

    let mut rows: Vec<Vec<String>> = Vec::new();

    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| {
            format!(
                "Cannot decode line {} of '{}' as {}",
                line + 1,
                path.display(),
                encoding
            )
        })?;

        rows.push(record.iter().map(str::to_string).collect());
    }

    // A UTF-8 byte order mark would otherwise stick to the first url
    if let Some(first) = rows.first_mut().and_then(|row| row.first_mut()) {
        if let Some(stripped) = first.strip_prefix('\u{feff}') {
            *first = stripped.to_string();
        }
    }

    tracing::debug!("Read {} raw rows from '{}'", rows.len(), path.display());
    Ok(rows)
}

fn check_encoding(encoding: &str) -> Result<(), PipelineError> {
    match encoding.trim().to_lowercase().as_str() {
        "utf-8" | "utf8" => Ok(()),
        other => Err(PipelineError::UnsupportedEncoding(other.to_string())),
    }
}
