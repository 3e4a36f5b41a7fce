// ============================================================
// Layer 6 — Vector Store (.npz)
// ============================================================
// One dense vector per review, row i aligned with record i of
// the preprocessed dataset.
//
// On disk this is a numpy .npz archive (a zip of .npy files)
// holding a 2-D array named "vectors". We write it compressed as
// "vectors.npy" so numpy's np.load(...)["vectors"] reads it, and
// we accept either name when reading.
//
// Arrays saved as float64 are accepted and narrowed to f32.

use anyhow::{Context, Result};
use ndarray::Array2;
use ndarray_npy::{NpzReader, NpzWriter};
use std::{fs::File, path::Path};

use crate::domain::error::PipelineError;

/// Name of the array holding the review vectors
pub const VECTORS_ARRAY: &str = "vectors";

#[derive(Debug, Clone, PartialEq)]
pub struct VectorStore {
    vectors: Array2<f32>,
}

impl VectorStore {
    /// Stack equally long rows into a store.
    pub fn from_rows(rows: &[Vec<f32>], dims: usize) -> Result<Self> {
        let mut flat = Vec::with_capacity(rows.len() * dims);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != dims {
                return Err(PipelineError::RaggedVectors {
                    row:      i,
                    found:    row.len(),
                    expected: dims,
                }
                .into());
            }
            flat.extend_from_slice(row);
        }

        let vectors = Array2::from_shape_vec((rows.len(), dims), flat)?;
        Ok(Self { vectors })
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.vectors.nrows()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Width of every row
    pub fn dims(&self) -> usize {
        self.vectors.ncols()
    }

    /// Copy of row `i`. Panics if `i >= len()`.
    pub fn row(&self, i: usize) -> Vec<f32> {
        self.vectors.row(i).to_vec()
    }

    pub fn save_npz(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("Cannot create '{}'", path.display()))?;

        let mut npz = NpzWriter::new_compressed(file);
        npz.add_array(format!("{VECTORS_ARRAY}.npy"), &self.vectors)
            .with_context(|| format!("Cannot write vectors to '{}'", path.display()))?;
        npz.finish()?;

        tracing::debug!(
            "Saved {}×{} vectors to '{}'",
            self.len(),
            self.dims(),
            path.display()
        );
        Ok(())
    }

    pub fn load_npz(path: &Path) -> Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Cannot open vector store '{}'", path.display()))?;
        let mut npz = NpzReader::new(file)
            .with_context(|| format!("'{}' is not an npz archive", path.display()))?;

        let names = npz.names()?;
        let name  = names
            .iter()
            .find(|n| n.trim_end_matches(".npy") == VECTORS_ARRAY)
            .cloned()
            .with_context(|| {
                format!(
                    "'{}' has no '{}' array (found: {})",
                    path.display(),
                    VECTORS_ARRAY,
                    names.join(", ")
                )
            })?;

        let single: Result<Array2<f32>, _> = npz.by_name(&name);
        let vectors = match single {
            Ok(v) => v,
            Err(f32_err) => {
                let double: Array2<f64> = npz.by_name(&name).map_err(|_| f32_err).with_context(|| {
                    format!("'{}' in '{}' is not a 2-D float array", name, path.display())
                })?;
                double.mapv(|v| v as f32)
            }
        };

        tracing::debug!(
            "Loaded {}×{} vectors from '{}'",
            vectors.nrows(),
            vectors.ncols(),
            path.display()
        );
        Ok(Self { vectors })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load_npz() {
        let dir   = tempfile::tempdir().unwrap();
        let path  = dir.path().join("vectors.npz");
        let store = VectorStore::from_rows(&[vec![1.0, 2.0], vec![3.0, 4.0], vec![5.0, 6.0]], 2).unwrap();

        store.save_npz(&path).unwrap();
        let loaded = VectorStore::load_npz(&path).unwrap();

        assert_eq!(loaded, store);
        assert_eq!(loaded.len(), 3);
        assert_eq!(loaded.dims(), 2);
        assert_eq!(loaded.row(2), vec![5.0, 6.0]);
    }

    #[test]
    fn test_float64_arrays_are_narrowed() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("wide.npz");

        let wide = Array2::<f64>::from_shape_vec((2, 2), vec![0.5, 1.5, 2.5, 3.5]).unwrap();
        let mut npz = NpzWriter::new(File::create(&path).unwrap());
        npz.add_array("vectors.npy", &wide).unwrap();
        npz.finish().unwrap();

        let loaded = VectorStore::load_npz(&path).unwrap();
        assert_eq!(loaded.row(1), vec![2.5, 3.5]);
    }

    #[test]
    fn test_missing_vectors_array_is_an_error() {
        let dir  = tempfile::tempdir().unwrap();
        let path = dir.path().join("other.npz");

        let other = Array2::<f32>::zeros((1, 1));
        let mut npz = NpzWriter::new(File::create(&path).unwrap());
        npz.add_array("embeddings.npy", &other).unwrap();
        npz.finish().unwrap();

        let err = VectorStore::load_npz(&path).unwrap_err();
        assert!(err.to_string().contains("no 'vectors' array"));
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let err = VectorStore::from_rows(&[vec![1.0, 2.0], vec![3.0]], 2).unwrap_err();
        assert_eq!(
            err.downcast_ref::<PipelineError>(),
            Some(&PipelineError::RaggedVectors { row: 1, found: 1, expected: 2 })
        );
    }
}
