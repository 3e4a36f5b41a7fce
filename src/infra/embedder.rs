// ============================================================
// Layer 6 — Hashing Embedder
// ============================================================
// Default Embedder capability: a signed feature-hashing bag of
// words, L2-normalised.
//
//   word → sha256(lowercase word) → first 8 bytes as u64 h
//   bucket = h % dims,  sign = top bit of h ? -1 : +1
//
// SHA-256 keeps the vectors identical across runs, platforms
// and Rust versions, which std's hasher does not promise.

use sha2::{Digest, Sha256};

use crate::domain::traits::Embedder;

pub const DEFAULT_DIMS: usize = 300;

#[derive(Debug, Clone, Copy)]
pub struct HashingEmbedder {
    dims: usize,
}

impl HashingEmbedder {
    /// `dims` is raised to at least 1
    pub fn new(dims: usize) -> Self {
        Self { dims: dims.max(1) }
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(DEFAULT_DIMS)
    }
}

impl Embedder for HashingEmbedder {
    fn dims(&self) -> usize {
        self.dims
    }

    fn vector(&self, text: &str) -> Vec<f32> {
        let mut v = vec![0.0f32; self.dims];

        for word in text.split_whitespace() {
            let lower = word.to_lowercase();
            let w     = lower.trim_matches(|c: char| !c.is_alphanumeric());
            if w.is_empty() {
                continue;
            }

            let digest = Sha256::digest(w.as_bytes());
            let mut head = [0u8; 8];
            head.copy_from_slice(&digest[..8]);
            let h = u64::from_le_bytes(head);

            let bucket = (h % self.dims as u64) as usize;
            let sign   = if h >> 63 == 0 { 1.0 } else { -1.0 };
            v[bucket] += sign;
        }

        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            v.iter_mut().for_each(|x| *x /= norm);
        }
        v
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vector_has_requested_width() {
        let e = HashingEmbedder::new(64);
        assert_eq!(e.dims(), 64);
        assert_eq!(e.vector("ein guter film").len(), 64);
    }

    #[test]
    fn test_vectors_are_unit_length() {
        let v    = HashingEmbedder::new(32).vector("spannend lustig traurig");
        let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
        assert!((norm - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_case_and_edge_punctuation_are_ignored() {
        let e = HashingEmbedder::new(128);
        assert_eq!(e.vector("Toll!"), e.vector("toll"));
    }

    #[test]
    fn test_empty_text_gives_zero_vector() {
        let v = HashingEmbedder::new(8).vector("  ... ");
        assert!(v.iter().all(|&x| x == 0.0));
    }

    #[test]
    fn test_zero_dims_is_raised_to_one() {
        assert_eq!(HashingEmbedder::new(0).dims(), 1);
    }
}
