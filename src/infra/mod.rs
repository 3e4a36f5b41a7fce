// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// Persistence and the concrete NLP capabilities:
//
//   dataset_store.rs — preprocessed dataset ⇄ JSON
//   vector_store.rs  — review vectors ⇄ .npz archive
//   checkpoint.rs    — classifier weights and configs
//   metrics.rs       — per-epoch CSV log
//
//   tokenizer.rs     — Tokenizer (HuggingFace pre-tokenizer,
//                      stopwords, optional lemma table)
//   stopwords.rs     — built-in German / English stopwords
//   stemmer.rs       — Stemmer (Snowball)
//   language_id.rs   — LanguageIdentifier (whatlang)
//   embedder.rs      — Embedder (signed feature hashing)
//
// Everything here implements a trait from the domain layer or
// reads/writes a file, so other layers stay I/O-free and can be
// tested with mocks.

/// Preprocessed dataset JSON persistence
pub mod dataset_store;

/// Dense review vectors in numpy .npz format
pub mod vector_store;

/// Model checkpoint saving and loading
pub mod checkpoint;

/// Training metrics CSV logger
pub mod metrics;

/// Default tokenizer capability
pub mod tokenizer;

pub mod stopwords;

pub mod stemmer;

pub mod language_id;

pub mod embedder;
