// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums and traits that describe what a
// review record IS and which capabilities the pipeline needs.
//
// Rules for this layer:
//   - NO Burn framework types allowed here
//   - NO file I/O
//   - Only plain Rust structs, enums, and traits
//
// The NLP collaborators (tokenizer, stemmer, language id,
// embedder, classifier) are described here as traits. Concrete
// implementations live in `infra` and `ml`, and tests swap in
// small mocks.

// Raw, normalised and encoded review records
pub mod review;

// Target language of the corpus
pub mod language;

// Labelled pipeline errors
pub mod error;

// Capability traits implemented by other layers
pub mod traits;
