// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// One use case per pipeline stage. Each one orchestrates the
// other layers and does no work of its own:
//
//   preprocess — raw TSV → normalised JSON
//   embed      — normalised JSON → .npz vector store
//   train      — JSON + vectors → split, encode, train, test
//   predict    — free text → rating probabilities
//
// Rules for this layer:
//   - No ML math or model code here
//   - No printing here (that's Layer 1)
//   - File formats belong to Layer 4 and 6
//
// Reference: Clean Architecture pattern

pub mod preprocess_use_case;

pub mod embed_use_case;

// The training workflow
pub mod train_use_case;

pub mod predict_use_case;
