//! Structures and helpers for ONNX Runtime inference.
//!
//! This module centralizes the low level inference engine: provider selection,
//! the session pool and the 2D forward pass used by the classifier.

pub mod ort_infer;
pub mod session;
#[cfg(test)]
pub(crate) mod test_models;

pub use ort_infer::OrtInfer;
pub use session::load_session;
