//! Error types for the classifier.
//!
//! Construction failures surface as [`ClassifierError::ModelLoad`] or
//! [`ClassifierError::BackendUnavailable`]; forward-pass failures as
//! [`ClassifierError::ModelInference`]. Helper constructors live in
//! [`constructors`].

pub mod constructors;
pub mod types;

pub use constructors::ModelInferenceErrorBuilder;
pub use types::{ClassifierError, OpaqueError};

/// Convenient result alias for classifier operations.
pub type ClassifierResult<T> = Result<T, ClassifierError>;
