//! Error type definitions for the classifier.

use crate::core::config::ConfigError;
use thiserror::Error;

/// Errors produced while loading the gesture model or running it.
///
/// The three variants callers usually branch on are [`ClassifierError::ModelLoad`]
/// and [`ClassifierError::BackendUnavailable`], both raised during construction,
/// and [`ClassifierError::ModelInference`], raised per call.
#[derive(Error, Debug)]
pub enum ClassifierError {
    /// The model artifact is missing, corrupt, or not a usable ONNX graph.
    #[error("failed to load model '{model_path}': {reason}{suggestion}")]
    ModelLoad {
        /// Path of the model that failed to load.
        model_path: String,
        /// Short description of what went wrong.
        reason: String,
        /// Optional remediation hint, already formatted with a leading separator.
        suggestion: String,
        /// The underlying error, if any.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// None of the requested execution providers could be registered.
    #[error("no execution provider could be initialized (tried: {})", attempts.join("; "))]
    BackendUnavailable {
        /// One entry per provider, formatted as `name: reason`.
        attempts: Vec<String>,
    },

    /// The forward pass or the extraction of its output failed.
    #[error(
        "inference failed for model '{model_name}' during '{operation}' (input shape {input_shape:?}): {context}"
    )]
    ModelInference {
        /// Name of the model being run.
        model_name: String,
        /// Stage of the call that failed (e.g. `forward_pass`).
        operation: String,
        /// Shape of the batch handed to the model.
        input_shape: Vec<usize>,
        /// Free-form context.
        context: String,
        /// The underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Inference error without shape details.
    #[error("inference failed for model '{model_name}': {context}")]
    Inference {
        /// Name of the model being run.
        model_name: String,
        /// Free-form context.
        context: String,
        /// The underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Score decoding failed.
    #[error("post-processing failed: {context}")]
    PostProcessing {
        /// Free-form context.
        context: String,
        /// The underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration validation failed.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Error from tensor operations.
    #[error("tensor operation")]
    Tensor(#[from] ndarray::ShapeError),

    /// IO error.
    #[error("io")]
    Io(#[from] std::io::Error),

    /// Configuration (de)serialization error.
    #[error("serialization")]
    Serialization(#[from] serde_json::Error),
}

impl ClassifierError {
    /// Whether this error was raised while loading the model.
    pub fn is_load_error(&self) -> bool {
        matches!(self, Self::ModelLoad { .. })
    }

    /// Whether this error was raised by a failed forward pass.
    pub fn is_inference_error(&self) -> bool {
        matches!(self, Self::ModelInference { .. } | Self::Inference { .. })
    }
}

/// Lightweight error carrying only a message, for wrapping non-error failures.
#[derive(Debug, Clone)]
pub struct OpaqueError(pub String);

impl std::fmt::Display for OpaqueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for OpaqueError {}

impl OpaqueError {
    /// Creates a new error from any string-like message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}
