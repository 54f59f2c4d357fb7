//! Helper constructors for [`ClassifierError`].
//!
//! ```rust
//! use point_history_classifier::core::ClassifierError;
//!
//! let error = ClassifierError::model_load_error(
//!     "model/point_history_classifier.onnx",
//!     "file not found",
//!     Some("check the model path"),
//!     None::<std::io::Error>,
//! );
//! assert!(error.is_load_error());
//! ```

use super::types::{ClassifierError, OpaqueError};

/// Builder for composing detailed `ModelInference` errors without duplicating boilerplate.
#[derive(Clone, Debug)]
pub struct ModelInferenceErrorBuilder {
    model_name: String,
    operation: String,
    input_shape: Vec<usize>,
    context: String,
}

impl ModelInferenceErrorBuilder {
    /// Creates a new builder with the required model metadata.
    pub fn new(model_name: impl Into<String>, operation: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            operation: operation.into(),
            input_shape: Vec::new(),
            context: String::new(),
        }
    }

    /// Stores the input tensor shape for contextual debugging.
    pub fn input_shape(mut self, shape: &[usize]) -> Self {
        self.input_shape = shape.to_vec();
        self
    }

    /// Adds free-form context to the error message.
    pub fn context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    /// Consumes the builder and produces the final `ClassifierError`.
    pub fn build(self, error: impl std::error::Error + Send + Sync + 'static) -> ClassifierError {
        ClassifierError::ModelInference {
            model_name: self.model_name,
            operation: self.operation,
            input_shape: self.input_shape,
            context: self.context,
            source: Box::new(error),
        }
    }
}

impl ClassifierError {
    /// Creates an error for a model that could not be loaded.
    ///
    /// # Arguments
    ///
    /// * `model_path` - Path of the model.
    /// * `reason` - Short description of the failure.
    /// * `suggestion` - Optional remediation hint appended to the message.
    /// * `source` - Optional underlying error.
    pub fn model_load_error(
        model_path: impl AsRef<std::path::Path>,
        reason: impl Into<String>,
        suggestion: Option<&str>,
        source: Option<impl std::error::Error + Send + Sync + 'static>,
    ) -> Self {
        let suggestion = suggestion
            .map(|s| format!("; suggested fix: {}", s))
            .unwrap_or_default();
        Self::ModelLoad {
            model_path: model_path.as_ref().display().to_string(),
            reason: reason.into(),
            suggestion,
            source: source.map(|e| Box::new(e) as _),
        }
    }

    /// Creates an error reporting that every requested execution provider failed.
    ///
    /// Each attempt is a `(provider name, reason)` pair, in the order tried.
    pub fn backend_unavailable<N, R>(attempts: impl IntoIterator<Item = (N, R)>) -> Self
    where
        N: std::fmt::Display,
        R: std::fmt::Display,
    {
        Self::BackendUnavailable {
            attempts: attempts
                .into_iter()
                .map(|(name, reason)| format!("{name}: {reason}"))
                .collect(),
        }
    }

    /// Creates an error for a failed inference step with detailed context.
    ///
    /// # Arguments
    ///
    /// * `model_name` - The name of the model where inference failed.
    /// * `operation` - The operation that failed.
    /// * `input_shape` - The shape of the input tensor.
    /// * `context` - Additional context about the error.
    /// * `error` - The underlying error that caused this error.
    pub fn model_inference_error(
        model_name: &str,
        operation: &str,
        input_shape: &[usize],
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::model_inference_error_builder(model_name, operation)
            .input_shape(input_shape)
            .context(context)
            .build(error)
    }

    /// Creates a builder for constructing model inference errors with optional context pieces.
    pub fn model_inference_error_builder(
        model_name: impl Into<String>,
        operation: impl Into<String>,
    ) -> ModelInferenceErrorBuilder {
        ModelInferenceErrorBuilder::new(model_name, operation)
    }

    /// Creates an inference error with model context but no shape details.
    pub fn inference_error(
        model_name: &str,
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Inference {
            model_name: model_name.to_string(),
            context: context.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates an error for score decoding.
    pub fn post_processing(
        context: &str,
        error: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::PostProcessing {
            context: context.to_string(),
            source: Box::new(error),
        }
    }

    /// Creates a post-processing error from a plain message.
    pub fn post_processing_message(message: impl Into<String>) -> Self {
        let message = message.into();
        Self::post_processing(&message, OpaqueError::new("score decoding failed"))
    }
}
