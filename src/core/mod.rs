//! The core module of the classifier.
//!
//! This module contains the building blocks the predictor is assembled from:
//! - Tensor aliases
//! - Configuration management
//! - Error handling
//! - Inference engine integration
//!
//! It also provides re-exports of commonly used types and functions for convenience.

pub mod batch;
pub mod config;
pub mod errors;
pub mod inference;

pub use batch::{IndexVector, Tensor2D, TensorView2};
pub use config::{
    ConfigError, ConfigValidator, ConfigValidatorExt, ModelInferenceConfig, OrtExecutionProvider,
    OrtGraphOptimizationLevel, OrtSessionConfig,
};
pub use errors::{ClassifierError, ClassifierResult};
pub use inference::{OrtInfer, load_session};

/// Initializes the tracing subscriber for logging.
///
/// This function sets up the tracing subscriber with environment filter and formatting layer.
/// It's typically called at the start of an application to enable logging.
pub fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer())
        .init();
}
