//! Configuration management for the classifier.
//!
//! This module provides configuration types, validation traits, and the
//! ONNX Runtime session options shared by every inference builder.

pub mod builder;
pub mod errors;
pub mod onnx;

// Re-export commonly used types
pub use builder::ModelInferenceConfig;
pub use errors::{ConfigError, ConfigValidator, ConfigValidatorExt};
pub use onnx::*;
