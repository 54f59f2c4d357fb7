//! Model loading configuration shared by inference builders.

use super::errors::{ConfigError, ConfigValidator};
use super::onnx::{OrtExecutionProvider, OrtSessionConfig};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for loading a model into an ONNX Runtime session pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInferenceConfig {
    /// The path to the model file (optional until build time). Local files only.
    pub model_path: Option<PathBuf>,
    /// The name of the model, used in logs and errors (optional).
    pub model_name: Option<String>,
    /// ONNX Runtime session configuration for this model (optional)
    #[serde(default)]
    pub ort_session: Option<OrtSessionConfig>,
    /// Number of sessions to keep for concurrent callers (>=1).
    /// If None, defaults to 1 (single session)
    #[serde(default)]
    pub session_pool_size: Option<usize>,
}

impl ModelInferenceConfig {
    /// Creates a new configuration with a single-session pool and no model path.
    pub fn new() -> Self {
        Self {
            model_path: None,
            model_name: None,
            ort_session: None,
            session_pool_size: Some(1),
        }
    }

    /// Creates a new configuration pointing at `model_path`.
    pub fn with_model_path(model_path: impl Into<PathBuf>) -> Self {
        Self::new().model_path(model_path)
    }

    /// Sets the model path.
    pub fn model_path(mut self, model_path: impl Into<PathBuf>) -> Self {
        self.model_path = Some(model_path.into());
        self
    }

    /// Sets the model name.
    pub fn model_name(mut self, model_name: impl Into<String>) -> Self {
        self.model_name = Some(model_name.into());
        self
    }

    /// Sets the ONNX Runtime session configuration.
    pub fn ort_session(mut self, config: OrtSessionConfig) -> Self {
        self.ort_session = Some(config);
        self
    }

    /// Sets the session pool size (minimum 1).
    pub fn session_pool_size(mut self, size: usize) -> Self {
        self.session_pool_size = Some(size);
        self
    }

    /// Replaces the execution provider preference list, keeping other session options.
    pub fn execution_providers(mut self, providers: Vec<OrtExecutionProvider>) -> Self {
        let session = self.ort_session.take().unwrap_or_default();
        self.ort_session = Some(session.with_execution_providers(providers));
        self
    }

    /// The execution providers that will be tried, in order.
    pub fn effective_execution_providers(&self) -> Vec<OrtExecutionProvider> {
        self.ort_session
            .as_ref()
            .map(OrtSessionConfig::get_execution_providers)
            .unwrap_or_else(OrtExecutionProvider::default_preference)
    }

    /// Effective pool size, never below 1.
    pub fn effective_pool_size(&self) -> usize {
        self.session_pool_size.unwrap_or(1).max(1)
    }
}

impl Default for ModelInferenceConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigValidator for ModelInferenceConfig {
    /// Checks pool size, thread counts and the provider list.
    ///
    /// The model path is not checked here; a missing file is reported as a
    /// model load failure when the session is created.
    fn validate(&self) -> Result<(), ConfigError> {
        if let Some(size) = self.session_pool_size {
            self.validate_positive_usize(size, "session_pool_size")?;
        }

        if let Some(session) = &self.ort_session {
            if let Some(intra) = session.intra_threads {
                self.validate_thread_count(intra)?;
            }
            if let Some(inter) = session.inter_threads {
                self.validate_thread_count(inter)?;
            }
            if let Some(level) = session.log_severity_level {
                if !(0..=4).contains(&level) {
                    return Err(ConfigError::InvalidConfig {
                        message: format!(
                            "log_severity_level must be between 0 and 4, got {level}"
                        ),
                    });
                }
            }
            if matches!(&session.execution_providers, Some(providers) if providers.is_empty()) {
                return Err(ConfigError::InvalidConfig {
                    message: "execution provider list must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }

    fn get_defaults() -> Self {
        Self::new()
    }
}
