use super::*;
use crate::core::config::{ConfigValidator, ModelInferenceConfig, OrtSessionConfig};
use crate::core::inference::session;
use std::path::Path;
use tracing::info;

impl OrtInfer {
    /// Creates a new OrtInfer instance on the CPU provider with default session settings.
    pub fn new(model_path: impl AsRef<Path>) -> Result<Self, ClassifierError> {
        let config = ModelInferenceConfig::with_model_path(model_path.as_ref())
            .execution_providers(vec![OrtExecutionProvider::CPU]);
        Self::from_config(&config, model_path)
    }

    /// Creates a new OrtInfer instance from ModelInferenceConfig, applying ORT session
    /// configuration and constructing a session pool for concurrent predictions.
    ///
    /// The first session walks the execution provider list; the rest of the pool
    /// reuses whichever provider that session ended up on.
    pub fn from_config(
        common: &ModelInferenceConfig,
        model_path: impl AsRef<Path>,
    ) -> Result<Self, ClassifierError> {
        let path = model_path.as_ref();
        common.validate()?;
        session::ensure_model_file(path)?;

        let session_config = common.ort_session.clone().unwrap_or_default();
        let providers = common.effective_execution_providers();
        let base = session::base_builder(path, &session_config)?;

        let (first, active_provider) = session::commit_with_fallback(path, &base, &providers)?;
        let (input_names, input_shapes, output_names) = Self::read_metadata(&first, path)?;

        let pool_size = common.effective_pool_size();
        let mut sessions = Vec::with_capacity(pool_size);
        sessions.push(Mutex::new(first));
        let selected = [active_provider.clone()];
        for _ in 1..pool_size {
            let (session, _) = session::commit_with_fallback(path, &base, &selected)?;
            sessions.push(Mutex::new(session));
        }

        let model_name = common
            .model_name
            .clone()
            .or_else(|| {
                path.file_stem()
                    .and_then(|s| s.to_str())
                    .map(|s| s.to_string())
            })
            .unwrap_or_else(|| "unknown_model".to_string());

        info!(
            model = %model_name,
            provider = active_provider.name(),
            pool_size,
            inputs = ?input_names,
            input_shapes = ?input_shapes,
            outputs = ?output_names,
            "model loaded"
        );

        Ok(OrtInfer {
            sessions,
            next_idx: std::sync::atomic::AtomicUsize::new(0),
            input_names,
            input_shapes,
            output_names,
            active_provider,
            model_path: path.to_path_buf(),
            model_name,
        })
    }

    /// Creates a new OrtInfer instance from bare session options.
    pub fn with_session_config(
        model_path: impl AsRef<Path>,
        session_config: OrtSessionConfig,
    ) -> Result<Self, ClassifierError> {
        let config = ModelInferenceConfig::new().ort_session(session_config);
        Self::from_config(&config, model_path)
    }
}
