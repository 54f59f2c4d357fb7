//! Point History Classifier
//!
//! This module classifies fingertip point histories into gesture indices.
//!
//! Each input row is a flattened history of 16 normalized `(x, y)` points
//! (32 values). The model scores every gesture class; the row resolves to its
//! top class unless the column-0 score falls below the configured threshold,
//! in which case the configured invalid value is returned instead.

use crate::core::batch::{IndexVector, Tensor2D};
use crate::core::config::{
    ConfigError, ConfigValidator, ConfigValidatorExt, ModelInferenceConfig, OrtExecutionProvider,
    OrtSessionConfig,
};
use crate::core::errors::{ClassifierError, ClassifierResult, OpaqueError};
use crate::core::inference::OrtInfer;
use crate::processors::{DEFAULT_INVALID_VALUE, DEFAULT_SCORE_THRESHOLD, GestureDecoder};
use ndarray::ArrayView2;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Model location used when none is configured.
pub const DEFAULT_MODEL_PATH: &str = "model/point_history_classifier/point_history_classifier.onnx";

/// Number of values in one flattened point history.
pub const POINT_HISTORY_FEATURES: usize = 32;

fn default_score_th() -> f32 {
    DEFAULT_SCORE_THRESHOLD
}

/// Configuration for the point history classifier
///
/// Serialized as one flat JSON object:
///
/// ```json
/// {
///   "model_path": "model/point_history_classifier/point_history_classifier.onnx",
///   "providers": [{"TensorRT": {"fp16_enable": true}}, "CUDAExecutionProvider", "CPU"],
///   "score_th": 0.5,
///   "invalid_value": 0
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PointHistoryClassifierConfig {
    /// Model path, name, session options and pool size.
    #[serde(flatten)]
    pub common: ModelInferenceConfig,
    /// Execution providers in preference order.
    ///
    /// Takes precedence over `ort_session.execution_providers`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub providers: Option<Vec<OrtExecutionProvider>>,
    /// Minimum column-0 score required to keep the top class.
    #[serde(default = "default_score_th")]
    pub score_th: f32,
    /// Value returned for rows that fail the threshold gate.
    #[serde(default)]
    pub invalid_value: i64,
}

impl PointHistoryClassifierConfig {
    pub fn new() -> Self {
        Self {
            common: ModelInferenceConfig::with_model_path(DEFAULT_MODEL_PATH),
            providers: None,
            score_th: DEFAULT_SCORE_THRESHOLD,
            invalid_value: DEFAULT_INVALID_VALUE,
        }
    }

    pub fn with_common(common: ModelInferenceConfig) -> Self {
        Self {
            common,
            ..Self::new()
        }
    }

    /// Parses a configuration from JSON and validates it.
    pub fn from_json_str(json: &str) -> ClassifierResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate_and_wrap()
    }

    /// Reads and parses a JSON configuration file, then validates it.
    pub fn from_json_file(path: impl AsRef<Path>) -> ClassifierResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// The configured model path, or [`DEFAULT_MODEL_PATH`].
    ///
    /// Only local files are supported; URIs are not resolved.
    pub fn model_path(&self) -> PathBuf {
        self.common
            .model_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_MODEL_PATH))
    }

    /// Inference settings with the top-level provider list folded in.
    pub fn inference_config(&self) -> ModelInferenceConfig {
        match &self.providers {
            Some(providers) => self.common.clone().execution_providers(providers.clone()),
            None => self.common.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        ConfigValidator::validate(self)
    }
}

impl Default for PointHistoryClassifierConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigValidator for PointHistoryClassifierConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        self.common.validate()?;
        self.validate_confidence_threshold(self.score_th)?;

        if matches!(&self.providers, Some(providers) if providers.is_empty()) {
            return Err(ConfigError::InvalidConfig {
                message: "providers must not be empty".to_string(),
            });
        }

        Ok(())
    }

    fn get_defaults() -> Self {
        Self::new()
    }
}

/// Gesture classifier over fingertip point histories.
///
/// Holds the loaded model for its whole lifetime. `classify` takes `&self`
/// and the type is `Send + Sync`, so one instance can be shared across
/// threads; calls are spread over the session pool.
///
/// Thresholding is applied to the **column-0** score of each row, not to the
/// winning score. See [`GestureDecoder`] for the exact rule.
#[derive(Debug)]
pub struct PointHistoryClassifier {
    infer: OrtInfer,
    decoder: GestureDecoder,
}

impl PointHistoryClassifier {
    /// Loads the model and selects an execution provider.
    ///
    /// # Errors
    ///
    /// * [`ClassifierError::ModelLoad`] if the model is missing, corrupt,
    ///   rejects the session options or cannot be loaded by any registered
    ///   provider. The model must be a local file.
    /// * [`ClassifierError::BackendUnavailable`] if no provider registers.
    /// * [`ClassifierError::Config`] if the configuration is invalid.
    pub fn new(config: PointHistoryClassifierConfig) -> ClassifierResult<Self> {
        let config = config.validate_and_wrap()?;
        let infer = OrtInfer::from_config(&config.inference_config(), config.model_path())?;
        Ok(Self {
            infer,
            decoder: GestureDecoder::new(config.score_th, config.invalid_value),
        })
    }

    /// Loads the model at `model_path` with default settings.
    pub fn from_path(model_path: impl Into<PathBuf>) -> ClassifierResult<Self> {
        Self::builder().model_path(model_path).build()
    }

    pub fn builder() -> PointHistoryClassifierBuilder {
        PointHistoryClassifierBuilder::new()
    }

    /// Classifies a `[N, 32]` batch of point histories.
    ///
    /// Returns one value per row: the top class index, or the invalid value
    /// when the row's column-0 score is below the threshold. An empty batch
    /// returns an empty vector without running the model.
    pub fn classify(&self, point_history: ArrayView2<'_, f32>) -> ClassifierResult<IndexVector> {
        let batch_size = point_history.nrows();
        debug!(model = %self.infer.model_name(), batch_size, "classify");
        if batch_size == 0 {
            return Ok(IndexVector::zeros(0));
        }

        let scores = self.run(point_history)?;
        self.decoder.decode(scores.view())
    }

    /// Classifies a single flattened point history.
    pub fn classify_single(&self, point_history: &[f32]) -> ClassifierResult<i64> {
        let batch = ArrayView2::from_shape((1, point_history.len()), point_history)?;
        let indices = self.classify(batch)?;
        indices.get(0).copied().ok_or_else(|| {
            ClassifierError::post_processing_message("classifier returned no result for one row")
        })
    }

    /// Runs the model and returns the raw `[N, C]` score matrix.
    ///
    /// An empty batch returns a `[0, 0]` matrix without running the model.
    pub fn predict_scores(&self, point_history: ArrayView2<'_, f32>) -> ClassifierResult<Tensor2D> {
        if point_history.nrows() == 0 {
            return Ok(Tensor2D::zeros((0, 0)));
        }
        self.run(point_history)
    }

    fn run(&self, point_history: ArrayView2<'_, f32>) -> ClassifierResult<Tensor2D> {
        let batch_size = point_history.nrows();
        let scores = self.infer.infer_2d(point_history)?;
        if scores.nrows() != batch_size {
            return Err(ClassifierError::model_inference_error(
                self.infer.model_name(),
                "output_validation",
                point_history.shape(),
                &format!(
                    "model returned {} score rows for a batch of {}",
                    scores.nrows(),
                    batch_size
                ),
                OpaqueError::new("Output batch size mismatch"),
            ));
        }
        Ok(scores)
    }

    pub fn score_threshold(&self) -> f32 {
        self.decoder.score_threshold()
    }

    pub fn invalid_value(&self) -> i64 {
        self.decoder.invalid_value()
    }

    /// The execution provider chosen at construction.
    pub fn active_provider(&self) -> &OrtExecutionProvider {
        self.infer.active_provider()
    }

    pub fn input_names(&self) -> &[String] {
        self.infer.input_names()
    }

    pub fn input_shapes(&self) -> &[Vec<i64>] {
        self.infer.input_shapes()
    }

    pub fn output_names(&self) -> &[String] {
        self.infer.output_names()
    }

    pub fn model_path(&self) -> &Path {
        self.infer.model_path()
    }

    pub fn model_name(&self) -> &str {
        self.infer.model_name()
    }
}

/// Builder for [`PointHistoryClassifier`].
///
/// ```rust,no_run
/// use point_history_classifier::prelude::*;
///
/// let classifier = PointHistoryClassifier::builder()
///     .model_path("model/point_history_classifier/point_history_classifier.onnx")
///     .providers(vec![OrtExecutionProvider::cuda(), OrtExecutionProvider::CPU])
///     .score_th(0.6)
///     .invalid_value(-1)
///     .build()?;
/// # Ok::<(), ClassifierError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct PointHistoryClassifierBuilder {
    config: PointHistoryClassifierConfig,
}

impl PointHistoryClassifierBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: PointHistoryClassifierConfig) -> Self {
        Self { config }
    }

    /// Sets the path of the ONNX file. Only local files are supported.
    pub fn model_path(mut self, model_path: impl Into<PathBuf>) -> Self {
        self.config.common = self.config.common.model_path(model_path);
        self
    }

    pub fn model_name(mut self, model_name: impl Into<String>) -> Self {
        self.config.common = self.config.common.model_name(model_name);
        self
    }

    pub fn providers(mut self, providers: Vec<OrtExecutionProvider>) -> Self {
        self.config.providers = Some(providers);
        self
    }

    pub fn ort_session(mut self, config: OrtSessionConfig) -> Self {
        self.config.common = self.config.common.ort_session(config);
        self
    }

    pub fn session_pool_size(mut self, size: usize) -> Self {
        self.config.common = self.config.common.session_pool_size(size);
        self
    }

    pub fn score_th(mut self, score_th: f32) -> Self {
        self.config.score_th = score_th;
        self
    }

    pub fn invalid_value(mut self, invalid_value: i64) -> Self {
        self.config.invalid_value = invalid_value;
        self
    }

    /// Validates the accumulated configuration and loads the model.
    pub fn build(self) -> ClassifierResult<PointHistoryClassifier> {
        PointHistoryClassifier::new(self.config)
    }
}
