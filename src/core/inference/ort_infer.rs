//! Core ONNX Runtime inference engine with a session pool and cached model metadata.

use crate::core::{config::OrtExecutionProvider, errors::ClassifierError};
use ort::{session::Session, value::ValueType};
use std::sync::Mutex;

#[path = "ort_infer_builders.rs"]
mod ort_infer_builders;
#[path = "ort_infer_execution.rs"]
mod ort_infer_execution;
#[cfg(test)]
#[path = "ort_infer_tests.rs"]
mod ort_infer_tests;

/// Owns one or more sessions over the same model.
///
/// Input names, input shapes and output names are read once from the first
/// session when the engine is built and reused on every call.
pub struct OrtInfer {
    pub(super) sessions: Vec<Mutex<Session>>,
    pub(super) next_idx: std::sync::atomic::AtomicUsize,
    pub(super) input_names: Vec<String>,
    pub(super) input_shapes: Vec<Vec<i64>>,
    pub(super) output_names: Vec<String>,
    pub(super) active_provider: OrtExecutionProvider,
    pub(super) model_path: std::path::PathBuf,
    pub(super) model_name: String,
}

impl std::fmt::Debug for OrtInfer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrtInfer")
            .field("sessions", &self.sessions.len())
            .field("input_names", &self.input_names)
            .field("input_shapes", &self.input_shapes)
            .field("output_names", &self.output_names)
            .field("active_provider", &self.active_provider.name())
            .field("model_path", &self.model_path)
            .field("model_name", &self.model_name)
            .finish()
    }
}

impl OrtInfer {
    /// Declared input tensor names, in graph order.
    pub fn input_names(&self) -> &[String] {
        &self.input_names
    }

    /// Declared input shapes; dynamic dimensions are reported as `-1`.
    ///
    /// Inputs that are not tensors have an empty shape.
    pub fn input_shapes(&self) -> &[Vec<i64>] {
        &self.input_shapes
    }

    /// Declared output tensor names, in graph order.
    pub fn output_names(&self) -> &[String] {
        &self.output_names
    }

    /// The execution provider the sessions were created with.
    pub fn active_provider(&self) -> &OrtExecutionProvider {
        &self.active_provider
    }

    /// Number of sessions in the pool.
    pub fn pool_size(&self) -> usize {
        self.sessions.len()
    }

    /// Returns the model path associated with this inference engine.
    pub fn model_path(&self) -> &std::path::Path {
        &self.model_path
    }

    /// Returns the model name associated with this inference engine.
    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// Reads input/output metadata from a freshly created session.
    pub(super) fn read_metadata(
        session: &Session,
        model_path: &std::path::Path,
    ) -> Result<(Vec<String>, Vec<Vec<i64>>, Vec<String>), ClassifierError> {
        let input_names: Vec<String> = session.inputs.iter().map(|i| i.name.clone()).collect();
        let input_shapes = session
            .inputs
            .iter()
            .map(|input| match &input.input_type {
                ValueType::Tensor { shape, .. } => shape.iter().copied().collect(),
                _ => Vec::new(),
            })
            .collect();
        let output_names: Vec<String> = session.outputs.iter().map(|o| o.name.clone()).collect();

        if input_names.is_empty() || output_names.is_empty() {
            return Err(ClassifierError::model_load_error(
                model_path,
                format!(
                    "model declares {} inputs and {} outputs; at least one of each is required",
                    input_names.len(),
                    output_names.len()
                ),
                None,
                None::<std::io::Error>,
            ));
        }

        Ok((input_names, input_shapes, output_names))
    }
}
