use super::*;
use crate::core::batch::Tensor2D;
use crate::core::errors::OpaqueError;
use ndarray::ArrayView2;
use ort::value::TensorRef;

impl OrtInfer {
    /// Runs one forward pass over a `[N, features]` batch and returns the first
    /// declared output as a `[N, C]` matrix.
    ///
    /// The same batch is bound to every declared input of the model.
    pub fn infer_2d(&self, x: ArrayView2<'_, f32>) -> Result<Tensor2D, ClassifierError> {
        let input_shape = x.shape().to_vec();
        let x = x.as_standard_layout();

        let mut inputs = Vec::with_capacity(self.input_names.len());
        for name in &self.input_names {
            let tensor = TensorRef::from_array_view(x.view()).map_err(|e| {
                ClassifierError::model_inference_error(
                    &self.model_name,
                    "tensor_conversion",
                    &input_shape,
                    &format!("Failed to convert input tensor for '{name}'"),
                    e,
                )
            })?;
            inputs.push((name.as_str(), tensor));
        }

        let output_name = self.output_names[0].as_str();

        let idx = self
            .next_idx
            .fetch_add(1, std::sync::atomic::Ordering::Relaxed)
            % self.sessions.len();
        let mut session_guard = self.sessions[idx].lock().map_err(|_| {
            ClassifierError::inference_error(
                &self.model_name,
                &format!(
                    "Failed to acquire session lock for session {}/{}",
                    idx,
                    self.sessions.len()
                ),
                OpaqueError::new("Session lock acquisition failed"),
            )
        })?;

        let outputs = session_guard.run(inputs).map_err(|e| {
            ClassifierError::model_inference_error(
                &self.model_name,
                "forward_pass",
                &input_shape,
                &format!(
                    "ONNX Runtime inference failed with inputs {:?} -> output '{}'",
                    self.input_names, output_name
                ),
                e,
            )
        })?;

        let output = outputs.get(output_name).ok_or_else(|| {
            ClassifierError::model_inference_error(
                &self.model_name,
                "output_extraction",
                &input_shape,
                &format!("Output '{output_name}' missing from session results"),
                OpaqueError::new("missing output"),
            )
        })?;

        let (output_shape, output_data) = output.try_extract_tensor::<f32>().map_err(|e| {
            ClassifierError::model_inference_error(
                &self.model_name,
                "output_extraction",
                &input_shape,
                &format!("Failed to extract output tensor '{output_name}' as f32"),
                e,
            )
        })?;

        if output_shape.len() != 2 {
            return Err(ClassifierError::model_inference_error(
                &self.model_name,
                "output_validation",
                &input_shape,
                &format!(
                    "expected 2D output tensor, got {}D with shape {:?}",
                    output_shape.len(),
                    &output_shape[..]
                ),
                OpaqueError::new("Invalid output tensor dimensions"),
            ));
        }

        let rows = output_shape[0] as usize;
        let cols = output_shape[1] as usize;
        if rows * cols != output_data.len() {
            return Err(ClassifierError::model_inference_error(
                &self.model_name,
                "output_validation",
                &input_shape,
                &format!(
                    "output shape {:?} does not match {} elements",
                    &output_shape[..],
                    output_data.len()
                ),
                OpaqueError::new("Output tensor size mismatch"),
            ));
        }

        Ok(Tensor2D::from_shape_vec((rows, cols), output_data.to_vec())?)
    }
}
