//! # Point History Classifier
//!
//! A Rust wrapper around a pre-trained ONNX gesture classifier that maps
//! fingertip point histories to gesture indices.
//!
//! ## Features
//!
//! - Ordered execution provider fallback (TensorRT, CUDA, CPU, ...)
//! - Input/output metadata cached once at load time
//! - Column-0 confidence gate with a configurable invalid value
//! - JSON configuration
//! - Session pool for concurrent callers
//!
//! ## Modules
//!
//! * [`core`] - Configuration, error handling and the ONNX Runtime engine
//! * [`processors`] - Score decoding
//! * [`predictor`] - The classifier and its builder
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use ndarray::Array2;
//! use point_history_classifier::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let classifier = PointHistoryClassifier::builder()
//!     .model_path("model/point_history_classifier/point_history_classifier.onnx")
//!     .score_th(0.5)
//!     .build()?;
//!
//! // 16 (x, y) points per row, already normalized.
//! let histories = Array2::<f32>::zeros((4, 32));
//! let gestures = classifier.classify(histories.view())?;
//! assert_eq!(gestures.len(), 4);
//! # Ok(())
//! # }
//! ```
//!
//! ### JSON Configuration
//!
//! ```rust,no_run
//! use point_history_classifier::prelude::*;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PointHistoryClassifierConfig::from_json_str(r#"
//! {
//!   "model_path": "model/point_history_classifier/point_history_classifier.onnx",
//!   "providers": [
//!     {"TensorrtExecutionProvider": {"engine_cache_enable": true, "engine_cache_path": ".", "fp16_enable": true}},
//!     "CUDAExecutionProvider",
//!     "CPUExecutionProvider"
//!   ],
//!   "score_th": 0.5,
//!   "invalid_value": 0
//! }
//! "#)?;
//!
//! let classifier = PointHistoryClassifier::new(config)?;
//! println!("running on {}", classifier.active_provider());
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod core;
pub mod predictor;
pub mod processors;

/// Prelude module for convenient imports.
///
/// ```rust
/// use point_history_classifier::prelude::*;
/// ```
pub mod prelude {
    pub use crate::core::{
        ClassifierError, ClassifierResult, OrtExecutionProvider, OrtSessionConfig,
    };
    pub use crate::predictor::{
        PointHistoryClassifier, PointHistoryClassifierBuilder, PointHistoryClassifierConfig,
    };
    pub use crate::processors::GestureDecoder;
}
