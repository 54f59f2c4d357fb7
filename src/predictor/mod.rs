//! Predictor implementations.
//!
//! Each predictor module contains both the predictor implementation and its builder.

/// Gesture classifier over fingertip point histories
pub mod point_history_classifier;

pub use point_history_classifier::{
    DEFAULT_MODEL_PATH, POINT_HISTORY_FEATURES, PointHistoryClassifier,
    PointHistoryClassifierBuilder, PointHistoryClassifierConfig,
};
