//! Post-processing of model outputs.
//!
//! * `gesture_decode` - Argmax with a column-0 confidence gate

pub mod gesture_decode;

pub use gesture_decode::{DEFAULT_INVALID_VALUE, DEFAULT_SCORE_THRESHOLD, GestureDecoder};
