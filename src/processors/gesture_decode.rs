//! Score-matrix decoding for the point history classifier.

use crate::core::batch::IndexVector;
use crate::core::errors::ClassifierError;
use ndarray::{ArrayView1, ArrayView2};

/// Default minimum column-0 score for a row to keep its top class.
pub const DEFAULT_SCORE_THRESHOLD: f32 = 0.5;

/// Default value emitted for rows that fail the threshold gate.
pub const DEFAULT_INVALID_VALUE: i64 = 0;

/// Turns a `[N, C]` score matrix into one gesture index per row.
///
/// Each row resolves to its argmax (lowest index on ties). The row is then
/// gated on its **column 0** score, not on the winning score: when
/// `scores[i, 0] < score_th` the result is replaced by `invalid_value`.
/// A row whose top class is 1 with a low column-0 score therefore decodes to
/// `invalid_value` even though class 1 is confident. This is the behaviour the
/// trained models are paired with and is kept as is.
///
/// NaN scores follow numpy semantics: the first NaN in a row wins the argmax,
/// and a NaN in column 0 never trips the gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureDecoder {
    score_th: f32,
    invalid_value: i64,
}

impl GestureDecoder {
    /// Creates a decoder.
    ///
    /// # Arguments
    ///
    /// * `score_th` - Minimum column-0 score required to keep the top class.
    /// * `invalid_value` - Value emitted for rows that fail the gate.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ndarray::array;
    /// use point_history_classifier::processors::GestureDecoder;
    ///
    /// let decoder = GestureDecoder::new(0.5, -1);
    /// let scores = array![[0.9f32, 0.05, 0.05], [0.1, 0.8, 0.1]];
    /// let indices = decoder.decode(scores.view()).unwrap();
    /// assert_eq!(indices.to_vec(), vec![0, -1]);
    /// ```
    pub fn new(score_th: f32, invalid_value: i64) -> Self {
        Self {
            score_th,
            invalid_value,
        }
    }

    pub fn score_threshold(&self) -> f32 {
        self.score_th
    }

    pub fn invalid_value(&self) -> i64 {
        self.invalid_value
    }

    /// Decodes every row of `scores`.
    ///
    /// An empty batch yields an empty vector. A batch with rows but no score
    /// columns is rejected with a post-processing error.
    pub fn decode(&self, scores: ArrayView2<'_, f32>) -> Result<IndexVector, ClassifierError> {
        let (rows, classes) = scores.dim();
        if rows == 0 {
            return Ok(IndexVector::zeros(0));
        }
        if classes == 0 {
            return Err(ClassifierError::post_processing_message(format!(
                "score matrix has {rows} rows but no class columns"
            )));
        }

        Ok(scores
            .outer_iter()
            .map(|row| self.decode_row(row))
            .collect())
    }

    /// Decodes a single non-empty score row.
    fn decode_row(&self, row: ArrayView1<'_, f32>) -> i64 {
        if row[0] < self.score_th {
            self.invalid_value
        } else {
            argmax(row) as i64
        }
    }
}

impl Default for GestureDecoder {
    fn default() -> Self {
        Self::new(DEFAULT_SCORE_THRESHOLD, DEFAULT_INVALID_VALUE)
    }
}

/// Index of the largest value, lowest index on ties, first NaN wins.
fn argmax(row: ArrayView1<'_, f32>) -> usize {
    let mut best = 0;
    let mut best_val = f32::NEG_INFINITY;
    for (i, &v) in row.iter().enumerate() {
        if v.is_nan() {
            return i;
        }
        if i == 0 || v > best_val {
            best = i;
            best_val = v;
        }
    }
    best
}
