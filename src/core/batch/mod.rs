//! Tensor aliases used across the classifier.

/// A 2-dimensional tensor represented as a 2D array of f32 values.
pub type Tensor2D = ndarray::Array2<f32>;

/// Borrowed view of a 2D f32 tensor, the input batch shape `[N, features]`.
pub type TensorView2<'a> = ndarray::ArrayView2<'a, f32>;

/// One gesture index (or the invalid value) per input row.
pub type IndexVector = ndarray::Array1<i64>;
