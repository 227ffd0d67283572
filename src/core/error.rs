//! Error types for SVM training and prediction

use thiserror::Error;

/// Configuration and input errors
///
/// Everything here is detected eagerly, before any optimization work starts.
/// Numerical degeneracies inside the solver (zero curvature on a working
/// pair) are handled locally by skipping the pair and never surface as
/// errors.
#[derive(Error, Debug)]
pub enum SVMError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Invalid label: expected -1 or +1, got {0}")]
    InvalidLabel(f64),

    #[error("Dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Empty dataset")]
    EmptyDataset,

    #[error("Training set contains only one class")]
    SingleClass,
}

pub type Result<T> = std::result::Result<T, SVMError>;
