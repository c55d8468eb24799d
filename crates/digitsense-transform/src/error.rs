//! Error types for digitsense-transform

use thiserror::Error;

/// Errors that can occur during geometric resampling
#[derive(Debug, Error)]
pub enum TransformError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] digitsense_core::Error),

    /// Invalid scale factor
    #[error("invalid scale factor: {0}")]
    InvalidScaleFactor(String),

    /// Invalid transformation parameters
    #[error("invalid parameters: {0}")]
    InvalidParameters(String),

    /// Singular matrix (non-invertible)
    #[error("singular transformation matrix")]
    SingularMatrix,
}

/// Result type for transform operations
pub type TransformResult<T> = Result<T, TransformError>;
