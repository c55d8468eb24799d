//! Error types for digitsense-recog

use thiserror::Error;

/// Errors that can occur during recognition operations
#[derive(Debug, Error)]
pub enum RecogError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] digitsense_core::Error),

    /// Transform library error
    #[error("transform error: {0}")]
    Transform(#[from] digitsense_transform::TransformError),

    /// Filter library error
    #[error("filter error: {0}")]
    Filter(#[from] digitsense_filter::FilterError),

    /// Invalid parameter provided
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Pixel buffer of the wrong length
    #[error("invalid input: expected {expected} pixels, got {actual}")]
    InvalidInput { expected: usize, actual: usize },
}

/// Result type for recognition operations
pub type RecogResult<T> = Result<T, RecogError>;
