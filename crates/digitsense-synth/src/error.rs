//! Error types for digitsense-synth

use thiserror::Error;

/// Errors that can occur while rendering samples
#[derive(Debug, Error)]
pub enum SynthError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] digitsense_core::Error),

    /// Transform library error
    #[error("transform error: {0}")]
    Transform(#[from] digitsense_transform::TransformError),

    /// Filter library error
    #[error("filter error: {0}")]
    Filter(#[from] digitsense_filter::FilterError),

    /// Style with an unusable value
    #[error("invalid style: {0}")]
    InvalidStyle(String),

    /// Invalid parameter provided
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for synthesis operations
pub type SynthResult<T> = Result<T, SynthError>;
