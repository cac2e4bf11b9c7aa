//! Error types for color operations.

use hue_core::ErrorKind;
use thiserror::Error;

/// Color operation error.
#[derive(Debug, Error)]
pub enum ColorError {
    /// Input value is invalid (NaN, Inf, out of expected range).
    #[error("invalid input value: {0}")]
    InvalidValue(String),

    /// Histogram parameters are invalid.
    #[error("invalid histogram: {0}")]
    InvalidHistogram(String),
}

impl ColorError {
    /// Returns the coarse kind of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

/// Result type for color operations.
pub type ColorResult<T> = Result<T, ColorError>;
