//! Error types for I/O operations.
//!
//! Covers image decoding, table reading and writing, and swatch encoding.

use hue_core::ErrorKind;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// Input file does not exist.
    #[error("file not found: {}", path.display())]
    NotFound {
        /// Missing path.
        path: PathBuf,
    },

    /// Image could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),

    /// Malformed or out-of-range input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Output could not be encoded.
    #[error("encode error: {0}")]
    Encode(String),

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON table error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IoError {
    /// Returns the coarse kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::Decode(_) => ErrorKind::Decode,
            Self::Validation(_) => ErrorKind::Validation,
            Self::Json(e) if e.is_io() => ErrorKind::Io,
            Self::Json(_) => ErrorKind::Validation,
            Self::Encode(_) | Self::Io(_) => ErrorKind::Io,
        }
    }
}

impl From<hue_core::Error> for IoError {
    fn from(e: hue_core::Error) -> Self {
        Self::Validation(e.to_string())
    }
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
