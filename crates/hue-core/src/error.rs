//! Error types for hue-core operations.
//!
//! Besides the crate's own [`Error`], this module defines [`ErrorKind`],
//! the coarse classification every hue-rs error maps onto. Callers (the
//! CLI in particular) use it to tell a bad input file apart from a bad
//! value without matching on each crate's error enum.
//!
//! # Usage
//!
//! ```rust
//! use hue_core::{Error, ErrorKind, Rgb8};
//!
//! let err = Rgb8::try_from_ints(300, 0, 0).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::Validation);
//! assert!(err.to_string().contains("300"));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse error classification shared by all hue-rs crates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An image could not be decoded (corrupt or unsupported).
    Decode,
    /// A value or record is malformed or out of range.
    Validation,
    /// An input file does not exist.
    NotFound,
    /// Any other I/O failure.
    Io,
}

/// Errors produced by the core types.
#[derive(Debug, Error)]
pub enum Error {
    /// A color channel is outside `[0, 255]`.
    #[error("channel {channel} value {value} outside [0, 255]")]
    ChannelOutOfRange {
        /// Channel name (`r`, `g` or `b`).
        channel: char,
        /// Offending value.
        value: i64,
    },

    /// Raw pixel buffer length is not a multiple of three.
    #[error("RGB buffer length {len} is not a multiple of 3")]
    RaggedBuffer {
        /// Buffer length in bytes.
        len: usize,
    },
}

impl Error {
    /// Returns the coarse kind of this error.
    ///
    /// Every core error is a validation failure.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}
