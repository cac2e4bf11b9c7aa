//! Error types for clustering.

use hue_core::{ErrorKind, Label};
use thiserror::Error;

/// Clustering error.
#[derive(Debug, Error)]
pub enum ClusterError {
    /// `eps` or `min_samples` is out of range.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A point has a NaN or infinite coordinate.
    #[error("point {index} has a non-finite coordinate")]
    NonFinite {
        /// Index of the offending point.
        index: usize,
    },

    /// Two parallel inputs have different lengths.
    #[error("length mismatch: expected {expected}, got {got}")]
    LengthMismatch {
        /// Expected length (number of points).
        expected: usize,
        /// Actual length.
        got: usize,
    },

    /// The pixel total of a cluster does not fit in `u64`.
    #[error("pixel count of cluster {label} overflows")]
    CountOverflow {
        /// Cluster label.
        label: Label,
    },
}

impl ClusterError {
    /// Returns the coarse kind of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}

/// Result type for clustering.
pub type ClusterResult<T> = Result<T, ClusterError>;
