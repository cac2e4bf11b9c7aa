//! # hue-core
//!
//! Core types for image color analysis.
//!
//! This crate provides the foundational types used throughout hue-rs:
//!
//! - [`Rgb8`], [`ColorSample`] - Distinct sRGB colors and their pixel counts
//! - [`LabPoint`] - CIELAB coordinates derived from a sample
//! - [`Assignment`], [`ClusterRepresentative`] - Clustering results
//! - [`extract`] - Pixel tallying into color samples
//!
//! ## Crate Structure
//!
//! This crate has no internal dependencies. The pipeline crates depend on
//! `hue-core`:
//!
//! ```text
//! hue-core (this crate)
//!    ^
//!    |
//!    +-- hue-color (sRGB -> LAB, histograms)
//!    +-- hue-cluster (DBSCAN, representatives)
//!    +-- hue-io (images, tables, swatches)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod cluster;
pub mod error;
pub mod extract;
pub mod lab;
pub mod sample;

pub use cluster::{Assignment, ClusterRepresentative, Label, NOISE};
pub use error::{Error, ErrorKind, Result};
pub use extract::{extract_from_pixels, extract_from_rgb_bytes, total_count};
pub use lab::LabPoint;
pub use sample::{ColorSample, Rgb8};

/// Prelude module for convenient imports.
///
/// # Usage
///
/// ```
/// use hue_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::cluster::{Assignment, ClusterRepresentative, Label, NOISE};
    pub use crate::error::{Error, ErrorKind, Result};
    pub use crate::lab::LabPoint;
    pub use crate::sample::{ColorSample, Rgb8};
}
