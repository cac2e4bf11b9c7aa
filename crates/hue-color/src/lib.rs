//! # hue-color
//!
//! sRGB to CIELAB conversion for color analysis.
//!
//! The conversion is the standard chain:
//!
//! ```text
//! 8-bit sRGB --(/255, sRGB EOTF)--> linear RGB
//!            --(sRGB->XYZ, D65)--> XYZ
//!            --(CIE f(t), D65 white)--> L*a*b*
//! ```
//!
//! # Architecture
//!
//! ```text
//!                    hue-color
//!                        |
//!          +-------------+-------------+
//!          |                           |
//!     hue-transfer               hue-primaries
//!          |                           |
//!          +----------+----------------+
//!                     |
//!                 hue-math           hue-core
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use hue_color::{lab_of, LabConverter};
//! use hue_core::Rgb8;
//!
//! let red = lab_of(Rgb8::new(255, 0, 0));
//! assert!((red.l - 53.24).abs() < 0.01);
//!
//! // Batch conversion with a cached decode table
//! let conv = LabConverter::new();
//! assert_eq!(conv.convert(Rgb8::new(255, 0, 0)), red);
//! ```
//!
//! # Also here
//!
//! - [`histogram`] - distribution of L* values

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod converter;
mod error;
pub mod histogram;
pub mod lab;

pub use converter::LabConverter;
pub use error::{ColorError, ColorResult};
pub use histogram::{HistogramBin, LuminanceHistogram};
pub use lab::{lab_of, lab_to_srgb, lab_to_xyz, srgb_to_lab, xyz_to_lab};

// Re-export sub-crates for convenience
pub use hue_math as math;
pub use hue_primaries as primaries;
pub use hue_transfer as transfer;
