//! # hue-io
//!
//! File input and output for hue-rs.
//!
//! - [`decode`] - Image decoding and color extraction
//! - [`table`] - Color tables in JSON or the legacy text layout
//! - [`swatch`] - Palette swatch PNGs
//! - [`clustermap`] - Images repainted with their group colors
//! - [`atomic`] - All-or-nothing file writes
//!
//! Every file this crate produces is written through [`atomic::write_atomic`],
//! so a failed stage never leaves a truncated output behind.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use hue_io::{extract_image_colors, write_table};
//!
//! let samples = extract_image_colors("photo.png")?;
//! write_table("color_data.json", &samples, None)?;
//! ```
//!
//! # Dependencies
//!
//! - [`hue-core`] - Sample and cluster types
//! - [`hue-color`] - Histogram bins
//! - `image` - Decoding and PNG encoding
//! - `serde_json`, `regex` - Table encodings
//! - `tempfile` - Atomic writes
//!
//! # Used By
//!
//! - `hue-cli` - Command-line tool

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod atomic;
pub mod clustermap;
pub mod decode;
pub mod error;
pub mod swatch;
pub mod table;

pub use atomic::{write_atomic, write_bytes_atomic, write_png_atomic};
pub use clustermap::{NOISE_COLOR, render_cluster_map, write_cluster_map};
pub use decode::{extract_image_colors, read_rgb8};
pub use error::{IoError, IoResult};
pub use swatch::{render_swatch, write_swatch};
pub use table::{
    ClusteredSample, LabSample, SampleRow, TableFormat, TableRow, read_samples, read_table,
    write_table,
};
