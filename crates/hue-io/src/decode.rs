//! Image decoding.
//!
//! Any format the `image` crate is built with (PNG, JPEG, TIFF, BMP, GIF,
//! WebP) is accepted. Pixels are reduced to 8-bit RGB; alpha is dropped.
//!
//! # Example
//!
//! ```ignore
//! use hue_io::decode::extract_image_colors;
//!
//! let samples = extract_image_colors("photo.png")?;
//! println!("{} distinct colors", samples.len());
//! ```

use std::io;
use std::path::Path;

use hue_core::{ColorSample, extract_from_rgb_bytes};
use image::{ImageReader, RgbImage};
use tracing::debug;

use crate::error::{IoError, IoResult};

/// Reads an image file as 8-bit RGB.
///
/// # Errors
///
/// - [`IoError::NotFound`] if `path` does not exist
/// - [`IoError::Decode`] if the file is not a readable image
pub fn read_rgb8<P: AsRef<Path>>(path: P) -> IoResult<RgbImage> {
    let path = path.as_ref();
    let reader = ImageReader::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => IoError::NotFound {
            path: path.to_path_buf(),
        },
        _ => IoError::Io(e),
    })?;
    let reader = reader
        .with_guessed_format()
        .map_err(|e| IoError::Decode(e.to_string()))?;
    let img = reader
        .decode()
        .map_err(|e| IoError::Decode(format!("{}: {e}", path.display())))?;

    debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        color = ?img.color(),
        "decoded image"
    );
    Ok(img.into_rgb8())
}

/// Counts the distinct colors of an image file.
///
/// Samples are sorted by RGB triple.
pub fn extract_image_colors<P: AsRef<Path>>(path: P) -> IoResult<Vec<ColorSample>> {
    let img = read_rgb8(path)?;
    let samples = extract_from_rgb_bytes(img.as_raw())?;
    debug!(
        pixels = img.width() as u64 * img.height() as u64,
        colors = samples.len(),
        "extracted colors"
    );
    Ok(samples)
}
