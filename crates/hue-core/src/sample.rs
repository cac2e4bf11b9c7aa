//! sRGB color samples.
//!
//! A [`ColorSample`] is one distinct 8-bit sRGB color observed in an
//! image together with the number of pixels that carry it. Samples are
//! ordered by their [`Rgb8`] triple, which is the canonical order for all
//! tables produced by hue-rs.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An 8-bit sRGB triple.
///
/// Ordering is lexicographic on `(r, g, b)`.
///
/// # Example
///
/// ```rust
/// use hue_core::Rgb8;
///
/// let red = Rgb8::new(255, 0, 0);
/// let blue = Rgb8::new(0, 0, 255);
/// assert!(blue < red);
/// assert_eq!(red.to_string(), "(255, 0, 0)");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb8 {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb8 {
    /// Black (0, 0, 0).
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// White (255, 255, 255).
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Creates a new triple.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Creates a triple from wider integers, checking each channel.
    ///
    /// Used when reading hand-edited tables, where values like `256`
    /// or `-1` may appear.
    ///
    /// # Errors
    ///
    /// [`Error::ChannelOutOfRange`] if any value is outside `[0, 255]`.
    pub fn try_from_ints(r: i64, g: i64, b: i64) -> Result<Self> {
        Ok(Self::new(channel('r', r)?, channel('g', g)?, channel('b', b)?))
    }

    /// Returns the channels as an array.
    #[inline]
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Returns the channels normalized to `[0, 1]`.
    #[inline]
    pub fn to_unit(self) -> [f64; 3] {
        [
            self.r as f64 / 255.0,
            self.g as f64 / 255.0,
            self.b as f64 / 255.0,
        ]
    }
}

fn channel(name: char, value: i64) -> Result<u8> {
    u8::try_from(value).map_err(|_| Error::ChannelOutOfRange {
        channel: name,
        value,
    })
}

impl From<[u8; 3]> for Rgb8 {
    #[inline]
    fn from(a: [u8; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }
}

impl From<Rgb8> for [u8; 3] {
    #[inline]
    fn from(c: Rgb8) -> [u8; 3] {
        c.to_array()
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.r, self.g, self.b)
    }
}

/// A distinct color and the number of pixels sharing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColorSample {
    /// The sRGB triple; unique within one run.
    pub rgb: Rgb8,
    /// Number of pixels with exactly this triple.
    pub count: u64,
}

impl ColorSample {
    /// Creates a new sample.
    #[inline]
    pub const fn new(rgb: Rgb8, count: u64) -> Self {
        Self { rgb, count }
    }
}
