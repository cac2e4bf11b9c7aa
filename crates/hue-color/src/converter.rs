//! Batch sRGB to LAB conversion.

use crate::lab::linear_to_lab;
use hue_core::{ColorSample, LabPoint, Rgb8};
use hue_math::Vec3;
use hue_transfer::srgb;
use rayon::prelude::*;
use tracing::debug;

/// Converts many 8-bit colors to LAB.
///
/// Holds the 256-entry sRGB decode table so the per-channel `powf` runs
/// once per code value instead of once per sample. Output is bit-identical
/// to [`lab_of`](crate::lab_of).
#[derive(Debug, Clone)]
pub struct LabConverter {
    decode: [f64; 256],
}

impl Default for LabConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl LabConverter {
    /// Creates a converter.
    pub fn new() -> Self {
        Self {
            decode: srgb::eotf_table_u8(),
        }
    }

    /// Converts one color.
    #[inline]
    pub fn convert(&self, rgb: Rgb8) -> LabPoint {
        let linear = Vec3::new(
            self.decode[rgb.r as usize],
            self.decode[rgb.g as usize],
            self.decode[rgb.b as usize],
        );
        linear_to_lab(linear)
    }

    /// Converts samples, keeping their order.
    pub fn convert_samples(&self, samples: &[ColorSample]) -> Vec<LabPoint> {
        debug!(samples = samples.len(), "converting sRGB samples to LAB");
        samples.par_iter().map(|s| self.convert(s.rgb)).collect()
    }
}
