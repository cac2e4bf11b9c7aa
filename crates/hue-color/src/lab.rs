//! CIE XYZ and CIELAB conversions (D65 reference white).
//!
//! # Formula
//!
//! ```text
//! f(t) = t^(1/3)                  if t > (6/29)^3
//!      = t / (3 * (6/29)^2) + 4/29  otherwise
//!
//! L* = 116 * f(Y/Yn) - 16
//! a* = 500 * (f(X/Xn) - f(Y/Yn))
//! b* = 200 * (f(Y/Yn) - f(Z/Zn))
//! ```
//!
//! All functions are pure and deterministic.

use crate::error::{ColorError, ColorResult};
use hue_core::{LabPoint, Rgb8};
use hue_math::Vec3;
use hue_primaries::{D65_WHITE, SRGB_TO_XYZ, XYZ_TO_SRGB};
use hue_transfer::srgb;

const DELTA: f64 = 6.0 / 29.0;
/// `(6/29)^3`
const EPSILON: f64 = DELTA * DELTA * DELTA;
/// `3 * (6/29)^2`
const LINEAR_SLOPE_INV: f64 = 3.0 * DELTA * DELTA;
const OFFSET: f64 = 4.0 / 29.0;

#[inline]
fn f(t: f64) -> f64 {
    if t > EPSILON {
        t.cbrt()
    } else {
        t / LINEAR_SLOPE_INV + OFFSET
    }
}

#[inline]
fn f_inv(t: f64) -> f64 {
    if t > DELTA {
        t * t * t
    } else {
        LINEAR_SLOPE_INV * (t - OFFSET)
    }
}

/// Converts XYZ (Y=1 scale) to LAB relative to D65.
#[inline]
pub fn xyz_to_lab(xyz: Vec3) -> LabPoint {
    let fx = f(xyz.x / D65_WHITE.x);
    let fy = f(xyz.y / D65_WHITE.y);
    let fz = f(xyz.z / D65_WHITE.z);
    LabPoint::new(116.0 * fy - 16.0, 500.0 * (fx - fy), 200.0 * (fy - fz))
}

/// Converts LAB (D65) back to XYZ.
#[inline]
pub fn lab_to_xyz(lab: LabPoint) -> Vec3 {
    let fy = (lab.l + 16.0) / 116.0;
    let fx = fy + lab.a / 500.0;
    let fz = fy - lab.b / 200.0;
    Vec3::new(f_inv(fx), f_inv(fy), f_inv(fz)) * D65_WHITE
}

/// Converts linear sRGB to LAB.
#[inline]
pub(crate) fn linear_to_lab(linear: Vec3) -> LabPoint {
    xyz_to_lab(SRGB_TO_XYZ * linear)
}

/// Converts an 8-bit sRGB triple to LAB.
///
/// # Example
///
/// ```rust
/// use hue_color::lab_of;
/// use hue_core::Rgb8;
///
/// let white = lab_of(Rgb8::WHITE);
/// assert!((white.l - 100.0).abs() < 0.1);
/// assert!(white.a.abs() < 0.1 && white.b.abs() < 0.1);
/// ```
pub fn lab_of(rgb: Rgb8) -> LabPoint {
    let linear = Vec3::new(
        srgb::eotf_u8(rgb.r),
        srgb::eotf_u8(rgb.g),
        srgb::eotf_u8(rgb.b),
    );
    linear_to_lab(linear)
}

/// Converts normalized sRGB components in `[0, 1]` to LAB.
///
/// # Errors
///
/// [`ColorError::InvalidValue`] if a component is NaN or outside `[0, 1]`.
pub fn srgb_to_lab(rgb: [f64; 3]) -> ColorResult<LabPoint> {
    if let Some(bad) = rgb.iter().find(|v| !(0.0..=1.0).contains(*v)) {
        return Err(ColorError::InvalidValue(format!(
            "sRGB component {bad} outside [0, 1]"
        )));
    }
    Ok(linear_to_lab(Vec3::from(srgb::eotf_rgb(rgb))))
}

/// Converts LAB back to the nearest 8-bit sRGB triple (gamut-clipped).
pub fn lab_to_srgb(lab: LabPoint) -> Rgb8 {
    let linear = XYZ_TO_SRGB * lab_to_xyz(lab);
    let encoded = Vec3::from(srgb::oetf_rgb(linear.clamp01().to_array()));
    let q = |v: f64| (v * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb8::new(q(encoded.x), q(encoded.y), q(encoded.z))
}
