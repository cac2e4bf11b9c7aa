//! # hue-primaries
//!
//! Color primaries, white points, and RGB-XYZ matrix generation.
//!
//! The LAB conversion only needs sRGB with a D65 white, but the matrix is
//! derived from chromaticities the standard way so the fixed constants in
//! [`SRGB_TO_XYZ`] can be checked against first principles.
//!
//! # Usage
//!
//! ```rust
//! use hue_primaries::{SRGB, rgb_to_xyz_matrix};
//! use hue_math::Vec3;
//!
//! let matrix = rgb_to_xyz_matrix(&SRGB);
//! let white = matrix * Vec3::ONE;
//! assert!((white.y - 1.0).abs() < 1e-9);
//! ```
//!
//! # Used By
//!
//! - `hue-color` - sRGB to LAB conversion

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

use hue_math::{Mat3, Vec3};

/// RGB color space primaries definition.
///
/// Three primaries and a white point, all as CIE xy chromaticities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Primaries {
    /// Red primary (x, y) chromaticity
    pub r: (f64, f64),
    /// Green primary (x, y) chromaticity
    pub g: (f64, f64),
    /// Blue primary (x, y) chromaticity
    pub b: (f64, f64),
    /// White point (x, y) chromaticity
    pub w: (f64, f64),
    /// Color space name
    pub name: &'static str,
}

impl Primaries {
    /// White point as XYZ (Y=1).
    #[inline]
    pub fn white_xyz(&self) -> Vec3 {
        xy_to_xyz(self.w.0, self.w.1)
    }
}

// ============================================================================
// Standard White Points
// ============================================================================

/// D65 white point chromaticity (daylight, ~6500K).
pub const D65_XY: (f64, f64) = (0.31270, 0.32900);

/// D65 reference white in XYZ (Y=1), CIE 1931 2° observer.
///
/// This is the tabulated white used for CIELAB normalization; it differs
/// from `xy_to_xyz(D65_XY)` in the fifth decimal.
pub const D65_WHITE: Vec3 = Vec3::new(0.95047, 1.0, 1.08883);

// ============================================================================
// Standard Color Space Primaries
// ============================================================================

/// sRGB / Rec.709 primaries (D65 white point).
pub const SRGB: Primaries = Primaries {
    r: (0.6400, 0.3300),
    g: (0.3000, 0.6000),
    b: (0.1500, 0.0600),
    w: D65_XY,
    name: "sRGB",
};

// ============================================================================
// Matrix Generation
// ============================================================================

/// Converts xy chromaticity to XYZ (with Y=1).
pub fn xy_to_xyz(x: f64, y: f64) -> Vec3 {
    if y.abs() < 1e-12 {
        Vec3::ZERO
    } else {
        Vec3::new(x / y, 1.0, (1.0 - x - y) / y)
    }
}

/// Computes the RGB to XYZ matrix for a set of primaries.
///
/// # Algorithm
///
/// 1. Convert xy chromaticities to XYZ (with Y=1)
/// 2. Compute scaling factors so white point maps correctly
/// 3. Multiply primaries by scaling factors
pub fn rgb_to_xyz_matrix(primaries: &Primaries) -> Mat3 {
    let r_xyz = xy_to_xyz(primaries.r.0, primaries.r.1);
    let g_xyz = xy_to_xyz(primaries.g.0, primaries.g.1);
    let b_xyz = xy_to_xyz(primaries.b.0, primaries.b.1);
    let w_xyz = primaries.white_xyz();

    let m = Mat3::from_col_vecs(r_xyz, g_xyz, b_xyz);

    // S = M^-1 * W
    let m_inv = m.inverse().unwrap_or(Mat3::IDENTITY);
    let s = m_inv * w_xyz;

    Mat3::from_col_vecs(r_xyz * s.x, g_xyz * s.y, b_xyz * s.z)
}

// ============================================================================
// Pre-computed Matrices
// ============================================================================

/// sRGB to XYZ (D65) matrix, IEC 61966-2-1 values to 7 decimals.
pub const SRGB_TO_XYZ: Mat3 = Mat3::from_rows([
    [0.4124564, 0.3575761, 0.1804375],
    [0.2126729, 0.7151522, 0.0721750],
    [0.0193339, 0.1191920, 0.9503041],
]);

/// XYZ (D65) to sRGB matrix.
pub const XYZ_TO_SRGB: Mat3 = Mat3::from_rows([
    [3.2404542, -1.5371385, -0.4985314],
    [-0.9692660, 1.8760108, 0.0415560],
    [0.0556434, -0.2040259, 1.0572252],
]);
