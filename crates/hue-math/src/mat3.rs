//! 3x3 matrix for RGB/XYZ transforms.
//!
//! Stored row-major and applied to column vectors:
//!
//! ```text
//! | m00 m01 m02 |   | x |   | m00*x + m01*y + m02*z |
//! | m10 m11 m12 | * | y | = | m10*x + m11*y + m12*z |
//! | m20 m21 m22 |   | z |   | m20*x + m21*y + m22*z |
//! ```

use crate::Vec3;
use std::ops::Mul;

/// A 3x3 color matrix.
///
/// ```rust
/// use hue_math::{Mat3, Vec3};
///
/// let v = Vec3::new(1.0, 2.0, 3.0);
/// assert_eq!(Mat3::IDENTITY * v, v);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    /// Rows.
    pub m: [[f64; 3]; 3],
}

impl Mat3 {
    /// Identity matrix.
    pub const IDENTITY: Self = Self::from_rows([
        [1.0, 0.0, 0.0],
        [0.0, 1.0, 0.0],
        [0.0, 0.0, 1.0],
    ]);

    /// Creates a matrix from rows.
    #[inline]
    pub const fn from_rows(rows: [[f64; 3]; 3]) -> Self {
        Self { m: rows }
    }

    /// Builds a matrix whose columns are `c0`, `c1` and `c2`.
    ///
    /// The primaries matrix is assembled this way, one primary per column.
    #[inline]
    pub const fn from_col_vecs(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Self::from_rows([
            [c0.x, c1.x, c2.x],
            [c0.y, c1.y, c2.y],
            [c0.z, c1.z, c2.z],
        ])
    }

    fn determinant(&self) -> f64 {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// Inverse by cofactors, `None` when singular.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det.abs() < 1e-12 {
            return None;
        }
        let m = &self.m;
        let k = 1.0 / det;
        Some(Self::from_rows([
            [
                (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * k,
                (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * k,
                (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * k,
            ],
            [
                (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * k,
                (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * k,
                (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * k,
            ],
            [
                (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * k,
                (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * k,
                (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * k,
            ],
        ]))
    }
}

/// Row by row in a fixed order, so LAB output is bit-reproducible.
impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, v: Vec3) -> Vec3 {
        let row = |r: [f64; 3]| r[0] * v.x + r[1] * v.y + r[2] * v.z;
        Vec3::new(row(self.m[0]), row(self.m[1]), row(self.m[2]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn sample() -> Mat3 {
        Mat3::from_rows([
            [1.0, 2.0, 3.0],
            [0.0, 1.0, 4.0],
            [5.0, 6.0, 0.0],
        ])
    }

    #[test]
    fn test_from_col_vecs() {
        let m = Mat3::from_col_vecs(Vec3::new(1.0, 0.0, 5.0), Vec3::new(2.0, 1.0, 6.0), Vec3::new(3.0, 4.0, 0.0));
        assert_eq!(m, sample());
    }

    #[test]
    fn test_inverse_undoes_transform() {
        let m = sample();
        let inv = m.inverse().unwrap();
        for v in [Vec3::ONE, Vec3::new(0.2, -3.0, 7.5)] {
            let back = inv * (m * v);
            assert_abs_diff_eq!(back.x, v.x, epsilon = 1e-12);
            assert_abs_diff_eq!(back.y, v.y, epsilon = 1e-12);
            assert_abs_diff_eq!(back.z, v.z, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_singular() {
        let m = Mat3::from_rows([
            [1.0, 2.0, 3.0],
            [2.0, 4.0, 6.0],
            [1.0, 1.0, 1.0],
        ]);
        assert!(m.inverse().is_none());
    }
}
