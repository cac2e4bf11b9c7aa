//! CIELAB points.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A CIELAB coordinate `(L*, a*, b*)`.
///
/// `l` conventionally lies in `[0, 100]`; `a` and `b` are unbounded but
/// stay within roughly `[-128, 127]` for sRGB inputs. Values are kept at
/// full `f64` precision; [`LabPoint::rounded`] gives the two-decimal form
/// used in reports.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LabPoint {
    /// Lightness
    pub l: f64,
    /// Green-red axis
    pub a: f64,
    /// Blue-yellow axis
    pub b: f64,
}

impl LabPoint {
    /// Creates a new point.
    #[inline]
    pub const fn new(l: f64, a: f64, b: f64) -> Self {
        Self { l, a, b }
    }

    /// Returns the components as an array.
    #[inline]
    pub const fn to_array(self) -> [f64; 3] {
        [self.l, self.a, self.b]
    }

    /// Squared Euclidean distance.
    #[inline]
    pub fn distance_squared(&self, other: &Self) -> f64 {
        let dl = self.l - other.l;
        let da = self.a - other.a;
        let db = self.b - other.b;
        dl * dl + da * da + db * db
    }

    /// Euclidean distance (CIE76 delta E).
    ///
    /// ```rust
    /// use hue_core::LabPoint;
    ///
    /// let a = LabPoint::new(0.0, 0.0, 0.0);
    /// let b = LabPoint::new(3.0, 4.0, 0.0);
    /// assert_eq!(a.distance(&b), 5.0);
    /// ```
    #[inline]
    pub fn distance(&self, other: &Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Returns true if all components are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.l.is_finite() && self.a.is_finite() && self.b.is_finite()
    }

    /// Rounds each component to two decimals.
    #[inline]
    pub fn rounded(self) -> Self {
        Self::new(round2(self.l), round2(self.a), round2(self.b))
    }
}

#[inline]
fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

impl From<[f64; 3]> for LabPoint {
    #[inline]
    fn from(a: [f64; 3]) -> Self {
        Self::new(a[0], a[1], a[2])
    }
}

impl fmt::Display for LabPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.l, self.a, self.b)
    }
}
