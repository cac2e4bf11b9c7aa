//! Luminance (L*) histogram.
//!
//! Bins L* over `[0, 100]` with a fixed bin width. Values outside the range
//! are clamped into the first or last bin; `L* = 100` lands in the last bin.
//!
//! ```rust
//! use hue_color::LuminanceHistogram;
//!
//! let hist = LuminanceHistogram::from_values([12.34, 12.36, 99.99], 0.1).unwrap();
//! let bins: Vec<_> = hist.non_empty().collect();
//! assert_eq!(bins.len(), 2);
//! assert_eq!(bins[0].count, 1); // brightest first
//! assert_eq!(bins[1].count, 2);
//! ```

use crate::error::{ColorError, ColorResult};
use serde::{Deserialize, Serialize};

/// Upper end of the L* axis.
pub const L_MAX: f64 = 100.0;

/// Default bin width.
pub const DEFAULT_BIN_SIZE: f64 = 0.1;

/// Largest number of bins a histogram may allocate.
pub const MAX_BINS: usize = 10_000_000;

/// One histogram bin `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Inclusive lower edge.
    pub start: f64,
    /// Exclusive upper edge (inclusive for the last bin).
    pub end: f64,
    /// Number of samples (or pixels, when weighted).
    pub count: u64,
}

/// Counts of L* values per bin.
#[derive(Debug, Clone, PartialEq)]
pub struct LuminanceHistogram {
    bin_size: f64,
    counts: Vec<u64>,
}

impl LuminanceHistogram {
    /// Creates an empty histogram.
    ///
    /// # Errors
    ///
    /// [`ColorError::InvalidHistogram`] if `bin_size` is not finite and
    /// positive, or so small that more than [`MAX_BINS`] bins are needed.
    pub fn new(bin_size: f64) -> ColorResult<Self> {
        if !bin_size.is_finite() || bin_size <= 0.0 {
            return Err(ColorError::InvalidHistogram(format!(
                "bin size must be finite and > 0, got {bin_size}"
            )));
        }
        // 100 / 0.1 is not exactly 1000 in binary; shave before ceil
        let n = ((L_MAX / bin_size) - 1e-9).ceil().max(1.0);
        if n > MAX_BINS as f64 {
            return Err(ColorError::InvalidHistogram(format!(
                "bin size {bin_size} needs more than {MAX_BINS} bins"
            )));
        }
        let n = n as usize;
        Ok(Self {
            bin_size,
            counts: vec![0; n],
        })
    }

    /// Builds an unweighted histogram from L* values.
    pub fn from_values<I>(values: I, bin_size: f64) -> ColorResult<Self>
    where
        I: IntoIterator<Item = f64>,
    {
        Self::from_weighted(values.into_iter().map(|l| (l, 1)), bin_size)
    }

    /// Builds a histogram from `(L*, weight)` pairs.
    pub fn from_weighted<I>(values: I, bin_size: f64) -> ColorResult<Self>
    where
        I: IntoIterator<Item = (f64, u64)>,
    {
        let mut hist = Self::new(bin_size)?;
        for (l, w) in values {
            hist.add(l, w)?;
        }
        Ok(hist)
    }

    /// Adds `weight` to the bin containing `l`.
    ///
    /// # Errors
    ///
    /// [`ColorError::InvalidValue`] if `l` is NaN or the bin count would
    /// overflow.
    pub fn add(&mut self, l: f64, weight: u64) -> ColorResult<()> {
        if l.is_nan() {
            return Err(ColorError::InvalidValue("L* is NaN".into()));
        }
        let idx = self.index_of(l);
        self.counts[idx] = self.counts[idx]
            .checked_add(weight)
            .ok_or_else(|| ColorError::InvalidValue(format!("bin count overflow at L* {l}")))?;
        Ok(())
    }

    fn index_of(&self, l: f64) -> usize {
        let last = self.counts.len() - 1;
        let clamped = l.clamp(0.0, L_MAX);
        ((clamped / self.bin_size).floor() as usize).min(last)
    }

    /// Bin width.
    #[inline]
    pub fn bin_size(&self) -> f64 {
        self.bin_size
    }

    /// Number of bins.
    #[inline]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Always false; a histogram has at least one bin.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts, saturating at `u64::MAX`.
    pub fn total(&self) -> u64 {
        self.counts.iter().fold(0u64, |acc, &c| acc.saturating_add(c))
    }

    /// Bin `i` in ascending L* order.
    pub fn bin(&self, i: usize) -> Option<HistogramBin> {
        let count = *self.counts.get(i)?;
        let start = i as f64 * self.bin_size;
        let end = ((i + 1) as f64 * self.bin_size).min(L_MAX);
        Some(HistogramBin { start, end, count })
    }

    /// Non-empty bins, brightest first.
    pub fn non_empty(&self) -> impl Iterator<Item = HistogramBin> + '_ {
        (0..self.counts.len())
            .rev()
            .filter_map(|i| self.bin(i))
            .filter(|b| b.count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin_count() {
        assert_eq!(LuminanceHistogram::new(0.1).unwrap().len(), 1000);
        assert_eq!(LuminanceHistogram::new(1.0).unwrap().len(), 100);
        assert_eq!(LuminanceHistogram::new(30.0).unwrap().len(), 4);
        assert_eq!(LuminanceHistogram::new(500.0).unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_bin_size() {
        assert!(LuminanceHistogram::new(0.0).is_err());
        assert!(LuminanceHistogram::new(-1.0).is_err());
        assert!(LuminanceHistogram::new(f64::NAN).is_err());
        assert!(LuminanceHistogram::new(f64::INFINITY).is_err());
    }

    #[test]
    fn test_tiny_bin_size_rejected() {
        for bin_size in [1e-300, 1e-10, L_MAX / (MAX_BINS as f64 * 2.0)] {
            assert!(
                matches!(LuminanceHistogram::new(bin_size), Err(ColorError::InvalidHistogram(_))),
                "{bin_size}"
            );
        }
        assert_eq!(LuminanceHistogram::new(1e-4).unwrap().len(), 1_000_000);
    }

    #[test]
    fn test_count_overflow_rejected() {
        let mut hist = LuminanceHistogram::new(1.0).unwrap();
        hist.add(50.0, u64::MAX).unwrap();
        assert!(matches!(hist.add(50.2, 1), Err(ColorError::InvalidValue(_))));
        assert_eq!(hist.bin(50).unwrap().count, u64::MAX);
    }

    #[test]
    fn test_edges_and_clamping() {
        let hist = LuminanceHistogram::from_values([0.0, 100.0, 120.0, -3.0], 10.0).unwrap();
        assert_eq!(hist.bin(0).unwrap().count, 2);
        assert_eq!(hist.bin(9).unwrap().count, 2);
        assert_eq!(hist.bin(9).unwrap().end, 100.0);
        assert_eq!(hist.total(), 4);
    }

    #[test]
    fn test_weighted() {
        let hist = LuminanceHistogram::from_weighted([(50.0, 10), (50.5, 5), (75.0, 1)], 1.0).unwrap();
        assert_eq!(hist.total(), 16);
        let bins: Vec<_> = hist.non_empty().collect();
        assert_eq!(bins.len(), 2);
        assert_eq!(bins[0].start, 75.0);
        assert_eq!(bins[1].count, 15);
    }

    #[test]
    fn test_nan_rejected() {
        let mut hist = LuminanceHistogram::new(1.0).unwrap();
        assert!(hist.add(f64::NAN, 1).is_err());
        assert_eq!(hist.total(), 0);
    }
}
