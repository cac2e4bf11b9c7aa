//! Palette swatch rendering.
//!
//! A swatch is a horizontal strip with one vertical band per cluster, in
//! the order given. Band width is proportional to the cluster's pixel
//! total; every band is at least one pixel wide.

use std::path::Path;

use hue_core::ClusterRepresentative;
use image::{Rgb, RgbImage};
use tracing::debug;

use crate::atomic::write_png_atomic;
use crate::error::{IoError, IoResult};

/// Default swatch width in pixels.
pub const DEFAULT_WIDTH: u32 = 512;

/// Default swatch height in pixels.
pub const DEFAULT_HEIGHT: u32 = 64;

/// Splits `width` pixels among `weights`.
///
/// Largest-remainder rounding, then a one pixel floor per band; the
/// result always sums to `width`. Zero total weight splits evenly.
pub fn band_widths(weights: &[u64], width: u32) -> IoResult<Vec<u32>> {
    if weights.is_empty() {
        return Err(IoError::Validation("no groups to draw".into()));
    }
    if (width as usize) < weights.len() {
        return Err(IoError::Validation(format!(
            "swatch width {width} is less than the number of groups ({})",
            weights.len()
        )));
    }

    let even;
    let weights = if weights.iter().all(|&w| w == 0) {
        even = vec![1u64; weights.len()];
        &even[..]
    } else {
        weights
    };
    let total: u128 = weights.iter().map(|&w| w as u128).sum();
    let width_wide = width as u128;

    let mut widths: Vec<u32> = Vec::with_capacity(weights.len());
    let mut remainders: Vec<(u128, usize)> = Vec::with_capacity(weights.len());
    for (i, &w) in weights.iter().enumerate() {
        let scaled = w as u128 * width_wide;
        widths.push((scaled / total) as u32);
        remainders.push((scaled % total, i));
    }

    let assigned: u32 = widths.iter().sum();
    remainders.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    for &(_, i) in remainders.iter().take((width - assigned) as usize) {
        widths[i] += 1;
    }

    // floor of one pixel, paid for by the widest bands
    for i in 0..widths.len() {
        if widths[i] == 0 {
            widths[i] = 1;
            if let Some(widest) = (0..widths.len()).max_by_key(|&j| (widths[j], std::cmp::Reverse(j))) {
                widths[widest] -= 1;
            }
        }
    }
    Ok(widths)
}

/// Renders a swatch image.
pub fn render_swatch(groups: &[ClusterRepresentative], width: u32, height: u32) -> IoResult<RgbImage> {
    if height == 0 {
        return Err(IoError::Validation("swatch height must be > 0".into()));
    }
    let weights: Vec<u64> = groups.iter().map(|g| g.total_count).collect();
    let widths = band_widths(&weights, width)?;

    let mut columns: Vec<Rgb<u8>> = Vec::with_capacity(width as usize);
    for (group, &w) in groups.iter().zip(&widths) {
        let color = Rgb(group.sample.rgb.to_array());
        columns.extend(std::iter::repeat_n(color, w as usize));
    }

    Ok(RgbImage::from_fn(width, height, |x, _| columns[x as usize]))
}

/// Renders a swatch and writes it as PNG.
pub fn write_swatch<P: AsRef<Path>>(
    path: P,
    groups: &[ClusterRepresentative],
    width: u32,
    height: u32,
) -> IoResult<()> {
    let path = path.as_ref();
    let img = render_swatch(groups, width, height)?;
    write_png_atomic(path, &img)?;
    debug!(path = %path.display(), groups = groups.len(), width, height, "swatch written");
    Ok(())
}
