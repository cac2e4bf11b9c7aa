//! Cluster maps.
//!
//! A cluster map is the source image with every pixel repainted in the
//! representative color of its group. Pixels whose color is noise, or is
//! missing from the clustered table, are painted [`NOISE_COLOR`].

use std::collections::HashMap;
use std::path::Path;

use hue_core::{ClusterRepresentative, Label, Rgb8};
use image::{Rgb, RgbImage};
use tracing::{debug, warn};

use crate::atomic::write_png_atomic;
use crate::error::IoResult;
use crate::table::ClusteredSample;

/// Paint for noise pixels.
pub const NOISE_COLOR: Rgb8 = Rgb8::new(255, 0, 255);

/// Paint for each distinct color of `rows`.
pub fn map_palette(
    rows: &[ClusteredSample],
    groups: &[ClusterRepresentative],
) -> HashMap<Rgb8, Rgb8> {
    let by_label: HashMap<Label, Rgb8> = groups.iter().map(|g| (g.label, g.sample.rgb)).collect();
    rows.iter()
        .map(|row| {
            let paint = by_label.get(&row.label).copied().unwrap_or(NOISE_COLOR);
            (row.rgb, paint)
        })
        .collect()
}

/// Repaints `image` with group colors.
pub fn render_cluster_map(
    image: &RgbImage,
    rows: &[ClusteredSample],
    groups: &[ClusterRepresentative],
) -> RgbImage {
    let palette = map_palette(rows, groups);
    let mut out = image.clone();
    let mut unmapped = 0u64;
    for px in out.pixels_mut() {
        let paint = match palette.get(&Rgb8::from(px.0)) {
            Some(&paint) => paint,
            None => {
                unmapped += 1;
                NOISE_COLOR
            }
        };
        *px = Rgb(paint.to_array());
    }
    if unmapped > 0 {
        warn!(pixels = unmapped, "colors missing from the clustered table painted as noise");
    }
    out
}

/// Renders a cluster map and writes it as PNG.
pub fn write_cluster_map<P: AsRef<Path>>(
    path: P,
    image: &RgbImage,
    rows: &[ClusteredSample],
    groups: &[ClusterRepresentative],
) -> IoResult<()> {
    let path = path.as_ref();
    let map = render_cluster_map(image, rows, groups);
    write_png_atomic(path, &map)?;
    debug!(
        path = %path.display(),
        width = map.width(),
        height = map.height(),
        groups = groups.len(),
        "cluster map written"
    );
    Ok(())
}
