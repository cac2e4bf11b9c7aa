//! Full pipeline on one image.
//!
//! Every stage is computed before anything is written, so a failing stage
//! leaves `out_dir` untouched. Output names:
//!
//! - `color_data.<ext>` - distinct colors and counts
//! - `color_data_lab.<ext>` - with LAB values
//! - `clustered_lab_data.<ext>` - with group numbers
//! - `group_colors.<ext>` - one representative per group
//! - `swatch.png` - palette strip (with `--swatch`)
//! - `cluster_map.png` - image in group colors (with `--map`)

use super::ClusterPlan;
use super::cluster::cluster_rows;
use crate::RunArgs;
use crate::config::Settings;
use anyhow::{Context, Result};
use hue_io::render_cluster_map;
use hue_io::swatch::write_swatch;
use tracing::{info, trace, warn};

/// Stem of the color-count table.
pub const COLOR_TABLE: &str = "color_data";
/// Stem of the LAB table.
pub const LAB_TABLE: &str = "color_data_lab";
/// Stem of the clustered table.
pub const CLUSTERED_TABLE: &str = "clustered_lab_data";
/// Stem of the group table.
pub const GROUP_TABLE: &str = "group_colors";
/// Swatch file name.
pub const SWATCH_FILE: &str = "swatch.png";
/// Cluster map file name.
pub const MAP_FILE: &str = "cluster_map.png";

/// Runs the run command.
pub fn run(args: RunArgs, settings: &Settings, verbose: u8) -> Result<()> {
    trace!(image = %args.image.display(), out_dir = %args.out_dir.display(), "run::run");

    let plan = ClusterPlan::resolve(&args.opts, &settings.cluster)?;

    let img = hue_io::read_rgb8(&args.image)
        .with_context(|| format!("Failed to load: {}", args.image.display()))?;
    let samples = hue_core::extract_from_rgb_bytes(img.as_raw()).context("Failed to extract colors")?;
    let lab = super::lab_rows(&samples);
    let clustered = cluster_rows(&lab, &plan)?;
    let map = args
        .map
        .then(|| render_cluster_map(&img, &clustered.rows, &clustered.groups));

    let ext = args.format.extension();
    let path = |stem: &str| args.out_dir.join(format!("{stem}.{ext}"));
    let format = Some(args.format);

    super::save_table(&path(COLOR_TABLE), &samples, format)?;
    super::save_table(&path(LAB_TABLE), &lab, format)?;
    super::save_table(&path(CLUSTERED_TABLE), &clustered.rows, format)?;
    super::save_table(&path(GROUP_TABLE), &clustered.groups, format)?;

    if args.swatch {
        let swatch = args.out_dir.join(SWATCH_FILE);
        if clustered.groups.is_empty() {
            warn!("no groups found, swatch skipped");
        } else {
            write_swatch(&swatch, &clustered.groups, settings.swatch.width, settings.swatch.height)
                .with_context(|| format!("Failed to save: {}", swatch.display()))?;
        }
    }

    if let Some(map) = &map {
        let path = args.out_dir.join(MAP_FILE);
        hue_io::write_png_atomic(&path, map)
            .with_context(|| format!("Failed to save: {}", path.display()))?;
    }

    info!(
        colors = samples.len(),
        groups = clustered.groups.len(),
        out_dir = %args.out_dir.display(),
        "Pipeline complete"
    );
    if verbose > 0 {
        println!(
            "{} distinct colors, {} groups -> {}",
            samples.len(),
            clustered.groups.len(),
            args.out_dir.display()
        );
    }
    Ok(())
}
