//! Cluster map command.
//!
//! Without `--clustered` the image is clustered from scratch. With it the
//! group numbers come from an earlier `cluster` run and the DBSCAN
//! options are ignored.

use super::ClusterPlan;
use super::cluster::{Clustered, cluster_rows};
use crate::MapArgs;
use crate::config::Settings;
use anyhow::{Context, Result};
use hue_core::{Assignment, ColorSample};
use hue_io::ClusteredSample;
use tracing::{info, trace};

/// Rebuilds the group table of an already clustered table.
pub fn regroup(rows: Vec<ClusteredSample>) -> Result<Clustered> {
    let samples: Vec<ColorSample> = rows.iter().map(ClusteredSample::sample).collect();
    let assignment = Assignment::new(rows.iter().map(|r| r.label).collect());
    let groups = hue_cluster::representatives(&samples, &assignment)
        .context("Failed to rebuild groups")?;
    Ok(Clustered { rows, groups })
}

/// Runs the map command.
pub fn run(args: MapArgs, settings: &Settings, verbose: u8) -> Result<()> {
    trace!(image = %args.image.display(), output = %args.output.display(), "map::run");

    let img = hue_io::read_rgb8(&args.image)
        .with_context(|| format!("Failed to load: {}", args.image.display()))?;

    let clustered = match &args.clustered {
        Some(table) => regroup(super::load_samples(table)?)?,
        None => {
            let plan = ClusterPlan::resolve(&args.opts, &settings.cluster)?;
            let samples = hue_core::extract_from_rgb_bytes(img.as_raw())
                .context("Failed to extract colors")?;
            cluster_rows(&super::lab_rows(&samples), &plan)?
        }
    };

    hue_io::write_cluster_map(&args.output, &img, &clustered.rows, &clustered.groups)
        .with_context(|| format!("Failed to save: {}", args.output.display()))?;

    info!(
        width = img.width(),
        height = img.height(),
        groups = clustered.groups.len(),
        "Rendered cluster map"
    );
    if verbose > 0 {
        println!("{} groups -> {}", clustered.groups.len(), args.output.display());
    }
    Ok(())
}
