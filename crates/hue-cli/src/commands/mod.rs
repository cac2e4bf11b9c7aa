//! CLI command implementations

pub mod cluster;
pub mod convert;
pub mod extract;
pub mod histogram;
pub mod map;
pub mod run;
pub mod swatch;

use anyhow::{Context, Result};
use hue_cluster::Dbscan;
use hue_color::LabConverter;
use hue_core::ColorSample;
use hue_io::{LabSample, SampleRow, TableFormat, TableRow};
use std::path::Path;

use crate::ClusterOpts;
use crate::config::ClusterSettings;

/// Load a sample table in canonical order
pub fn load_samples<R: SampleRow>(path: &Path) -> Result<Vec<R>> {
    hue_io::read_samples(path, None)
        .with_context(|| format!("Failed to load: {}", path.display()))
}

/// Save a table to path
pub fn save_table<R: TableRow>(path: &Path, rows: &[R], format: Option<TableFormat>) -> Result<()> {
    hue_io::write_table(path, rows, format)
        .with_context(|| format!("Failed to save: {}", path.display()))
}

/// Join samples with their LAB values
pub fn lab_rows(samples: &[ColorSample]) -> Vec<LabSample> {
    let labs = LabConverter::new().convert_samples(samples);
    samples
        .iter()
        .zip(labs)
        .map(|(&s, lab)| LabSample::new(s, lab))
        .collect()
}

/// Resolved DBSCAN settings: flags over config.
pub struct ClusterPlan {
    pub dbscan: Dbscan,
    pub weighted: bool,
}

impl ClusterPlan {
    pub fn resolve(opts: &ClusterOpts, settings: &ClusterSettings) -> Result<Self> {
        let eps = opts.eps.unwrap_or(settings.eps);
        let min_samples = opts.min_samples.unwrap_or(settings.min_samples);
        let dbscan = Dbscan::new(eps, min_samples).context("Invalid clustering parameters")?;
        Ok(Self {
            dbscan,
            weighted: opts.weight.resolve(settings.weighted),
        })
    }
}
