//! DBSCAN clustering command.
//!
//! LAB values are taken from the input table as written; they are not
//! recomputed from RGB.

use super::ClusterPlan;
use crate::ClusterArgs;
use crate::config::Settings;
use anyhow::{Context, Result};
use hue_cluster::{ClusterRepresentative, cluster_samples};
use hue_core::{ColorSample, LabPoint};
use hue_io::{ClusteredSample, LabSample};
use tracing::{info, trace};

/// Clustered rows plus one representative per group.
pub struct Clustered {
    pub rows: Vec<ClusteredSample>,
    pub groups: Vec<ClusterRepresentative>,
}

/// Clusters LAB rows.
pub fn cluster_rows(rows: &[LabSample], plan: &ClusterPlan) -> Result<Clustered> {
    let samples: Vec<ColorSample> = rows.iter().map(LabSample::sample).collect();
    let labs: Vec<LabPoint> = rows.iter().map(|r| r.lab).collect();

    let report = cluster_samples(&samples, &labs, &plan.dbscan, plan.weighted)
        .context("Clustering failed")?;

    let clustered = rows
        .iter()
        .zip(report.assignment.labels())
        .map(|(&row, &label)| ClusteredSample::new(row, label))
        .collect();

    info!(
        colors = rows.len(),
        groups = report.representatives.len(),
        noise = report.assignment.n_noise(),
        eps = plan.dbscan.eps(),
        min_samples = plan.dbscan.min_samples(),
        weighted = plan.weighted,
        "Clustered colors"
    );
    Ok(Clustered {
        rows: clustered,
        groups: report.representatives,
    })
}

/// Runs the cluster command.
pub fn run(args: ClusterArgs, settings: &Settings, verbose: u8) -> Result<()> {
    trace!(input = %args.input.display(), output = %args.output.display(), "cluster::run");

    let plan = ClusterPlan::resolve(&args.opts, &settings.cluster)?;
    let rows: Vec<LabSample> = super::load_samples(&args.input)?;
    let clustered = cluster_rows(&rows, &plan)?;

    super::save_table(&args.output, &clustered.rows, args.format)?;
    if let Some(groups) = &args.groups {
        super::save_table(groups, &clustered.groups, args.format)?;
    }

    if verbose > 0 {
        println!(
            "{} colors in {} groups -> {}",
            clustered.rows.len(),
            clustered.groups.len(),
            args.output.display()
        );
    }
    Ok(())
}
