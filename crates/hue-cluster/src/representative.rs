//! Cluster representatives.

use crate::dbscan::Dbscan;
use crate::error::{ClusterError, ClusterResult};
use hue_core::{Assignment, ClusterRepresentative, ColorSample, LabPoint, Label, NOISE};
use std::collections::BTreeMap;
use tracing::debug;

/// Result of clustering a sample table.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterReport {
    /// Per-sample labels, parallel to the input samples.
    pub assignment: Assignment,
    /// One entry per cluster, ordered by label.
    pub representatives: Vec<ClusterRepresentative>,
}

impl ClusterReport {
    /// Number of clusters found.
    #[inline]
    pub fn n_clusters(&self) -> usize {
        self.assignment.n_clusters()
    }
}

/// Picks the most frequent sample of every cluster.
///
/// Ties on `count` go to the smallest RGB triple. Noise is skipped.
///
/// # Errors
///
/// - [`ClusterError::LengthMismatch`] if `samples` and `assignment` differ
///   in length
/// - [`ClusterError::CountOverflow`] if a cluster's pixel total exceeds
///   `u64::MAX`
pub fn representatives(
    samples: &[ColorSample],
    assignment: &Assignment,
) -> ClusterResult<Vec<ClusterRepresentative>> {
    if samples.len() != assignment.len() {
        return Err(ClusterError::LengthMismatch {
            expected: samples.len(),
            got: assignment.len(),
        });
    }

    let mut by_label: BTreeMap<Label, ClusterRepresentative> = BTreeMap::new();
    for (sample, &label) in samples.iter().zip(assignment.labels()) {
        if label == NOISE {
            continue;
        }
        let entry = by_label.entry(label).or_insert(ClusterRepresentative {
            label,
            sample: *sample,
            members: 0,
            total_count: 0,
        });
        entry.members += 1;
        entry.total_count = entry
            .total_count
            .checked_add(sample.count)
            .ok_or(ClusterError::CountOverflow { label })?;
        if beats(sample, &entry.sample) {
            entry.sample = *sample;
        }
    }

    Ok(by_label.into_values().collect())
}

#[inline]
fn beats(candidate: &ColorSample, current: &ColorSample) -> bool {
    candidate.count > current.count
        || (candidate.count == current.count && candidate.rgb < current.rgb)
}

/// Clusters `samples` by their LAB coordinates and picks representatives.
///
/// `labs[i]` must be the LAB value of `samples[i]`. With `weighted`, each
/// point weighs its pixel count.
pub fn cluster_samples(
    samples: &[ColorSample],
    labs: &[LabPoint],
    dbscan: &Dbscan,
    weighted: bool,
) -> ClusterResult<ClusterReport> {
    if samples.len() != labs.len() {
        return Err(ClusterError::LengthMismatch {
            expected: samples.len(),
            got: labs.len(),
        });
    }

    let assignment = if weighted {
        let weights: Vec<u64> = samples.iter().map(|s| s.count).collect();
        dbscan.fit_weighted(labs, &weights)?
    } else {
        dbscan.fit(labs)?
    };
    let representatives = representatives(samples, &assignment)?;

    debug!(
        samples = samples.len(),
        clusters = representatives.len(),
        "representatives selected"
    );
    Ok(ClusterReport {
        assignment,
        representatives,
    })
}
