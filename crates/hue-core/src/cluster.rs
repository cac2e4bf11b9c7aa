//! Cluster assignment types.
//!
//! Label values are opaque identifiers. Two runs that discover the same
//! groups may number them differently, so comparisons between runs should
//! go through [`Assignment::partition`], never through raw label values.

use crate::sample::ColorSample;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Cluster label. Non-negative values are clusters, [`NOISE`] is noise.
pub type Label = i32;

/// Label of points not density-reachable from any core point.
pub const NOISE: Label = -1;

/// One label per input point.
///
/// # Example
///
/// ```rust
/// use hue_core::{Assignment, NOISE};
///
/// let a = Assignment::new(vec![0, 0, NOISE, 1]);
/// assert_eq!(a.n_clusters(), 2);
/// assert_eq!(a.n_noise(), 1);
/// assert_eq!(a.partition(), vec![vec![0, 1], vec![3]]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Assignment {
    labels: Vec<Label>,
    n_clusters: usize,
}

impl Assignment {
    /// Wraps a label vector, counting distinct non-negative labels.
    pub fn new(labels: Vec<Label>) -> Self {
        let n_clusters = labels
            .iter()
            .filter(|&&l| l != NOISE)
            .collect::<BTreeSet<_>>()
            .len();
        Self { labels, n_clusters }
    }

    /// Labels in input order.
    #[inline]
    pub fn labels(&self) -> &[Label] {
        &self.labels
    }

    /// Label of point `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<Label> {
        self.labels.get(index).copied()
    }

    /// Number of labeled points.
    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True if there are no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Number of discovered clusters (distinct non-noise labels).
    #[inline]
    pub fn n_clusters(&self) -> usize {
        self.n_clusters
    }

    /// Number of noise points.
    pub fn n_noise(&self) -> usize {
        self.labels.iter().filter(|&&l| l == NOISE).count()
    }

    /// Distinct non-noise labels in ascending order.
    pub fn cluster_labels(&self) -> Vec<Label> {
        self.labels
            .iter()
            .copied()
            .filter(|&l| l != NOISE)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Indices of the points carrying `label`.
    pub fn members(&self, label: Label) -> Vec<usize> {
        self.labels
            .iter()
            .enumerate()
            .filter(|&(_, &l)| l == label)
            .map(|(i, _)| i)
            .collect()
    }

    /// Cluster membership as index sets, independent of label values.
    ///
    /// Each inner vector is sorted; the outer vector is sorted by its
    /// first element. Noise points are excluded.
    pub fn partition(&self) -> Vec<Vec<usize>> {
        let mut groups: Vec<Vec<usize>> = self
            .cluster_labels()
            .into_iter()
            .map(|l| self.members(l))
            .collect();
        groups.sort();
        groups
    }
}

/// The representative color of one cluster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClusterRepresentative {
    /// Cluster label.
    pub label: Label,
    /// Most frequent sample of the cluster.
    pub sample: ColorSample,
    /// Number of samples in the cluster.
    pub members: usize,
    /// Sum of member pixel counts.
    pub total_count: u64,
}
