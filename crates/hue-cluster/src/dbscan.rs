//! DBSCAN over LAB points.

use crate::error::{ClusterError, ClusterResult};
use crate::grid::Grid;
use hue_core::{Assignment, Label, LabPoint, NOISE};
use rayon::prelude::*;
use tracing::{debug, trace};

/// Default neighborhood radius (CIE76 delta E).
pub const DEFAULT_EPS: f64 = 2.5;

/// Default core-point threshold.
pub const DEFAULT_MIN_SAMPLES: usize = 2;

/// DBSCAN parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dbscan {
    eps: f64,
    min_samples: usize,
}

impl Default for Dbscan {
    fn default() -> Self {
        Self {
            eps: DEFAULT_EPS,
            min_samples: DEFAULT_MIN_SAMPLES,
        }
    }
}

impl Dbscan {
    /// Creates a clusterer.
    ///
    /// # Errors
    ///
    /// [`ClusterError::InvalidParameter`] unless `eps` is finite and `> 0`
    /// and `min_samples >= 1`.
    pub fn new(eps: f64, min_samples: usize) -> ClusterResult<Self> {
        if !eps.is_finite() || eps <= 0.0 {
            return Err(ClusterError::InvalidParameter(format!(
                "eps must be finite and > 0, got {eps}"
            )));
        }
        if min_samples == 0 {
            return Err(ClusterError::InvalidParameter(
                "min_samples must be >= 1".into(),
            ));
        }
        Ok(Self { eps, min_samples })
    }

    /// Neighborhood radius.
    #[inline]
    pub fn eps(&self) -> f64 {
        self.eps
    }

    /// Core-point threshold.
    #[inline]
    pub fn min_samples(&self) -> usize {
        self.min_samples
    }

    /// Clusters `points`, every point weighing one.
    pub fn fit(&self, points: &[LabPoint]) -> ClusterResult<Assignment> {
        self.run(points, None)
    }

    /// Clusters `points` where point `i` weighs `weights[i]`.
    ///
    /// A point is core when the summed weight of its neighborhood reaches
    /// `min_samples`. With pixel counts as weights, one color covering many
    /// pixels is a cluster on its own.
    ///
    /// # Errors
    ///
    /// [`ClusterError::LengthMismatch`] if `weights.len() != points.len()`.
    pub fn fit_weighted(&self, points: &[LabPoint], weights: &[u64]) -> ClusterResult<Assignment> {
        if weights.len() != points.len() {
            return Err(ClusterError::LengthMismatch {
                expected: points.len(),
                got: weights.len(),
            });
        }
        self.run(points, Some(weights))
    }

    fn run(&self, points: &[LabPoint], weights: Option<&[u64]>) -> ClusterResult<Assignment> {
        if let Some(index) = points.iter().position(|p| !p.is_finite()) {
            return Err(ClusterError::NonFinite { index });
        }
        if points.is_empty() {
            return Ok(Assignment::default());
        }

        let grid = Grid::new(points, self.eps);
        let threshold = self.min_samples as u64;

        let is_core: Vec<bool> = (0..points.len())
            .into_par_iter()
            .map(|i| {
                let mut density = 0u64;
                grid.for_each_neighbor(i, |j| {
                    // only compared against the threshold, so saturating is exact
                    density = density.saturating_add(weights.map_or(1, |w| w[j]));
                });
                density >= threshold
            })
            .collect();

        let labels = expand(&grid, &is_core);
        let assignment = Assignment::new(labels);

        debug!(
            points = points.len(),
            core = is_core.iter().filter(|&&c| c).count(),
            clusters = assignment.n_clusters(),
            noise = assignment.n_noise(),
            eps = self.eps,
            min_samples = self.min_samples,
            weighted = weights.is_some(),
            "DBSCAN finished"
        );
        Ok(assignment)
    }
}

/// Grows clusters from core points in input order.
///
/// Depth-first with an explicit stack; a border point keeps the label of
/// the first cluster that reaches it.
fn expand(grid: &Grid<'_>, is_core: &[bool]) -> Vec<Label> {
    let mut labels = vec![NOISE; is_core.len()];
    let mut next: Label = 0;
    let mut stack: Vec<usize> = Vec::new();

    for seed in 0..is_core.len() {
        if labels[seed] != NOISE || !is_core[seed] {
            continue;
        }

        let mut i = seed;
        loop {
            if labels[i] == NOISE {
                labels[i] = next;
                if is_core[i] {
                    for j in grid.neighbors(i) {
                        if labels[j] == NOISE {
                            stack.push(j);
                        }
                    }
                }
            }
            match stack.pop() {
                Some(j) => i = j,
                None => break,
            }
        }

        trace!(label = next, seed, "cluster complete");
        next += 1;
    }

    labels
}
