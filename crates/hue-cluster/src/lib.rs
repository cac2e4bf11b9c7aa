//! # hue-cluster
//!
//! Density-based clustering of CIELAB colors.
//!
//! [`Dbscan`] groups points reachable from each other through chains of
//! dense neighborhoods and labels sparse outliers as [`NOISE`]. The
//! semantics follow scikit-learn's `DBSCAN`:
//!
//! - neighbors are points at Euclidean distance `<= eps`, the point itself
//!   included;
//! - a point is *core* when its neighborhood holds at least `min_samples`
//!   points (or, in weighted mode, `min_samples` total weight);
//! - seeds are visited in input order and labels are numbered in order of
//!   discovery. Label values are opaque.
//!
//! After clustering, [`representatives`] picks the most frequent color of
//! each cluster.
//!
//! # Usage
//!
//! ```rust
//! use hue_cluster::{Dbscan, NOISE};
//! use hue_core::LabPoint;
//!
//! let points = [
//!     LabPoint::new(0.0, 0.0, 0.0),
//!     LabPoint::new(0.1, 0.0, 0.0),
//!     LabPoint::new(50.0, 0.0, 0.0),
//! ];
//! let assignment = Dbscan::new(1.0, 2).unwrap().fit(&points).unwrap();
//! assert_eq!(assignment.partition(), vec![vec![0, 1]]);
//! assert_eq!(assignment.get(2), Some(NOISE));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod dbscan;
mod error;
mod grid;
mod representative;

pub use dbscan::{DEFAULT_EPS, DEFAULT_MIN_SAMPLES, Dbscan};
pub use error::{ClusterError, ClusterResult};
pub use hue_core::{Assignment, ClusterRepresentative, Label, NOISE};
pub use representative::{ClusterReport, cluster_samples, representatives};
