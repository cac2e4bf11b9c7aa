//! Uniform grid index for fixed-radius neighbor queries.
//!
//! Cells are cubes slightly wider than `eps`, so any two points within
//! `eps` of each other sit in the same or adjacent cells and a query only
//! searches the 27 surrounding cells.

use hue_core::LabPoint;
use std::collections::HashMap;

type Cell = (i64, i64, i64);

/// Widening factor for the cell edge; keeps float rounding in `x / cell`
/// from pushing true neighbors two cells apart.
const CELL_SLACK: f64 = 1.0 + 1e-9;

pub(crate) struct Grid<'a> {
    points: &'a [LabPoint],
    eps: f64,
    cell: f64,
    cells: HashMap<Cell, Vec<usize>>,
}

impl<'a> Grid<'a> {
    pub(crate) fn new(points: &'a [LabPoint], eps: f64) -> Self {
        let cell = eps * CELL_SLACK;
        let mut cells: HashMap<Cell, Vec<usize>> = HashMap::new();
        for (i, p) in points.iter().enumerate() {
            cells.entry(cell_of(p, cell)).or_default().push(i);
        }
        Self {
            points,
            eps,
            cell,
            cells,
        }
    }

    /// Calls `f` for every point within `eps` of point `i`, itself included.
    ///
    /// Visit order is unspecified.
    pub(crate) fn for_each_neighbor(&self, i: usize, mut f: impl FnMut(usize)) {
        let p = &self.points[i];
        let (cx, cy, cz) = cell_of(p, self.cell);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    let key = (
                        cx.saturating_add(dx),
                        cy.saturating_add(dy),
                        cz.saturating_add(dz),
                    );
                    let Some(bucket) = self.cells.get(&key) else {
                        continue;
                    };
                    for &j in bucket {
                        if p.distance(&self.points[j]) <= self.eps {
                            f(j);
                        }
                    }
                }
            }
        }
    }

    /// Neighbor indices of point `i` in ascending order.
    pub(crate) fn neighbors(&self, i: usize) -> Vec<usize> {
        let mut out = Vec::new();
        self.for_each_neighbor(i, |j| out.push(j));
        out.sort_unstable();
        out
    }
}

#[inline]
fn cell_of(p: &LabPoint, cell: f64) -> Cell {
    (
        (p.l / cell).floor() as i64,
        (p.a / cell).floor() as i64,
        (p.b / cell).floor() as i64,
    )
}
