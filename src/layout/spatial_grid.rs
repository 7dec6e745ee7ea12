// Spatial hash grid for neighbour queries between orbit nodes.
//
// Relaxation and verification only care about pairs closer than the
// required separation. Bucketing node centers into cells of that size means
// each node is only tested against the 3x3 block of cells around it.

use super::PointF;
use std::collections::HashMap;

/// A spatial hash grid over point indices.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    /// Size of each cell in the grid.
    cell_size: f64,
    /// Map from cell coordinates to the indices of the points inside it.
    cells: HashMap<(i64, i64), Vec<usize>>,
}

impl SpatialGrid {
    /// Create a new grid. Cell size should be at least the query radius.
    pub fn new(cell_size: f64) -> Self {
        Self {
            cell_size: if cell_size.is_finite() && cell_size > 1e-6 { cell_size } else { 1.0 },
            cells: HashMap::new(),
        }
    }

    /// Build a grid holding every point, indexed by its position in `points`.
    pub fn from_points(cell_size: f64, points: &[PointF]) -> Self {
        let mut grid = Self::new(cell_size);
        for (i, p) in points.iter().enumerate() {
            grid.insert(i, *p);
        }
        grid
    }

    fn cell_of(&self, p: PointF) -> (i64, i64) {
        (
            (p.x / self.cell_size).floor() as i64,
            (p.y / self.cell_size).floor() as i64,
        )
    }

    pub fn insert(&mut self, index: usize, p: PointF) {
        let cell = self.cell_of(p);
        self.cells.entry(cell).or_default().push(index);
    }

    /// Indices of points in the 3x3 block of cells around `p`, ascending.
    /// May include points farther than one cell away; callers do the exact check.
    pub fn query(&self, p: PointF) -> Vec<usize> {
        let (cx, cy) = self.cell_of(p);
        let mut result = Vec::new();
        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(indices) = self.cells.get(&(cx + dx, cy + dy)) {
                    result.extend_from_slice(indices);
                }
            }
        }
        // Cell iteration order is fixed but bucket contents are not sorted.
        result.sort_unstable();
        result.dedup();
        result
    }

    /// All pairs (i, j), i < j, whose distance is below `min_dist`, in
    /// ascending (i, j) order.
    pub fn close_pairs(&self, points: &[PointF], min_dist: f64) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, p) in points.iter().enumerate() {
            for j in self.query(*p) {
                if j > i && p.distance(points[j]) < min_dist {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }
}
