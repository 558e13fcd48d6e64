//! Initial grid construction
//!
//! Gliders are dropped into a band along each edge, heading inward. Each
//! placement is rejection-sampled: a candidate anchor is discarded when the
//! pattern would leave the grid or land within `MIN_SPACING` of a pattern
//! already placed. A pattern that runs out of attempts is skipped.

use std::ops::Range;

use rand::Rng;

use super::grid::{Dimensions, Grid};
use super::patterns::{Edge, Shape};
use crate::consts::*;
use crate::settings::SeedStyle;

/// Build a fresh grid for the given style
pub fn seed_grid<R: Rng>(dims: Dimensions, style: SeedStyle, rng: &mut R) -> Grid {
    match style {
        SeedStyle::Soup => soup(dims, SOUP_DENSITY, rng),
        SeedStyle::EdgeGliders => {
            let mut seeder = Seeder::new(dims, rng);
            seeder.edge_gliders();
            seeder.finish()
        }
        SeedStyle::EdgeGlidersWithStillLifes => {
            let mut seeder = Seeder::new(dims, rng);
            seeder.edge_gliders();
            seeder.interior_still_lifes();
            seeder.finish()
        }
    }
}

/// Independent random fill
pub fn soup<R: Rng>(dims: Dimensions, density: f64, rng: &mut R) -> Grid {
    let density = density.clamp(0.0, 1.0);
    let mut grid = Grid::new(dims);
    for row in 0..dims.rows {
        for col in 0..dims.cols {
            if rng.random_bool(density) {
                grid.set(row, col, true);
            }
        }
    }
    grid
}

/// Rows/cols an anchor may take so a pattern of `extent` hugs `edge`
fn edge_band(dims: Dimensions, edge: Edge, extent: (usize, usize)) -> Option<(Range<usize>, Range<usize>)> {
    let (h, w) = extent;
    // One past the last anchor that keeps the pattern inside the grid
    let row_end = (dims.rows + 1).checked_sub(h).filter(|&n| n > 0)?;
    let col_end = (dims.cols + 1).checked_sub(w).filter(|&n| n > 0)?;

    let ranges = match edge {
        Edge::Top => (0..row_end.min(EDGE_BAND), 0..col_end),
        Edge::Bottom => (row_end.saturating_sub(EDGE_BAND)..row_end, 0..col_end),
        Edge::Left => (0..row_end, 0..col_end.min(EDGE_BAND)),
        Edge::Right => (0..row_end, col_end.saturating_sub(EDGE_BAND)..col_end),
    };
    Some(ranges)
}

/// Anchor ranges for the interior, clear of every edge band
fn interior(dims: Dimensions, extent: (usize, usize)) -> Option<(Range<usize>, Range<usize>)> {
    let (h, w) = extent;
    let row_end = dims.rows.checked_sub(EDGE_BAND + h)?;
    let col_end = dims.cols.checked_sub(EDGE_BAND + w)?;
    let rows = EDGE_BAND..row_end + 1;
    let cols = EDGE_BAND..col_end + 1;
    (!rows.is_empty() && !cols.is_empty()).then_some((rows, cols))
}

/// Number of edge gliders for an edge of the given length
pub fn gliders_for_edge(edge_len: usize) -> usize {
    edge_len / GLIDER_DENSITY
}

/// Rejection-sampling placer; owns the grid and the anchors placed so far
pub struct Seeder<'a, R: Rng> {
    grid: Grid,
    rng: &'a mut R,
    placed: Vec<(usize, usize)>,
    skipped: usize,
}

impl<'a, R: Rng> Seeder<'a, R> {
    pub fn new(dims: Dimensions, rng: &'a mut R) -> Self {
        Self {
            grid: Grid::new(dims),
            rng,
            placed: Vec::new(),
            skipped: 0,
        }
    }

    /// Anchors of every pattern placed so far
    pub fn placements(&self) -> &[(usize, usize)] {
        &self.placed
    }

    /// Patterns given up on after exhausting their attempts
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    fn clear_of_others(&self, row: usize, col: usize) -> bool {
        self.placed
            .iter()
            .all(|&(r, c)| r.abs_diff(row).max(c.abs_diff(col)) >= MIN_SPACING)
    }

    /// Try up to `PLACEMENT_ATTEMPTS` random anchors in the given ranges
    pub fn place(&mut self, shape: Shape, rows: Range<usize>, cols: Range<usize>) -> bool {
        if rows.is_empty() || cols.is_empty() {
            self.skipped += 1;
            return false;
        }
        for _ in 0..PLACEMENT_ATTEMPTS {
            let row = self.rng.random_range(rows.clone());
            let col = self.rng.random_range(cols.clone());
            if !self.grid.fits(shape, row, col) || !self.clear_of_others(row, col) {
                continue;
            }
            self.grid.stamp(shape, row, col);
            self.placed.push((row, col));
            return true;
        }
        log::trace!("No room for {:?} after {} attempts", shape, PLACEMENT_ATTEMPTS);
        self.skipped += 1;
        false
    }

    /// Inward-heading gliders along all four edges
    pub fn edge_gliders(&mut self) {
        let dims = self.grid.dims();
        for edge in Edge::ALL {
            let count = match edge {
                Edge::Top | Edge::Bottom => gliders_for_edge(dims.cols),
                Edge::Left | Edge::Right => gliders_for_edge(dims.rows),
            };
            let shape = Shape::Glider(edge.inward_heading());
            let Some((rows, cols)) = edge_band(dims, edge, shape.extent()) else {
                continue;
            };
            for _ in 0..count {
                self.place(shape, rows.clone(), cols.clone());
            }
        }
    }

    /// Blocks and beehives scattered away from the edges
    pub fn interior_still_lifes(&mut self) {
        let dims = self.grid.dims();
        let count = dims.cell_count() / STILL_LIFE_DENSITY;
        for _ in 0..count {
            let shape = if self.rng.random_bool(0.5) {
                Shape::Block
            } else {
                Shape::Beehive
            };
            let Some((rows, cols)) = interior(dims, shape.extent()) else {
                continue;
            };
            self.place(shape, rows, cols);
        }
    }

    pub fn finish(self) -> Grid {
        log::debug!(
            "Seeded {}x{} grid: {} patterns placed, {} skipped",
            self.grid.rows(),
            self.grid.cols(),
            self.placed.len(),
            self.skipped
        );
        self.grid
    }
}
