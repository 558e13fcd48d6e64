//! Toroidal cell grid and the B3/S23 update rule

use super::patterns::Shape;

/// Viewport size in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Grid size in cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    pub rows: usize,
    pub cols: usize,
}

impl Dimensions {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Cells that fit in the viewport, rounded down on both axes
    pub fn from_viewport(viewport: Viewport, cell_size: u32) -> Self {
        let cell_size = cell_size.max(1);
        Self {
            rows: (viewport.height / cell_size) as usize,
            cols: (viewport.width / cell_size) as usize,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }
}

/// Rectangular matrix of alive/dead cells, row-major
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dims: Dimensions,
    cells: Vec<bool>,
}

impl Grid {
    /// All-dead grid
    pub fn new(dims: Dimensions) -> Self {
        Self {
            dims,
            cells: vec![false; dims.cell_count()],
        }
    }

    /// Grid with exactly the given cells alive (out-of-range cells ignored)
    pub fn from_live_cells(dims: Dimensions, live: &[(usize, usize)]) -> Self {
        let mut grid = Self::new(dims);
        for &(row, col) in live {
            grid.set(row, col, true);
        }
        grid
    }

    pub fn dims(&self) -> Dimensions {
        self.dims
    }

    pub fn rows(&self) -> usize {
        self.dims.rows
    }

    pub fn cols(&self) -> usize {
        self.dims.cols
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.dims.cols + col
    }

    /// Cell state; anything outside the grid reads as dead
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.dims.rows && col < self.dims.cols && self.cells[self.index(row, col)]
    }

    /// Set a cell; writes outside the grid are dropped
    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        if row < self.dims.rows && col < self.dims.cols {
            let idx = self.index(row, col);
            self.cells[idx] = alive;
        }
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.cells.iter().any(|&c| c)
    }

    /// Live cell coordinates in row-major order
    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.dims.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(move |(i, _)| (i / cols, i % cols))
    }

    /// Live cells among the 8 surrounding positions, wrapping on both axes.
    /// On a 1-wide axis the wrapped positions land back on the cell's own
    /// row or column, so those cells count more than once.
    pub fn neighbor_count(&self, row: usize, col: usize) -> u8 {
        let Dimensions { rows, cols } = self.dims;
        if rows == 0 || cols == 0 {
            return 0;
        }
        let (rows, cols) = (rows as isize, cols as isize);
        let mut count = 0u8;
        for dr in [-1isize, 0, 1] {
            for dc in [-1isize, 0, 1] {
                if dr == 0 && dc == 0 {
                    continue;
                }
                let r = (row as isize + dr).rem_euclid(rows) as usize;
                let c = (col as isize + dc).rem_euclid(cols) as usize;
                if self.cells[self.index(r, c)] {
                    count += 1;
                }
            }
        }
        count
    }

    /// Next generation under the standard rule. The receiver is untouched.
    pub fn step(&self) -> Grid {
        let mut next = vec![false; self.cells.len()];
        for row in 0..self.dims.rows {
            for col in 0..self.dims.cols {
                let alive = self.cells[self.index(row, col)];
                let neighbors = self.neighbor_count(row, col);
                next[self.index(row, col)] = matches!((alive, neighbors), (true, 2) | (true, 3) | (false, 3));
            }
        }
        Grid {
            dims: self.dims,
            cells: next,
        }
    }

    /// True when `shape` anchored at `(row, col)` lies entirely inside the grid
    pub fn fits(&self, shape: Shape, row: usize, col: usize) -> bool {
        let (h, w) = shape.extent();
        row + h <= self.dims.rows && col + w <= self.dims.cols
    }

    /// Bring `shape`'s cells alive at the anchor. Writes nothing and returns
    /// false if any part would fall outside the grid.
    pub fn stamp(&mut self, shape: Shape, row: usize, col: usize) -> bool {
        if !self.fits(shape, row, col) {
            return false;
        }
        for &(dr, dc) in shape.cells() {
            self.set(row + dr, col + dc, true);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::patterns::{Heading, Shape};
    use proptest::prelude::*;

    fn dims(rows: usize, cols: usize) -> Dimensions {
        Dimensions::new(rows, cols)
    }

    #[test]
    fn test_neighbor_count_wraps_corner() {
        let grid = Grid::from_live_cells(dims(10, 10), &[(0, 0)]);
        assert_eq!(grid.neighbor_count(9, 9), 1);
        assert_eq!(grid.neighbor_count(0, 9), 1);
        assert_eq!(grid.neighbor_count(9, 0), 1);
        assert_eq!(grid.neighbor_count(1, 1), 1);
        assert_eq!(grid.neighbor_count(0, 0), 0);
        assert_eq!(grid.neighbor_count(5, 5), 0);
    }

    #[test]
    fn test_neighbor_count_wraps_edges() {
        let grid = Grid::from_live_cells(dims(6, 8), &[(0, 4), (3, 7)]);
        assert_eq!(grid.neighbor_count(5, 4), 1);
        assert_eq!(grid.neighbor_count(5, 3), 1);
        assert_eq!(grid.neighbor_count(3, 0), 1);
        assert_eq!(grid.neighbor_count(2, 0), 1);
    }

    #[test]
    fn test_neighbor_count_single_row_and_column() {
        let row = Grid::from_live_cells(dims(1, 5), &[(0, 2)]);
        assert_eq!(row.neighbor_count(0, 2), 2);
        assert_eq!(row.neighbor_count(0, 1), 3);
        assert_eq!(row.neighbor_count(0, 0), 0);

        let col = Grid::from_live_cells(dims(5, 1), &[(2, 0)]);
        assert_eq!(col.neighbor_count(2, 0), 2);
        assert_eq!(col.neighbor_count(3, 0), 3);
        assert_eq!(col.neighbor_count(4, 0), 0);

        let single = Grid::from_live_cells(dims(1, 1), &[(0, 0)]);
        assert_eq!(single.neighbor_count(0, 0), 8);
        assert_eq!(Grid::new(dims(1, 1)).neighbor_count(0, 0), 0);
    }

    #[test]
    fn test_lone_cell_on_single_row_survives() {
        let grid = Grid::from_live_cells(dims(1, 5), &[(0, 2)]);
        let next = grid.step();
        assert!(next.get(0, 2));
        assert!(next.get(0, 1));
        assert!(next.get(0, 3));
        assert!(!next.get(0, 0));
        assert!(!next.get(0, 4));

        // Sees itself eight times
        let single = Grid::from_live_cells(dims(1, 1), &[(0, 0)]);
        assert!(single.step().is_empty());
    }

    #[test]
    fn test_survival_and_death() {
        // Live centre with n live neighbours picked from the ring
        let ring = [(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)];
        for n in 0..=8 {
            let mut live: Vec<_> = ring[..n].iter().map(|&(r, c)| (r + 3, c + 3)).collect();
            live.push((4, 4));
            let grid = Grid::from_live_cells(dims(12, 12), &live);
            assert_eq!(grid.neighbor_count(4, 4) as usize, n);
            let next = grid.step();
            assert_eq!(next.get(4, 4), n == 2 || n == 3, "live cell with {n} neighbours");
        }
    }

    #[test]
    fn test_birth() {
        let ring = [(0, 0), (0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1), (2, 2)];
        for n in 0..=8 {
            let live: Vec<_> = ring[..n].iter().map(|&(r, c)| (r + 3, c + 3)).collect();
            let grid = Grid::from_live_cells(dims(12, 12), &live);
            let next = grid.step();
            assert_eq!(next.get(4, 4), n == 3, "dead cell with {n} neighbours");
        }
    }

    #[test]
    fn test_block_is_still_life() {
        let block = Grid::from_live_cells(dims(8, 8), &[(3, 3), (3, 4), (4, 3), (4, 4)]);
        let mut grid = block.clone();
        for _ in 0..20 {
            grid = grid.step();
            assert_eq!(grid, block);
        }
    }

    #[test]
    fn test_block_on_seam_is_still_life() {
        // Block split across the wrap on both axes
        let block = Grid::from_live_cells(dims(8, 8), &[(7, 7), (7, 0), (0, 7), (0, 0)]);
        assert_eq!(block.step(), block);
    }

    #[test]
    fn test_glider_translates_diagonally() {
        let d = dims(10, 10);
        let glider = Shape::Glider(Heading::SouthEast);
        let mut grid = Grid::new(d);
        assert!(grid.stamp(glider, 0, 0));

        for _ in 0..4 {
            grid = grid.step();
        }

        let mut expected: Vec<_> = glider.cells().iter().map(|&(r, c)| (r + 1, c + 1)).collect();
        let mut got: Vec<_> = grid.live_cells().collect();
        got.sort();
        expected.sort();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_glider_wraps_around() {
        let d = dims(10, 10);
        let glider = Shape::Glider(Heading::SouthEast);
        let mut grid = Grid::new(d);
        assert!(grid.stamp(glider, 7, 7));

        for _ in 0..4 {
            grid = grid.step();
        }

        let mut expected: Vec<_> = glider
            .cells()
            .iter()
            .map(|&(r, c)| ((r + 8) % 10, (c + 8) % 10))
            .collect();
        let mut got: Vec<_> = grid.live_cells().collect();
        got.sort();
        expected.sort();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_step_does_not_mutate_source() {
        let grid = Grid::from_live_cells(dims(5, 5), &[(2, 1), (2, 2), (2, 3)]);
        let before = grid.clone();
        let next = grid.step();
        assert_eq!(grid, before);
        assert_ne!(next, before);
    }

    #[test]
    fn test_stamp_rejects_out_of_bounds() {
        let mut grid = Grid::new(dims(5, 5));
        assert!(!grid.stamp(Shape::Block, 4, 0));
        assert!(!grid.stamp(Shape::Glider(Heading::NorthWest), 0, 3));
        assert!(grid.is_empty());
        assert!(grid.stamp(Shape::Glider(Heading::NorthWest), 2, 2));
        assert_eq!(grid.live_count(), 5);
    }

    #[test]
    fn test_empty_dimensions() {
        let grid = Grid::new(dims(0, 7));
        assert_eq!(grid.neighbor_count(0, 0), 0);
        assert_eq!(grid.step().live_count(), 0);
        assert!(!grid.get(0, 0));
    }

    #[test]
    fn test_dimensions_from_viewport() {
        let d = Dimensions::from_viewport(Viewport::new(1920, 1080), 8);
        assert_eq!(d, dims(135, 240));
        let d = Dimensions::from_viewport(Viewport::new(803, 599), 8);
        assert_eq!(d, dims(74, 100));
        let d = Dimensions::from_viewport(Viewport::new(7, 7), 8);
        assert!(d.is_empty());
    }

    proptest! {
        #[test]
        fn prop_dimensions_floor(width in 1u32..5000, height in 1u32..5000, cell in 1u32..64) {
            let d = Dimensions::from_viewport(Viewport::new(width, height), cell);
            prop_assert_eq!(d.rows, (height / cell) as usize);
            prop_assert_eq!(d.cols, (width / cell) as usize);
        }

        #[test]
        fn prop_neighbor_count_in_range(
            rows in 1usize..12,
            cols in 1usize..12,
            bits in proptest::collection::vec(any::<bool>(), 144),
        ) {
            let live: Vec<_> = (0..rows * cols)
                .filter(|&i| bits[i])
                .map(|i| (i / cols, i % cols))
                .collect();
            let grid = Grid::from_live_cells(Dimensions::new(rows, cols), &live);
            for r in 0..rows {
                for c in 0..cols {
                    prop_assert!(grid.neighbor_count(r, c) <= 8);
                }
            }
            prop_assert_eq!(grid.step().dims(), grid.dims());
        }

        #[test]
        fn prop_neighbor_count_matches_wrapped_window(
            rows in 1usize..8,
            cols in 1usize..8,
            bits in proptest::collection::vec(any::<bool>(), 64),
        ) {
            let live: Vec<_> = (0..rows * cols)
                .filter(|&i| bits[i])
                .map(|i| (i / cols, i % cols))
                .collect();
            let grid = Grid::from_live_cells(Dimensions::new(rows, cols), &live);
            for r in 0..rows {
                for c in 0..cols {
                    // 3x3 window of wrapped coordinates, centre taken out once
                    let window_rows = [(r + rows - 1) % rows, r, (r + 1) % rows];
                    let window_cols = [(c + cols - 1) % cols, c, (c + 1) % cols];
                    let window = window_rows
                        .iter()
                        .flat_map(|&wr| window_cols.iter().map(move |&wc| (wr, wc)))
                        .filter(|&(wr, wc)| grid.get(wr, wc))
                        .count();
                    let expected = window - usize::from(grid.get(r, c));
                    prop_assert_eq!(grid.neighbor_count(r, c) as usize, expected);
                }
            }
        }

        #[test]
        fn prop_single_cell_seen_by_wrapped_neighbors(
            rows in 3usize..20,
            cols in 3usize..20,
            r in 0usize..20,
            c in 0usize..20,
        ) {
            let (r, c) = (r % rows, c % cols);
            let grid = Grid::from_live_cells(Dimensions::new(rows, cols), &[(r, c)]);
            let up = (r + rows - 1) % rows;
            let left = (c + cols - 1) % cols;
            prop_assert_eq!(grid.neighbor_count(up, left), 1);
            prop_assert_eq!(grid.neighbor_count((r + 1) % rows, (c + 1) % cols), 1);
        }
    }
}
