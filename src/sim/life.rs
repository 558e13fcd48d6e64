//! Generation stepping
//!
//! Owns the grid, the generation counter, and the RNG used for periodic
//! glider injection.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::grid::{Dimensions, Grid};
use super::patterns::{Heading, Shape};
use super::seed::seed_grid;
use crate::consts::EDGE_BAND;
use crate::settings::{SeedStyle, Settings};

/// Knobs the simulation reads from settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimParams {
    /// Inject gliders every N generations (0 disables)
    pub reseed_interval: u64,
    pub seed_style: SeedStyle,
}

impl From<&Settings> for SimParams {
    fn from(settings: &Settings) -> Self {
        Self {
            reseed_interval: settings.reseed_interval,
            seed_style: settings.seed_style,
        }
    }
}

impl Default for SimParams {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

/// What a single step did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepReport {
    /// Generation count after the step
    pub generation: u64,
    /// This generation hit the reseed interval
    pub reseeded: bool,
    /// Gliders that actually fit and were written
    pub injected: usize,
}

/// Running automaton
#[derive(Debug, Clone)]
pub struct Simulation {
    grid: Grid,
    generation: u64,
    params: SimParams,
    rng: Pcg32,
}

impl Simulation {
    /// Seeded from OS entropy; every mount looks different
    pub fn new(dims: Dimensions, params: SimParams) -> Self {
        let seed: u64 = rand::rng().random();
        Self::with_seed(dims, params, seed)
    }

    /// Reproducible simulation
    pub fn with_seed(dims: Dimensions, params: SimParams, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let grid = seed_grid(dims, params.seed_style, &mut rng);
        Self {
            grid,
            generation: 0,
            params,
            rng,
        }
    }

    /// Start from a hand-built grid
    pub fn from_grid(grid: Grid, params: SimParams, seed: u64) -> Self {
        Self {
            grid,
            generation: 0,
            params,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Throw the current grid away and reseed at new dimensions
    pub fn restart(&mut self, dims: Dimensions) {
        self.grid = seed_grid(dims, self.params.seed_style, &mut self.rng);
        self.generation = 0;
        log::debug!(
            "Simulation restarted at {}x{} with {} live cells",
            dims.rows,
            dims.cols,
            self.grid.live_count()
        );
    }

    /// Advance one generation
    pub fn step(&mut self) -> StepReport {
        self.grid = self.grid.step();
        self.generation += 1;

        let interval = self.params.reseed_interval;
        let reseeded = interval > 0 && self.generation % interval == 0;
        let injected = if reseeded { self.inject_gliders() } else { 0 };

        StepReport {
            generation: self.generation,
            reseeded,
            injected,
        }
    }

    /// Drop a downward glider near the top and an upward one near the bottom.
    /// Existing live cells are not checked; a glider that would cross the
    /// grid boundary is skipped.
    fn inject_gliders(&mut self) -> usize {
        let dims = self.grid.dims();
        if dims.is_empty() {
            return 0;
        }
        let mut injected = 0;

        let down = Shape::Glider(Heading::SouthEast);
        let row = self.rng.random_range(0..EDGE_BAND);
        let col = self.rng.random_range(0..dims.cols);
        if self.grid.stamp(down, row, col) {
            injected += 1;
        } else {
            log::trace!("Skipped top glider at ({}, {})", row, col);
        }

        let up = Shape::Glider(Heading::NorthWest);
        let offset = self.rng.random_range(0..EDGE_BAND);
        let col = self.rng.random_range(0..dims.cols);
        match dims.rows.checked_sub(up.extent().0 + offset) {
            Some(row) if self.grid.stamp(up, row, col) => injected += 1,
            _ => log::trace!("Skipped bottom glider (offset {}, col {})", offset, col),
        }

        injected
    }
}
