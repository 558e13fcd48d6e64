//! Simulation module
//!
//! Everything about the automaton lives here and stays host-agnostic:
//! - No rendering, timers, or DOM access
//! - RNG injected (seeded `Pcg32`) so tests can replay a run
//! - Grids are replaced each generation, never edited in place

pub mod grid;
pub mod life;
pub mod patterns;
pub mod seed;

pub use grid::{Dimensions, Grid, Viewport};
pub use life::{SimParams, Simulation, StepReport};
pub use patterns::{Edge, Heading, Shape};
pub use seed::{Seeder, seed_grid, soup};
