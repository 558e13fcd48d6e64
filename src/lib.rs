//! Life Backdrop - Game of Life page background
//!
//! Core modules:
//! - `sim`: Host-agnostic simulation (grid, patterns, seeding, stepping)
//! - `renderer`: Render step against a 2D drawing surface
//! - `driver`: Animation loop state machine (mount, frames, resize, teardown)
//! - `theme`: Light/dark theme signal with change notification
//! - `settings`: Data-driven configuration
//! - `platform`: Browser host wiring (wasm32 only)

pub mod driver;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;
pub mod theme;

pub use driver::{Backdrop, DriverState, FrameOutcome, FrameScheduler, ManualScheduler};
pub use settings::{SeedStyle, Settings};
pub use theme::{Theme, ThemeSignal};

/// Simulation and rendering tunables
pub mod consts {
    /// Default pixels per grid cell
    pub const DEFAULT_CELL_SIZE: u32 = 8;
    /// Default base fill alpha
    pub const DEFAULT_OPACITY: f32 = 0.1;
    /// Default minimum milliseconds between generations
    pub const DEFAULT_SPEED_MS: f64 = 100.0;
    /// Default viewport before the host measures the real one
    pub const DEFAULT_WIDTH: u32 = 800;
    pub const DEFAULT_HEIGHT: u32 = 600;

    /// Fresh gliders are injected every N generations (0 disables)
    pub const RESEED_INTERVAL: u64 = 100;

    /// Random positions tried per pattern before giving up on it
    pub const PLACEMENT_ATTEMPTS: u32 = 50;
    /// Minimum Chebyshev distance between two placed pattern anchors.
    /// Must exceed the largest pattern extent so placements never touch.
    pub const MIN_SPACING: usize = 6;
    /// Depth (in cells) of the band along each edge where gliders spawn
    pub const EDGE_BAND: usize = 8;
    /// One edge glider per this many cells of edge length
    pub const GLIDER_DENSITY: usize = 30;
    /// One interior still-life per this many grid cells
    pub const STILL_LIFE_DENSITY: usize = 2500;
    /// Alive probability for the random soup seed
    pub const SOUP_DENSITY: f64 = 0.3;

    /// Opacity multiplier applied in dark mode
    pub const DARK_OPACITY_BOOST: f32 = 2.0;
}
