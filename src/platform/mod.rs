//! Platform abstraction layer
//!
//! The simulation, renderer, and driver never touch the DOM. This module
//! supplies the browser pieces:
//! - Frame clock (`requestAnimationFrame`)
//! - Viewport measurement and resize events
//! - Theme detection via `MutationObserver`
//! - Canvas 2D surface

#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(target_arch = "wasm32")]
pub use web::{BackdropHandle, RafScheduler, init, mount};
