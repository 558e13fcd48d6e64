//! Rendering module
//!
//! The render step is a pure function of grid and parameters; surfaces are
//! pluggable (canvas 2D in the browser, a command recorder elsewhere).

pub mod draw;
#[cfg(target_arch = "wasm32")]
pub mod canvas2d;

pub use draw::{CommandBuffer, DrawCommand, RenderParams, Rgba, Surface, cell_color, render};
#[cfg(target_arch = "wasm32")]
pub use canvas2d::CanvasSurface;
