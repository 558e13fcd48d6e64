//! Render step
//!
//! Draws a grid onto anything that can clear itself and fill rectangles.
//! Each live cell becomes a `(cell_size - 1)` square so neighbours keep a
//! one pixel gap.

use std::fmt;

use crate::consts::DARK_OPACITY_BOOST;
use crate::sim::Grid;
use crate::theme::Theme;

/// Straight-alpha colour
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }
}

impl fmt::Display for Rgba {
    /// CSS `rgba()` form, usable as a canvas `fillStyle`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Accent blue on light pages
pub const LIGHT_ACCENT: Rgba = Rgba::new(59, 130, 246, 1.0);
/// Paler blue for dark pages
pub const DARK_ACCENT: Rgba = Rgba::new(147, 197, 253, 1.0);

/// Fill colour for live cells
pub fn cell_color(theme: Theme, opacity: f32) -> Rgba {
    match theme {
        Theme::Light => LIGHT_ACCENT.with_alpha(opacity),
        Theme::Dark => DARK_ACCENT.with_alpha((opacity * DARK_OPACITY_BOOST).min(1.0)),
    }
}

/// Everything the render step reads besides the grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParams {
    /// Surface size in pixels
    pub width: u32,
    pub height: u32,
    pub cell_size: u32,
    pub opacity: f32,
    pub theme: Theme,
}

/// 2D drawing target
pub trait Surface {
    /// Erase the whole `width` x `height` area
    fn clear(&mut self, width: f64, height: f64);
    /// Colour used by subsequent `fill_rect` calls
    fn set_fill(&mut self, color: Rgba);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
    /// Backing store size changed
    fn resize(&mut self, _width: u32, _height: u32) {}
}

/// Draw every live cell; returns the number of cells filled
pub fn render<S: Surface + ?Sized>(grid: &Grid, params: &RenderParams, surface: &mut S) -> usize {
    surface.clear(params.width as f64, params.height as f64);
    surface.set_fill(cell_color(params.theme, params.opacity));

    let cell = params.cell_size as f64;
    let side = (cell - 1.0).max(0.0);
    let mut filled = 0;
    for (row, col) in grid.live_cells() {
        surface.fill_rect(col as f64 * cell, row as f64 * cell, side, side);
        filled += 1;
    }
    filled
}

/// A single recorded call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f64, height: f64 },
    SetFill(Rgba),
    FillRect { x: f64, y: f64, width: f64, height: f64 },
    Resize { width: u32, height: u32 },
}

/// Surface that records calls instead of drawing
#[derive(Debug, Clone, Default)]
pub struct CommandBuffer {
    pub commands: Vec<DrawCommand>,
}

impl CommandBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_log(&mut self) {
        self.commands.clear();
    }

    pub fn fill_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillRect { .. }))
            .count()
    }

    pub fn clear_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Clear { .. }))
            .count()
    }

    /// Most recent fill colour
    pub fn last_fill(&self) -> Option<Rgba> {
        self.commands.iter().rev().find_map(|c| match c {
            DrawCommand::SetFill(color) => Some(*color),
            _ => None,
        })
    }
}

impl Surface for CommandBuffer {
    fn clear(&mut self, width: f64, height: f64) {
        self.commands.push(DrawCommand::Clear { width, height });
    }

    fn set_fill(&mut self, color: Rgba) {
        self.commands.push(DrawCommand::SetFill(color));
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.commands.push(DrawCommand::FillRect { x, y, width, height });
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.commands.push(DrawCommand::Resize { width, height });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Dimensions;

    fn params(theme: Theme) -> RenderParams {
        RenderParams {
            width: 80,
            height: 64,
            cell_size: 8,
            opacity: 0.1,
            theme,
        }
    }

    #[test]
    fn test_empty_grid_clears_without_fills() {
        let grid = Grid::new(Dimensions::new(8, 10));
        let mut surface = CommandBuffer::new();
        assert_eq!(render(&grid, &params(Theme::Light), &mut surface), 0);
        assert_eq!(surface.clear_count(), 1);
        assert_eq!(surface.fill_count(), 0);
        assert_eq!(
            surface.commands[0],
            DrawCommand::Clear {
                width: 80.0,
                height: 64.0
            }
        );
    }

    #[test]
    fn test_one_fill_per_live_cell() {
        let live = [(0, 0), (2, 5), (7, 9)];
        let grid = Grid::from_live_cells(Dimensions::new(8, 10), &live);
        let mut surface = CommandBuffer::new();
        assert_eq!(render(&grid, &params(Theme::Light), &mut surface), 3);

        let rects: Vec<_> = surface
            .commands
            .iter()
            .filter_map(|c| match *c {
                DrawCommand::FillRect { x, y, width, height } => Some((x, y, width, height)),
                _ => None,
            })
            .collect();
        assert_eq!(
            rects,
            vec![
                (0.0, 0.0, 7.0, 7.0),
                (40.0, 16.0, 7.0, 7.0),
                (72.0, 56.0, 7.0, 7.0),
            ]
        );
    }

    #[test]
    fn test_light_palette() {
        let grid = Grid::new(Dimensions::new(1, 1));
        let mut surface = CommandBuffer::new();
        render(&grid, &params(Theme::Light), &mut surface);
        let color = surface.last_fill().unwrap();
        assert_eq!(color, Rgba::new(59, 130, 246, 0.1));
        assert_eq!(color.to_string(), "rgba(59, 130, 246, 0.1)");
    }

    #[test]
    fn test_dark_palette_is_lighter_and_stronger() {
        let light = cell_color(Theme::Light, 0.1);
        let dark = cell_color(Theme::Dark, 0.1);
        assert!(dark.a > light.a);
        assert!(dark.r > light.r && dark.g > light.g && dark.b > light.b);
        assert_eq!(cell_color(Theme::Dark, 0.8).a, 1.0);
    }

    #[test]
    fn test_unit_cells_have_no_area() {
        let grid = Grid::from_live_cells(Dimensions::new(2, 2), &[(1, 1)]);
        let mut surface = CommandBuffer::new();
        let p = RenderParams {
            cell_size: 1,
            ..params(Theme::Light)
        };
        render(&grid, &p, &mut surface);
        assert_eq!(
            surface.commands.last(),
            Some(&DrawCommand::FillRect {
                x: 1.0,
                y: 1.0,
                width: 0.0,
                height: 0.0
            })
        );
    }
}
