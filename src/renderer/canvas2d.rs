//! `<canvas>` 2D context surface

use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::draw::{Rgba, Surface};

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    fill: Option<Rgba>,
}

impl CanvasSurface {
    /// Wrap a canvas; `None` when the browser refuses a 2D context
    pub fn new(canvas: HtmlCanvasElement) -> Result<Option<Self>, JsValue> {
        let Some(ctx) = canvas.get_context("2d")? else {
            log::warn!("Canvas has no 2d context");
            return Ok(None);
        };
        let ctx: CanvasRenderingContext2d = ctx.dyn_into()?;
        Ok(Some(Self {
            canvas,
            ctx,
            fill: None,
        }))
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn set_fill(&mut self, color: Rgba) {
        // fillStyle assignment re-parses the CSS string
        if self.fill != Some(color) {
            self.ctx.set_fill_style_str(&color.to_string());
            self.fill = Some(color);
        }
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.fill_rect(x, y, width, height);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        // Resizing resets context state, including fillStyle
        self.fill = None;
    }
}
