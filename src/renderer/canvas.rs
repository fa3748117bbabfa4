//! Canvas 2D backend

use std::f64::consts::TAU;

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::scene::DrawCommand;
use crate::sim::Viewport;

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, String> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| format!("get_context failed: {:?}", e))?
            .ok_or("2d context unavailable")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "context is not CanvasRenderingContext2d")?;
        Ok(Self { canvas, ctx })
    }

    /// Match the backing store to the element's CSS size at the device pixel
    /// ratio, and draw in CSS pixels
    pub fn resize(&self, dpr: f64) {
        let rect = self.canvas.get_bounding_client_rect();
        self.canvas.set_width((rect.width() * dpr) as u32);
        self.canvas.set_height((rect.height() * dpr) as u32);
        let _ = self.ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0);
        log::debug!("Canvas resized to {}x{} @ {}x", rect.width(), rect.height(), dpr);
    }

    /// Current drawable size in CSS pixels, `None` if not laid out
    pub fn viewport(&self) -> Option<Viewport> {
        let rect = self.canvas.get_bounding_client_rect();
        Some(Viewport::new(rect.width() as f32, rect.height() as f32)).filter(Viewport::is_drawable)
    }

    pub fn draw(&self, commands: &[DrawCommand]) {
        let ctx = &self.ctx;
        for command in commands {
            match command {
                DrawCommand::Clear { width, height } => {
                    ctx.clear_rect(0.0, 0.0, *width as f64, *height as f64);
                }
                DrawCommand::Disc {
                    center,
                    radius,
                    color,
                } => {
                    ctx.begin_path();
                    let _ = ctx.arc(center.x as f64, center.y as f64, *radius as f64, 0.0, TAU);
                    ctx.set_fill_style_str(&color.css());
                    ctx.fill();
                }
                DrawCommand::Arc {
                    center,
                    radius,
                    sweep,
                    width,
                    color,
                } => {
                    ctx.begin_path();
                    let _ = ctx.arc(
                        center.x as f64,
                        center.y as f64,
                        *radius as f64,
                        0.0,
                        *sweep as f64,
                    );
                    ctx.set_stroke_style_str(&color.css());
                    ctx.set_line_width(*width as f64);
                    ctx.stroke();
                }
            }
        }
    }
}
