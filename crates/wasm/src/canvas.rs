//! [`Surface`] adapter over a browser `CanvasRenderingContext2d`.

use std::f64::consts::TAU;

use quiet_drift_core::{DVec2, DriftError, Glow, Rgba, Stroke, Surface};
use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d, width: f64, height: f64) -> Self {
        Self { ctx, width, height }
    }

    /// Records the canvas' new backing size. The element itself is sized by the caller.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }
}

fn js_error(context: &str, err: JsValue) -> DriftError {
    let detail = err.as_string().unwrap_or_else(|| format!("{err:?}"));
    DriftError::Surface(format!("{context}: {detail}"))
}

impl Surface for CanvasSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn clear(&mut self) -> Result<(), DriftError> {
        self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
        Ok(())
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) -> Result<(), DriftError> {
        self.ctx.set_fill_style_str(&color.to_css());
        self.ctx.begin_path();
        self.ctx
            .arc(center.x, center.y, radius, 0.0, TAU)
            .map_err(|e| js_error("arc", e))?;
        self.ctx.fill();
        Ok(())
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, stroke: Stroke) -> Result<(), DriftError> {
        self.ctx.set_stroke_style_str(&stroke.color.to_css());
        self.ctx.set_line_width(stroke.width);
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
        Ok(())
    }

    fn set_glow(&mut self, glow: Glow) -> Result<(), DriftError> {
        self.ctx.set_shadow_blur(glow.blur);
        self.ctx.set_shadow_color(&glow.color.to_css());
        Ok(())
    }

    fn reset_glow(&mut self) -> Result<(), DriftError> {
        self.ctx.set_shadow_blur(0.0);
        Ok(())
    }
}
