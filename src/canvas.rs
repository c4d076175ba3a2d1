use field_core::{Rgba, Surface};
use glam::DVec2;
use std::f64::consts::TAU;
use web_sys as web;

/// `Surface` over a 2D canvas context.
///
/// Colour strings are cached so consecutive shapes in the same colour do
/// not reformat or reassign the style.
pub struct CanvasSurface {
    ctx: web::CanvasRenderingContext2d,
    fill: Option<Rgba>,
    stroke: Option<Rgba>,
    line_width: f64,
}

impl CanvasSurface {
    pub fn new(ctx: web::CanvasRenderingContext2d) -> Self {
        Self {
            ctx,
            fill: None,
            stroke: None,
            line_width: f64::NAN,
        }
    }

    /// Forget cached styles. Resizing a canvas resets its context state.
    pub fn invalidate_styles(&mut self) {
        self.fill = None;
        self.stroke = None;
        self.line_width = f64::NAN;
    }

    #[inline]
    fn set_fill(&mut self, color: Rgba) {
        if self.fill != Some(color) {
            self.ctx.set_fill_style_str(&color.to_string());
            self.fill = Some(color);
        }
    }

    #[inline]
    fn set_stroke(&mut self, color: Rgba, width: f64) {
        if self.stroke != Some(color) {
            self.ctx.set_stroke_style_str(&color.to_string());
            self.stroke = Some(color);
        }
        if self.line_width != width {
            self.ctx.set_line_width(width);
            self.line_width = width;
        }
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_circle(&mut self, center: DVec2, radius: f64, color: Rgba) {
        self.set_fill(color);
        self.ctx.begin_path();
        // a rejected arc (e.g. negative radius) just skips this shape
        if self.ctx.arc(center.x, center.y, radius, 0.0, TAU).is_ok() {
            self.ctx.fill();
        }
    }

    fn stroke_line(&mut self, from: DVec2, to: DVec2, width: f64, color: Rgba) {
        self.set_stroke(color, width);
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
    }
}
