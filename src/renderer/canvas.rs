//! Canvas 2D renderer
//!
//! Clears the playfield and paints every drop as a shaded teardrop with its
//! equation on top.

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::shapes::{self, DropSprite, Shadow};
use crate::consts::*;
use crate::settings::Settings;
use crate::sim::WaterDrop;

/// Canvas-backed drop renderer
pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    shadows: bool,
    highlight: bool,
}

impl CanvasRenderer {
    /// Size the canvas to the playfield and grab its 2D context
    pub fn new(canvas: &HtmlCanvasElement, settings: &Settings) -> Result<Self, JsValue> {
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);

        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("Canvas 2D context unavailable"))?
            .dyn_into::<CanvasRenderingContext2d>()?;

        log::info!("Canvas renderer ready ({}x{})", CANVAS_WIDTH, CANVAS_HEIGHT);
        Ok(Self {
            ctx,
            shadows: settings.effective_shadows(),
            highlight: settings.effective_highlight(),
        })
    }

    /// Draw one frame
    pub fn draw(&self, drops: &[WaterDrop]) {
        self.ctx
            .clear_rect(0.0, 0.0, CANVAS_WIDTH as f64, CANVAS_HEIGHT as f64);

        for drop in drops {
            let sprite = DropSprite::new(drop);
            if let Err(e) = self.draw_drop(&sprite) {
                log::warn!("Failed to draw drop '{}': {:?}", drop.text, e);
            }
        }
    }

    fn draw_drop(&self, sprite: &DropSprite<'_>) -> Result<(), JsValue> {
        let ctx = &self.ctx;

        ctx.save();
        self.apply_shadow(&shapes::DROP_SHADOW);

        let path = &sprite.outline;
        ctx.begin_path();
        ctx.move_to(path.start.x as f64, path.start.y as f64);
        for curve in [path.left, path.right] {
            ctx.bezier_curve_to(
                curve.c1.x as f64,
                curve.c1.y as f64,
                curve.c2.x as f64,
                curve.c2.y as f64,
                curve.end.x as f64,
                curve.end.y as f64,
            );
        }
        ctx.close_path();

        let g = &sprite.gradient;
        let gradient = ctx.create_radial_gradient(
            g.inner.x as f64,
            g.inner.y as f64,
            g.inner_radius as f64,
            g.outer.x as f64,
            g.outer.y as f64,
            g.outer_radius as f64,
        )?;
        for (offset, color) in shapes::WATER_STOPS {
            gradient.add_color_stop(offset, &color.css())?;
        }
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.fill();

        ctx.set_stroke_style_str(&shapes::DROP_OUTLINE.css());
        ctx.set_line_width(shapes::DROP_OUTLINE_WIDTH);
        ctx.stroke();

        if self.highlight {
            let (center, radius) = sprite.highlight;
            ctx.begin_path();
            ctx.arc(
                center.x as f64,
                center.y as f64,
                radius as f64,
                0.0,
                std::f64::consts::TAU,
            )?;
            ctx.set_fill_style_str(&shapes::HIGHLIGHT.css());
            ctx.fill();
        }
        ctx.restore();

        ctx.save();
        ctx.set_font(shapes::LABEL_FONT);
        ctx.set_fill_style_str(&shapes::LABEL_COLOR.css());
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        self.apply_shadow(&shapes::LABEL_SHADOW);
        ctx.fill_text(
            sprite.label,
            sprite.label_pos.x as f64,
            sprite.label_pos.y as f64,
        )?;
        ctx.restore();

        Ok(())
    }

    fn apply_shadow(&self, shadow: &Shadow) {
        if !self.shadows {
            return;
        }
        self.ctx.set_shadow_color(&shadow.color.css());
        self.ctx.set_shadow_blur(shadow.blur);
        self.ctx.set_shadow_offset_y(shadow.offset_y);
    }
}
