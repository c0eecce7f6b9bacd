//! Canvas2D renderer
//!
//! Everything is drawn in one color so items give no visual hint about
//! their classification.

use std::f64::consts::PI;

use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{MonospaceEstimate, Renderer, TextMeasure};
use crate::sim::{Basket, Item, SessionState};

const ITEM_FONT: &str = "16px monospace";
const ITEM_COLOR: &str = "#e6edf3";
const LOCK_COLOR: &str = "#e6edf3";
const BASKET_COLOR: &str = "#7ee787";
const FLOOR_COLOR: &str = "#e6edf3";

pub struct CanvasRenderer {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    fallback: MonospaceEstimate,
}

impl CanvasRenderer {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("no 2d context"))?
            .dyn_into()?;
        ctx.set_font(ITEM_FONT);
        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
            fallback: MonospaceEstimate::default(),
        })
    }

    /// Monochrome padlock with its top-left corner at (x, y)
    fn draw_lock(&self, x: f64, y: f64) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.save();
        ctx.translate(x, y)?;
        ctx.set_stroke_style_str(LOCK_COLOR);
        ctx.set_line_width(2.0);

        // Shackle
        ctx.begin_path();
        ctx.arc(12.0, 10.0, 8.0, PI, 0.0)?;
        ctx.stroke();

        // Body
        ctx.stroke_rect(4.0, 10.0, 16.0, 14.0);

        // Keyhole
        ctx.begin_path();
        ctx.arc(12.0, 18.0, 2.0, 0.0, PI * 2.0)?;
        ctx.move_to(12.0, 20.0);
        ctx.line_to(12.0, 24.0);
        ctx.stroke();

        ctx.restore();
        Ok(())
    }

    fn draw_item(&self, item: &Item) -> Result<(), JsValue> {
        let (x, y) = (item.pos.x as f64, item.pos.y as f64);
        self.draw_lock(x - 22.0, y - 8.0)?;
        self.ctx.set_fill_style_str(ITEM_COLOR);
        self.ctx.set_font(ITEM_FONT);
        self.ctx.fill_text(&item.label, x, y)
    }

    fn draw_frame(&self, state: &SessionState, basket: &Basket) -> Result<(), JsValue> {
        let ctx = &self.ctx;
        ctx.clear_rect(0.0, 0.0, self.width, self.height);

        // Floor line
        ctx.set_global_alpha(0.2);
        ctx.set_fill_style_str(FLOOR_COLOR);
        ctx.fill_rect(0.0, self.height - 2.0, self.width, 2.0);
        ctx.set_global_alpha(1.0);

        ctx.set_fill_style_str(BASKET_COLOR);
        ctx.fill_rect(
            basket.pos.x as f64,
            basket.pos.y as f64,
            basket.size.x as f64,
            basket.size.y as f64,
        );

        for item in &state.items {
            self.draw_item(item)?;
        }
        Ok(())
    }
}

impl TextMeasure for CanvasRenderer {
    fn measure_text_width(&self, text: &str) -> f32 {
        self.ctx.set_font(ITEM_FONT);
        match self.ctx.measure_text(text) {
            Ok(metrics) => metrics.width() as f32,
            Err(_) => self.fallback.measure_text_width(text),
        }
    }
}

impl Renderer for CanvasRenderer {
    fn draw(&mut self, state: &SessionState, basket: &Basket) {
        if let Err(e) = self.draw_frame(state, basket) {
            log::warn!("Draw error: {:?}", e);
        }
    }
}
