//! Rendering capabilities
//!
//! The simulation only ever asks a renderer to measure text (for item
//! widths) and to draw the current frame. Neither call mutates game state.

#[cfg(target_arch = "wasm32")]
pub mod canvas;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasRenderer;

use crate::sim::{Basket, SessionState};

/// Measures the rendered width of a label
pub trait TextMeasure {
    fn measure_text_width(&self, text: &str) -> f32;
}

/// Full renderer: measurement plus frame drawing
pub trait Renderer: TextMeasure {
    fn draw(&mut self, state: &SessionState, basket: &Basket);
}

/// Deterministic width estimate for a fixed-pitch font
///
/// Stands in for real font metrics in headless runs and tests.
#[derive(Debug, Clone, Copy)]
pub struct MonospaceEstimate {
    pub char_width: f32,
}

impl Default for MonospaceEstimate {
    fn default() -> Self {
        // 16px monospace advances ~9.6px per glyph
        Self { char_width: 9.6 }
    }
}

impl TextMeasure for MonospaceEstimate {
    fn measure_text_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.char_width
    }
}

/// Renderer that draws nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessRenderer {
    pub metrics: MonospaceEstimate,
}

impl TextMeasure for HeadlessRenderer {
    fn measure_text_width(&self, text: &str) -> f32 {
        self.metrics.measure_text_width(text)
    }
}

impl Renderer for HeadlessRenderer {
    fn draw(&mut self, _state: &SessionState, _basket: &Basket) {}
}
