//! Data-driven game balance
//!
//! Every numeric knob of a session lives here. Defaults reproduce the
//! classic parameters; a JSON blob can override any subset of them.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Tunable game parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,

    // === Session ===
    /// Countdown start (seconds)
    pub game_duration: u32,
    /// Strong misses that end the session
    pub max_misses: u32,

    // === Spawning ===
    pub spawn_interval_ms: f64,
    pub p_strong: f32,
    pub fall_speed_min: f32,
    pub fall_speed_max: f32,
    pub item_min_width: f32,
    pub item_padding: f32,
    pub item_height: f32,
    pub item_spawn_y: f32,
    pub item_spawn_margin: f32,

    // === Basket ===
    pub basket_width: f32,
    pub basket_height: f32,
    /// Distance from the basket's top edge to the bottom of the playfield
    pub basket_floor_offset: f32,
    /// Units per tick while a direction is held
    pub basket_speed: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,

            game_duration: GAME_DURATION,
            max_misses: MAX_MISSES,

            spawn_interval_ms: SPAWN_INTERVAL_MS,
            p_strong: P_STRONG,
            fall_speed_min: FALL_SPEED_MIN,
            fall_speed_max: FALL_SPEED_MAX,
            item_min_width: ITEM_MIN_WIDTH,
            item_padding: ITEM_PADDING,
            item_height: ITEM_HEIGHT,
            item_spawn_y: ITEM_SPAWN_Y,
            item_spawn_margin: ITEM_SPAWN_MARGIN,

            basket_width: BASKET_WIDTH,
            basket_height: BASKET_HEIGHT,
            basket_floor_offset: BASKET_FLOOR_OFFSET,
            basket_speed: BASKET_SPEED,
        }
    }
}

impl Tuning {
    /// Parse tuning overrides, falling back to defaults on malformed input
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str::<Tuning>(json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning.sanitized()
            }
            Err(e) => {
                log::warn!("Ignoring malformed tuning ({}), using defaults", e);
                Self::default()
            }
        }
    }

    /// Floor line of the playfield: items below it have fallen off
    #[inline]
    pub fn floor_y(&self) -> f32 {
        self.playfield_height
    }

    /// Fix up values that would make the session meaningless
    fn sanitized(mut self) -> Self {
        if self.fall_speed_max < self.fall_speed_min {
            std::mem::swap(&mut self.fall_speed_min, &mut self.fall_speed_max);
        }
        self.p_strong = self.p_strong.clamp(0.0, 1.0);
        self.max_misses = self.max_misses.max(1);
        self.game_duration = self.game_duration.max(1);
        self.basket_width = self.basket_width.min(self.playfield_width);
        self
    }
}
