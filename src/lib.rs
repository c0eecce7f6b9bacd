//! Password Catch - a falling-item arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, motion, collisions, session state)
//! - `renderer`: Drawing/text-measurement capability plus the Canvas2D backend
//! - `platform`: Cooperative scheduling of the frame and countdown tasks
//! - `pools`: Strong/weak label pools injected at startup
//! - `tuning`: Data-driven game balance

pub mod platform;
pub mod pools;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use pools::LabelPools;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Session length in seconds
    pub const GAME_DURATION: u32 = 60;
    /// Strong items allowed to hit the floor before the session ends
    pub const MAX_MISSES: u32 = 5;
    /// Minimum time between spawns (ms)
    pub const SPAWN_INTERVAL_MS: f64 = 900.0;
    /// Probability that a spawn draws from the strong pool
    pub const P_STRONG: f32 = 0.6;
    /// Fall speed range (units per tick)
    pub const FALL_SPEED_MIN: f32 = 1.2;
    pub const FALL_SPEED_MAX: f32 = 2.8;

    /// Item geometry
    pub const ITEM_MIN_WIDTH: f32 = 60.0;
    pub const ITEM_PADDING: f32 = 30.0; // room for the padlock glyph
    pub const ITEM_HEIGHT: f32 = 20.0;
    pub const ITEM_SPAWN_Y: f32 = -20.0;
    pub const ITEM_SPAWN_MARGIN: f32 = 10.0;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 500.0;

    /// Basket defaults
    pub const BASKET_WIDTH: f32 = 120.0;
    pub const BASKET_HEIGHT: f32 = 16.0;
    pub const BASKET_FLOOR_OFFSET: f32 = 28.0;
    pub const BASKET_SPEED: f32 = 6.0;

    /// Countdown period (ms)
    pub const COUNTDOWN_PERIOD_MS: f64 = 1000.0;

    pub const TIP_CAUGHT_STRONG: &str = "Good mix of cases, numbers, symbols.";
    pub const TIP_CAUGHT_WEAK: &str = "Too common/easy to guess.";
    pub const TIP_MISSED_STRONG: &str = "Try to catch strong passwords to score.";

    pub const REASON_CAUGHT_WEAK: &str = "You caught a WEAK password.";
    pub const REASON_TOO_MANY_MISSES: &str = "You missed too many STRONG passwords.";
    pub const REASON_TIME_UP: &str = "Time up!";
    /// Shown when a session ended without a recorded reason
    pub const REASON_FALLBACK: &str = "Good run!";
}

/// Clamp `x` into `[lo, hi]`, collapsing to `lo` when the range is inverted
#[inline]
pub fn clamp_span(x: f32, lo: f32, hi: f32) -> f32 {
    x.min(hi).max(lo)
}
