//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Tick-scaled motion only (no wall-clock reads)
//! - Injected randomness only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies beyond the measurement trait

pub mod autopilot;
pub mod basket;
pub mod collision;
pub mod item;
pub mod rng;
pub mod session;
pub mod spawner;
pub mod state;
pub mod tick;

pub use autopilot::autopilot_target;
pub use basket::{Basket, HeldDirections};
pub use collision::Aabb;
pub use item::{Classification, Item};
pub use rng::{PcgRandom, RandomSource};
pub use session::{Session, SessionToken};
pub use spawner::Spawner;
pub use state::{CaughtLogEntry, Hud, Phase, ReviewRow, SessionReport, SessionState, Verdict};
pub use tick::step;
