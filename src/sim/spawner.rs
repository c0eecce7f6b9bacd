//! Rate-limited item spawning
//!
//! Draw order per spawn is fixed (classification, label, x, fall speed) so a
//! scripted random source reproduces the same items.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::item::{Classification, Item};
use super::rng::RandomSource;
use crate::Tuning;
use crate::pools::LabelPools;
use crate::renderer::TextMeasure;

/// Spawn cadence state for one session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Spawner {
    /// Timestamp (ms) of the last fire; `None` until the first frame arms it
    last_spawn: Option<f64>,
}

impl Spawner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last_spawn(&self) -> Option<f64> {
        self.last_spawn
    }

    /// Maybe create an item at frame time `now` (ms)
    ///
    /// The first call only arms the timer. After that the spawner fires once
    /// strictly more than `spawn_interval_ms` has elapsed. Firing advances
    /// the timer even when the chosen pool is empty and nothing is produced.
    pub fn try_spawn<R, M>(
        &mut self,
        now: f64,
        tuning: &Tuning,
        pools: &LabelPools,
        rng: &mut R,
        measure: &M,
    ) -> Option<Item>
    where
        R: RandomSource + ?Sized,
        M: TextMeasure + ?Sized,
    {
        let Some(last) = self.last_spawn else {
            self.last_spawn = Some(now);
            return None;
        };
        if now - last <= tuning.spawn_interval_ms {
            return None;
        }
        self.last_spawn = Some(now);

        let class = if rng.chance(tuning.p_strong) {
            Classification::Strong
        } else {
            Classification::Weak
        };
        let pool = pools.pool(class);
        if pool.is_empty() {
            log::trace!("Spawn skipped: {:?} pool is empty", class);
            return None;
        }
        let label = pool[rng.pick_index(pool.len())].clone();

        let width = tuning
            .item_min_width
            .max(measure.measure_text_width(&label) + tuning.item_padding);
        let margin = tuning.item_spawn_margin;
        let x = rng.range(margin, tuning.playfield_width - width - margin);
        let vy = rng.range(tuning.fall_speed_min, tuning.fall_speed_max);

        log::debug!("Spawned {:?} '{}' at x={:.1} vy={:.2}", class, label, x, vy);

        Some(Item {
            pos: Vec2::new(x, tuning.item_spawn_y),
            vy,
            label,
            class,
            size: Vec2::new(width, tuning.item_height),
        })
    }
}
