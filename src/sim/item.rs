//! Falling items

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;

/// Which pool a label came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    Strong,
    Weak,
}

/// A falling labeled item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Top-left corner
    pub pos: Vec2,
    /// Units per tick, positive is down
    pub vy: f32,
    pub label: String,
    pub class: Classification,
    /// Width/height of the bounding box
    pub size: Vec2,
}

impl Item {
    #[inline]
    pub fn is_strong(&self) -> bool {
        self.class == Classification::Strong
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Advance one tick
    #[inline]
    pub fn fall(&mut self) {
        self.pos.y += self.vy;
    }
}
