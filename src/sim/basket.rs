//! The player's basket and its controller
//!
//! Two input paths feed the basket: held direction keys integrated once per
//! tick, and absolute pointer positions applied as they arrive. Whichever
//! arrives last wins for that tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;
use crate::Tuning;
use crate::clamp_span;

/// Directions currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeldDirections {
    pub left: bool,
    pub right: bool,
}

impl HeldDirections {
    /// Net direction: -1, 0 or 1. Both held cancel.
    #[inline]
    pub fn axis(&self) -> f32 {
        (self.right as i8 - self.left as i8) as f32
    }
}

/// The player-controlled catcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Basket {
    /// Top-left corner; only `x` ever changes
    pub pos: Vec2,
    pub size: Vec2,
    /// Units per tick while a direction is held
    pub speed: f32,
    /// Right bound of the playfield
    playfield_width: f32,
}

impl Basket {
    /// Centered horizontally, resting above the floor
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(
                tuning.playfield_width / 2.0 - tuning.basket_width / 2.0,
                tuning.playfield_height - tuning.basket_floor_offset,
            ),
            size: Vec2::new(tuning.basket_width, tuning.basket_height),
            speed: tuning.basket_speed,
            playfield_width: tuning.playfield_width,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.pos, self.size)
    }

    /// Largest legal `x`
    #[inline]
    pub fn max_x(&self) -> f32 {
        (self.playfield_width - self.size.x).max(0.0)
    }

    /// Integrate held directions for one tick
    pub fn steer(&mut self, held: HeldDirections) {
        let axis = held.axis();
        if axis != 0.0 {
            self.pos.x = clamp_span(self.pos.x + axis * self.speed, 0.0, self.max_x());
        }
    }

    /// Center the basket under an absolute pointer x
    pub fn point_at(&mut self, pointer_x: f32) {
        self.pos.x = clamp_span(pointer_x - self.size.x / 2.0, 0.0, self.max_x());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn basket() -> Basket {
        Basket::new(&Tuning::default())
    }

    #[test]
    fn test_starts_centered_above_floor() {
        let b = basket();
        assert_eq!(b.pos, Vec2::new(340.0, 472.0));
        assert_eq!(b.size, Vec2::new(120.0, 16.0));
    }

    #[test]
    fn test_steer_moves_by_speed() {
        let mut b = basket();
        b.steer(HeldDirections { left: true, right: false });
        assert_eq!(b.pos.x, 334.0);
        b.steer(HeldDirections { left: false, right: true });
        b.steer(HeldDirections { left: false, right: true });
        assert_eq!(b.pos.x, 346.0);
    }

    #[test]
    fn test_both_directions_cancel_even_at_wall() {
        let mut b = basket();
        b.pos.x = 0.0;
        b.steer(HeldDirections { left: true, right: true });
        assert_eq!(b.pos.x, 0.0);
    }

    #[test]
    fn test_steer_clamps_to_walls() {
        let mut b = basket();
        b.pos.x = 3.0;
        b.steer(HeldDirections { left: true, right: false });
        assert_eq!(b.pos.x, 0.0);

        b.pos.x = 678.0;
        b.steer(HeldDirections { left: false, right: true });
        assert_eq!(b.pos.x, 680.0);
    }

    #[test]
    fn test_point_at_centers_and_clamps() {
        let mut b = basket();
        b.point_at(400.0);
        assert_eq!(b.pos.x, 340.0);
        b.point_at(10.0);
        assert_eq!(b.pos.x, 0.0);
        b.point_at(10_000.0);
        assert_eq!(b.pos.x, 680.0);
    }

    proptest! {
        #[test]
        fn prop_basket_stays_in_playfield(
            start in 0.0f32..680.0,
            moves in prop::collection::vec((any::<bool>(), any::<bool>(), prop::option::of(-500.0f32..1500.0)), 0..64),
        ) {
            let mut b = basket();
            b.pos.x = start;
            for (left, right, pointer) in moves {
                b.steer(HeldDirections { left, right });
                if let Some(x) = pointer {
                    b.point_at(x);
                }
                prop_assert!(b.pos.x >= 0.0 && b.pos.x <= b.max_x());
                prop_assert_eq!(b.pos.y, 472.0);
            }
        }
    }
}
