//! Demo autopilot
//!
//! Picks a pointer x for the basket: chase the lowest strong item whose
//! catch position is not shadowed by a weak item about to land, and dodge
//! when the basket itself sits under one.

use super::basket::Basket;
use super::item::Item;
use super::state::SessionState;

/// Weak items closer than this (vertically) to the basket are threats
const THREAT_RANGE: f32 = 140.0;

/// Basket span `[lo, hi)` if its center were at `center_x`
fn span_at(basket: &Basket, center_x: f32) -> (f32, f32) {
    let x = (center_x - basket.size.x / 2.0).clamp(0.0, basket.max_x());
    (x, x + basket.size.x)
}

fn overlaps_span(item: &Item, (lo, hi): (f32, f32)) -> bool {
    item.pos.x < hi && item.pos.x + item.size.x > lo
}

/// Pointer x to feed the basket this frame, or `None` to stay put
pub fn autopilot_target(state: &SessionState, basket: &Basket) -> Option<f32> {
    let threats: Vec<&Item> = state
        .items
        .iter()
        .filter(|i| !i.is_strong() && i.pos.y + i.size.y > basket.pos.y - THREAT_RANGE)
        .collect();
    let safe = |center_x: f32| {
        let span = span_at(basket, center_x);
        !threats.iter().any(|t| overlaps_span(t, span))
    };

    // Lowest strong item first
    let mut strong: Vec<&Item> = state.items.iter().filter(|i| i.is_strong()).collect();
    strong.sort_by(|a, b| b.pos.y.total_cmp(&a.pos.y));

    if let Some(target) = strong
        .iter()
        .map(|i| i.pos.x + i.size.x / 2.0)
        .find(|&cx| safe(cx))
    {
        return Some(target);
    }

    let here = basket.pos.x + basket.size.x / 2.0;
    if safe(here) {
        return None;
    }

    // Dodge to whichever wall side is clear, nearest first
    let right_wall = basket.max_x() + basket.size.x / 2.0;
    let left_wall = basket.size.x / 2.0;
    let mut candidates = [left_wall, right_wall];
    candidates.sort_by(|a, b| (a - here).abs().total_cmp(&(b - here).abs()));
    candidates.into_iter().find(|&cx| safe(cx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Tuning;
    use crate::sim::item::Classification;
    use glam::Vec2;

    fn item(class: Classification, x: f32, y: f32) -> Item {
        Item {
            pos: Vec2::new(x, y),
            vy: 2.0,
            label: "p".into(),
            class,
            size: Vec2::new(60.0, 20.0),
        }
    }

    fn setup() -> (SessionState, Basket) {
        let tuning = Tuning::default();
        (SessionState::running(60), Basket::new(&tuning))
    }

    #[test]
    fn test_chases_lowest_strong() {
        let (mut state, basket) = setup();
        state.items.push(item(Classification::Strong, 100.0, 50.0));
        state.items.push(item(Classification::Strong, 600.0, 300.0));
        assert_eq!(autopilot_target(&state, &basket), Some(630.0));
    }

    #[test]
    fn test_skips_shadowed_strong() {
        let (mut state, basket) = setup();
        state.items.push(item(Classification::Strong, 600.0, 300.0));
        state.items.push(item(Classification::Weak, 620.0, 400.0));
        state.items.push(item(Classification::Strong, 100.0, 50.0));
        assert_eq!(autopilot_target(&state, &basket), Some(130.0));
    }

    #[test]
    fn test_dodges_weak_overhead() {
        let (mut state, basket) = setup();
        state.items.push(item(Classification::Weak, 380.0, 420.0));
        let target = autopilot_target(&state, &basket).unwrap();
        let mut moved = basket.clone();
        moved.point_at(target);
        assert!(!moved.bounds().overlaps(&state.items[0].bounds()));
    }

    #[test]
    fn test_idle_when_nothing_to_do() {
        let (state, basket) = setup();
        assert_eq!(autopilot_target(&state, &basket), None);
    }
}
