//! Per-frame simulation step
//!
//! Advances every item, then resolves each one against the basket and the
//! floor in spawn order. The first fatal event ends the session and stops
//! evaluation for the rest of the frame.

use super::basket::Basket;
use super::collision::Aabb;
use super::item::Item;
use super::state::{CaughtLogEntry, SessionState, Verdict};
use crate::Tuning;
use crate::consts::*;

/// Where an item stands after moving this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Caught,
    FellOff,
    Falling,
}

/// Caught takes priority over falling off
fn resolve(item: &Item, catch_zone: &Aabb, floor_y: f32) -> Outcome {
    if item.bounds().overlaps(catch_zone) {
        Outcome::Caught
    } else if item.pos.y > floor_y {
        Outcome::FellOff
    } else {
        Outcome::Falling
    }
}

/// Advance the session by one frame
///
/// No-op unless the session is running.
pub fn step(state: &mut SessionState, basket: &Basket, tuning: &Tuning) {
    if !state.is_running() {
        return;
    }

    for item in &mut state.items {
        item.fall();
    }

    let catch_zone = basket.bounds();
    let floor_y = tuning.floor_y();
    let mut pending = std::mem::take(&mut state.items).into_iter();
    let mut survivors = Vec::with_capacity(pending.len());

    for item in pending.by_ref() {
        match resolve(&item, &catch_zone, floor_y) {
            Outcome::Falling => survivors.push(item),
            Outcome::Caught if item.is_strong() => {
                state.score += 1;
                log::debug!("Caught strong '{}' (score {})", item.label, state.score);
                state.log.push(CaughtLogEntry::new(item.label, Verdict::CaughtStrong));
            }
            Outcome::Caught => {
                log::debug!("Caught weak '{}'", item.label);
                state.log.push(CaughtLogEntry::new(item.label, Verdict::CaughtWeak));
                state.end(REASON_CAUGHT_WEAK);
                break;
            }
            Outcome::FellOff if item.is_strong() => {
                state.misses += 1;
                log::debug!("Missed strong '{}' ({} misses)", item.label, state.misses);
                state.log.push(CaughtLogEntry::new(item.label, Verdict::MissedStrong));
                if state.misses >= tuning.max_misses {
                    state.end(REASON_TOO_MANY_MISSES);
                    break;
                }
            }
            // Weak items reaching the floor are harmless
            Outcome::FellOff => {}
        }
    }

    // Items left unevaluated by a fatal event stay where they are
    survivors.extend(pending);
    state.items = survivors;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::item::Classification;
    use crate::sim::state::Phase;
    use glam::Vec2;
    use proptest::prelude::*;

    fn item(label: &str, class: Classification, x: f32, y: f32, vy: f32) -> Item {
        Item {
            pos: Vec2::new(x, y),
            vy,
            label: label.to_string(),
            class,
            size: Vec2::new(60.0, 20.0),
        }
    }

    fn setup() -> (SessionState, Basket, Tuning) {
        let tuning = Tuning::default();
        let basket = Basket::new(&tuning); // x 340..460, y 472..488
        (SessionState::running(tuning.game_duration), basket, tuning)
    }

    #[test]
    fn test_items_fall_by_velocity() {
        let (mut state, basket, tuning) = setup();
        state.items.push(item("a", Classification::Strong, 10.0, -20.0, 2.5));
        step(&mut state, &basket, &tuning);
        assert_eq!(state.items[0].pos.y, -17.5);
    }

    #[test]
    fn test_catch_strong_scores() {
        let (mut state, basket, tuning) = setup();
        state.items.push(item("Str0ng!", Classification::Strong, 370.0, 450.0, 5.0));
        step(&mut state, &basket, &tuning);

        assert_eq!(state.score, 1);
        assert!(state.items.is_empty());
        assert_eq!(state.log, vec![CaughtLogEntry::new("Str0ng!", Verdict::CaughtStrong)]);
        assert_eq!(state.phase, Phase::Running);
    }

    #[test]
    fn test_catch_weak_ends_and_stops_processing() {
        let (mut state, basket, tuning) = setup();
        state.items.push(item("123", Classification::Weak, 370.0, 450.0, 5.0));
        // Would also be caught, but evaluation stops first
        state.items.push(item("Str0ng!", Classification::Strong, 380.0, 450.0, 5.0));
        step(&mut state, &basket, &tuning);

        assert_eq!(state.phase, Phase::Ended);
        assert_eq!(state.end_reason, "You caught a WEAK password.");
        assert_eq!(state.score, 0);
        assert_eq!(state.log, vec![CaughtLogEntry::new("123", Verdict::CaughtWeak)]);
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.items[0].label, "Str0ng!");
    }

    #[test]
    fn test_edge_touch_is_not_a_catch() {
        let (mut state, basket, tuning) = setup();
        // Right edge of item lands exactly on basket's left edge
        state.items.push(item("edge", Classification::Weak, 280.0, 470.0, 0.0));
        step(&mut state, &basket, &tuning);
        assert_eq!(state.phase, Phase::Running);
        assert_eq!(state.items.len(), 1);
    }

    #[test]
    fn test_missed_strong_counts() {
        let (mut state, basket, tuning) = setup();
        state.items.push(item("Str0ng!", Classification::Strong, 10.0, 499.0, 2.0));
        step(&mut state, &basket, &tuning);

        assert_eq!(state.misses, 1);
        assert!(state.items.is_empty());
        assert_eq!(state.log[0].verdict, Verdict::MissedStrong);
        assert_eq!(state.phase, Phase::Running);
    }

    #[test]
    fn test_item_exactly_on_floor_keeps_falling() {
        let (mut state, basket, tuning) = setup();
        state.items.push(item("Str0ng!", Classification::Strong, 10.0, 498.0, 2.0));
        step(&mut state, &basket, &tuning);
        assert_eq!(state.misses, 0);
        assert_eq!(state.items.len(), 1);
    }

    #[test]
    fn test_missed_weak_is_silent() {
        let (mut state, basket, tuning) = setup();
        state.items.push(item("123", Classification::Weak, 10.0, 499.0, 2.0));
        step(&mut state, &basket, &tuning);

        assert_eq!(state.misses, 0);
        assert!(state.log.is_empty());
        assert!(state.items.is_empty());
        assert_eq!(state.phase, Phase::Running);
    }

    #[test]
    fn test_fifth_miss_ends_and_stops_processing() {
        let (mut state, basket, tuning) = setup();
        state.misses = 4;
        state.items.push(item("m5", Classification::Strong, 10.0, 499.0, 2.0));
        state.items.push(item("m6", Classification::Strong, 100.0, 499.0, 2.0));
        step(&mut state, &basket, &tuning);

        assert_eq!(state.misses, 5);
        assert_eq!(state.phase, Phase::Ended);
        assert_eq!(state.end_reason, "You missed too many STRONG passwords.");
        assert_eq!(state.log.len(), 1);
        assert_eq!(state.items.len(), 1);
    }

    #[test]
    fn test_survivors_keep_spawn_order() {
        let (mut state, basket, tuning) = setup();
        state.items.push(item("a", Classification::Strong, 10.0, 0.0, 1.0));
        state.items.push(item("b", Classification::Weak, 370.0, 100.0, 1.0));
        state.items.push(item("c", Classification::Strong, 600.0, 0.0, 1.0));
        step(&mut state, &basket, &tuning);
        let labels: Vec<_> = state.items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, ["a", "b", "c"]);
    }

    #[test]
    fn test_ended_session_is_frozen() {
        let (mut state, basket, tuning) = setup();
        state.items.push(item("a", Classification::Strong, 10.0, 0.0, 1.0));
        state.end(REASON_TIME_UP);
        step(&mut state, &basket, &tuning);
        assert_eq!(state.items[0].pos.y, 0.0);
    }

    fn arb_item() -> impl Strategy<Value = Item> {
        (any::<bool>(), 0.0f32..740.0, -20.0f32..520.0, 1.2f32..2.8).prop_map(|(strong, x, y, vy)| {
            let class = if strong { Classification::Strong } else { Classification::Weak };
            item("p", class, x, y, vy)
        })
    }

    proptest! {
        #[test]
        fn prop_misses_bounded_and_score_monotonic(
            batches in prop::collection::vec(prop::collection::vec(arb_item(), 0..6), 1..40),
            basket_x in 0.0f32..680.0,
        ) {
            let (mut state, mut basket, tuning) = setup();
            basket.pos.x = basket_x;
            let mut last_score = 0;
            for batch in batches {
                if state.is_running() {
                    state.items.extend(batch);
                }
                step(&mut state, &basket, &tuning);
                prop_assert!(state.score >= last_score);
                last_score = state.score;
                prop_assert!(state.misses <= tuning.max_misses);
                if state.misses == tuning.max_misses {
                    prop_assert_eq!(state.phase, Phase::Ended);
                }
            }
        }
    }
}
