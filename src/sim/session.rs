//! Session state machine
//!
//! `Idle -> Running -> Ended`, with `start` re-entering a fresh `Running`
//! from any phase. The session owns the only mutable game state; the frame
//! task, the countdown task and input handlers all go through it.
//!
//! Scheduled callbacks carry the [`SessionToken`] handed out by `start`. A
//! callback holding a stale token, or arriving after the session ended, is a
//! no-op and reports that it should not be rescheduled. Nothing ever needs
//! to be unscheduled.

use serde::{Deserialize, Serialize};

use super::basket::{Basket, HeldDirections};
use super::rng::{PcgRandom, RandomSource};
use super::state::{Hud, Phase, SessionReport, SessionState};
use super::tick::step;
use crate::Tuning;
use crate::consts::REASON_TIME_UP;
use crate::pools::LabelPools;
use crate::renderer::Renderer;

/// Identifies one started session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionToken(u64);

/// Owner of all game state
#[derive(Debug)]
pub struct Session<R: RandomSource = PcgRandom> {
    tuning: Tuning,
    pools: LabelPools,
    rng: R,
    /// Survives across sessions
    basket: Basket,
    state: SessionState,
    generation: u64,
}

impl<R: RandomSource> Session<R> {
    pub fn new(tuning: Tuning, pools: LabelPools, rng: R) -> Self {
        Self {
            basket: Basket::new(&tuning),
            tuning,
            pools,
            rng,
            state: SessionState::default(),
            generation: 0,
        }
    }

    /// Start (or restart) a session, discarding everything from the last one
    pub fn start(&mut self) -> SessionToken {
        self.generation += 1;
        self.state = SessionState::running(self.tuning.game_duration);
        log::info!(
            "Session {} started ({}s, {} strong / {} weak labels)",
            self.generation,
            self.tuning.game_duration,
            self.pools.strong.len(),
            self.pools.weak.len()
        );
        SessionToken(self.generation)
    }

    /// Whether callbacks holding `token` may still mutate state
    #[inline]
    pub fn is_current(&self, token: SessionToken) -> bool {
        token.0 == self.generation && self.state.is_running()
    }

    /// Per-frame task: steer, spawn, step, draw
    ///
    /// `now` is the frame timestamp in ms. Returns whether the frame task
    /// should be rescheduled.
    pub fn frame<D>(
        &mut self,
        token: SessionToken,
        now: f64,
        held: HeldDirections,
        renderer: &mut D,
    ) -> bool
    where
        D: Renderer + ?Sized,
    {
        if !self.is_current(token) {
            return false;
        }

        self.basket.steer(held);

        if let Some(item) =
            self.state
                .spawner
                .try_spawn(now, &self.tuning, &self.pools, &mut self.rng, &*renderer)
        {
            self.state.items.push(item);
        }

        step(&mut self.state, &self.basket, &self.tuning);
        renderer.draw(&self.state, &self.basket);

        self.state.is_running()
    }

    /// One-second countdown task
    ///
    /// Returns whether the countdown should be rescheduled.
    pub fn countdown(&mut self, token: SessionToken) -> bool {
        if !self.is_current(token) {
            return false;
        }
        self.state.time_left = self.state.time_left.saturating_sub(1);
        if self.state.time_left == 0 {
            self.state.end(REASON_TIME_UP);
        }
        self.state.is_running()
    }

    /// Absolute pointer update; live in every phase
    pub fn pointer_moved(&mut self, pointer_x: f32) {
        self.basket.point_at(pointer_x);
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    pub fn hud(&self) -> Hud {
        self.state.hud()
    }

    /// Final report once the session has ended
    pub fn report(&self) -> Option<SessionReport> {
        self.state.report()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn basket(&self) -> &Basket {
        &self.basket
    }
}
