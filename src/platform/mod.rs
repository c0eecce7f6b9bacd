//! Platform abstraction layer
//!
//! A session is driven by two cooperative tasks: the per-frame task and the
//! one-second countdown. Browsers schedule them with `requestAnimationFrame`
//! and `setTimeout` (see `main.rs`); [`HeadlessLoop`] schedules them on a
//! virtual clock for native runs and tests. Either way both tasks run on one
//! thread, interleaved, and stop rescheduling themselves once the session's
//! token goes stale.

use crate::consts::COUNTDOWN_PERIOD_MS;
use crate::renderer::Renderer;
use crate::sim::{HeldDirections, RandomSource, Session, SessionReport};

/// Input gathered for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameInput {
    pub held: HeldDirections,
    /// Absolute pointer x, if the pointer moved since the last frame
    pub pointer_x: Option<f32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Task {
    Frame,
    Countdown,
}

/// Virtual-clock driver for a whole session
#[derive(Debug, Clone)]
pub struct HeadlessLoop {
    /// Frame period (ms)
    pub frame_ms: f64,
    /// Give up after this much simulated time (ms)
    pub max_ms: f64,
}

impl Default for HeadlessLoop {
    fn default() -> Self {
        Self {
            frame_ms: 1000.0 / 60.0,
            max_ms: 10.0 * 60.0 * 1000.0,
        }
    }
}

impl HeadlessLoop {
    /// Start a session and run it to completion
    ///
    /// `input` is polled before every frame. Returns the final report, or
    /// `None` if `max_ms` elapsed first.
    pub fn run<R, D, F>(
        &self,
        session: &mut Session<R>,
        renderer: &mut D,
        mut input: F,
    ) -> Option<SessionReport>
    where
        R: RandomSource,
        D: Renderer + ?Sized,
        F: FnMut(&Session<R>) -> FrameInput,
    {
        let token = session.start();
        let mut next_frame = Some(0.0);
        let mut next_countdown = Some(COUNTDOWN_PERIOD_MS);
        let mut frames = 0u64;
        let mut countdowns = 0u64;

        loop {
            // Earliest due task; the countdown wins ties
            let (task, now) = match (next_frame, next_countdown) {
                (Some(f), Some(c)) if c <= f => (Task::Countdown, c),
                (Some(f), _) => (Task::Frame, f),
                (None, Some(c)) => (Task::Countdown, c),
                (None, None) => break,
            };
            if now > self.max_ms && session.is_current(token) {
                log::warn!("Headless run stopped after {} ms without ending", self.max_ms);
                return None;
            }

            match task {
                Task::Frame => {
                    let FrameInput { held, pointer_x } = input(session);
                    if let Some(x) = pointer_x {
                        session.pointer_moved(x);
                    }
                    frames += 1;
                    next_frame = session
                        .frame(token, now, held, &mut *renderer)
                        .then_some(now + self.frame_ms);
                }
                Task::Countdown => {
                    countdowns += 1;
                    next_countdown = session
                        .countdown(token)
                        .then_some(now + COUNTDOWN_PERIOD_MS);
                }
            }
            // Once one task ends the session the other still fires once more,
            // sees a stale token and drops out
        }

        log::info!("Headless run finished: {} frames, {} countdown ticks", frames, countdowns);
        session.report()
    }
}
