//! Session state and report types
//!
//! Everything one play-through owns lives in [`SessionState`]. It is
//! replaced wholesale when a new session starts.

use serde::{Deserialize, Serialize};

use super::item::Item;
use super::spawner::Spawner;
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// No session has started yet
    #[default]
    Idle,
    /// Active gameplay
    Running,
    /// Session over, report available
    Ended,
}

/// How an item left play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    CaughtStrong,
    CaughtWeak,
    MissedStrong,
}

impl Verdict {
    /// Short label for the review table
    pub fn display(&self) -> &'static str {
        match self {
            Verdict::CaughtStrong => "✅ Strong",
            Verdict::CaughtWeak => "❌ Weak",
            Verdict::MissedStrong => "⚠️ Missed Strong",
        }
    }

    /// Advice shown next to the verdict
    pub fn tip(&self) -> &'static str {
        match self {
            Verdict::CaughtStrong => TIP_CAUGHT_STRONG,
            Verdict::CaughtWeak => TIP_CAUGHT_WEAK,
            Verdict::MissedStrong => TIP_MISSED_STRONG,
        }
    }
}

/// One row of the caught-item log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaughtLogEntry {
    pub label: String,
    pub verdict: Verdict,
    pub tip: String,
}

impl CaughtLogEntry {
    pub fn new(label: impl Into<String>, verdict: Verdict) -> Self {
        Self {
            label: label.into(),
            verdict,
            tip: verdict.tip().to_string(),
        }
    }
}

/// Per-frame HUD values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hud {
    pub score: u32,
    pub misses: u32,
    pub time_left: u32,
}

/// A numbered review-table row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRow {
    /// 1-based
    pub index: usize,
    pub label: String,
    pub verdict: String,
    pub tip: String,
}

/// Final report exposed when a session ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionReport {
    pub score: u32,
    pub reason: String,
    pub log: Vec<CaughtLogEntry>,
}

impl SessionReport {
    pub fn title(&self) -> &'static str {
        "Game Over"
    }

    /// Reason text, with a fallback when none was recorded
    pub fn reason_text(&self) -> &str {
        if self.reason.is_empty() {
            REASON_FALLBACK
        } else {
            &self.reason
        }
    }

    pub fn rows(&self) -> Vec<ReviewRow> {
        self.log
            .iter()
            .enumerate()
            .map(|(i, entry)| ReviewRow {
                index: i + 1,
                label: entry.label.clone(),
                verdict: entry.verdict.display().to_string(),
                tip: entry.tip.clone(),
            })
            .collect()
    }
}

/// Complete state of one session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    pub phase: Phase,
    pub score: u32,
    /// Seconds remaining on the countdown
    pub time_left: u32,
    /// Strong items that reached the floor
    pub misses: u32,
    /// Live items in spawn order
    pub items: Vec<Item>,
    /// Why the session ended; empty while running
    pub end_reason: String,
    pub log: Vec<CaughtLogEntry>,
    pub spawner: Spawner,
}

impl SessionState {
    /// Fresh running state
    pub fn running(time_left: u32) -> Self {
        Self {
            phase: Phase::Running,
            time_left,
            ..Default::default()
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Transition to `Ended` with a reason
    pub fn end(&mut self, reason: &str) {
        if self.phase == Phase::Running {
            log::info!(
                "Session ended: {} (score {}, misses {}, {}s left)",
                reason,
                self.score,
                self.misses,
                self.time_left
            );
        }
        self.phase = Phase::Ended;
        self.end_reason = reason.to_string();
    }

    pub fn hud(&self) -> Hud {
        Hud {
            score: self.score,
            misses: self.misses,
            time_left: self.time_left,
        }
    }

    /// Report, available once ended
    pub fn report(&self) -> Option<SessionReport> {
        (self.phase == Phase::Ended).then(|| SessionReport {
            score: self.score,
            reason: self.end_reason.clone(),
            log: self.log.clone(),
        })
    }
}
