//! Temporal confirmation: turns per-frame candidates into debounced events.
//!
//! One machine instance holds a counter per label (at most one non-zero), and a
//! single global cooldown window. There is no internal timer; every decision
//! is made against the `now` passed to [`ConfirmationStateMachine::submit`].

use crate::classifier::{GestureCandidate, GestureLabel};
use crate::consts::{DEFAULT_COOLDOWN_MS, DEFAULT_HOLD_THRESHOLD};
use serde::{Deserialize, Serialize};
use strum::{EnumCount, IntoEnumIterator};
use tracing::{debug, info, warn};

/// Milliseconds on the caller's clock.
pub type Timestamp = u64;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureEvent {
    pub label: GestureLabel,
    pub confidence: f32,
    pub fired_at: Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfirmationCounters {
    counts: [u32; GestureLabel::COUNT],
}

impl ConfirmationCounters {
    pub fn get(&self, label: GestureLabel) -> u32 {
        self.counts[label.index()]
    }

    /// The label currently being held, with its count.
    pub fn active(&self) -> Option<(GestureLabel, u32)> {
        GestureLabel::iter()
            .map(|l| (l, self.get(l)))
            .find(|&(_, c)| c > 0)
    }

    pub fn non_zero(&self) -> usize {
        self.counts.iter().filter(|&&c| c > 0).count()
    }

    /// Increments `label`, zeroing every other counter first.
    fn bump(&mut self, label: GestureLabel) -> u32 {
        let idx = label.index();
        let current = self.counts[idx];
        self.counts = [0; GestureLabel::COUNT];
        self.counts[idx] = current.saturating_add(1);
        self.counts[idx]
    }

    fn clear(&mut self) {
        self.counts = [0; GestureLabel::COUNT];
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CooldownWindow {
    pub fired_at: Option<Timestamp>,
    pub active_until: Option<Timestamp>,
}

impl CooldownWindow {
    /// Remaining cooldown at `now`, never negative and never longer than the
    /// window itself (a clock that runs backwards does not extend it).
    pub fn remaining(&self, now: Timestamp) -> u64 {
        match (self.fired_at, self.active_until) {
            (Some(fired), Some(until)) => {
                let window = until.saturating_sub(fired);
                until.saturating_sub(now).min(window)
            }
            _ => 0,
        }
    }

    pub fn is_active(&self, now: Timestamp) -> bool {
        match self.active_until {
            Some(until) => now < until || self.fired_at.is_some_and(|f| now < f),
            None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum MachineState {
    Idle,
    Accumulating { label: GestureLabel, count: u32 },
    Cooldown { remaining_ms: u64 },
}

#[derive(Debug, Clone)]
pub struct ConfirmationStateMachine {
    hold_threshold: u32,
    cooldown_ms: u64,
    counters: ConfirmationCounters,
    cooldown: CooldownWindow,
}

impl Default for ConfirmationStateMachine {
    fn default() -> Self {
        Self::new(DEFAULT_HOLD_THRESHOLD, DEFAULT_COOLDOWN_MS)
    }
}

impl ConfirmationStateMachine {
    /// `hold_threshold` is expected to be validated (non-zero) by the caller;
    /// a zero is treated as one.
    pub fn new(hold_threshold: u32, cooldown_ms: u64) -> Self {
        Self {
            hold_threshold: hold_threshold.max(1),
            cooldown_ms,
            counters: ConfirmationCounters::default(),
            cooldown: CooldownWindow::default(),
        }
    }

    pub fn hold_threshold(&self) -> u32 {
        self.hold_threshold
    }

    pub fn cooldown_ms(&self) -> u64 {
        self.cooldown_ms
    }

    /// Updates thresholds in place. Progress and any open cooldown are kept.
    pub fn set_limits(&mut self, hold_threshold: u32, cooldown_ms: u64) {
        self.hold_threshold = hold_threshold.max(1);
        self.cooldown_ms = cooldown_ms;
    }

    pub fn counters(&self) -> &ConfirmationCounters {
        &self.counters
    }

    pub fn cooldown(&self) -> &CooldownWindow {
        &self.cooldown
    }

    pub fn submit(&mut self, candidate: &GestureCandidate, now: Timestamp) -> Option<GestureEvent> {
        if self.in_cooldown(now) {
            return None;
        }

        let Some(label) = candidate.label else {
            if let Some((label, count)) = self.counters.active() {
                debug!("Hold on {} dropped after {} frames", label, count);
            }
            self.counters.clear();
            return None;
        };

        let previous = self.counters.active();
        let count = self.counters.bump(label);
        if let Some((prev, prev_count)) = previous {
            if prev != label {
                debug!("Hold switched {} ({}) -> {}", prev, prev_count, label);
            }
        }

        if count < self.hold_threshold {
            return None;
        }

        self.counters.clear();
        self.cooldown = CooldownWindow {
            fired_at: Some(now),
            active_until: Some(now.saturating_add(self.cooldown_ms)),
        };
        info!(
            "Gesture confirmed: {} (confidence {:.2}) at {}",
            label, candidate.confidence, now
        );

        Some(GestureEvent {
            label,
            confidence: candidate.confidence,
            fired_at: now,
        })
    }

    /// Checks (and expires) the cooldown window.
    fn in_cooldown(&mut self, now: Timestamp) -> bool {
        if self.cooldown.active_until.is_none() {
            return false;
        }

        if let Some(fired) = self.cooldown.fired_at {
            if now < fired {
                warn!(
                    "Clock moved backwards ({} < last fire at {}); cooldown kept",
                    now, fired
                );
            }
        }

        if self.cooldown.is_active(now) {
            return true;
        }

        self.cooldown = CooldownWindow::default();
        false
    }

    pub fn state(&self, now: Timestamp) -> MachineState {
        if self.cooldown.is_active(now) {
            return MachineState::Cooldown {
                remaining_ms: self.cooldown.remaining(now),
            };
        }
        match self.counters.active() {
            Some((label, count)) => MachineState::Accumulating { label, count },
            None => MachineState::Idle,
        }
    }

    /// Active label and how far its hold has progressed, in `[0, 1]`.
    pub fn progress(&self) -> Option<(GestureLabel, f32)> {
        self.counters.active().map(|(label, count)| {
            let ratio = count as f32 / self.hold_threshold as f32;
            (label, ratio.min(1.0))
        })
    }

    pub fn reset(&mut self) {
        self.counters.clear();
        self.cooldown = CooldownWindow::default();
    }
}
