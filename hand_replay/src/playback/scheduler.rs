//! Auto-advance timer.
//!
//! The scheduler owns at most one pending timer. Every arm or cancel bumps
//! a generation counter, and a timer only counts when it fires with the
//! token of the generation that armed it. A stale token (a timer that was
//! cancelled, re-armed or outlived its replay) is ignored.

use super::state_machine::{Command, Phase, PlaybackSpeed, PlaybackState};
use std::time::Duration;
use tokio::time::Instant;

/// Identifies one armed timer.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct TimerToken(u64);

#[derive(Clone, Copy, Debug)]
struct PendingAdvance {
    token: TimerToken,
    deadline: Instant,
}

/// Single-slot cancellable timer driving auto-play.
#[derive(Debug)]
pub struct Scheduler {
    base_delay: Duration,
    generation: u64,
    pending: Option<PendingAdvance>,
}

impl Scheduler {
    #[must_use]
    pub fn new(base_delay: Duration) -> Self {
        Self {
            base_delay,
            generation: 0,
            pending: None,
        }
    }

    /// Delay between auto-advances at `speed`.
    #[must_use]
    pub fn delay_for(&self, speed: PlaybackSpeed) -> Duration {
        self.base_delay / speed.multiplier()
    }

    /// Invalidate the pending timer, if any. Returns whether one was pending.
    pub fn cancel(&mut self) -> bool {
        self.generation = self.generation.wrapping_add(1);
        self.pending.take().is_some()
    }

    /// Cancel the pending timer, then arm a new one if `state` is playing.
    pub fn rearm(&mut self, state: &PlaybackState, now: Instant) -> Option<TimerToken> {
        self.cancel();
        if state.phase() != Phase::Playing {
            return None;
        }

        let token = TimerToken(self.generation);
        let delay = self.delay_for(state.speed());
        self.pending = Some(PendingAdvance {
            token,
            deadline: now + delay,
        });
        log::trace!("Armed auto-advance {token:?} in {delay:?}");
        Some(token)
    }

    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.pending.map(|pending| pending.deadline)
    }

    #[must_use]
    pub fn pending_token(&self) -> Option<TimerToken> {
        self.pending.map(|pending| pending.token)
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.pending.is_some()
    }

    /// Consume a fired timer and return the commands it produces.
    ///
    /// While playing short of the last action the timer steps forward and
    /// resumes play. When that step lands on the last action, or play is
    /// already there, the replay finishes instead.
    pub fn fire(&mut self, token: TimerToken, state: &PlaybackState) -> Vec<Command> {
        match self.pending {
            Some(pending) if pending.token == token => self.pending = None,
            _ => {
                log::debug!("Ignoring stale auto-advance {token:?}");
                return Vec::new();
            }
        }

        if state.phase() != Phase::Playing {
            return Vec::new();
        }

        if state.is_at_last() {
            return vec![Command::Finish];
        }

        if state.current_index() + 1 == state.last_index() {
            vec![Command::StepForward, Command::Finish]
        } else {
            vec![Command::StepForward, Command::Play]
        }
    }
}
