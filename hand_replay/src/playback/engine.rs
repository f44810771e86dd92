//! Replay engine: one playback state plus its auto-advance timer.

use super::{
    config::ReplayConfig,
    scheduler::{Scheduler, TimerToken},
    state_machine::{Command, PlaybackState, reduce},
};
use tokio::time::Instant;

/// Owns the playback state of one open replay.
///
/// Every command, whether it comes from the user or from the timer, goes
/// through [`ReplayEngine::dispatch`]. After each transition the timer is
/// cancelled or re-armed to match the new state.
#[derive(Debug)]
pub struct ReplayEngine {
    state: PlaybackState,
    scheduler: Scheduler,
}

impl ReplayEngine {
    #[must_use]
    pub fn new(total: usize, config: &ReplayConfig) -> Self {
        Self {
            state: PlaybackState::new(total, config.initial_speed),
            scheduler: Scheduler::new(config.base_delay),
        }
    }

    #[must_use]
    pub fn state(&self) -> PlaybackState {
        self.state
    }

    /// When the pending auto-advance is due, if one is armed.
    #[must_use]
    pub fn deadline(&self) -> Option<Instant> {
        self.scheduler.deadline()
    }

    #[must_use]
    pub fn pending_token(&self) -> Option<TimerToken> {
        self.scheduler.pending_token()
    }

    /// Apply a command and bring the timer in line with the new state.
    pub fn dispatch(&mut self, command: Command, now: Instant) -> PlaybackState {
        let previous = self.state;
        self.state = reduce(&previous, command);

        if command.cancels_timer() {
            self.scheduler.cancel();
        }
        if self.state != previous {
            log::debug!("{command}: {previous} -> {}", self.state);
            self.scheduler.rearm(&self.state, now);
        }

        self.state
    }

    /// Handle a fired timer. Stale tokens leave the state untouched.
    pub fn on_timer(&mut self, token: TimerToken, now: Instant) -> PlaybackState {
        for command in self.scheduler.fire(token, &self.state) {
            self.dispatch(command, now);
        }
        self.state
    }

    /// Cancel any pending auto-advance. Called when the replay closes.
    pub fn teardown(&mut self) {
        if self.scheduler.cancel() {
            log::debug!("Cancelled pending auto-advance on teardown");
        }
    }
}

impl Drop for ReplayEngine {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::state_machine::{Phase, PlaybackSpeed};
    use std::time::Duration;

    fn engine(total: usize) -> ReplayEngine {
        ReplayEngine::new(total, &ReplayConfig::default())
    }

    #[test]
    fn test_play_arms_timer() {
        let mut engine = engine(5);
        let now = Instant::now();
        assert!(engine.deadline().is_none());
        engine.dispatch(Command::Play, now);
        assert_eq!(engine.deadline(), Some(now + Duration::from_secs(1)));
    }

    #[test]
    fn test_manual_commands_cancel_timer() {
        for command in [
            Command::Pause,
            Command::Stop,
            Command::StepBackward,
            Command::JumpTo(2),
            Command::StepForward,
            Command::Finish,
        ] {
            let mut engine = engine(5);
            engine.dispatch(Command::Play, Instant::now());
            engine.dispatch(command, Instant::now());
            assert!(engine.deadline().is_none(), "{command} should cancel");
        }
    }

    #[test]
    fn test_speed_change_rearms_with_new_delay() {
        let mut engine = engine(5);
        let start = Instant::now();
        engine.dispatch(Command::Play, start);
        let later = start + Duration::from_millis(300);
        engine.dispatch(Command::SetSpeed(PlaybackSpeed::X10), later);
        assert_eq!(engine.deadline(), Some(later + Duration::from_millis(100)));
    }

    #[test]
    fn test_repeated_play_keeps_deadline() {
        let mut engine = engine(5);
        let start = Instant::now();
        engine.dispatch(Command::Play, start);
        engine.dispatch(Command::Play, start + Duration::from_millis(500));
        assert_eq!(engine.deadline(), Some(start + Duration::from_secs(1)));
    }

    #[test]
    fn test_timer_advances_until_finished() {
        let mut engine = engine(4);
        let mut now = Instant::now();
        engine.dispatch(Command::Play, now);

        let mut ticks = 0;
        while let Some(token) = engine.pending_token() {
            now += Duration::from_secs(1);
            let state = engine.on_timer(token, now);
            ticks += 1;
            assert!(state.current_index() < state.total());
        }

        assert_eq!(ticks, 3);
        assert_eq!(engine.state().phase(), Phase::Finished);
        assert_eq!(engine.state().current_index(), 3);
    }

    #[test]
    fn test_stale_timer_after_pause_is_noop() {
        let mut engine = engine(5);
        let now = Instant::now();
        engine.dispatch(Command::Play, now);
        let token = engine.pending_token().unwrap();
        engine.dispatch(Command::Pause, now);
        let before = engine.state();
        assert_eq!(engine.on_timer(token, now + Duration::from_secs(1)), before);
    }

    #[test]
    fn test_stale_timer_after_replay_restart_is_noop() {
        let mut engine = engine(5);
        let now = Instant::now();
        engine.dispatch(Command::Play, now);
        let stale = engine.pending_token().unwrap();
        engine.dispatch(Command::Stop, now);
        engine.dispatch(Command::Play, now);
        let state = engine.on_timer(stale, now + Duration::from_secs(1));
        assert_eq!(state.current_index(), 0);
        assert!(engine.deadline().is_some());
    }

    #[test]
    fn test_teardown_cancels() {
        let mut engine = engine(5);
        engine.dispatch(Command::Play, Instant::now());
        engine.teardown();
        assert!(engine.deadline().is_none());
    }
}
