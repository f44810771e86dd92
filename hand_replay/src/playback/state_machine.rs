//! Playback state machine.
//!
//! [`reduce`] is a pure transition function: it takes the current
//! [`PlaybackState`] and a [`Command`] and returns the next state. All
//! clamping happens here, so no command sequence can push the replay
//! position outside `0..total`.

use super::errors::InvalidSpeed;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported speed multipliers.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PlaybackSpeed {
    #[default]
    X1,
    X2,
    X5,
    X10,
}

impl PlaybackSpeed {
    pub const ALL: [PlaybackSpeed; 4] = [
        PlaybackSpeed::X1,
        PlaybackSpeed::X2,
        PlaybackSpeed::X5,
        PlaybackSpeed::X10,
    ];

    #[must_use]
    pub const fn multiplier(self) -> u32 {
        match self {
            Self::X1 => 1,
            Self::X2 => 2,
            Self::X5 => 5,
            Self::X10 => 10,
        }
    }

    /// Normalize an arbitrary requested speed: the fastest supported
    /// speed not above `raw`, and never slower than 1x.
    #[must_use]
    pub fn clamped(raw: i64) -> Self {
        Self::ALL
            .into_iter()
            .rev()
            .find(|speed| i64::from(speed.multiplier()) <= raw)
            .unwrap_or(Self::X1)
    }
}

impl TryFrom<u32> for PlaybackSpeed {
    type Error = InvalidSpeed;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|speed| speed.multiplier() == value)
            .ok_or(InvalidSpeed(value))
    }
}

impl From<PlaybackSpeed> for u32 {
    fn from(value: PlaybackSpeed) -> Self {
        value.multiplier()
    }
}

impl fmt::Display for PlaybackSpeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x", self.multiplier())
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Idle,
    Playing,
    Paused,
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Playing => write!(f, "playing"),
            Self::Paused => write!(f, "paused"),
            Self::Finished => write!(f, "finished"),
        }
    }
}

/// Commands accepted by the state machine
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Command {
    Play,
    Pause,
    /// Back to the start, idle
    Stop,
    StepForward,
    StepBackward,
    SetSpeed(PlaybackSpeed),
    /// Jump to an action index; out-of-range values are clamped
    JumpTo(i64),
    /// Jump to the last action and finish
    Finish,
}

impl Command {
    /// Commands that must invalidate any pending auto-advance.
    #[must_use]
    pub const fn cancels_timer(self) -> bool {
        matches!(
            self,
            Self::Pause | Self::Stop | Self::StepBackward | Self::JumpTo(_) | Self::Finish
        )
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Play => write!(f, "play"),
            Self::Pause => write!(f, "pause"),
            Self::Stop => write!(f, "stop"),
            Self::StepForward => write!(f, "step forward"),
            Self::StepBackward => write!(f, "step backward"),
            Self::SetSpeed(speed) => write!(f, "speed {speed}"),
            Self::JumpTo(index) => write!(f, "jump to {index}"),
            Self::Finish => write!(f, "finish"),
        }
    }
}

/// Replay position and mode.
///
/// Fields are private: the only way to change a state is [`reduce`],
/// which keeps `current_index` within `0..total`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct PlaybackState {
    phase: Phase,
    current_index: usize,
    total: usize,
    speed: PlaybackSpeed,
    is_paused: bool,
}

impl PlaybackState {
    /// Idle at the first action. A `total` of zero is treated as one.
    #[must_use]
    pub fn new(total: usize, speed: PlaybackSpeed) -> Self {
        Self {
            phase: Phase::Idle,
            current_index: 0,
            total: total.max(1),
            speed,
            is_paused: false,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn current_index(&self) -> usize {
        self.current_index
    }

    #[must_use]
    pub const fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub const fn speed(&self) -> PlaybackSpeed {
        self.speed
    }

    #[must_use]
    pub const fn is_paused(&self) -> bool {
        self.is_paused
    }

    #[must_use]
    pub const fn is_playing(&self) -> bool {
        matches!(self.phase, Phase::Playing)
    }

    #[must_use]
    pub const fn last_index(&self) -> usize {
        self.total - 1
    }

    #[must_use]
    pub const fn is_at_last(&self) -> bool {
        self.current_index == self.last_index()
    }

    /// Position as a whole percentage of the hand.
    #[must_use]
    pub fn progress(&self) -> u8 {
        if self.last_index() == 0 {
            return 100;
        }
        let percent = (self.current_index * 100 + self.last_index() / 2) / self.last_index();
        u8::try_from(percent.min(100)).unwrap_or(100)
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}/{} @ {}",
            self.phase,
            self.current_index + 1,
            self.total,
            self.speed
        )
    }
}

/// Apply `command` to `state`.
///
/// `Play` from [`Phase::Finished`] leaves the state unchanged: a finished
/// replay must be stopped, stepped back or jumped before it can play
/// again.
#[must_use]
pub fn reduce(state: &PlaybackState, command: Command) -> PlaybackState {
    let last = state.last_index();
    match command {
        Command::Play if state.phase == Phase::Finished => *state,
        Command::Play => PlaybackState {
            phase: Phase::Playing,
            is_paused: false,
            ..*state
        },
        Command::Pause => PlaybackState {
            phase: Phase::Paused,
            is_paused: true,
            ..*state
        },
        Command::Stop => PlaybackState {
            phase: Phase::Idle,
            current_index: 0,
            is_paused: false,
            ..*state
        },
        Command::StepForward => {
            let next = state.current_index + 1;
            PlaybackState {
                phase: if next >= state.total {
                    Phase::Finished
                } else {
                    Phase::Paused
                },
                current_index: next.min(last),
                is_paused: true,
                ..*state
            }
        }
        Command::StepBackward => PlaybackState {
            phase: Phase::Paused,
            current_index: state.current_index.saturating_sub(1),
            is_paused: true,
            ..*state
        },
        Command::SetSpeed(speed) => PlaybackState { speed, ..*state },
        Command::JumpTo(index) => {
            let index = if index < 0 {
                0
            } else {
                usize::try_from(index).unwrap_or(usize::MAX).min(last)
            };
            PlaybackState {
                phase: Phase::Paused,
                current_index: index,
                is_paused: true,
                ..*state
            }
        }
        Command::Finish => PlaybackState {
            phase: Phase::Finished,
            current_index: last,
            is_paused: true,
            ..*state
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(total: usize, commands: &[Command]) -> PlaybackState {
        commands
            .iter()
            .fold(PlaybackState::new(total, PlaybackSpeed::X1), |state, c| {
                reduce(&state, *c)
            })
    }

    #[test]
    fn test_initial_state() {
        let state = PlaybackState::new(10, PlaybackSpeed::X1);
        assert_eq!(state.phase(), Phase::Idle);
        assert_eq!(state.current_index(), 0);
        assert_eq!(state.total(), 10);
        assert_eq!(state.speed(), PlaybackSpeed::X1);
        assert!(!state.is_paused());
    }

    #[test]
    fn test_zero_total_is_one() {
        let state = PlaybackState::new(0, PlaybackSpeed::X1);
        assert_eq!(state.total(), 1);
        assert_eq!(state.last_index(), 0);
    }

    #[test]
    fn test_play_and_pause() {
        let state = run(10, &[Command::Play]);
        assert_eq!(state.phase(), Phase::Playing);
        assert!(!state.is_paused());

        let state = reduce(&state, Command::Pause);
        assert_eq!(state.phase(), Phase::Paused);
        assert!(state.is_paused());
    }

    #[test]
    fn test_stop_resets() {
        for prefix in [
            vec![],
            vec![Command::Play, Command::StepForward],
            vec![Command::Finish],
            vec![Command::JumpTo(5), Command::Pause],
        ] {
            let mut commands = prefix;
            commands.push(Command::Stop);
            let state = run(10, &commands);
            assert_eq!(state.phase(), Phase::Idle);
            assert_eq!(state.current_index(), 0);
            assert!(!state.is_paused());
        }
    }

    #[test]
    fn test_step_forward_pauses_while_playing() {
        let state = run(10, &[Command::Play, Command::StepForward]);
        assert_eq!(state.current_index(), 1);
        assert_eq!(state.phase(), Phase::Paused);
        assert!(state.is_paused());
    }

    #[test]
    fn test_full_walkthrough_of_ten() {
        let mut commands = vec![Command::Play, Command::StepForward];
        commands.extend(std::iter::repeat_n(Command::StepForward, 14));
        let state = run(10, &commands);
        assert_eq!(state.current_index(), 9);
        assert_eq!(state.phase(), Phase::Finished);
    }

    #[test]
    fn test_finishes_on_third_step_of_three() {
        let state = run(3, &[Command::StepForward, Command::StepForward]);
        assert_eq!(state.current_index(), 2);
        assert_eq!(state.phase(), Phase::Paused);

        let state = reduce(&state, Command::StepForward);
        assert_eq!(state.current_index(), 2);
        assert_eq!(state.phase(), Phase::Finished);
    }

    #[test]
    fn test_step_forward_at_last_while_playing_finishes() {
        let state = run(5, &[Command::JumpTo(4), Command::Play, Command::StepForward]);
        assert_eq!(state.phase(), Phase::Finished);
        assert_eq!(state.current_index(), 4);
    }

    #[test]
    fn test_step_backward_floor() {
        let state = run(10, &[Command::StepBackward, Command::StepBackward]);
        assert_eq!(state.current_index(), 0);
        assert_eq!(state.phase(), Phase::Paused);

        let state = run(
            10,
            &[Command::StepForward, Command::StepForward, Command::StepBackward],
        );
        assert_eq!(state.current_index(), 1);
    }

    #[test]
    fn test_jump_to_clamps() {
        assert_eq!(run(10, &[Command::JumpTo(5)]).current_index(), 5);
        assert_eq!(run(10, &[Command::JumpTo(20)]).current_index(), 9);
        assert_eq!(run(10, &[Command::JumpTo(-5)]).current_index(), 0);
        assert_eq!(run(10, &[Command::JumpTo(i64::MAX)]).current_index(), 9);
        assert_eq!(run(10, &[Command::JumpTo(5)]).phase(), Phase::Paused);
    }

    #[test]
    fn test_set_speed_only_changes_speed() {
        let before = run(10, &[Command::Play, Command::JumpTo(3), Command::Play]);
        let after = reduce(&before, Command::SetSpeed(PlaybackSpeed::X5));
        assert_eq!(after.speed(), PlaybackSpeed::X5);
        assert_eq!(after.phase(), before.phase());
        assert_eq!(after.current_index(), before.current_index());
        assert_eq!(after.is_paused(), before.is_paused());
    }

    #[test]
    fn test_finish() {
        let state = run(10, &[Command::Finish]);
        assert_eq!(state.phase(), Phase::Finished);
        assert_eq!(state.current_index(), 9);
        assert!(state.is_paused());
    }

    #[test]
    fn test_play_from_finished_is_noop() {
        let finished = run(10, &[Command::Finish]);
        assert_eq!(reduce(&finished, Command::Play), finished);

        let replay = run(10, &[Command::Finish, Command::Stop, Command::Play]);
        assert_eq!(replay.phase(), Phase::Playing);
        assert_eq!(replay.current_index(), 0);
    }

    #[test]
    fn test_speed_parsing() {
        assert_eq!(PlaybackSpeed::try_from(5), Ok(PlaybackSpeed::X5));
        assert_eq!(PlaybackSpeed::try_from(3), Err(InvalidSpeed(3)));
        assert_eq!(PlaybackSpeed::clamped(3), PlaybackSpeed::X2);
        assert_eq!(PlaybackSpeed::clamped(-4), PlaybackSpeed::X1);
        assert_eq!(PlaybackSpeed::clamped(0), PlaybackSpeed::X1);
        assert_eq!(PlaybackSpeed::clamped(100), PlaybackSpeed::X10);
        assert_eq!(PlaybackSpeed::X10.to_string(), "10x");
    }

    #[test]
    fn test_speed_serde() {
        assert_eq!(serde_json::to_string(&PlaybackSpeed::X5).unwrap(), "5");
        assert_eq!(
            serde_json::from_str::<PlaybackSpeed>("10").unwrap(),
            PlaybackSpeed::X10
        );
        assert!(serde_json::from_str::<PlaybackSpeed>("7").is_err());
    }

    #[test]
    fn test_progress() {
        assert_eq!(PlaybackState::new(5, PlaybackSpeed::X1).progress(), 0);
        assert_eq!(run(5, &[Command::JumpTo(2)]).progress(), 50);
        assert_eq!(run(5, &[Command::Finish]).progress(), 100);
        assert_eq!(PlaybackState::new(1, PlaybackSpeed::X1).progress(), 100);
    }
}
