/// Property-based tests for the playback engine using proptest
///
/// Random interleavings of user commands and timer fires must never leave
/// the replay out of range, and the timer must be armed exactly while the
/// replay is playing.
use hand_replay::playback::{
    Command, Phase, PlaybackSpeed, PlaybackState, ReplayConfig, ReplayEngine, TimerToken, reduce,
};
use proptest::prelude::*;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Clone, Debug)]
enum Step {
    User(Command),
    /// Fire the currently pending timer
    Tick,
    /// Fire a timer armed earlier, which may since have gone stale
    Replay(usize),
}

fn speed_strategy() -> impl Strategy<Value = PlaybackSpeed> {
    prop::sample::select(PlaybackSpeed::ALL.to_vec())
}

fn command_strategy() -> impl Strategy<Value = Command> {
    prop_oneof![
        Just(Command::Play),
        Just(Command::Pause),
        Just(Command::Stop),
        Just(Command::StepForward),
        Just(Command::StepBackward),
        Just(Command::Finish),
        speed_strategy().prop_map(Command::SetSpeed),
        (-20i64..40).prop_map(Command::JumpTo),
    ]
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        3 => command_strategy().prop_map(Step::User),
        2 => Just(Step::Tick),
        1 => (0usize..16).prop_map(Step::Replay),
    ]
}

fn assert_consistent(state: &PlaybackState) -> Result<(), TestCaseError> {
    prop_assert!(state.current_index() < state.total());
    match state.phase() {
        Phase::Playing => prop_assert!(!state.is_paused()),
        Phase::Paused => prop_assert!(state.is_paused()),
        Phase::Idle => {
            prop_assert!(!state.is_paused());
            prop_assert_eq!(state.current_index(), 0);
        }
        Phase::Finished => {
            prop_assert!(state.is_paused());
            prop_assert!(state.is_at_last());
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn test_reduce_stays_in_range(
        total in 0usize..30,
        commands in prop::collection::vec(command_strategy(), 0..60),
    ) {
        let mut state = PlaybackState::new(total, PlaybackSpeed::X1);
        for command in commands {
            state = reduce(&state, command);
            assert_consistent(&state)?;
        }
    }

    #[test]
    fn test_set_speed_touches_nothing_else(
        total in 1usize..30,
        commands in prop::collection::vec(command_strategy(), 0..20),
        speed in speed_strategy(),
    ) {
        let state = commands
            .into_iter()
            .fold(PlaybackState::new(total, PlaybackSpeed::X1), |s, c| reduce(&s, c));
        let next = reduce(&state, Command::SetSpeed(speed));
        prop_assert_eq!(next.speed(), speed);
        prop_assert_eq!(next.phase(), state.phase());
        prop_assert_eq!(next.current_index(), state.current_index());
        prop_assert_eq!(next.is_paused(), state.is_paused());
    }

    #[test]
    fn test_timer_armed_only_while_playing(
        total in 1usize..20,
        steps in prop::collection::vec(step_strategy(), 0..80),
    ) {
        let mut engine = ReplayEngine::new(total, &ReplayConfig::default());
        let mut now = Instant::now();
        let mut seen: Vec<TimerToken> = Vec::new();

        for step in steps {
            match step {
                Step::User(command) => {
                    engine.dispatch(command, now);
                }
                Step::Tick => {
                    if let Some(deadline) = engine.deadline() {
                        now = deadline;
                    }
                    if let Some(token) = engine.pending_token() {
                        engine.on_timer(token, now);
                    }
                }
                Step::Replay(n) => {
                    if let Some(token) = seen.get(n % seen.len().max(1)).copied() {
                        let before = engine.state();
                        let current = engine.pending_token();
                        let after = engine.on_timer(token, now);
                        if current != Some(token) {
                            prop_assert_eq!(after, before);
                        }
                    }
                }
            }

            if let Some(token) = engine.pending_token() {
                seen.push(token);
            }

            let state = engine.state();
            assert_consistent(&state)?;
            prop_assert_eq!(engine.deadline().is_some(), state.is_playing());
            now += Duration::from_millis(1);
        }
    }

    #[test]
    fn test_uninterrupted_play_finishes_after_total_minus_one_ticks(total in 1usize..40) {
        let mut engine = ReplayEngine::new(total, &ReplayConfig::default());
        let mut now = Instant::now();
        engine.dispatch(Command::Play, now);

        let mut ticks = 0;
        while let (Some(token), Some(deadline)) = (engine.pending_token(), engine.deadline()) {
            now = deadline;
            engine.on_timer(token, now);
            ticks += 1;
            prop_assert!(ticks <= total);
        }

        prop_assert_eq!(engine.state().phase(), Phase::Finished);
        prop_assert_eq!(engine.state().current_index(), total - 1);
        prop_assert_eq!(ticks, total.saturating_sub(1).max(1));
    }
}
