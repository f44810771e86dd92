//! Single-key controls.

use crate::commands::ViewerCommand;
use hand_replay::playback::{Command, PlaybackSpeed, PlaybackState};
use ratatui::crossterm::event::KeyCode;

/// Map a key press to a command. Space depends on `state`: it pauses a
/// playing replay and plays anything else.
#[must_use]
pub fn map_key(code: KeyCode, state: &PlaybackState) -> Option<ViewerCommand> {
    let command = match code {
        KeyCode::Char(' ') if state.is_playing() => Command::Pause,
        KeyCode::Char(' ') => Command::Play,
        KeyCode::Char('s') => Command::Stop,
        KeyCode::Right | KeyCode::Char('l') => Command::StepForward,
        KeyCode::Left | KeyCode::Char('h') => Command::StepBackward,
        KeyCode::Char('f') | KeyCode::End => Command::Finish,
        KeyCode::Home => Command::JumpTo(0),
        KeyCode::Char('1') => Command::SetSpeed(PlaybackSpeed::X1),
        KeyCode::Char('2') => Command::SetSpeed(PlaybackSpeed::X2),
        KeyCode::Char('5') => Command::SetSpeed(PlaybackSpeed::X5),
        KeyCode::Char('0') => Command::SetSpeed(PlaybackSpeed::X10),
        KeyCode::Char('b') => return Some(ViewerCommand::ToggleFormat),
        KeyCode::Char('?') | KeyCode::Tab => return Some(ViewerCommand::Help),
        KeyCode::Char('q') | KeyCode::Esc => return Some(ViewerCommand::Quit),
        _ => return None,
    };
    Some(command.into())
}
