use hand_replay::playback::{Command, PlaybackSpeed};

/// Anything the viewer can be told to do, from a key or the command line.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ViewerCommand {
    /// Forwarded to the replay actor
    Playback(Command),
    /// Switch stacks between big blinds and euros, and persist the choice
    ToggleFormat,
    /// Show or hide the help overlay
    Help,
    Quit,
}

impl From<Command> for ViewerCommand {
    fn from(command: Command) -> Self {
        Self::Playback(command)
    }
}

/// Errors that can occur during command parsing.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseError {
    /// Jump target is not a whole number.
    #[error("Invalid action number '{0}'. Must be a whole number (e.g., 'jump 12')")]
    InvalidActionNumber(String),
    /// Jump command without a target.
    #[error("Jump requires an action number (e.g., 'jump 12')")]
    MissingActionNumber,
    /// Speed is not a whole number.
    #[error("Invalid speed '{0}'. Use 1, 2, 5 or 10 (e.g., 'speed 5')")]
    InvalidSpeed(String),
    /// Speed command without a value.
    #[error("Speed requires a value (e.g., 'speed 5')")]
    MissingSpeed,
    /// Unrecognized command.
    #[error("Unrecognized command '{0}'. Type 'help' to see available commands")]
    UnrecognizedCommand(String),
}

/// Parse a command line into a [`ViewerCommand`].
///
/// Action numbers are 1-based, as shown in the controls bar, and are
/// clamped by the replay. Speeds snap down to the nearest supported one.
///
/// # Examples
///
/// ```
/// use hand_replay::playback::{Command, PlaybackSpeed};
/// use hr_viewer::commands::{ViewerCommand, parse_command};
///
/// assert_eq!(parse_command("play"), Ok(ViewerCommand::Playback(Command::Play)));
/// assert_eq!(parse_command("jump 3"), Ok(ViewerCommand::Playback(Command::JumpTo(2))));
/// assert_eq!(
///     parse_command("speed 7"),
///     Ok(ViewerCommand::Playback(Command::SetSpeed(PlaybackSpeed::X5)))
/// );
/// ```
pub fn parse_command(input: &str) -> Result<ViewerCommand, ParseError> {
    let trimmed = input.trim();

    // Try single-word commands first
    match trimmed {
        "play" => return Ok(Command::Play.into()),
        "pause" => return Ok(Command::Pause.into()),
        "stop" => return Ok(Command::Stop.into()),
        "next" | "forward" => return Ok(Command::StepForward.into()),
        "prev" | "back" => return Ok(Command::StepBackward.into()),
        "finish" | "end" => return Ok(Command::Finish.into()),
        "format" => return Ok(ViewerCommand::ToggleFormat),
        "help" => return Ok(ViewerCommand::Help),
        "quit" | "q" => return Ok(ViewerCommand::Quit),
        _ => {}
    }

    // Parse multi-word commands
    let parts: Vec<&str> = trimmed.split_ascii_whitespace().collect();
    match parts.first() {
        Some(&"jump") => parse_jump_command(&parts),
        Some(&"speed") => parse_speed_command(&parts),
        _ => Err(ParseError::UnrecognizedCommand(trimmed.to_string())),
    }
}

/// Parse a jump command: "jump N"
fn parse_jump_command(parts: &[&str]) -> Result<ViewerCommand, ParseError> {
    let value = parts.get(1).ok_or(ParseError::MissingActionNumber)?;
    let number = value
        .parse::<i64>()
        .map_err(|_| ParseError::InvalidActionNumber((*value).to_string()))?;
    Ok(Command::JumpTo(number.saturating_sub(1)).into())
}

/// Parse a speed command: "speed N"
fn parse_speed_command(parts: &[&str]) -> Result<ViewerCommand, ParseError> {
    let value = parts.get(1).ok_or(ParseError::MissingSpeed)?;
    let raw = value
        .trim_end_matches('x')
        .parse::<i64>()
        .map_err(|_| ParseError::InvalidSpeed((*value).to_string()))?;
    Ok(Command::SetSpeed(PlaybackSpeed::clamped(raw)).into())
}
