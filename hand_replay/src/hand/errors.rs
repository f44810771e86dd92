//! Hand loading and validation errors.

use crate::geometry::SeatLabel;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or validating a recorded hand
#[derive(Debug, Error)]
pub enum HandError {
    /// Hand file could not be read
    #[error("failed to read hand file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Hand JSON is malformed
    #[error("malformed hand JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A replay needs at least one action
    #[error("hand {0} has no actions")]
    NoActions(String),

    /// Action indexes must be 0, 1, 2, ... in order
    #[error("action at position {position} has index {index}")]
    NonSequentialIndex { position: usize, index: usize },

    /// Action performed by someone who is not seated
    #[error("action {index} is performed by unknown player '{actor}'")]
    UnknownActor { index: usize, actor: String },

    /// More players than seats at a 6-max table
    #[error("hand has {0} players, a 6-max table seats at most 6")]
    TooManyPlayers(usize),

    #[error("seat {0} is assigned twice")]
    DuplicateSeat(SeatLabel),

    #[error("player '{0}' is seated twice")]
    DuplicatePlayer(String),

    /// More than five community cards
    #[error("board has {0} cards, at most 5 are dealt")]
    BoardTooLarge(usize),
}

/// Result type for hand operations
pub type HandResult<T> = Result<T, HandError>;
