//! Card notation error types.

use thiserror::Error;

/// Errors produced when parsing a two-character card notation
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum CardError {
    /// Notation is not exactly two characters long
    #[error("invalid card notation '{0}': expected two characters")]
    InvalidLength(String),

    /// First character is not one of 2-9, T, J, Q, K, A
    #[error("invalid card notation '{notation}': unknown rank '{rank}'")]
    InvalidRank { notation: String, rank: char },

    /// Second character is not one of h, d, c, s
    #[error("invalid card notation '{notation}': unknown suit '{suit}'")]
    InvalidSuit { notation: String, suit: char },
}

/// Result type for card parsing
pub type CardResult<T> = Result<T, CardError>;
