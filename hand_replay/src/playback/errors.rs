//! Playback error types.

use thiserror::Error;

/// Raised when a raw speed is not one of the supported multipliers
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("unsupported playback speed {0}, expected one of 1, 2, 5, 10")]
pub struct InvalidSpeed(pub u32);

/// Errors returned by a [`ReplayHandle`](super::ReplayHandle)
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum ReplayError {
    /// The replay actor has shut down
    #[error("replay is closed")]
    Closed,
}

/// Result type for replay handle operations
pub type ReplayResult<T> = Result<T, ReplayError>;
