//! Replay actor message types.

use super::state_machine::{Command, PlaybackState};
use tokio::sync::oneshot;

/// Messages that can be sent to a [`ReplayActor`](super::ReplayActor)
#[derive(Debug)]
pub enum ReplayMessage {
    /// Apply a playback command
    Command(Command),

    /// Get the current playback state
    GetState {
        response: oneshot::Sender<PlaybackState>,
    },

    /// Close the replay, cancelling any pending auto-advance
    Shutdown,
}
