//! Replay configuration.

use super::state_machine::PlaybackSpeed;
use std::time::Duration;

/// Delay between auto-advances at 1x speed.
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(1000);

/// Shortest accepted base delay. Anything lower is raised to this.
pub const MIN_BASE_DELAY: Duration = Duration::from_millis(10);

/// Replay configuration
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayConfig {
    /// Delay between auto-advances at 1x; divided by the speed multiplier
    pub base_delay: Duration,

    /// Speed the replay starts at
    pub initial_speed: PlaybackSpeed,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            base_delay: DEFAULT_BASE_DELAY,
            initial_speed: PlaybackSpeed::X1,
        }
    }
}

impl ReplayConfig {
    #[must_use]
    pub fn new(base_delay: Duration, initial_speed: PlaybackSpeed) -> Self {
        Self {
            base_delay: base_delay.max(MIN_BASE_DELAY),
            initial_speed,
        }
    }
}
