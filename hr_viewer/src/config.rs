//! Viewer configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use hand_replay::playback::{PlaybackSpeed, ReplayConfig};
use std::{path::PathBuf, time::Duration};

/// Default delay between actions at 1x, in milliseconds
pub const DEFAULT_BASE_DELAY_MS: u64 = 1000;
/// Longest accepted base delay, in milliseconds
pub const MAX_BASE_DELAY_MS: u64 = 60_000;
/// Seed used when neither a hand file nor a demo seed is given
pub const DEFAULT_DEMO_SEED: u64 = 1;

const DEFAULT_PREFERENCES_PATH: &str = ".hand_replay/preferences.json";
const DEFAULT_LOG_FILE: &str = "hr_viewer.log";

/// Where the replayed hand comes from
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum HandSource {
    /// A JSON hand history file
    File(PathBuf),
    /// A generated demo hand
    Demo(u64),
}

/// Values given on the command line. They take precedence over the environment.
#[derive(Clone, Debug, Default)]
pub struct CliOverrides {
    pub hand: Option<PathBuf>,
    pub demo: Option<u64>,
    pub speed: Option<i64>,
    pub delay_ms: Option<u64>,
}

/// Complete viewer configuration loaded from environment variables
#[derive(Clone, Debug)]
pub struct ViewerConfig {
    /// Hand to replay
    pub source: HandSource,
    /// Delay between auto-advances at 1x
    pub base_delay_ms: u64,
    /// Speed the replay starts at
    pub initial_speed: PlaybackSpeed,
    /// JSON file holding display preferences
    pub preferences_path: PathBuf,
    /// Log output; the terminal belongs to the UI
    pub log_file: PathBuf,
}

impl ViewerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns error if a hand file and a demo seed are both requested.
    pub fn from_env(overrides: CliOverrides) -> Result<Self, ConfigError> {
        let source = match (overrides.hand, overrides.demo) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::Invalid {
                    var: "--hand".to_string(),
                    reason: "Cannot be combined with --demo".to_string(),
                });
            }
            (Some(path), None) => HandSource::File(path),
            (None, Some(seed)) => HandSource::Demo(seed),
            (None, None) => HandSource::Demo(DEFAULT_DEMO_SEED),
        };

        let base_delay_ms = overrides
            .delay_ms
            .unwrap_or_else(|| parse_env_or("REPLAYER_BASE_DELAY_MS", DEFAULT_BASE_DELAY_MS));

        // Unsupported speeds snap to the nearest slower one
        let raw_speed = overrides
            .speed
            .unwrap_or_else(|| parse_env_or("REPLAYER_INITIAL_SPEED", 1));
        let initial_speed = PlaybackSpeed::clamped(raw_speed);
        if i64::from(initial_speed.multiplier()) != raw_speed {
            log::debug!("Requested speed {raw_speed} clamped to {initial_speed}");
        }

        let preferences_path = std::env::var("REPLAYER_PREFERENCES_PATH")
            .map_or_else(|_| PathBuf::from(DEFAULT_PREFERENCES_PATH), PathBuf::from);
        let log_file = std::env::var("REPLAYER_LOG_FILE")
            .map_or_else(|_| PathBuf::from(DEFAULT_LOG_FILE), PathBuf::from);

        Ok(Self {
            source,
            base_delay_ms,
            initial_speed,
            preferences_path,
            log_file,
        })
    }

    /// Validate configuration after loading
    ///
    /// # Errors
    ///
    /// Returns error if the base delay is zero or unreasonably long.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.base_delay_ms == 0 {
            return Err(ConfigError::Invalid {
                var: "REPLAYER_BASE_DELAY_MS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.base_delay_ms > MAX_BASE_DELAY_MS {
            return Err(ConfigError::Invalid {
                var: "REPLAYER_BASE_DELAY_MS".to_string(),
                reason: format!("Must be at most {MAX_BASE_DELAY_MS}"),
            });
        }

        if let HandSource::File(path) = &self.source
            && path.as_os_str().is_empty()
        {
            return Err(ConfigError::Invalid {
                var: "--hand".to_string(),
                reason: "Path must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Playback settings for the replay actor
    #[must_use]
    pub fn replay_config(&self) -> ReplayConfig {
        ReplayConfig::new(
            Duration::from_millis(self.base_delay_ms),
            self.initial_speed,
        )
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base_delay_ms: u64) -> ViewerConfig {
        ViewerConfig {
            source: HandSource::Demo(1),
            base_delay_ms,
            initial_speed: PlaybackSpeed::X1,
            preferences_path: PathBuf::from("prefs.json"),
            log_file: PathBuf::from("viewer.log"),
        }
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::Invalid {
            var: "REPLAYER_BASE_DELAY_MS".to_string(),
            reason: "Must be greater than 0".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("REPLAYER_BASE_DELAY_MS"));
        assert!(msg.contains("greater than 0"));
    }

    #[test]
    fn test_config_validation_delay_zero() {
        assert!(config(0).validate().is_err());
        assert!(config(1).validate().is_ok());
    }

    #[test]
    fn test_config_validation_delay_too_long() {
        assert!(config(MAX_BASE_DELAY_MS).validate().is_ok());
        assert!(config(MAX_BASE_DELAY_MS + 1).validate().is_err());
    }

    #[test]
    fn test_config_validation_empty_hand_path() {
        let mut config = config(1000);
        config.source = HandSource::File(PathBuf::new());
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_replay_config() {
        let mut config = config(500);
        config.initial_speed = PlaybackSpeed::X5;
        let replay = config.replay_config();
        assert_eq!(replay.base_delay, Duration::from_millis(500));
        assert_eq!(replay.initial_speed, PlaybackSpeed::X5);
    }
}
