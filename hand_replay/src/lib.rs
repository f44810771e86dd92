//! # Hand Replay
//!
//! Step-by-step playback of recorded 6-max No-Limit Hold'em hands.
//!
//! A replay is a cursor over an immutable action sequence. The cursor is
//! driven by a small state machine (idle, playing, paused, finished) and an
//! auto-advance timer whose delay depends on the selected speed. Everything
//! shown on the table (board, pot, stacks, folded seats) is projected from
//! the hand and the cursor position; nothing is mutated while replaying.
//!
//! ## Core Modules
//!
//! - [`cards`]: Card notation parsing and display
//! - [`geometry`]: Oval table layout, seat positions and amount formatting
//! - [`hand`]: Hand records, validation and table projection
//! - [`playback`]: State machine, timer and replay actor
//! - [`preferences`]: Persisted display preferences
//!
//! ## Example
//!
//! ```
//! use hand_replay::{Command, Phase, PlaybackSpeed, PlaybackState, reduce};
//!
//! let state = PlaybackState::new(10, PlaybackSpeed::X1);
//! let state = reduce(&state, Command::JumpTo(20));
//! assert_eq!(state.current_index(), 9);
//! assert_eq!(state.phase(), Phase::Paused);
//! ```

/// Card notation, ranks, suits and colors.
pub mod cards;
pub use cards::{
    Card, CardColor, CardError, Rank, Suit, format_card_display, is_valid_card, parse_card,
    parse_cards,
};

/// Table geometry and amount formatting.
pub mod geometry;
pub use geometry::{
    AmountFormat, Dimensions, Point, ScaleConfig, SeatLabel, TableLayout, constants,
    format_amount, format_pot,
};

/// Recorded hands and table projection.
pub mod hand;
pub use hand::{Action, ActionKind, Hand, HandError, Street, TableState, project};

/// Replay state machine and actor.
pub mod playback;
pub use playback::{
    Command, Phase, PlaybackSpeed, PlaybackState, ReplayActor, ReplayConfig, ReplayEngine,
    ReplayError, ReplayHandle, reduce,
};

pub mod preferences;
pub use preferences::{Preferences, PreferencesError};
