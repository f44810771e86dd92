//! Recorded hand data model.

use super::errors::{HandError, HandResult};
use crate::geometry::SeatLabel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fmt, path::Path};

/// Betting round
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    pub const ALL: [Street; 4] = [Street::Preflop, Street::Flop, Street::Turn, Street::River];

    /// Community cards visible once this street is dealt.
    #[must_use]
    pub const fn board_cards(self) -> usize {
        match self {
            Self::Preflop => 0,
            Self::Flop => 3,
            Self::Turn => 4,
            Self::River => 5,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Preflop => write!(f, "preflop"),
            Self::Flop => write!(f, "flop"),
            Self::Turn => write!(f, "turn"),
            Self::River => write!(f, "river"),
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    AllIn,
}

impl ActionKind {
    /// Whether the action moves chips from the actor's stack to the pot.
    #[must_use]
    pub const fn puts_chips_in(self) -> bool {
        matches!(self, Self::Call | Self::Bet | Self::Raise | Self::AllIn)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fold => write!(f, "fold"),
            Self::Check => write!(f, "check"),
            Self::Call => write!(f, "call"),
            Self::Bet => write!(f, "bet"),
            Self::Raise => write!(f, "raise"),
            Self::AllIn => write!(f, "all-in"),
        }
    }
}

/// One recorded player decision. Created once when a hand loads and never
/// mutated afterwards.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Action {
    /// Position in the hand, starting at zero
    pub index: usize,
    pub street: Street,
    /// Name of the acting player
    pub actor: String,
    pub kind: ActionKind,
    /// Chips put in by this action, in cents
    #[serde(default)]
    pub amount: u64,
    #[serde(default)]
    pub description: String,
}

/// A player seated for the hand
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct SeatedPlayer {
    pub name: String,
    pub seat: SeatLabel,
    /// Starting stack in cents
    pub stack: u64,
    /// Known hole cards as notations; may be empty or contain junk
    #[serde(default)]
    pub hole_cards: Vec<String>,
    #[serde(default)]
    pub is_hero: bool,
}

/// A complete recorded hand, as produced by the hand-history parser.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Hand {
    pub id: String,
    #[serde(default)]
    pub table_name: String,
    #[serde(default)]
    pub played_at: Option<DateTime<Utc>>,
    /// Big blind in cents
    pub big_blind: u64,
    #[serde(default = "default_dealer")]
    pub dealer: SeatLabel,
    pub players: Vec<SeatedPlayer>,
    /// Full board as notations, revealed street by street during replay
    #[serde(default)]
    pub board: Vec<String>,
    pub actions: Vec<Action>,
}

fn default_dealer() -> SeatLabel {
    SeatLabel::Btn
}

impl Hand {
    /// Number of actions to replay.
    #[must_use]
    pub fn total(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn player(&self, name: &str) -> Option<&SeatedPlayer> {
        self.players.iter().find(|player| player.name == name)
    }

    /// Check the structural invariants the replayer relies on.
    ///
    /// # Errors
    ///
    /// Returns the first [`HandError`] found.
    pub fn validate(&self) -> HandResult<()> {
        if self.actions.is_empty() {
            return Err(HandError::NoActions(self.id.clone()));
        }

        if self.players.len() > SeatLabel::ALL.len() {
            return Err(HandError::TooManyPlayers(self.players.len()));
        }

        let mut seats = HashSet::with_capacity(self.players.len());
        let mut names = HashSet::with_capacity(self.players.len());
        for player in &self.players {
            if !seats.insert(player.seat) {
                return Err(HandError::DuplicateSeat(player.seat));
            }
            if !names.insert(player.name.as_str()) {
                return Err(HandError::DuplicatePlayer(player.name.clone()));
            }
        }

        if self.board.len() > Street::River.board_cards() {
            return Err(HandError::BoardTooLarge(self.board.len()));
        }

        for (position, action) in self.actions.iter().enumerate() {
            if action.index != position {
                return Err(HandError::NonSequentialIndex {
                    position,
                    index: action.index,
                });
            }
            if !names.contains(action.actor.as_str()) {
                return Err(HandError::UnknownActor {
                    index: action.index,
                    actor: action.actor.clone(),
                });
            }
        }

        Ok(())
    }

    /// Parse and validate a hand from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`HandError::Json`] for malformed input, or a validation error.
    pub fn from_json_str(json: &str) -> HandResult<Self> {
        let hand: Self = serde_json::from_str(json)?;
        hand.validate()?;
        Ok(hand)
    }

    /// Read, parse and validate a hand file.
    ///
    /// # Errors
    ///
    /// Returns [`HandError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`Hand::from_json_str`].
    pub fn load(path: impl AsRef<Path>) -> HandResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| HandError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let hand = Self::from_json_str(&json)?;
        log::info!(
            "Loaded hand {} with {} actions from {}",
            hand.id,
            hand.total(),
            path.display()
        );
        Ok(hand)
    }
}
