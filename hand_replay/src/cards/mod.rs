//! Card notation model.
//!
//! Cards arrive from hand histories as two-character notations such as
//! `"Ah"` or `"Td"`. This module validates those notations, parses them
//! into a typed [`Card`], and derives everything the renderer needs
//! (display text, suit glyph, color) from the rank and suit alone.
//!
//! Two entry points exist on purpose:
//!
//! - [`is_valid_card`] is total and never fails. Use it to pre-filter
//!   untrusted input before rendering (see [`parse_cards`]).
//! - [`parse_card`] is strict and returns a [`CardError`] for bad input.

pub mod errors;

pub use errors::{CardError, CardResult};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{fmt, str::FromStr};

/// Card rank, ordered from deuce to ace.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Rank {
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    /// Parse a rank symbol, ignoring case.
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        let rank = match symbol.to_ascii_uppercase() {
            '2' => Self::Two,
            '3' => Self::Three,
            '4' => Self::Four,
            '5' => Self::Five,
            '6' => Self::Six,
            '7' => Self::Seven,
            '8' => Self::Eight,
            '9' => Self::Nine,
            'T' => Self::Ten,
            'J' => Self::Jack,
            'Q' => Self::Queen,
            'K' => Self::King,
            'A' => Self::Ace,
            _ => return None,
        };
        Some(rank)
    }

    /// Canonical single-character symbol (`T` for ten).
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Two => '2',
            Self::Three => '3',
            Self::Four => '4',
            Self::Five => '5',
            Self::Six => '6',
            Self::Seven => '7',
            Self::Eight => '8',
            Self::Nine => '9',
            Self::Ten => 'T',
            Self::Jack => 'J',
            Self::Queen => 'Q',
            Self::King => 'K',
            Self::Ace => 'A',
        }
    }

    /// Text shown on the card face. Ten is spelled out as `10`.
    #[must_use]
    pub const fn display(self) -> &'static str {
        match self {
            Self::Two => "2",
            Self::Three => "3",
            Self::Four => "4",
            Self::Five => "5",
            Self::Six => "6",
            Self::Seven => "7",
            Self::Eight => "8",
            Self::Nine => "9",
            Self::Ten => "10",
            Self::Jack => "J",
            Self::Queen => "Q",
            Self::King => "K",
            Self::Ace => "A",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}

/// Card color used by the renderer.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum CardColor {
    Red,
    Black,
}

#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Suit {
    Heart,
    Diamond,
    Club,
    Spade,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Heart, Suit::Diamond, Suit::Club, Suit::Spade];

    /// Parse a suit symbol, ignoring case.
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_lowercase() {
            'h' => Some(Self::Heart),
            'd' => Some(Self::Diamond),
            'c' => Some(Self::Club),
            's' => Some(Self::Spade),
            _ => None,
        }
    }

    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Heart => 'h',
            Self::Diamond => 'd',
            Self::Club => 'c',
            Self::Spade => 's',
        }
    }

    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Self::Heart => "♥",
            Self::Diamond => "♦",
            Self::Club => "♣",
            Self::Spade => "♠",
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Heart => "hearts",
            Self::Diamond => "diamonds",
            Self::Club => "clubs",
            Self::Spade => "spades",
        }
    }

    #[must_use]
    pub const fn color(self) -> CardColor {
        match self {
            Self::Heart | Self::Diamond => CardColor::Red,
            Self::Club | Self::Spade => CardColor::Black,
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.glyph())
    }
}

/// A playing card. Display text, glyph and color are always derived
/// from `rank` and `suit`.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    #[must_use]
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Face text, e.g. `"10"` for a ten.
    #[must_use]
    pub const fn display(&self) -> &'static str {
        self.rank.display()
    }

    #[must_use]
    pub const fn color(&self) -> CardColor {
        self.suit.color()
    }

    /// Canonical two-character notation (`"Th"`).
    #[must_use]
    pub fn notation(&self) -> String {
        format!("{}{}", self.rank.symbol(), self.suit.symbol())
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank.display(), self.suit.glyph())
    }
}

impl FromStr for Card {
    type Err = CardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(r), Some(su), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err(CardError::InvalidLength(s.to_string()));
        };

        let rank = Rank::from_symbol(r).ok_or_else(|| CardError::InvalidRank {
            notation: s.to_string(),
            rank: r,
        })?;
        let suit = Suit::from_symbol(su).ok_or_else(|| CardError::InvalidSuit {
            notation: s.to_string(),
            suit: su,
        })?;

        Ok(Self { rank, suit })
    }
}

impl Serialize for Card {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.notation())
    }
}

impl<'de> Deserialize<'de> for Card {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let notation = String::deserialize(deserializer)?;
        notation.parse().map_err(serde::de::Error::custom)
    }
}

/// Check whether `notation` is a valid two-character card.
///
/// Never fails: anything that is not a known rank followed by a known
/// suit (either case) is simply `false`.
///
/// ```
/// use hand_replay::cards::is_valid_card;
///
/// assert!(is_valid_card("Ah"));
/// assert!(is_valid_card("ah"));
/// assert!(!is_valid_card("XX"));
/// assert!(!is_valid_card("A"));
/// ```
#[must_use]
pub fn is_valid_card(notation: &str) -> bool {
    notation.parse::<Card>().is_ok()
}

/// Parse a card notation.
///
/// # Errors
///
/// Returns a [`CardError`] describing which part of the notation is wrong.
/// Callers handling untrusted input should filter with [`is_valid_card`]
/// first or use [`parse_cards`].
pub fn parse_card(notation: &str) -> CardResult<Card> {
    notation.parse()
}

/// Parse every valid notation, silently dropping the rest.
pub fn parse_cards<S: AsRef<str>>(notations: &[S]) -> Vec<Card> {
    notations
        .iter()
        .filter_map(|notation| notation.as_ref().parse().ok())
        .collect()
}

/// Render a notation with its suit glyph (`"Ah"` -> `"A♥"`). Invalid
/// notations are returned unchanged.
#[must_use]
pub fn format_card_display(notation: &str) -> String {
    match notation.parse::<Card>() {
        Ok(card) => card.to_string(),
        Err(_) => notation.to_string(),
    }
}
