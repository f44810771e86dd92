//! Amount formatting for seat stacks, bets and the pot.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How chip amounts are shown next to seats.
#[derive(Clone, Copy, Debug, Default, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AmountFormat {
    /// Multiples of the big blind
    #[default]
    Bb,
    /// Euros, amounts being stored in cents
    Eur,
}

impl AmountFormat {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Bb => Self::Eur,
            Self::Eur => Self::Bb,
        }
    }
}

impl fmt::Display for AmountFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bb => write!(f, "bb"),
            Self::Eur => write!(f, "eur"),
        }
    }
}

/// `numerator / denominator` rounded to the nearest integer, ties away
/// from zero. `denominator` must be non-zero.
fn round_half_up(numerator: u128, denominator: u128) -> u128 {
    (2 * numerator + denominator) / (2 * denominator)
}

/// `amount / unit` with one decimal, e.g. `1.3` for 1250 / 1000.
fn tenths(amount: u64, unit: u64) -> String {
    let tenths = round_half_up(u128::from(amount) * 10, u128::from(unit));
    format!("{}.{}", tenths / 10, tenths % 10)
}

/// Format an amount given in cents.
///
/// Big-blind amounts drop the decimal when they are (almost) whole. A
/// non-positive big blind cannot express anything in blinds, so the
/// amount falls back to euros.
#[must_use]
pub fn format_amount(amount_cents: u64, format: AmountFormat, big_blind_cents: u64) -> String {
    match format {
        AmountFormat::Bb if big_blind_cents > 0 => {
            let amount = u128::from(amount_cents);
            let big_blind = u128::from(big_blind_cents);
            let whole = round_half_up(amount, big_blind);
            // Within a hundredth of a blind counts as whole.
            if amount.abs_diff(whole * big_blind) * 100 < big_blind {
                format!("{whole}bb")
            } else {
                format!("{}bb", tenths(amount_cents, big_blind_cents))
            }
        }
        _ => format!("{}.{:02}€", amount_cents / 100, amount_cents % 100),
    }
}

/// Pot label in the chosen format, empty while the pot is empty.
#[must_use]
pub fn format_pot(amount_cents: u64, format: AmountFormat, big_blind_cents: u64) -> String {
    if amount_cents == 0 {
        return String::new();
    }
    format!("Pot: {}", format_amount(amount_cents, format, big_blind_cents))
}
