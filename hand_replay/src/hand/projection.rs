//! Derive what the table looks like at a given point of the replay.

use super::models::{ActionKind, Hand, Street};
use crate::{
    cards::{Card, parse_cards},
    geometry::SeatLabel,
};

/// A seated player as shown at the current action.
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerState {
    pub name: String,
    pub seat: SeatLabel,
    pub stack: u64,
    pub is_hero: bool,
    pub is_folded: bool,
    /// The player who made the current action
    pub is_active: bool,
    /// Visible hole cards, invalid notations already dropped
    pub cards: Vec<Card>,
    /// Chips put in on the current street
    pub current_bet: u64,
}

/// Board, pot and seat contents after the action at `current_index`.
#[derive(Clone, Debug, PartialEq)]
pub struct TableState {
    pub current_index: usize,
    pub street: Street,
    pub players: Vec<PlayerState>,
    pub pot: u64,
    pub dealer: SeatLabel,
    pub board: Vec<Card>,
}

impl TableState {
    #[must_use]
    pub fn player(&self, name: &str) -> Option<&PlayerState> {
        self.players.iter().find(|player| player.name == name)
    }
}

/// Replay `hand` up to and including the action at `current_index`.
///
/// Indexes past the end are clamped to the last action. A hand without
/// actions projects to its starting position.
#[must_use]
pub fn project(hand: &Hand, current_index: usize) -> TableState {
    let mut players: Vec<PlayerState> = hand
        .players
        .iter()
        .map(|player| PlayerState {
            name: player.name.clone(),
            seat: player.seat,
            stack: player.stack,
            is_hero: player.is_hero,
            is_folded: false,
            is_active: false,
            cards: parse_cards(&player.hole_cards),
            current_bet: 0,
        })
        .collect();
    players.sort_by_key(|player| player.seat);

    let current_index = current_index.min(hand.total().saturating_sub(1));
    let mut street = Street::Preflop;
    let mut pot = 0u64;
    let mut active = None;

    for action in hand.actions.iter().take(current_index + 1) {
        if action.street != street {
            street = action.street;
            for player in &mut players {
                player.current_bet = 0;
            }
        }

        let Some(player) = players.iter_mut().find(|p| p.name == action.actor) else {
            log::debug!(
                "Skipping action {} by unseated player '{}'",
                action.index,
                action.actor
            );
            continue;
        };

        match action.kind {
            ActionKind::Fold => player.is_folded = true,
            ActionKind::Check => {}
            kind if kind.puts_chips_in() => {
                let paid = action.amount.min(player.stack);
                player.stack -= paid;
                player.current_bet += paid;
                pot += paid;
            }
            _ => {}
        }
        active = Some(action.actor.as_str());
    }

    if let Some(actor) = active {
        for player in &mut players {
            player.is_active = player.name == actor;
        }
    }

    let board = parse_cards(&hand.board)
        .into_iter()
        .take(street.board_cards())
        .collect();

    TableState {
        current_index,
        street,
        players,
        pot,
        dealer: hand.dealer,
        board,
    }
}
