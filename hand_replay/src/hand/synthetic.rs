//! Deterministic demo hands.
//!
//! Generates a plausible 6-max hand from a seed so the viewer can run
//! without a hand history file. The betting logic is deliberately loose:
//! it produces legal-looking sequences, not good poker.

use super::models::{Action, ActionKind, Hand, SeatedPlayer, Street};
use crate::{
    cards::{Card, Rank, Suit},
    geometry::{AmountFormat, SeatLabel, format_amount},
};
use rand::{Rng, SeedableRng, rngs::StdRng, seq::SliceRandom};
use std::collections::VecDeque;

const NAMES: [&str; 6] = ["hero", "marta", "jonas", "priya", "kenji", "olga"];
const SMALL_BLIND: u64 = 100;
const BIG_BLIND: u64 = 200;
/// Raises allowed per street before everyone may only call or fold.
const MAX_RAISES: u32 = 2;

const PREFLOP_ORDER: [SeatLabel; 6] = [
    SeatLabel::Utg,
    SeatLabel::Mp,
    SeatLabel::Co,
    SeatLabel::Btn,
    SeatLabel::Sb,
    SeatLabel::Bb,
];
const POSTFLOP_ORDER: [SeatLabel; 6] = [
    SeatLabel::Sb,
    SeatLabel::Bb,
    SeatLabel::Utg,
    SeatLabel::Mp,
    SeatLabel::Co,
    SeatLabel::Btn,
];

struct Seat {
    name: String,
    label: SeatLabel,
    stack: u64,
    street_bet: u64,
    folded: bool,
}

impl Seat {
    fn can_act(&self) -> bool {
        !self.folded && self.stack > 0
    }
}

struct Simulation {
    rng: StdRng,
    seats: Vec<Seat>,
    actions: Vec<Action>,
}

impl Simulation {
    fn seat_mut(&mut self, label: SeatLabel) -> Option<&mut Seat> {
        self.seats.iter_mut().find(|seat| seat.label == label)
    }

    fn contenders(&self) -> usize {
        self.seats.iter().filter(|seat| !seat.folded).count()
    }

    fn record(&mut self, street: Street, label: SeatLabel, kind: ActionKind, amount: u64) {
        let Some(seat) = self.seat_mut(label) else {
            return;
        };

        let paid = amount.min(seat.stack);
        let kind = if kind.puts_chips_in() && paid > 0 && paid == seat.stack {
            ActionKind::AllIn
        } else {
            kind
        };
        seat.stack -= paid;
        seat.street_bet += paid;
        if kind == ActionKind::Fold {
            seat.folded = true;
        }

        let amount_repr = format_amount(paid, AmountFormat::Eur, BIG_BLIND);
        let description = match kind {
            ActionKind::Fold => format!("{} folds", seat.name),
            ActionKind::Check => format!("{} checks", seat.name),
            ActionKind::Call => format!("{} calls {amount_repr}", seat.name),
            ActionKind::Bet => format!("{} bets {amount_repr}", seat.name),
            ActionKind::Raise => format!("{} raises {amount_repr}", seat.name),
            ActionKind::AllIn => format!("{} is all-in for {amount_repr}", seat.name),
        };

        let actor = seat.name.clone();
        let index = self.actions.len();
        self.actions.push(Action {
            index,
            street,
            actor,
            kind,
            amount: paid,
            description,
        });
    }

    fn post_blind(&mut self, label: SeatLabel, amount: u64, name: &str) {
        self.record(Street::Preflop, label, ActionKind::Bet, amount);
        if let Some(action) = self.actions.last_mut() {
            action.description = format!("{} posts {name}", action.actor);
        }
    }

    /// Everyone who can still act, starting after `label` in `order`.
    fn queue_after(&self, order: &[SeatLabel; 6], label: SeatLabel) -> VecDeque<SeatLabel> {
        let start = order.iter().position(|l| *l == label).map_or(0, |i| i + 1);
        order
            .iter()
            .cycle()
            .skip(start)
            .take(order.len() - 1)
            .copied()
            .filter(|l| self.seats.iter().any(|s| s.label == *l && s.can_act()))
            .collect()
    }

    fn betting_round(&mut self, street: Street, order: &[SeatLabel; 6], opening_level: u64) {
        let mut level = opening_level;
        let mut raises = 0;
        let mut pending: VecDeque<SeatLabel> = order
            .iter()
            .copied()
            .filter(|l| self.seats.iter().any(|s| s.label == *l && s.can_act()))
            .collect();

        while let Some(label) = pending.pop_front() {
            if self.contenders() <= 1 {
                break;
            }
            let Some(seat) = self.seats.iter().find(|s| s.label == label) else {
                continue;
            };
            if !seat.can_act() {
                continue;
            }

            let to_call = level.saturating_sub(seat.street_bet);
            let roll = self.rng.random_range(0..100);
            let (kind, amount) = if to_call > 0 {
                if roll < 30 {
                    (ActionKind::Fold, 0)
                } else if roll < 85 || raises >= MAX_RAISES {
                    (ActionKind::Call, to_call)
                } else {
                    (ActionKind::Raise, to_call + level.max(BIG_BLIND) * 2)
                }
            } else if roll < 65 || raises >= MAX_RAISES {
                (ActionKind::Check, 0)
            } else {
                let size = BIG_BLIND * self.rng.random_range(2..=4);
                let kind = if level == 0 {
                    ActionKind::Bet
                } else {
                    ActionKind::Raise
                };
                (kind, size)
            };

            self.record(street, label, kind, amount);

            let street_bet = self
                .seats
                .iter()
                .find(|s| s.label == label)
                .map_or(0, |s| s.street_bet);
            if street_bet > level {
                level = street_bet;
                raises += 1;
                pending = self.queue_after(order, label);
            }
        }
    }
}

/// Generate a demo hand. The same seed always yields the same hand.
#[must_use]
pub fn generate(seed: u64) -> Hand {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut deck: Vec<Card> = Rank::ALL
        .into_iter()
        .flat_map(|rank| Suit::ALL.map(|suit| Card::new(rank, suit)))
        .collect();
    deck.shuffle(&mut rng);
    let mut deck = deck.into_iter();

    let mut players = Vec::with_capacity(SeatLabel::ALL.len());
    for (name, label) in NAMES.into_iter().zip(SeatLabel::ALL) {
        let stack = BIG_BLIND * rng.random_range(60..=150);
        let hole_cards = deck.by_ref().take(2).map(|card| card.notation()).collect();
        players.push(SeatedPlayer {
            name: name.to_string(),
            seat: label,
            stack,
            hole_cards,
            is_hero: label == SeatLabel::Btn,
        });
    }
    let board: Vec<String> = deck.by_ref().take(5).map(|card| card.notation()).collect();
    let id = uuid::Builder::from_random_bytes(rng.random()).into_uuid();

    let mut sim = Simulation {
        rng,
        seats: players
            .iter()
            .map(|player| Seat {
                name: player.name.clone(),
                label: player.seat,
                stack: player.stack,
                street_bet: 0,
                folded: false,
            })
            .collect(),
        actions: Vec::new(),
    };

    sim.post_blind(SeatLabel::Sb, SMALL_BLIND, "small blind");
    sim.post_blind(SeatLabel::Bb, BIG_BLIND, "big blind");

    let mut last_street = Street::Preflop;
    for street in Street::ALL {
        if sim.contenders() <= 1 {
            break;
        }
        last_street = street;
        let (order, opening) = if street == Street::Preflop {
            (&PREFLOP_ORDER, BIG_BLIND)
        } else {
            for seat in &mut sim.seats {
                seat.street_bet = 0;
            }
            (&POSTFLOP_ORDER, 0)
        };
        sim.betting_round(street, order, opening);
    }

    log::debug!(
        "Generated demo hand {id} (seed {seed}) with {} actions",
        sim.actions.len()
    );

    Hand {
        id: id.to_string(),
        table_name: "Demo 6-max".to_string(),
        played_at: None,
        big_blind: BIG_BLIND,
        dealer: SeatLabel::Btn,
        players,
        board: board
            .into_iter()
            .take(last_street.board_cards())
            .collect(),
        actions: sim.actions,
    }
}
