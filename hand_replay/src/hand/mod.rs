//! Recorded hands and what the table looks like while replaying them.
//!
//! This module implements:
//! - The immutable action sequence of a hand, loaded from JSON
//! - Structural validation (sequential indexes, seated actors, 6-max seats)
//! - A projection from the replay position to board, pot and seat contents
//! - A seeded demo hand generator
//!
//! ## Example
//!
//! ```
//! use hand_replay::hand::{project, synthetic};
//!
//! let hand = synthetic::generate(42);
//! let table = project(&hand, 1);
//! assert_eq!(table.current_index, 1);
//! assert!(table.pot > 0);
//! ```

pub mod errors;
pub mod models;
pub mod projection;
pub mod synthetic;

pub use errors::{HandError, HandResult};
pub use models::{Action, ActionKind, Hand, SeatedPlayer, Street};
pub use projection::{PlayerState, TableState, project};
