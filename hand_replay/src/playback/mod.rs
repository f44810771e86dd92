//! Hand playback: state machine, auto-advance timer and replay actor.
//!
//! This module implements:
//! - `reduce`: pure transitions over idle/playing/paused/finished
//! - `Scheduler`: a single cancellable timer guarded by generation tokens
//! - `ReplayEngine`: the one dispatch path for user and timer commands
//! - `ReplayActor`: a Tokio task driving an engine, with a cloneable handle
//!
//! ## Architecture
//!
//! Each open replay runs in its own Tokio task with an mpsc inbox. The
//! actor waits on either its inbox or the engine's next deadline; both
//! paths end in `ReplayEngine::dispatch`, so state changes never overlap.
//! State is published through a `watch` channel for the renderer.
//!
//! ## Example
//!
//! ```
//! use hand_replay::playback::{Phase, ReplayActor, ReplayConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, handle) = ReplayActor::new(12, ReplayConfig::default());
//!     tokio::spawn(actor.run());
//!
//!     handle.jump_to(5).await.unwrap();
//!     let state = handle.state().await.unwrap();
//!     assert_eq!(state.current_index(), 5);
//!     assert_eq!(state.phase(), Phase::Paused);
//!
//!     handle.shutdown().await.unwrap();
//! }
//! ```

pub mod actor;
pub mod config;
pub mod engine;
pub mod errors;
pub mod messages;
pub mod scheduler;
pub mod state_machine;

pub use actor::{ReplayActor, ReplayHandle};
pub use config::{DEFAULT_BASE_DELAY, ReplayConfig};
pub use engine::ReplayEngine;
pub use errors::{InvalidSpeed, ReplayError, ReplayResult};
pub use messages::ReplayMessage;
pub use scheduler::{Scheduler, TimerToken};
pub use state_machine::{Command, Phase, PlaybackSpeed, PlaybackState, reduce};
