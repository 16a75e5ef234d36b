//! Challenge gate - win a mini-game to be granted access.
//!
//! A user faces a rotating *required symbol* and a set of independent
//! mini-games. Each game, on reaching its own terminal state, reports a
//! three-field outcome through the challenge protocol; the decision
//! engine grants access only when the game was won **and** the symbol the
//! game produces happens to equal the currently required one:
//!
//! ```text
//! ┌──────────┐  report(won, symbol, detail)  ┌──────────────┐
//! │ minigame │──────────────────────────────▶│ GateSession  │
//! └──────────┘        (exactly once)         │  ┌─────────┐ │
//!                                            │  │ Access  │ │
//!                                            │  │ Engine  │ │
//!                                            │  └────┬────┘ │
//!                                            └───────┼──────┘
//!                         history + lastResult + rotated symbol
//!                                                    ▼
//!                                               blob store
//! ```
//!
//! The required symbol advances cyclically after *every* attempt, win or
//! lose, so a given game only grants on the attempts where rotation has
//! aligned its fixed symbol with the required one.

pub mod config;
pub mod engine;
pub mod games;
pub mod history;
pub mod protocol;
pub mod types;

pub use config::GateConfig;
pub use engine::AccessEngine;
pub use protocol::{Challenge, ChallengeHandle, GateSession};
pub use types::*;
