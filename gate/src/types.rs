//! Core types for the challenge gate.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A symbol from the gate's alphabet, or a game's identity symbol.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbol(pub String);

impl Symbol {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Final access decision for one attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessResult {
    Granted,
    Declined,
}

impl AccessResult {
    pub fn is_granted(&self) -> bool {
        matches!(self, AccessResult::Granted)
    }
}

impl fmt::Display for AccessResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccessResult::Granted => f.write_str("Granted"),
            AccessResult::Declined => f.write_str("Declined"),
        }
    }
}

/// What a mini-game reports when it concludes. Immutable; consumed
/// exactly once by the decision engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeOutcome {
    /// Display name of the game.
    pub game: String,
    /// The game's own win condition.
    pub won: bool,
    /// The game's identity symbol.
    pub produced: Symbol,
    /// Free-text diagnostics, may be empty.
    pub detail: String,
}

/// One recorded attempt. Immutable once appended to the history.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityRecord {
    /// Attempt timestamp, epoch millis.
    pub ts: i64,
    pub game: String,
    pub result: AccessResult,
    #[serde(default)]
    pub detail: String,
    /// Symbol required at attempt time, before rotation.
    pub required_symbol: Symbol,
    pub produced_symbol: Symbol,
}

/// Persisted summary of the most recent decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LastResult {
    pub result: AccessResult,
    pub ts: i64,
}

/// What `record_attempt` hands back for the caller to render.
#[derive(Debug, Clone)]
pub struct AttemptOutcome {
    pub granted: bool,
    pub record: ActivityRecord,
}

/// Error types for the gate.
#[derive(Debug, thiserror::Error)]
pub enum GateError {
    /// User input rejected before anything was persisted.
    #[error("validation failed: {0}")]
    Validation(#[from] gesture::GestureError),

    /// Backing store failure that could not be recovered locally.
    #[error("storage failed: {0}")]
    Storage(#[from] gatestore::StoreError),

    /// Configuration rejected at load time.
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GateError>;
