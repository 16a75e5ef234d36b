//! Access decision engine.
//!
//! Combines a mini-game's reported outcome with the currently required
//! symbol, records the decision, and rotates the required symbol for the
//! next attempt. Rotation is unconditional: win or lose, every completed
//! attempt advances the symbol one step through the alphabet.

use std::sync::Arc;

use chrono::Utc;
use serde::Serialize;
use tracing::{info, warn};

use gatestore::{keys, BlobStore};

use crate::config::GateConfig;
use crate::history::ActivityLog;
use crate::types::{
    AccessResult, ActivityRecord, AttemptOutcome, ChallengeOutcome, LastResult, Symbol,
};

/// The gate's decision state: required symbol, history, persistence.
///
/// Attempts are serialized by the session (one open mini-game at a time),
/// so the engine itself is single-threaded and synchronous. All store
/// writes are best-effort: a failed write on one key is logged and must
/// not stop the others, and never reaches the caller.
pub struct AccessEngine {
    store: Arc<dyn BlobStore>,
    alphabet: Vec<Symbol>,
    required: Symbol,
    log: ActivityLog,
}

impl AccessEngine {
    /// Restore engine state from the store, defaulting the required
    /// symbol to the alphabet's first element and the history to empty.
    pub fn new(store: Arc<dyn BlobStore>, config: &GateConfig) -> Self {
        let required: Symbol = gatestore::get_json_or(
            store.as_ref(),
            keys::REQUIRED_SYMBOL,
            config.alphabet[0].clone(),
        );
        let records: Vec<ActivityRecord> =
            gatestore::get_json_or(store.as_ref(), keys::RECENT_ACTIVITIES, Vec::new());
        let log = ActivityLog::restore(records, config.history_cap);

        info!(required = %required, history = log.len(), "Restored gate state");
        Self {
            store,
            alphabet: config.alphabet.clone(),
            required,
            log,
        }
    }

    /// The symbol a game must produce, right now, for a win to grant.
    pub fn required_symbol(&self) -> &Symbol {
        &self.required
    }

    /// Evaluate one completed challenge attempt.
    ///
    /// Grants iff the game won *and* its produced symbol equals the
    /// required symbol at attempt time. Appends the record, persists the
    /// last-result summary and history, then rotates the required symbol
    /// regardless of outcome.
    pub fn record_attempt(&mut self, outcome: ChallengeOutcome) -> AttemptOutcome {
        let granted = outcome.won && outcome.produced == self.required;
        let result = if granted {
            AccessResult::Granted
        } else {
            AccessResult::Declined
        };

        let record = ActivityRecord {
            ts: Utc::now().timestamp_millis(),
            game: outcome.game,
            result,
            detail: outcome.detail,
            required_symbol: self.required.clone(),
            produced_symbol: outcome.produced,
        };

        info!(
            game = %record.game,
            won = outcome.won,
            required = %record.required_symbol,
            produced = %record.produced_symbol,
            result = %result,
            "Attempt recorded"
        );

        self.log.append(record.clone());

        // Three independent writes: one failing must not stop the rest.
        self.persist(
            keys::LAST_RESULT,
            &LastResult {
                result,
                ts: record.ts,
            },
        );
        self.persist(keys::RECENT_ACTIVITIES, &self.log.list().to_vec());
        self.rotate();

        AttemptOutcome { granted, record }
    }

    /// Advance the required symbol one step, cyclically.
    ///
    /// A persisted symbol that is no longer in the alphabet resolves to
    /// index -1 in the original implementation, which rotates it to the
    /// alphabet's first element; position-or-default reproduces that.
    fn rotate(&mut self) {
        let next = self
            .alphabet
            .iter()
            .position(|s| *s == self.required)
            .map(|i| (i + 1) % self.alphabet.len())
            .unwrap_or(0);
        self.required = self.alphabet[next].clone();
        info!(required = %self.required, "Required symbol rotated");
        self.persist(keys::REQUIRED_SYMBOL, &self.required);
    }

    /// Recorded attempts, most recent first.
    pub fn history(&self) -> &[ActivityRecord] {
        self.log.list()
    }

    /// Drop the history, memory and persisted copy both.
    pub fn clear_history(&mut self) {
        self.log.clear();
        self.store.remove(keys::RECENT_ACTIVITIES);
        info!("Activity history cleared");
    }

    /// The persisted summary of the most recent decision, if any.
    pub fn last_result(&self) -> Option<LastResult> {
        gatestore::get_json(self.store.as_ref(), keys::LAST_RESULT)
    }

    fn persist<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(err) = gatestore::put_json(self.store.as_ref(), key, value) {
            warn!(key = %key, error = %err, "Store write failed, continuing");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gatestore::MemoryStore;

    fn engine() -> AccessEngine {
        AccessEngine::new(Arc::new(MemoryStore::new()), &GateConfig::default())
    }

    fn outcome(game: &str, won: bool, produced: &str) -> ChallengeOutcome {
        ChallengeOutcome {
            game: game.to_string(),
            won,
            produced: Symbol::from(produced),
            detail: String::new(),
        }
    }

    #[test]
    fn test_rotation_is_unconditional() {
        let mut engine = engine();
        let alphabet = engine.alphabet.clone();

        for n in 0..9 {
            assert_eq!(*engine.required_symbol(), alphabet[n % alphabet.len()]);
            // Mix of wins, losses and symbols: rotation must not care.
            engine.record_attempt(outcome("Dice", n % 2 == 0, "🎲"));
        }
        assert_eq!(*engine.required_symbol(), alphabet[9 % alphabet.len()]);
    }

    #[test]
    fn test_grant_requires_win_and_symbol_match() {
        let mut engine = engine();

        // Won, wrong symbol.
        let out = engine.record_attempt(outcome("Dice", true, "🎲"));
        assert!(!out.granted);
        assert_eq!(out.record.result, AccessResult::Declined);

        // Lost, right symbol (required is now 🎯).
        let out = engine.record_attempt(outcome("Sequence", false, "🎯"));
        assert!(!out.granted);

        // Won, right symbol (required is now ✅).
        let out = engine.record_attempt(outcome("Check", true, "✅"));
        assert!(out.granted);
        assert_eq!(out.record.result, AccessResult::Granted);
    }

    #[test]
    fn test_record_captures_pre_rotation_symbol() {
        let mut engine = engine();
        let required = engine.required_symbol().clone();
        let out = engine.record_attempt(outcome("Dice", true, "🎲"));
        assert_eq!(out.record.required_symbol, required);
        assert_ne!(*engine.required_symbol(), required);
    }

    #[test]
    fn test_history_bound_and_order() {
        let mut engine = engine();
        for n in 0..8 {
            engine.record_attempt(outcome(&format!("game-{n}"), false, "🎲"));
        }

        let history = engine.history();
        assert_eq!(history.len(), 5);
        assert_eq!(history[0].game, "game-7");
        assert_eq!(history[4].game, "game-3");
    }

    #[test]
    fn test_state_survives_restart() {
        let store = Arc::new(MemoryStore::new());
        let config = GateConfig::default();
        {
            let mut engine = AccessEngine::new(store.clone(), &config);
            engine.record_attempt(outcome("Dice", true, "🎲"));
            engine.record_attempt(outcome("Word", true, "🎤"));
        }

        let engine = AccessEngine::new(store, &config);
        assert_eq!(*engine.required_symbol(), config.alphabet[2]);
        assert_eq!(engine.history().len(), 2);
        assert_eq!(engine.history()[0].game, "Word");
        assert_eq!(
            engine.last_result().map(|l| l.result),
            Some(AccessResult::Declined)
        );
    }

    #[test]
    fn test_unknown_persisted_symbol_rotates_to_first() {
        let store = Arc::new(MemoryStore::new());
        gatestore::put_json(store.as_ref(), keys::REQUIRED_SYMBOL, &Symbol::from("💀")).unwrap();

        let config = GateConfig::default();
        let mut engine = AccessEngine::new(store, &config);
        assert_eq!(*engine.required_symbol(), Symbol::from("💀"));

        engine.record_attempt(outcome("Dice", false, "🎲"));
        assert_eq!(*engine.required_symbol(), config.alphabet[0]);
    }

    #[test]
    fn test_clear_history_erases_persisted_copy() {
        let store = Arc::new(MemoryStore::new());
        let config = GateConfig::default();
        let mut engine = AccessEngine::new(store.clone(), &config);
        engine.record_attempt(outcome("Dice", false, "🎲"));
        engine.clear_history();

        assert!(engine.history().is_empty());
        let restored = AccessEngine::new(store, &config);
        assert!(restored.history().is_empty());
    }

    #[test]
    fn test_end_to_end_decline_then_grant() {
        let mut engine = engine();

        // Attempt 1: dice wins but produces 🎲 while ⭐ is required.
        let first = engine.record_attempt(outcome("Dice", true, "🎲"));
        assert!(!first.granted);
        assert_eq!(*engine.required_symbol(), Symbol::from("🎯"));

        // Attempt 2: a game producing the now-required 🎯 wins.
        let second = engine.record_attempt(outcome("Sequence", true, "🎯"));
        assert!(second.granted);

        let history = engine.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].game, "Sequence");
        assert_eq!(history[1].game, "Dice");
        assert_eq!(*engine.required_symbol(), Symbol::from("✅"));
    }
}
