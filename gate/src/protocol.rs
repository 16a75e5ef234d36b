//! Challenge result protocol.
//!
//! Every mini-game, however it is built, satisfies one contract: upon
//! reaching its own terminal state it reports `(won, produced symbol,
//! detail)` exactly once through the [`ChallengeHandle`] it was given,
//! then goes inert. The handle defends the decision engine against the
//! ways a game can get that wrong:
//!
//! - a second report for the same round is ignored;
//! - a report carrying a symbol other than the game's assigned one is
//!   ignored;
//! - a report from a challenge that is no longer the active one (the
//!   modal closed, or another game was opened) is ignored. This is the
//!   liveness guard the asynchronous word capture needs so a stale
//!   recognition result cannot land in a replaced challenge.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use crate::engine::AccessEngine;
use crate::types::{ActivityRecord, AttemptOutcome, ChallengeOutcome, LastResult, Symbol};

/// The static identity every mini-game carries.
pub trait Challenge {
    /// Display name, used in activity records.
    fn name(&self) -> &str;

    /// The one symbol this game is allowed to produce.
    fn symbol(&self) -> Symbol;
}

/// Serializes challenge attempts against the decision engine.
///
/// Only one challenge is live at a time: `begin` invalidates whatever
/// handle was outstanding before issuing a new one, and `close` (the
/// modal closing without a result) invalidates without replacement.
pub struct GateSession {
    engine: Arc<Mutex<AccessEngine>>,
    generation: Arc<AtomicU64>,
}

impl GateSession {
    pub fn new(engine: AccessEngine) -> Self {
        Self {
            engine: Arc::new(Mutex::new(engine)),
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Open a challenge, making it the single live one.
    pub fn begin(&self, challenge: &dyn Challenge) -> ChallengeHandle {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!(game = %challenge.name(), generation, "Challenge opened");
        ChallengeHandle {
            engine: self.engine.clone(),
            game: challenge.name().to_string(),
            assigned: challenge.symbol(),
            generation,
            live: self.generation.clone(),
            reported: AtomicBool::new(false),
        }
    }

    /// Close the live challenge without a result. Any report it still
    /// produces afterwards is dropped.
    pub fn close(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        debug!("Challenge closed");
    }

    /// The symbol currently required for a grant.
    pub fn required_symbol(&self) -> Symbol {
        self.engine
            .lock()
            .map(|e| e.required_symbol().clone())
            .unwrap_or_else(|_| Symbol::new(""))
    }

    /// Recorded attempts, most recent first.
    pub fn history(&self) -> Vec<ActivityRecord> {
        self.engine
            .lock()
            .map(|e| e.history().to_vec())
            .unwrap_or_default()
    }

    /// Clear the history, memory and persisted copy both.
    pub fn clear_history(&self) {
        if let Ok(mut engine) = self.engine.lock() {
            engine.clear_history();
        }
    }

    /// Summary of the most recent decision, if any.
    pub fn last_result(&self) -> Option<LastResult> {
        self.engine.lock().ok().and_then(|e| e.last_result())
    }
}

/// A mini-game's one-shot line to the decision engine.
pub struct ChallengeHandle {
    engine: Arc<Mutex<AccessEngine>>,
    game: String,
    assigned: Symbol,
    generation: u64,
    live: Arc<AtomicU64>,
    reported: AtomicBool,
}

impl ChallengeHandle {
    /// Report the game's terminal outcome.
    ///
    /// Returns `None` when the report is ignored: wrong symbol, stale
    /// challenge, or a round that already reported. A violating call
    /// never crashes the engine and never blocks future attempts.
    pub fn report(&self, won: bool, produced: Symbol, detail: String) -> Option<AttemptOutcome> {
        if produced != self.assigned {
            warn!(
                game = %self.game,
                assigned = %self.assigned,
                produced = %produced,
                "Ignoring report with unassigned symbol"
            );
            return None;
        }

        if self.live.load(Ordering::SeqCst) != self.generation {
            warn!(game = %self.game, "Ignoring report from stale challenge");
            return None;
        }

        if self.reported.swap(true, Ordering::SeqCst) {
            warn!(game = %self.game, "Ignoring duplicate report");
            return None;
        }

        let mut engine = self.engine.lock().ok()?;
        Some(engine.record_attempt(ChallengeOutcome {
            game: self.game.clone(),
            won,
            produced,
            detail,
        }))
    }

    /// Report using the game's assigned symbol.
    pub fn report_assigned(&self, won: bool, detail: String) -> Option<AttemptOutcome> {
        self.report(won, self.assigned.clone(), detail)
    }

    /// The symbol this handle's game is assigned.
    pub fn assigned_symbol(&self) -> &Symbol {
        &self.assigned
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GateConfig;
    use gatestore::MemoryStore;
    use std::sync::Arc;

    struct Fake(&'static str, &'static str);

    impl Challenge for Fake {
        fn name(&self) -> &str {
            self.0
        }
        fn symbol(&self) -> Symbol {
            Symbol::from(self.1)
        }
    }

    fn session() -> GateSession {
        let engine = AccessEngine::new(Arc::new(MemoryStore::new()), &GateConfig::default());
        GateSession::new(engine)
    }

    #[test]
    fn test_duplicate_report_ignored() {
        let session = session();
        let handle = session.begin(&Fake("Dice", "🎲"));

        assert!(handle.report_assigned(true, String::new()).is_some());
        assert!(handle.report_assigned(true, String::new()).is_none());
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_unassigned_symbol_ignored_without_consuming_report() {
        let session = session();
        let handle = session.begin(&Fake("Dice", "🎲"));

        assert!(handle.report(true, Symbol::from("⭐"), String::new()).is_none());
        assert!(session.history().is_empty());

        // The violation did not burn the round's one report.
        assert!(handle.report_assigned(true, String::new()).is_some());
    }

    #[test]
    fn test_stale_handle_ignored_after_close() {
        let session = session();
        let handle = session.begin(&Fake("Word", "🎤"));
        session.close();

        assert!(handle.report_assigned(true, String::new()).is_none());
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_new_challenge_invalidates_previous_handle() {
        let session = session();
        let first = session.begin(&Fake("Word", "🎤"));
        let second = session.begin(&Fake("Dice", "🎲"));

        assert!(first.report_assigned(true, String::new()).is_none());
        assert!(second.report_assigned(false, String::new()).is_some());
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.history()[0].game, "Dice");
    }

    #[test]
    fn test_session_rotates_symbol_per_attempt() {
        let session = session();
        let before = session.required_symbol();

        let handle = session.begin(&Fake("Dice", "🎲"));
        handle.report_assigned(false, String::new());

        assert_ne!(session.required_symbol(), before);
    }
}
