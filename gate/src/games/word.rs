//! Word challenge: say or type the secret word.
//!
//! Capture is single-shot: a session is started and exactly one terminal
//! event (recognized text, or none) resolves it. The recognizer itself is
//! an external collaborator; this unit consumes its result over a oneshot
//! channel. Because recognition resolves after an arbitrary delay, the
//! report rides through the liveness-guarded handle: if the challenge was
//! closed or replaced in the meantime, the stale result is dropped.

use tokio::sync::oneshot;
use tracing::debug;

use crate::protocol::{Challenge, ChallengeHandle};
use crate::types::{AttemptOutcome, Symbol};

const SYMBOL: &str = "🎤";
const SECRET: &str = "open";

/// Normalize a spoken or typed phrase: trim, lowercase, strip the
/// punctuation recognizers like to append.
fn normalize_phrase(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, '!' | '.' | ',' | '?'))
        .collect()
}

pub struct WordChallenge;

impl WordChallenge {
    pub fn new() -> Self {
        Self
    }

    /// Typed fallback for environments without a recognizer.
    pub fn submit_typed(&self, text: &str, handle: &ChallengeHandle) -> Option<AttemptOutcome> {
        let won = normalize_phrase(text) == SECRET;
        handle.report_assigned(won, format!("typed=\"{}\"", text.trim()))
    }

    /// Await one capture result and conclude the challenge.
    ///
    /// `rx` resolves with `Some(text)` on recognized speech, `None` when
    /// the capture ended without a result. A dropped sender counts as no
    /// result.
    pub async fn listen(
        &self,
        rx: oneshot::Receiver<Option<String>>,
        handle: &ChallengeHandle,
    ) -> Option<AttemptOutcome> {
        let heard = rx.await.ok().flatten();
        debug!(heard = ?heard, "Capture session resolved");

        match heard {
            Some(text) => {
                let said = normalize_phrase(&text);
                handle.report_assigned(said == SECRET, format!("said=\"{said}\""))
            }
            None => handle.report_assigned(false, "said=\"\"".to_string()),
        }
    }
}

impl Default for WordChallenge {
    fn default() -> Self {
        Self::new()
    }
}

impl Challenge for WordChallenge {
    fn name(&self) -> &str {
        "Voice"
    }

    fn symbol(&self) -> Symbol {
        Symbol::from(SYMBOL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GateConfig;
    use crate::engine::AccessEngine;
    use crate::protocol::GateSession;
    use gatestore::MemoryStore;
    use std::sync::Arc;

    fn session() -> GateSession {
        GateSession::new(AccessEngine::new(
            Arc::new(MemoryStore::new()),
            &GateConfig::default(),
        ))
    }

    #[test]
    fn test_normalize_phrase() {
        assert_eq!(normalize_phrase("  Open!  "), "open");
        assert_eq!(normalize_phrase("OPEN."), "open");
        assert_eq!(normalize_phrase("open, sesame"), "open sesame");
    }

    #[test]
    fn test_typed_secret_wins_round() {
        let session = session();
        let game = WordChallenge::new();
        let handle = session.begin(&game);

        let out = game.submit_typed(" Open! ", &handle).unwrap();
        // The game was won; the grant still depends on symbol alignment.
        assert_eq!(out.record.produced_symbol, Symbol::from(SYMBOL));
        assert_eq!(session.history().len(), 1);
    }

    #[tokio::test]
    async fn test_listen_recognized_text() {
        let session = session();
        let game = WordChallenge::new();
        let handle = session.begin(&game);

        let (tx, rx) = oneshot::channel();
        tx.send(Some("Open.".to_string())).unwrap();

        let out = game.listen(rx, &handle).await.unwrap();
        assert_eq!(out.record.detail, "said=\"open\"");
    }

    #[tokio::test]
    async fn test_listen_no_result_reports_loss() {
        let session = session();
        let game = WordChallenge::new();
        let handle = session.begin(&game);

        let (tx, rx) = oneshot::channel::<Option<String>>();
        drop(tx);

        let out = game.listen(rx, &handle).await.unwrap();
        assert!(!out.granted);
        assert_eq!(session.history()[0].result, crate::types::AccessResult::Declined);
    }

    #[tokio::test]
    async fn test_stale_capture_does_not_land() {
        let session = session();
        let game = WordChallenge::new();
        let handle = session.begin(&game);

        let (tx, rx) = oneshot::channel();

        // Modal closes before the recognizer resolves.
        session.close();
        tx.send(Some("open".to_string())).unwrap();

        assert!(game.listen(rx, &handle).await.is_none());
        assert!(session.history().is_empty());
    }
}
