//! Gesture unlock challenge: draw a stroke matching a saved pattern.

use std::sync::Arc;

use gatestore::BlobStore;
use gesture::{recognize, GestureTemplate, Point, StrokeRecorder, TemplateStore};

use crate::protocol::{Challenge, ChallengeHandle};
use crate::types::{AttemptOutcome, Result, Symbol};

const SYMBOL: &str = "🔑";

/// Bridges stroke capture and the template store into a challenge.
pub struct GestureUnlockChallenge {
    recorder: StrokeRecorder,
    templates: TemplateStore,
}

impl GestureUnlockChallenge {
    /// Restore saved patterns from the blob store.
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        Self {
            recorder: StrokeRecorder::new(),
            templates: TemplateStore::new(store),
        }
    }

    pub fn stroke_begin(&mut self, point: Point) {
        self.recorder.begin(point);
    }

    pub fn stroke_move(&mut self, point: Point) {
        self.recorder.extend(point);
    }

    pub fn stroke_end(&mut self) {
        self.recorder.finish();
    }

    pub fn clear(&mut self) {
        self.recorder.clear();
    }

    /// Promote the current stroke to a named template.
    ///
    /// Validation failures (empty name, too-short stroke) surface to the
    /// caller as a blocking message; nothing is reported or persisted and
    /// the challenge stays open.
    pub fn save_pattern(&mut self, name: &str) -> Result<GestureTemplate> {
        let template = self
            .templates
            .save(name, self.recorder.points().to_vec())?;
        self.recorder.clear();
        Ok(template)
    }

    /// Saved templates, insertion order.
    pub fn patterns(&self) -> &[GestureTemplate] {
        self.templates.list()
    }

    /// Delete a saved template. No-op if absent.
    pub fn delete_pattern(&mut self, id: i64) {
        self.templates.delete(id);
    }

    /// Submit the current stroke against the saved templates.
    ///
    /// Grants on the first template the stroke matches; a stroke below
    /// the minimum point count, or matching nothing, loses the round.
    pub fn submit(&mut self, handle: &ChallengeHandle) -> Option<AttemptOutcome> {
        let points = self.recorder.points();
        let (won, detail) = match recognize(points, self.templates.list()) {
            Some(template) => (true, format!("matched=\"{}\"", template.name)),
            None => (false, format!("points={}", points.len())),
        };
        self.recorder.clear();
        handle.report_assigned(won, detail)
    }
}

impl Challenge for GestureUnlockChallenge {
    fn name(&self) -> &str {
        "Gesture"
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
    use gesture::GestureError;

    fn session() -> GateSession {
        GateSession::new(AccessEngine::new(
            Arc::new(MemoryStore::new()),
            &GateConfig::default(),
        ))
    }

    fn draw(game: &mut GestureUnlockChallenge, n: usize, scale: f64) {
        game.stroke_begin(Point::new(0.0, 0.0));
        for i in 1..n {
            game.stroke_move(Point::new(i as f64 * scale, (i * i) as f64 * scale));
        }
        game.stroke_end();
    }

    #[test]
    fn test_save_then_redraw_unlocks() {
        let store: Arc<dyn BlobStore> = Arc::new(MemoryStore::new());
        let session = session();
        let mut game = GestureUnlockChallenge::new(store);

        draw(&mut game, 12, 1.0);
        game.save_pattern("parabola").unwrap();

        // Same shape, different scale, same point count.
        draw(&mut game, 12, 30.0);
        let handle = session.begin(&game);
        let out = game.submit(&handle).unwrap();
        assert_eq!(out.record.detail, "matched=\"parabola\"");
    }

    #[test]
    fn test_save_validation_surfaces_and_preserves_state() {
        let store: Arc<dyn BlobStore> = Arc::new(MemoryStore::new());
        let mut game = GestureUnlockChallenge::new(store);

        draw(&mut game, 5, 1.0);
        let err = game.save_pattern("tiny").unwrap_err();
        assert!(matches!(
            err,
            crate::types::GateError::Validation(GestureError::TooFewPoints { .. })
        ));
        assert!(game.patterns().is_empty());
        // The rejected stroke is still on the canvas for another try.
        assert_eq!(game.recorder.points().len(), 5);
    }

    #[test]
    fn test_unrecognized_stroke_loses() {
        let store: Arc<dyn BlobStore> = Arc::new(MemoryStore::new());
        let session = session();
        let mut game = GestureUnlockChallenge::new(store);

        draw(&mut game, 12, 1.0);
        let handle = session.begin(&game);
        let out = game.submit(&handle).unwrap();
        assert!(!out.granted);
        assert_eq!(out.record.result, crate::types::AccessResult::Declined);
    }

    #[test]
    fn test_patterns_shared_through_store() {
        let store: Arc<dyn BlobStore> = Arc::new(MemoryStore::new());
        {
            let mut game = GestureUnlockChallenge::new(store.clone());
            draw(&mut game, 15, 1.0);
            game.save_pattern("loop").unwrap();
        }

        let game = GestureUnlockChallenge::new(store);
        assert_eq!(game.patterns().len(), 1);
        assert_eq!(game.patterns()[0].name, "loop");
    }
}
