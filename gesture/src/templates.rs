//! Persisted gesture templates.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use gatestore::{keys, BlobStore};

use crate::matcher::MIN_POINTS;
use crate::stroke::Point;
use crate::{GestureError, Result};

/// A saved gesture, immutable once created. A re-save of the same shape
/// creates a new record rather than mutating an old one.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GestureTemplate {
    /// Creation epoch-millis, bumped past the newest existing id on
    /// collision so ids stay unique and monotonic.
    pub id: i64,
    pub name: String,
    pub points: Vec<Point>,
    /// Persisted under the original's `timestamp` key so an existing
    /// `gesture_patterns` blob stays readable.
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
}

/// Owns the saved templates and their persisted copy.
pub struct TemplateStore {
    store: Arc<dyn BlobStore>,
    templates: Vec<GestureTemplate>,
}

impl TemplateStore {
    /// Restore templates from the blob store; missing or corrupt data
    /// loads as an empty list.
    pub fn new(store: Arc<dyn BlobStore>) -> Self {
        let templates: Vec<GestureTemplate> =
            gatestore::get_json_or(store.as_ref(), keys::GESTURE_PATTERNS, Vec::new());
        debug!(count = templates.len(), "Restored gesture templates");
        Self { store, templates }
    }

    /// Save a stroke as a named template.
    ///
    /// Fails without mutating the list when the name is empty or the
    /// stroke has fewer than [`MIN_POINTS`] points.
    pub fn save(&mut self, name: &str, points: Vec<Point>) -> Result<GestureTemplate> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GestureError::EmptyName);
        }
        if points.len() < MIN_POINTS {
            return Err(GestureError::TooFewPoints {
                got: points.len(),
                min: MIN_POINTS,
            });
        }

        let mut id = Utc::now().timestamp_millis();
        if let Some(max) = self.templates.iter().map(|t| t.id).max() {
            if id <= max {
                id = max + 1;
            }
        }

        let template = GestureTemplate {
            id,
            name: name.to_string(),
            points,
            created_at: Utc::now(),
        };

        info!(id = template.id, name = %template.name, points = template.points.len(), "Saved gesture template");
        self.templates.push(template.clone());
        self.persist();
        Ok(template)
    }

    /// Saved templates in insertion order.
    pub fn list(&self) -> &[GestureTemplate] {
        &self.templates
    }

    /// Delete the template with `id`. Silent no-op if absent.
    pub fn delete(&mut self, id: i64) {
        let before = self.templates.len();
        self.templates.retain(|t| t.id != id);
        if self.templates.len() != before {
            info!(id, "Deleted gesture template");
            self.persist();
        }
    }

    /// Remove every template, memory and persisted copy both.
    pub fn clear(&mut self) {
        self.templates.clear();
        self.store.remove(keys::GESTURE_PATTERNS);
    }

    fn persist(&self) {
        if let Err(err) =
            gatestore::put_json(self.store.as_ref(), keys::GESTURE_PATTERNS, &self.templates)
        {
            warn!(error = %err, "Failed to persist gesture templates");
        }
    }
}
