//! Freehand gesture recognition for the challenge gate.
//!
//! Three pieces, smallest first:
//!
//! - **Stroke capture**: an ephemeral recorder bracketing pointer-down /
//!   move / up into an ordered point sequence.
//! - **Matcher**: pure normalization + mean-distance comparison of two
//!   point sequences within a fixed tolerance.
//! - **Template store**: named, persisted gesture templates with explicit
//!   save/list/delete.
//!
//! The matcher deliberately preserves the strict equal-length precondition
//! of the system it reimplements: two strokes of the same shape captured
//! at different sampling rates never match. See `matcher` for the details.

pub mod matcher;
pub mod stroke;
pub mod templates;

pub use matcher::{matches, normalize, recognize, MATCH_TOLERANCE, MIN_POINTS};
pub use stroke::{Point, StrokeRecorder};
pub use templates::{GestureTemplate, TemplateStore};

/// Error types for gesture capture and template management.
#[derive(Debug, thiserror::Error)]
pub enum GestureError {
    /// Template name was empty or whitespace-only.
    #[error("pattern name must not be empty")]
    EmptyName,

    /// Stroke had too few points to be worth saving.
    #[error("pattern needs at least {min} points, got {got}")]
    TooFewPoints { got: usize, min: usize },
}

pub type Result<T> = std::result::Result<T, GestureError>;
