//! Pure gesture comparison.
//!
//! Comparison is invariant to stroke position and overall size (both
//! sequences are normalized into a unit box) but not to aspect-ratio
//! distortion, rotation, or point density. Two sequences are compared
//! index-by-index, so they only ever match when they have the exact same
//! point count. That equal-length precondition means the same shape drawn
//! at a different speed or sampling rate will not match; resampling both
//! sides to a fixed count would lift the limitation, and is intentionally
//! not done here to keep the recognizer's observable behavior unchanged.

use tracing::debug;

use crate::stroke::Point;
use crate::templates::GestureTemplate;

/// Mean normalized distance below which two sequences match. Strict:
/// a mean distance exactly at the tolerance does not match.
pub const MATCH_TOLERANCE: f64 = 0.1;

/// Minimum points a stroke needs before it can be saved or submitted.
pub const MIN_POINTS: usize = 10;

/// Normalize a point sequence into the unit box.
///
/// Maps every point by the sequence's axis-aligned bounding box:
/// `((x - min_x) / scale, (y - min_y) / scale)` with
/// `scale = max(width, height)`. Returns `None` for the degenerate case
/// `scale == 0` (a single point, or a stroke with zero extent on both
/// axes), which callers treat as a non-match.
pub fn normalize(points: &[Point]) -> Option<Vec<Point>> {
    let first = points.first()?;
    let mut min_x = first.x;
    let mut max_x = first.x;
    let mut min_y = first.y;
    let mut max_y = first.y;
    for p in points {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }

    let scale = (max_x - min_x).max(max_y - min_y);
    if scale == 0.0 {
        return None;
    }

    Some(
        points
            .iter()
            .map(|p| Point::new((p.x - min_x) / scale, (p.y - min_y) / scale))
            .collect(),
    )
}

/// Whether a candidate stroke matches a template stroke.
///
/// Sequences of differing length are non-matching without any distance
/// computation. Otherwise both are normalized and the mean Euclidean
/// distance between same-index pairs is compared against
/// [`MATCH_TOLERANCE`].
pub fn matches(candidate: &[Point], template: &[Point]) -> bool {
    if candidate.len() != template.len() {
        return false;
    }

    let (Some(a), Some(b)) = (normalize(candidate), normalize(template)) else {
        return false;
    };

    let total: f64 = a.iter().zip(&b).map(|(p, q)| p.distance(q)).sum();
    let mean = total / a.len() as f64;
    mean < MATCH_TOLERANCE
}

/// Find the first saved template the candidate matches.
///
/// Linear scan in stored order, first match wins; no ranking by best
/// match. Returns `None` when the candidate is shorter than
/// [`MIN_POINTS`] or nothing matches.
pub fn recognize<'a>(
    candidate: &[Point],
    templates: &'a [GestureTemplate],
) -> Option<&'a GestureTemplate> {
    if candidate.len() < MIN_POINTS {
        debug!(points = candidate.len(), "Stroke too short to recognize");
        return None;
    }

    templates.iter().find(|t| matches(candidate, &t.points))
}
