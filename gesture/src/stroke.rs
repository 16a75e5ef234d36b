//! Ephemeral stroke capture.

use serde::{Deserialize, Serialize};

/// A 2D point in raw capture coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Records a single freehand stroke from discrete input events.
///
/// Input arrives as stroke-start, stroke-move xN, stroke-end. Moves outside
/// an active stroke are ignored, so a stray move after pointer-up (or before
/// pointer-down) cannot extend the captured sequence. Points live only in
/// memory until explicitly promoted to a template.
#[derive(Debug, Default)]
pub struct StrokeRecorder {
    points: Vec<Point>,
    active: bool,
}

impl StrokeRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new stroke at `point`, discarding any previous capture.
    pub fn begin(&mut self, point: Point) {
        self.points.clear();
        self.points.push(point);
        self.active = true;
    }

    /// Append a point to the active stroke. No-op if no stroke is active.
    pub fn extend(&mut self, point: Point) {
        if self.active {
            self.points.push(point);
        }
    }

    /// End the active stroke, leaving the captured points readable.
    pub fn finish(&mut self) {
        self.active = false;
    }

    /// Discard the capture entirely.
    pub fn clear(&mut self) {
        self.points.clear();
        self.active = false;
    }

    /// Whether a stroke is currently being captured.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// The captured points, in draw order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extend_outside_stroke_is_noop() {
        let mut rec = StrokeRecorder::new();
        rec.extend(Point::new(1.0, 1.0));
        assert!(rec.points().is_empty());

        rec.begin(Point::new(0.0, 0.0));
        rec.extend(Point::new(1.0, 1.0));
        rec.finish();
        rec.extend(Point::new(2.0, 2.0));

        assert_eq!(rec.points().len(), 2);
    }

    #[test]
    fn test_begin_discards_previous_stroke() {
        let mut rec = StrokeRecorder::new();
        rec.begin(Point::new(0.0, 0.0));
        rec.extend(Point::new(1.0, 0.0));
        rec.finish();

        rec.begin(Point::new(5.0, 5.0));
        assert_eq!(rec.points(), &[Point::new(5.0, 5.0)]);
    }
}
