//! Input model: the freehand drawing gesture state machine.
//!
//! This module translates raw pointer samples into segment drafts for the
//! drawing log. It holds no mirror or session state, so a host can drive it
//! headlessly and tests can exercise every transition without a canvas.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::consts::DEFAULT_STROKE_COLOR;
use crate::model::Point;

/// A not-yet-persisted line stroke between two consecutive pointer samples.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentDraft {
    /// Stroke color latched at pointer-down.
    pub color: String,
    /// Position of the previous pointer sample.
    pub start: Point,
    /// Position of the current pointer sample.
    pub end: Point,
}

/// Persistent brush state visible to the host UI (the color picker).
#[derive(Debug, Clone)]
pub struct Brush {
    /// Color applied to the next gesture, as a hex color string.
    pub color: String,
}

impl Default for Brush {
    fn default() -> Self {
        Self { color: DEFAULT_STROKE_COLOR.to_owned() }
    }
}

/// State of a single freehand draw gesture.
///
/// `Idle → Drawing` on pointer-down (latching the start point and stroke
/// color), `Drawing → Drawing` on each pointer-move (emitting one draft from
/// the previous sample to the current one), `Drawing → Idle` on pointer-up
/// or on the pointer leaving the drawable area. No draft is emitted on
/// pointer-down alone; at least two samples are required to produce one.
#[derive(Debug, Clone, Default)]
pub enum Gesture {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// A draw gesture is active.
    Drawing {
        /// Position of the previous pointer sample.
        last: Point,
        /// Stroke color latched at pointer-down.
        color: String,
    },
}

impl Gesture {
    #[must_use]
    pub fn new() -> Self {
        Self::Idle
    }

    /// Whether a draw gesture is currently active.
    #[must_use]
    pub fn is_drawing(&self) -> bool {
        matches!(self, Self::Drawing { .. })
    }

    /// Pointer-down: latch the start point and stroke color.
    pub fn press(&mut self, at: Point, color: &str) {
        *self = Self::Drawing { last: at, color: color.to_owned() };
    }

    /// Pointer-move: emit one draft from the previous sample to `to` while a
    /// gesture is active, then latch `to` as the previous sample.
    ///
    /// Returns `None` when idle; moves without a held pointer draw nothing.
    pub fn move_to(&mut self, to: Point) -> Option<SegmentDraft> {
        let Self::Drawing { last, color } = self else {
            return None;
        };
        let draft = SegmentDraft { color: color.clone(), start: *last, end: to };
        *last = to;
        Some(draft)
    }

    /// Pointer-up or pointer-leave: end the gesture.
    pub fn release(&mut self) {
        *self = Self::Idle;
    }
}
