//! Drawing log — append-only segment events and canvas replay.
//!
//! DESIGN
//! ======
//! Stored order is the single source of truth for replay: one stroke per
//! segment, emitted lazily in append order. Any rendering optimization must
//! preserve the emitted stroke order exactly.

use uuid::Uuid;

use crate::consts::LINE_WIDTH;
use crate::input::SegmentDraft;
use crate::model::{DrawingSegment, Point};
use crate::session::Session;
use crate::state::Mirror;
use crate::store::StoreError;

/// One draw operation produced by [`replay`].
#[derive(Debug, Clone, PartialEq)]
pub struct Stroke {
    pub from: Point,
    pub to: Point,
    /// Stroke color as a hex color string.
    pub color: String,
    /// Line width in canvas pixels.
    pub width: f64,
}

/// Append one segment drawn by the session's account.
///
/// Caller-supplied coordinates and color are trusted; only structural shape
/// is validated by the types. Assigns a fresh id, appends in arrival order,
/// and persists the full updated sequence before returning.
///
/// # Errors
///
/// Returns a storage error if the durable write failed. The segment is
/// still present in memory and [`Mirror::flush_segments`] retries the write.
pub fn append_segment(
    mirror: &mut Mirror,
    session: &Session,
    draft: SegmentDraft,
) -> Result<DrawingSegment, StoreError> {
    let segment = DrawingSegment {
        id: Uuid::new_v4(),
        user_id: session.user_id(),
        color: draft.color,
        start: draft.start,
        end: draft.end,
    };

    let created = segment.clone();
    mirror.push_segment(segment)?;
    Ok(created)
}

/// Replay stored segments as draw operations, in stored order.
///
/// The iterator is lazy and restartable: replaying onto a cleared canvas is
/// idempotent, while replaying over existing strokes double-draws. Emits one
/// stroke per segment with a fixed line width.
pub fn replay(segments: &[DrawingSegment]) -> impl Iterator<Item = Stroke> + '_ {
    segments.iter().map(|seg| Stroke {
        from: seg.start,
        to: seg.end,
        color: seg.color.clone(),
        width: LINE_WIDTH,
    })
}

#[cfg(test)]
#[path = "drawing_test.rs"]
mod tests;
