use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::util::time::TIME_EPSILON;

/// A kept (playable) region of the source media, in seconds.
///
/// Segments are never re-encoded; they are pure timestamp pairs submitted to
/// the backend at save time. Identity survives splitting: the left half of a
/// split keeps the original id, the right half gets a fresh one.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct ClipSegment {
    pub id: Uuid,
    pub start_time: f64,
    pub end_time: f64,
}

impl ClipSegment {
    pub fn new(start_time: f64, end_time: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            start_time,
            end_time,
        }
    }

    /// Containment is half-open: the start boundary belongs to the segment,
    /// the end boundary does not.
    pub fn contains(&self, time: f64) -> bool {
        self.start_time <= time && time < self.end_time
    }

    pub fn span(&self) -> f64 {
        self.end_time - self.start_time
    }

    /// Intersection with `[start, end]`, keeping the segment id.
    /// Returns `None` when the overlap would be empty.
    pub fn clipped_to(&self, start: f64, end: f64) -> Option<ClipSegment> {
        let clipped_start = self.start_time.max(start);
        let clipped_end = self.end_time.min(end);
        if clipped_end - clipped_start < TIME_EPSILON {
            return None;
        }
        Some(ClipSegment {
            id: self.id,
            start_time: clipped_start,
            end_time: clipped_end,
        })
    }
}

/// Outer bounds applied on top of the segment list.
///
/// Trimming masks rather than deletes: segments outside the range stay in the
/// model and merely drop out of [`playable_segments`], so narrowing and then
/// re-widening the range loses no split work.
///
/// [`playable_segments`]: crate::model::TimelineModel::playable_segments
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Debug)]
pub struct TrimRange {
    pub start: f64,
    pub end: f64,
}

impl TrimRange {
    pub fn full(duration: f64) -> Self {
        Self {
            start: 0.0,
            end: duration,
        }
    }

    pub fn contains(&self, time: f64) -> bool {
        self.start <= time && time <= self.end
    }

    pub fn span(&self) -> f64 {
        self.end - self.start
    }
}
