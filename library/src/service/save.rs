use serde::{Deserialize, Serialize};

use crate::error::EditorError;
use crate::model::segment::{ClipSegment, TrimRange};

/// Which save action the user picked. All three funnel through the same
/// payload shape; the backend decides what to do with the original media.
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum SaveKind {
    /// Replace the source video's edit list.
    Replace,
    /// Save the edited result as a new copy.
    Copy,
    /// Persist the segment list without touching the video entry.
    SegmentsOnly,
}

/// The payload submitted at save time: plain start/end timestamp lists, no
/// wire format of our own.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct SaveRequest {
    pub kind: SaveKind,
    pub segments: Vec<ClipSegment>,
    pub trim: TrimRange,
}

/// Backend persistence, out of scope here beyond this contract.
pub trait SegmentStore: Send + Sync {
    fn save_segments(&self, request: &SaveRequest) -> Result<(), EditorError>;
}
