pub mod error;
pub mod input;
pub mod model;
pub mod playback;
pub mod service;
pub mod util;

pub use error::EditorError;
pub use input::{InputAdapter, InputEvent};
pub use model::{ClipSegment, HistoryManager, HistorySnapshot, TimelineModel, TrimRange};
pub use playback::{MediaControl, PlaybackBoundaryController, TokioScheduler};
pub use service::{EditSession, SaveKind, SaveRequest, SegmentStore};
