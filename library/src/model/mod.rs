pub mod history;
pub mod segment;
pub mod timeline;

pub use history::{HistoryManager, HistorySnapshot};
pub use segment::{ClipSegment, TrimRange};
pub use timeline::TimelineModel;
