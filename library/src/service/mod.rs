pub mod editor_service;
pub mod save;

pub use editor_service::EditSession;
pub use save::{SaveKind, SaveRequest, SegmentStore};
