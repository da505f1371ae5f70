pub mod controller;
pub mod media;
pub mod scheduler;

pub use controller::PlaybackBoundaryController;
pub use media::{ListenerId, MediaControl, ProgressListener};
pub use scheduler::{CorrectionScheduler, CorrectionTask, TaskId, TokioScheduler};
