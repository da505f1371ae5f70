use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("no segment contains point {0}s")]
    NoSegmentAtPoint(f64),
    #[error("split at {0}s would produce an empty segment")]
    InvalidSplitPoint(f64),
    #[error("nothing to undo")]
    NothingToUndo,
    #[error("nothing to redo")]
    NothingToRedo,
    #[error("media duration must be finite and positive, got {0}")]
    InvalidDuration(f64),
    #[error("invalid segment list: {0}")]
    InvalidSegmentList(String),
    #[error("play request rejected: {0}")]
    PlayRejected(String),
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EditorError {
    /// Recoverable statuses are no-ops reported to the caller; everything
    /// else signals a real failure.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            EditorError::NoSegmentAtPoint(_)
                | EditorError::InvalidSplitPoint(_)
                | EditorError::NothingToUndo
                | EditorError::NothingToRedo
                | EditorError::PlayRejected(_)
        )
    }
}
