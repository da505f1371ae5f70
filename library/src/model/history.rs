use serde::{Deserialize, Serialize};

use crate::error::EditorError;
use crate::model::segment::{ClipSegment, TrimRange};

/// Immutable capture of the model at one edit step.
#[derive(Serialize, Deserialize, Clone, PartialEq, Debug)]
pub struct HistorySnapshot {
    pub segments: Vec<ClipSegment>,
    pub trim: TrimRange,
}

/// Snapshot stack with a cursor.
///
/// The entry at `position` is always the state the model currently shows.
/// Pushing after an undo truncates the abandoned redo branch first, so the
/// stack is linear at all times.
pub struct HistoryManager {
    snapshots: Vec<HistorySnapshot>,
    position: usize,
}

impl HistoryManager {
    /// Seed the history with the session's initial state.
    pub fn new(initial: HistorySnapshot) -> Self {
        Self {
            snapshots: vec![initial],
            position: 0,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.position > 0
    }

    pub fn can_redo(&self) -> bool {
        self.position + 1 < self.snapshots.len()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current(&self) -> &HistorySnapshot {
        &self.snapshots[self.position]
    }

    /// Record a new edit step, discarding any redo entries past the cursor.
    pub fn push(&mut self, snapshot: HistorySnapshot) {
        self.snapshots.truncate(self.position + 1);
        self.snapshots.push(snapshot);
        self.position += 1;
    }

    /// Step the cursor back and return the snapshot to restore.
    pub fn undo(&mut self) -> Result<&HistorySnapshot, EditorError> {
        if !self.can_undo() {
            return Err(EditorError::NothingToUndo);
        }
        self.position -= 1;
        Ok(&self.snapshots[self.position])
    }

    /// Step the cursor forward and return the snapshot to restore.
    pub fn redo(&mut self) -> Result<&HistorySnapshot, EditorError> {
        if !self.can_redo() {
            return Err(EditorError::NothingToRedo);
        }
        self.position += 1;
        Ok(&self.snapshots[self.position])
    }
}
