use std::sync::Arc;

use crate::error::EditorError;
use crate::model::{HistoryManager, TimelineModel};
use crate::playback::{CorrectionScheduler, MediaControl, PlaybackBoundaryController};
use crate::service::save::{SaveKind, SaveRequest, SegmentStore};

/// One editing session over one media stream.
///
/// Wires the timeline model, its history and the playback controller
/// together, and owns the mutate-then-snapshot ordering: every successful
/// model mutation pushes exactly one history entry. The session lives from
/// the moment the media duration is known until save or navigation discards
/// it; dropping it tears down the playback watch.
pub struct EditSession {
    timeline: TimelineModel,
    history: HistoryManager,
    controller: Arc<PlaybackBoundaryController>,
}

impl EditSession {
    pub fn new(
        media: Arc<dyn MediaControl>,
        scheduler: Arc<dyn CorrectionScheduler>,
    ) -> Result<Self, EditorError> {
        let timeline = TimelineModel::new(media.duration())?;
        let history = HistoryManager::new(timeline.snapshot());
        let controller = Arc::new(PlaybackBoundaryController::new(media, scheduler));
        Ok(Self {
            timeline,
            history,
            controller,
        })
    }

    pub fn timeline(&self) -> &TimelineModel {
        &self.timeline
    }

    pub fn history(&self) -> &HistoryManager {
        &self.history
    }

    pub fn controller(&self) -> &Arc<PlaybackBoundaryController> {
        &self.controller
    }

    /// Split the segment under `at_time`. Recoverable model statuses
    /// (`NoSegmentAtPoint`, `InvalidSplitPoint`) pass through without
    /// recording a history entry.
    pub fn split_at(&mut self, at_time: f64) -> Result<(), EditorError> {
        self.timeline.split(at_time)?;
        self.history.push(self.timeline.snapshot());
        Ok(())
    }

    /// Discard all edits, back to one full-length segment.
    pub fn reset(&mut self) {
        self.timeline.reset();
        self.history.push(self.timeline.snapshot());
    }

    /// Returns the trim start actually applied after clamping.
    pub fn set_trim_start(&mut self, t: f64) -> f64 {
        let applied = self.timeline.set_trim_start(t);
        self.history.push(self.timeline.snapshot());
        applied
    }

    /// Returns the trim end actually applied after clamping.
    pub fn set_trim_end(&mut self, t: f64) -> f64 {
        let applied = self.timeline.set_trim_end(t);
        self.history.push(self.timeline.snapshot());
        applied
    }

    pub fn undo(&mut self) -> Result<(), EditorError> {
        let snapshot = self.history.undo()?.clone();
        self.timeline.restore(&snapshot);
        Ok(())
    }

    pub fn redo(&mut self) -> Result<(), EditorError> {
        let snapshot = self.history.redo()?.clone();
        self.timeline.restore(&snapshot);
        Ok(())
    }

    pub fn save(&self, store: &dyn SegmentStore) -> Result<(), EditorError> {
        self.submit(store, SaveKind::Replace)
    }

    pub fn save_as_copy(&self, store: &dyn SegmentStore) -> Result<(), EditorError> {
        self.submit(store, SaveKind::Copy)
    }

    pub fn save_segments_only(&self, store: &dyn SegmentStore) -> Result<(), EditorError> {
        self.submit(store, SaveKind::SegmentsOnly)
    }

    fn submit(&self, store: &dyn SegmentStore, kind: SaveKind) -> Result<(), EditorError> {
        let request = SaveRequest {
            kind,
            segments: self.timeline.playable_segments(),
            trim: self.timeline.trim(),
        };
        log::debug!(
            "submitting {} segments for save ({kind:?})",
            request.segments.len()
        );
        store.save_segments(&request)
    }
}
