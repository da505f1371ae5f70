use ordered_float::OrderedFloat;

use crate::error::EditorError;
use crate::model::history::HistorySnapshot;
use crate::model::segment::{ClipSegment, TrimRange};
use crate::util::time::{TIME_EPSILON, round_time};

/// The authoritative editing state for one media stream: an ordered,
/// non-overlapping list of kept segments plus the outer trim range.
///
/// All mutations are synchronous and deterministic. The model itself records
/// no history; callers (see [`EditSession`]) snapshot after each mutation.
///
/// [`EditSession`]: crate::service::EditSession
#[derive(Clone, PartialEq, Debug)]
pub struct TimelineModel {
    duration: f64,
    segments: Vec<ClipSegment>,
    trim: TrimRange,
}

impl TimelineModel {
    /// Create a model spanning the whole media as a single segment.
    pub fn new(duration: f64) -> Result<Self, EditorError> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(EditorError::InvalidDuration(duration));
        }
        Ok(Self {
            duration,
            segments: vec![ClipSegment::new(0.0, duration)],
            trim: TrimRange::full(duration),
        })
    }

    /// Rebuild a model from a previously saved edit list. The segments must
    /// fit inside `[0, duration]` and be pairwise non-overlapping; gaps
    /// between them are fine.
    pub fn from_segments(
        duration: f64,
        mut segments: Vec<ClipSegment>,
    ) -> Result<Self, EditorError> {
        if !duration.is_finite() || duration <= 0.0 {
            return Err(EditorError::InvalidDuration(duration));
        }
        if segments.is_empty() {
            return Err(EditorError::InvalidSegmentList("no segments".into()));
        }
        segments.sort_by_key(|s| OrderedFloat(s.start_time));
        for s in &segments {
            if s.start_time < 0.0 || s.end_time > duration || s.span() < TIME_EPSILON {
                return Err(EditorError::InvalidSegmentList(format!(
                    "segment [{}, {}) outside [0, {duration}] or empty",
                    s.start_time, s.end_time
                )));
            }
        }
        if let Some(pair) = segments.windows(2).find(|w| w[1].start_time < w[0].end_time) {
            return Err(EditorError::InvalidSegmentList(format!(
                "segments [{}, {}) and [{}, {}) overlap",
                pair[0].start_time, pair[0].end_time, pair[1].start_time, pair[1].end_time
            )));
        }
        Ok(Self {
            duration,
            segments,
            trim: TrimRange::full(duration),
        })
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn segments(&self) -> &[ClipSegment] {
        &self.segments
    }

    pub fn trim(&self) -> TrimRange {
        self.trim
    }

    /// Divide the segment containing `at_time` into two at that point.
    ///
    /// The point must fall strictly inside a segment: gaps, points outside
    /// every segment and exact boundary hits report `NoSegmentAtPoint`; a
    /// point close enough to a boundary that one half would be empty reports
    /// `InvalidSplitPoint`. Both are no-ops.
    pub fn split(&mut self, at_time: f64) -> Result<(), EditorError> {
        let at_time = round_time(at_time);
        let index = self
            .segments
            .iter()
            .position(|s| s.start_time < at_time && at_time < s.end_time);
        let Some(index) = index else {
            log::debug!("split at {at_time}s ignored: no segment under point");
            return Err(EditorError::NoSegmentAtPoint(at_time));
        };

        let segment = &self.segments[index];
        if at_time - segment.start_time < TIME_EPSILON
            || segment.end_time - at_time < TIME_EPSILON
        {
            return Err(EditorError::InvalidSplitPoint(at_time));
        }

        let right = ClipSegment::new(at_time, segment.end_time);
        self.segments[index].end_time = at_time;
        self.segments.insert(index + 1, right);
        self.sort_segments();
        log::debug!(
            "split at {at_time}s, timeline now has {} segments",
            self.segments.len()
        );
        Ok(())
    }

    /// Discard all splits and trim edits, back to one full-length segment.
    pub fn reset(&mut self) {
        self.segments = vec![ClipSegment::new(0.0, self.duration)];
        self.trim = TrimRange::full(self.duration);
    }

    /// Move the trim start, clamped to `[0, duration]` and to stay below the
    /// trim end. Returns the applied value; out-of-range input is never an
    /// error.
    pub fn set_trim_start(&mut self, t: f64) -> f64 {
        let mut t = t.clamp(0.0, self.duration);
        if t >= self.trim.end - TIME_EPSILON {
            t = (self.trim.end - TIME_EPSILON).max(0.0);
        }
        self.trim.start = t;
        t
    }

    /// Move the trim end, clamped to `[0, duration]` and to stay above the
    /// trim start. Returns the applied value.
    pub fn set_trim_end(&mut self, t: f64) -> f64 {
        let mut t = t.clamp(0.0, self.duration);
        if t <= self.trim.start + TIME_EPSILON {
            t = (self.trim.start + TIME_EPSILON).min(self.duration);
        }
        self.trim.end = t;
        t
    }

    /// The segment owning `time` (start inclusive, end exclusive), ignoring
    /// the trim range.
    pub fn segment_containing(&self, time: f64) -> Option<&ClipSegment> {
        self.segments.iter().find(|s| s.contains(time))
    }

    /// The first segment starting strictly after `time`.
    pub fn next_segment_after(&self, time: f64) -> Option<&ClipSegment> {
        self.segments.iter().find(|s| s.start_time > time)
    }

    /// The segments as playback and export see them: intersected with the
    /// trim range, empty intersections dropped, ids preserved.
    pub fn playable_segments(&self) -> Vec<ClipSegment> {
        self.segments
            .iter()
            .filter_map(|s| s.clipped_to(self.trim.start, self.trim.end))
            .collect()
    }

    pub fn snapshot(&self) -> HistorySnapshot {
        HistorySnapshot {
            segments: self.segments.clone(),
            trim: self.trim,
        }
    }

    pub fn restore(&mut self, snapshot: &HistorySnapshot) {
        self.segments = snapshot.segments.clone();
        self.trim = snapshot.trim;
        self.sort_segments();
    }

    fn sort_segments(&mut self) {
        self.segments.sort_by_key(|s| OrderedFloat(s.start_time));
    }
}
