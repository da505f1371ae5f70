use std::sync::Arc;

use crate::error::EditorError;
use crate::model::TimelineModel;
use crate::playback::{MediaControl, PlaybackBoundaryController};

/// Default arrow-key seek step, in seconds.
pub const DEFAULT_SEEK_STEP: f64 = 10.0;

/// Host-level input already reduced to the events the editor cares about.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum InputEvent {
    ArrowLeft,
    ArrowRight,
    Space,
    /// Click or drag on the progress bar; `fraction` is the horizontal hit
    /// position as a share of the bar width.
    ProgressClick { fraction: f64 },
}

/// Translates keyboard and seek-bar input into model/controller calls.
///
/// Play/pause always goes through the boundary controller so arming and
/// disarming stay consistent; plain seeks go to the media element directly
/// and never arm a watch on their own.
pub struct InputAdapter {
    media: Arc<dyn MediaControl>,
    controller: Arc<PlaybackBoundaryController>,
    seek_step: f64,
}

impl InputAdapter {
    pub fn new(media: Arc<dyn MediaControl>, controller: Arc<PlaybackBoundaryController>) -> Self {
        Self {
            media,
            controller,
            seek_step: DEFAULT_SEEK_STEP,
        }
    }

    pub fn with_seek_step(mut self, seconds: f64) -> Self {
        self.seek_step = seconds;
        self
    }

    pub fn seek_step(&self) -> f64 {
        self.seek_step
    }

    /// Dispatch one event. Keyboard events are dropped while a text entry
    /// has focus so typing never seeks or toggles playback.
    pub fn handle(
        &self,
        timeline: &TimelineModel,
        event: InputEvent,
        text_entry_focused: bool,
    ) -> Result<(), EditorError> {
        match event {
            InputEvent::ArrowLeft | InputEvent::ArrowRight | InputEvent::Space
                if text_entry_focused =>
            {
                Ok(())
            }
            InputEvent::ArrowLeft => {
                self.seek_by(-self.seek_step);
                Ok(())
            }
            InputEvent::ArrowRight => {
                self.seek_by(self.seek_step);
                Ok(())
            }
            InputEvent::Space => self.controller.toggle(timeline).map(|_| ()),
            InputEvent::ProgressClick { fraction } => {
                let target = fraction.clamp(0.0, 1.0) * self.media.duration();
                self.media.set_position(target);
                Ok(())
            }
        }
    }

    fn seek_by(&self, delta: f64) {
        let target = (self.media.position() + delta).clamp(0.0, self.media.duration());
        self.media.set_position(target);
    }
}
