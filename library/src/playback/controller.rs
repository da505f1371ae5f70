use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::error::EditorError;
use crate::model::TimelineModel;
use crate::playback::media::MediaControl;
use crate::playback::scheduler::{CorrectionScheduler, TaskId};
use crate::util::time::round_time;

/// Delays for the corrective re-seek ladder, relative to the initial stop.
///
/// A single position assignment is unreliable: the decoder may apply the seek
/// late or land short, so the same target is re-checked and re-applied on an
/// increasing backoff instead of trusting the first write.
const CORRECTION_DELAYS_MS: [u64; 4] = [5, 10, 20, 50];

/// Residual drift below this is accepted without another corrective seek.
const SEEK_TOLERANCE: f64 = 0.005;

struct WatchState {
    armed: bool,
    stop_target: f64,
    listener: Option<crate::playback::media::ListenerId>,
    pending: Vec<TaskId>,
}

/// Enforces segment-aware playback stops against an imprecise media clock.
///
/// The controller is a two-state machine, Idle and Armed. A play request
/// computes where playback must stop next from the current timeline, arms a
/// progress watch, and starts the media element. While armed the controller
/// is the only writer to the media element's transport. Once the boundary is
/// reached it pauses, re-seeks to the exact target with a bounded retry
/// ladder, and returns to Idle.
///
/// All state is per-instance; independent editor sessions get independent
/// controllers, and dropping one cancels its watch and any pending
/// corrections.
pub struct PlaybackBoundaryController {
    media: Arc<dyn MediaControl>,
    scheduler: Arc<dyn CorrectionScheduler>,
    watch: Arc<Mutex<WatchState>>,
}

impl PlaybackBoundaryController {
    pub fn new(media: Arc<dyn MediaControl>, scheduler: Arc<dyn CorrectionScheduler>) -> Self {
        Self {
            media,
            scheduler,
            watch: Arc::new(Mutex::new(WatchState {
                armed: false,
                stop_target: 0.0,
                listener: None,
                pending: Vec::new(),
            })),
        }
    }

    pub fn is_armed(&self) -> bool {
        self.watch.lock().expect("watch lock poisoned").armed
    }

    /// The stop target of the active watch, if armed.
    pub fn stop_target(&self) -> Option<f64> {
        let watch = self.watch.lock().expect("watch lock poisoned");
        watch.armed.then_some(watch.stop_target)
    }

    /// Arm a boundary watch and start playback. Returns the computed stop
    /// target.
    ///
    /// The stop target is derived from the trim-masked segment view: inside a
    /// segment (start inclusive, end exclusive) it is that segment's end; in
    /// a gap, the next segment's start; past the last segment, the media
    /// duration. A rejected play request is logged, leaves the controller
    /// Idle and reports `PlayRejected`; `play` itself is never retried.
    pub fn request_play(&self, timeline: &TimelineModel) -> Result<f64, EditorError> {
        self.disarm();

        let position = round_time(self.media.position());
        let stop_target = Self::stop_target_for(timeline, position, self.media.duration());

        {
            let mut watch = self.watch.lock().expect("watch lock poisoned");
            watch.armed = true;
            watch.stop_target = stop_target;
        }
        let listener_id = self.media.subscribe_progress(self.boundary_tick());
        self.watch.lock().expect("watch lock poisoned").listener = Some(listener_id);

        if let Err(err) = self.media.play() {
            log::warn!("play request rejected, staying idle: {err}");
            self.disarm();
            return Err(err);
        }
        log::debug!("armed boundary watch from {position}s, stop target {stop_target}s");
        Ok(stop_target)
    }

    /// Explicit pause from the user: tear down the watch, then pause.
    pub fn request_pause(&self) {
        self.disarm();
        self.media.pause();
    }

    /// Space-bar entry point: pause when armed, otherwise play. Returns the
    /// armed stop target when this toggled into playback.
    pub fn toggle(&self, timeline: &TimelineModel) -> Result<Option<f64>, EditorError> {
        if self.is_armed() {
            self.request_pause();
            Ok(None)
        } else {
            self.request_play(timeline).map(Some)
        }
    }

    /// Remove the active progress listener and cancel every pending
    /// corrective seek. Idempotent; always leaves the controller Idle.
    pub fn disarm(&self) {
        let (listener, pending) = {
            let mut watch = self.watch.lock().expect("watch lock poisoned");
            watch.armed = false;
            (watch.listener.take(), std::mem::take(&mut watch.pending))
        };
        if let Some(id) = listener {
            self.media.unsubscribe_progress(id);
        }
        for id in pending {
            self.scheduler.cancel(id);
        }
    }

    fn stop_target_for(timeline: &TimelineModel, position: f64, duration: f64) -> f64 {
        let playable = timeline.playable_segments();
        if let Some(segment) = playable.iter().find(|s| s.contains(position)) {
            return segment.end_time;
        }
        playable
            .iter()
            .find(|s| s.start_time > position)
            .map(|s| s.start_time)
            .unwrap_or(duration)
    }

    /// Build the progress listener for one armed watch.
    fn boundary_tick(&self) -> crate::playback::media::ProgressListener {
        let media = Arc::clone(&self.media);
        let scheduler = Arc::clone(&self.scheduler);
        let watch = Arc::clone(&self.watch);

        Arc::new(move |raw_position: f64| {
            let (target, listener) = {
                let mut state = watch.lock().expect("watch lock poisoned");
                if !state.armed {
                    return;
                }
                let remaining = round_time(state.stop_target - round_time(raw_position));
                if remaining > 0.0 {
                    return;
                }
                state.armed = false;
                (state.stop_target, state.listener.take())
            };

            log::debug!("boundary reached at {raw_position}s, stopping at {target}s");
            media.pause();
            media.set_position(target);

            let mut scheduled = Vec::with_capacity(CORRECTION_DELAYS_MS.len());
            for (attempt, delay_ms) in CORRECTION_DELAYS_MS.iter().enumerate() {
                let media = Arc::clone(&media);
                let final_attempt = attempt + 1 == CORRECTION_DELAYS_MS.len();
                scheduled.push(scheduler.schedule(
                    Duration::from_millis(*delay_ms),
                    Box::new(move || {
                        // Re-read at fire time; the earlier seek may have
                        // stuck by now.
                        let actual = round_time(media.position());
                        let drift = (actual - target).abs();
                        if drift <= SEEK_TOLERANCE {
                            return;
                        }
                        media.set_position(target);
                        if final_attempt {
                            log::warn!(
                                "corrective seek still {drift}s off target {target}s \
                                 after final retry, accepting drift"
                            );
                        }
                    }),
                ));
            }
            watch
                .lock()
                .expect("watch lock poisoned")
                .pending
                .extend(scheduled);

            if let Some(id) = listener {
                media.unsubscribe_progress(id);
            }
        })
    }
}

impl Drop for PlaybackBoundaryController {
    fn drop(&mut self) {
        self.disarm();
    }
}
