#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use cliptrim::error::EditorError;
use cliptrim::playback::{
    CorrectionScheduler, CorrectionTask, ListenerId, MediaControl, ProgressListener, TaskId,
};
use cliptrim::service::{SaveRequest, SegmentStore};

pub fn init_logs() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// In-memory stand-in for the host media element.
///
/// The clock only moves when a test calls `advance_to`, which also fires the
/// progress listeners the way a real element's coarse timeupdate would.
/// `set_swallowed_seeks` makes the next N position assignments vanish,
/// simulating a decoder that does not honor seeks immediately.
pub struct FakeMediaElement {
    duration: f64,
    state: Mutex<FakeState>,
    listeners: Mutex<HashMap<u64, ProgressListener>>,
    next_listener: AtomicU64,
}

struct FakeState {
    position: f64,
    paused: bool,
    reject_next_play: bool,
    swallowed_seeks: u32,
    seek_requests: Vec<f64>,
}

impl FakeMediaElement {
    pub fn new(duration: f64) -> Arc<Self> {
        Arc::new(Self {
            duration,
            state: Mutex::new(FakeState {
                position: 0.0,
                paused: true,
                reject_next_play: false,
                swallowed_seeks: 0,
                seek_requests: Vec::new(),
            }),
            listeners: Mutex::new(HashMap::new()),
            next_listener: AtomicU64::new(0),
        })
    }

    /// Move the clock and fire a progress event, as one coarse tick.
    pub fn advance_to(&self, position: f64) {
        self.state.lock().unwrap().position = position;
        self.emit_progress();
    }

    pub fn emit_progress(&self) {
        let position = self.state.lock().unwrap().position;
        // Snapshot so listeners may unsubscribe mid-emit.
        let listeners: Vec<ProgressListener> =
            self.listeners.lock().unwrap().values().cloned().collect();
        for listener in listeners {
            listener(position);
        }
    }

    pub fn set_swallowed_seeks(&self, count: u32) {
        self.state.lock().unwrap().swallowed_seeks = count;
    }

    pub fn reject_next_play(&self) {
        self.state.lock().unwrap().reject_next_play = true;
    }

    pub fn is_paused(&self) -> bool {
        self.state.lock().unwrap().paused
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.lock().unwrap().len()
    }

    pub fn seek_requests(&self) -> Vec<f64> {
        self.state.lock().unwrap().seek_requests.clone()
    }
}

impl MediaControl for FakeMediaElement {
    fn position(&self) -> f64 {
        self.state.lock().unwrap().position
    }

    fn set_position(&self, seconds: f64) {
        let mut state = self.state.lock().unwrap();
        state.seek_requests.push(seconds);
        if state.swallowed_seeks > 0 {
            state.swallowed_seeks -= 1;
        } else {
            state.position = seconds;
        }
    }

    fn duration(&self) -> f64 {
        self.duration
    }

    fn play(&self) -> Result<(), EditorError> {
        let mut state = self.state.lock().unwrap();
        if state.reject_next_play {
            state.reject_next_play = false;
            return Err(EditorError::PlayRejected("autoplay blocked".into()));
        }
        state.paused = false;
        Ok(())
    }

    fn pause(&self) {
        self.state.lock().unwrap().paused = true;
    }

    fn subscribe_progress(&self, listener: ProgressListener) -> ListenerId {
        let id = self.next_listener.fetch_add(1, Ordering::Relaxed);
        self.listeners.lock().unwrap().insert(id, listener);
        ListenerId(id)
    }

    fn unsubscribe_progress(&self, id: ListenerId) {
        self.listeners.lock().unwrap().remove(&id.0);
    }
}

/// Scheduler whose clock the test drives by hand.
#[derive(Clone, Default)]
pub struct ManualScheduler {
    inner: Arc<Mutex<ManualSchedulerInner>>,
}

#[derive(Default)]
struct ManualSchedulerInner {
    next_id: u64,
    tasks: Vec<(TaskId, Duration, CorrectionTask)>,
}

impl ManualScheduler {
    pub fn pending(&self) -> usize {
        self.inner.lock().unwrap().tasks.len()
    }

    /// Run the earliest pending task. Returns false when nothing is queued.
    pub fn run_next(&self) -> bool {
        let task = {
            let mut inner = self.inner.lock().unwrap();
            if inner.tasks.is_empty() {
                return false;
            }
            let earliest = inner
                .tasks
                .iter()
                .enumerate()
                .min_by_key(|(_, (_, delay, _))| *delay)
                .map(|(i, _)| i)
                .unwrap();
            inner.tasks.remove(earliest).2
        };
        task();
        true
    }

    pub fn run_all(&self) {
        while self.run_next() {}
    }
}

impl CorrectionScheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, task: CorrectionTask) -> TaskId {
        let mut inner = self.inner.lock().unwrap();
        let id = TaskId(inner.next_id);
        inner.next_id += 1;
        inner.tasks.push((id, delay, task));
        id
    }

    fn cancel(&self, id: TaskId) {
        self.inner
            .lock()
            .unwrap()
            .tasks
            .retain(|(task_id, _, _)| *task_id != id);
    }
}

/// Persistence fake that records every submitted payload.
#[derive(Default)]
pub struct RecordingStore {
    requests: Mutex<Vec<SaveRequest>>,
}

impl RecordingStore {
    pub fn requests(&self) -> Vec<SaveRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl SegmentStore for RecordingStore {
    fn save_segments(&self, request: &SaveRequest) -> Result<(), EditorError> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(())
    }
}
