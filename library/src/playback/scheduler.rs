use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// A deferred corrective action, run once after its delay elapses.
pub type CorrectionTask = Box<dyn FnOnce() + Send>;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TaskId(pub u64);

/// Deferred-task service for the corrective-seek retry ladder.
///
/// Every scheduled task is individually cancellable so that teardown and
/// re-arming can deterministically drop pending corrections instead of
/// letting stale timers fire into a new playback session.
pub trait CorrectionScheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: CorrectionTask) -> TaskId;

    /// Cancel a pending task. Cancelling a task that already ran (or an
    /// unknown id) is a no-op.
    fn cancel(&self, id: TaskId);
}

/// Production scheduler backed by the tokio timer wheel.
pub struct TokioScheduler {
    handle: Handle,
    tasks: Mutex<HashMap<TaskId, JoinHandle<()>>>,
    next_id: AtomicU64,
}

impl TokioScheduler {
    /// Bind to the current tokio runtime. Panics outside a runtime context,
    /// same as `Handle::current`.
    pub fn new() -> Self {
        Self::with_handle(Handle::current())
    }

    pub fn with_handle(handle: Handle) -> Self {
        Self {
            handle,
            tasks: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(0),
        }
    }
}

impl Default for TokioScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl CorrectionScheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, task: CorrectionTask) -> TaskId {
        let id = TaskId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let join = self.handle.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
        let mut tasks = self.tasks.lock().expect("scheduler lock poisoned");
        tasks.retain(|_, j| !j.is_finished());
        tasks.insert(id, join);
        id
    }

    fn cancel(&self, id: TaskId) {
        if let Some(join) = self.tasks.lock().expect("scheduler lock poisoned").remove(&id) {
            join.abort();
        }
    }
}

impl Drop for TokioScheduler {
    fn drop(&mut self) {
        for (_, join) in self.tasks.lock().expect("scheduler lock poisoned").drain() {
            join.abort();
        }
    }
}
