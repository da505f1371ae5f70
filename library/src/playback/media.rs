use std::sync::Arc;

use crate::error::EditorError;

/// Callback invoked with the current position on every time-progress event.
pub type ProgressListener = Arc<dyn Fn(f64) + Send + Sync>;

/// Handle returned by [`MediaControl::subscribe_progress`], used to detach
/// the listener again.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct ListenerId(pub u64);

/// The narrow contract to the host's media element.
///
/// This is everything the editor core is allowed to touch: position, duration
/// and transport control. Implementations wrap whatever the host environment
/// provides (a browser `<video>`, a native pipeline, or a test fake); the
/// controller never sees the concrete element type.
///
/// Position reads and writes are in seconds. `set_position` is best-effort:
/// the underlying decoder may land nearby rather than exactly on the
/// requested time, and may apply the seek asynchronously. The playback
/// controller compensates for both (see [`PlaybackBoundaryController`]).
///
/// [`PlaybackBoundaryController`]: crate::playback::PlaybackBoundaryController
pub trait MediaControl: Send + Sync {
    fn position(&self) -> f64;
    fn set_position(&self, seconds: f64);
    fn duration(&self) -> f64;

    /// Start playback. Maps the host's play promise: a rejection (autoplay
    /// policy, decode error) surfaces as `Err` and playback does not start.
    fn play(&self) -> Result<(), EditorError>;
    fn pause(&self);

    /// Register a listener for time-progress events. Events fire at the
    /// element's native cadence, typically coarse and irregular.
    fn subscribe_progress(&self, listener: ProgressListener) -> ListenerId;
    fn unsubscribe_progress(&self, id: ListenerId);
}
