//! Timestamp helpers shared by the model and the playback controller.
//!
//! Media-element clocks report positions with floating-point noise well below
//! anything a decoder can actually seek to. All comparisons in this crate go
//! through [`round_time`] so that "equal" means equal at microsecond
//! resolution.

/// Smallest meaningful distance between two timeline points, in seconds.
pub const TIME_EPSILON: f64 = 1e-6;

/// Round a timestamp to 6 decimal places (microseconds).
pub fn round_time(seconds: f64) -> f64 {
    (seconds * 1_000_000.0).round() / 1_000_000.0
}
