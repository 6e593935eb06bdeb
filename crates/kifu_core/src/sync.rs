//! Device-clock to video-clock projection.
//!
//! Taps are logged on the device clock; the recording runs on the video
//! clock. A per-run scalar offset relates the two. Projected times slightly
//! outside the recording are expected near the boundaries, so classification
//! against the sync window is warning-class, never fatal.

/// Project a device-clock timestamp onto the video clock.
pub fn project(t_log: f64, offset_sec: f64) -> f64 {
    t_log + offset_sec
}

/// Symmetric tolerance window around the video duration.
///
/// A projected time is in range iff `-window <= t <= duration + window`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SyncWindow {
    duration_sec: f64,
    window_sec: f64,
}

impl SyncWindow {
    pub fn new(duration_sec: f64, window_sec: f64) -> Self {
        Self {
            duration_sec,
            window_sec: window_sec.max(0.0),
        }
    }

    pub fn from_ms(duration_sec: f64, window_ms: f64) -> Self {
        Self::new(duration_sec, window_ms / 1000.0)
    }

    pub fn window_sec(&self) -> f64 {
        self.window_sec
    }

    pub fn contains(&self, t_video: f64) -> bool {
        t_video >= -self.window_sec && t_video <= self.duration_sec + self.window_sec
    }
}
