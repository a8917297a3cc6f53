//! Frame clock for hosts driving the engine tick.

use web_time::Instant;

/// Minimum delta handed out, in milliseconds. The integrators divide by
/// the delta, so a zero frame time is never reported.
const MIN_DELTA_MS: f32 = 0.01;

/// Per-frame delta provider with smoothed FPS readout.
///
/// Call [`delta_ms`](Self::delta_ms) once per display refresh and pass the
/// result to [`WallEngine::tick`](crate::engine::WallEngine::tick).
pub struct FrameClock {
    /// Last frame timestamp.
    last_frame: Instant,
    /// Smoothed FPS using exponential moving average.
    smoothed_fps: f32,
    /// Smoothing factor (lower = smoother, 0.0-1.0).
    smoothing: f32,
}

impl FrameClock {
    /// Create a clock anchored at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            smoothed_fps: 60.0,
            smoothing: 0.05,
        }
    }

    /// Milliseconds elapsed since the previous call, never zero.
    ///
    /// Also folds the instantaneous frame rate into the smoothed FPS.
    pub fn delta_ms(&mut self) -> f32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_frame);
        self.last_frame = now;

        let delta_ms = (elapsed.as_secs_f32() * 1000.0).max(MIN_DELTA_MS);
        let instant_fps = 1000.0 / delta_ms;
        self.smoothed_fps = self.smoothed_fps * (1.0 - self.smoothing)
            + instant_fps * self.smoothing;
        delta_ms
    }

    /// Get the current FPS (smoothed).
    #[must_use]
    pub fn fps(&self) -> f32 {
        self.smoothed_fps
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
