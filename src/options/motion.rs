use serde::{Deserialize, Serialize};

/// Choreography and settle tuning.
///
/// Every constant the choreographer draws against lives here. The
/// defaults are visual tuning carried over from the shipped gallery and
/// are not individually meaningful; change them together, in front of a
/// screen.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MotionOptions {
    /// Minimum ambient move duration in milliseconds.
    pub drift_duration_min_ms: f32,
    /// Maximum ambient move duration in milliseconds.
    pub drift_duration_max_ms: f32,
    /// Probability that an ambient move frames its panel head-on.
    pub fit_probability: f32,
    /// Probability that an ambient move frames the whole wall. Never
    /// applied twice in a row.
    pub overview_probability: f32,
    /// Horizontal position jitter for ambient moves (± units).
    pub drift_spread_x: f32,
    /// Vertical position jitter for ambient moves (± units).
    pub drift_spread_y: f32,
    /// Minimum camera stand-off from the anchor panel.
    pub drift_z_base: f32,
    /// Extra stand-off span for near ambient moves.
    pub drift_z_near: f32,
    /// Extra stand-off span for far ambient moves.
    pub drift_z_far: f32,
    /// Probability of drawing the far stand-off span.
    pub drift_z_far_probability: f32,
    /// Look-at jitter in x/y for non-fit moves (± units).
    pub look_jitter_xy: f32,
    /// Look-at jitter in z for non-fit moves (± units).
    pub look_jitter_z: f32,
    /// Camera stand-off used by head-on fit moves.
    pub fit_z: f32,
    /// Viewport width below which drift jitter is scaled down.
    pub narrow_viewport_px: f32,
    /// Jitter scale applied on narrow viewports.
    pub narrow_drift_scale: f32,
    /// Initial damping of the camera position integrator.
    pub position_damping: f32,
    /// Initial damping of the look-at integrator.
    pub look_damping: f32,
    /// Damping both integrators ramp to during a focused move.
    pub settle_damping_focus: f32,
    /// Damping both integrators ramp to during ambient drift.
    pub settle_damping_drift: f32,
    /// Velocity magnitude (units/ms) below which motion counts as
    /// settled.
    pub settle_threshold: f32,
    /// Average speed (units/ms) above which a move's duration is
    /// extended.
    pub speed_limit: f32,
    /// Milliseconds the hover affordance stays visible after the last
    /// pointer event.
    pub hover_hide_ms: u64,
}

impl Default for MotionOptions {
    fn default() -> Self {
        Self {
            drift_duration_min_ms: 6000.0,
            drift_duration_max_ms: 11_000.0,
            fit_probability: 0.2,
            overview_probability: 0.05,
            drift_spread_x: 5000.0,
            drift_spread_y: 1500.0,
            drift_z_base: 3000.0,
            drift_z_near: 3000.0,
            drift_z_far: 10_000.0,
            drift_z_far_probability: 0.4,
            look_jitter_xy: 500.0,
            look_jitter_z: 1000.0,
            fit_z: 3000.0,
            narrow_viewport_px: 500.0,
            narrow_drift_scale: 0.3,
            position_damping: 0.01,
            look_damping: 0.006,
            settle_damping_focus: 0.1,
            settle_damping_drift: 0.01,
            settle_threshold: 1e-4,
            speed_limit: 1.0,
            hover_hide_ms: 8000,
        }
    }
}
