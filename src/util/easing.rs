//! Easing curves for camera move interpolation.
//!
//! The choreographer selects curves by name; the shapes here match the
//! conventional Quint/Expo families. Evaluation is branch-light and
//! allocation-free.

/// Named easing curve variants selected by the choreographer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ease {
    /// Linear interpolation (no easing).
    Linear,
    /// Quintic ease-in-out: sharp acceleration and deceleration. Used for
    /// keyboard-triggered moves.
    QuintInOut,
    /// Exponential ease-in-out: a softer arrival. Used for pointer and
    /// ambient drift moves.
    ExpoInOut,
    /// Exponential ease-in: slow departure, fast finish. Used for damping
    /// ramps.
    ExpoIn,
}

impl Ease {
    /// Evaluate the curve at time `t`.
    ///
    /// Input `t` is clamped to [0.0, 1.0]; the result is also in
    /// [0.0, 1.0] with `f(0) = 0` and `f(1) = 1`.
    #[inline]
    #[must_use]
    pub fn evaluate(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::QuintInOut => {
                if t < 0.5 {
                    16.0 * t * t * t * t * t
                } else {
                    let u = -2.0 * t + 2.0;
                    1.0 - u * u * u * u * u / 2.0
                }
            }
            Self::ExpoInOut => {
                if t == 0.0 || t == 1.0 {
                    t
                } else if t < 0.5 {
                    2.0_f32.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2.0_f32.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
            Self::ExpoIn => {
                if t == 0.0 {
                    0.0
                } else {
                    2.0_f32.powf(10.0 * t - 10.0)
                }
            }
        }
    }
}
