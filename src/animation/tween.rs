//! A single eased start-to-end interpolation over a fixed duration.

use glam::Vec3;
use web_time::Duration;

use crate::util::easing::Ease;

/// Linear interpolation between two values of the same type.
pub trait Lerp: Copy {
    /// Interpolate from `self` toward `end` by factor `t` in [0, 1].
    fn lerp_to(self, end: Self, t: f32) -> Self;
}

impl Lerp for f32 {
    #[inline]
    fn lerp_to(self, end: Self, t: f32) -> Self {
        self + (end - self) * t
    }
}

impl Lerp for Vec3 {
    #[inline]
    fn lerp_to(self, end: Self, t: f32) -> Self {
        self.lerp(end, t)
    }
}

/// One eased interpolation channel inside a
/// [`MoveTimeline`](super::MoveTimeline).
///
/// Sampling is pure: a tween holds no clock of its own and is driven by
/// the elapsed time of its owning timeline, offset by `start_offset`.
#[derive(Debug, Clone, Copy)]
pub struct Tween<T> {
    start: T,
    end: T,
    duration: Duration,
    ease: Ease,
    start_offset: Duration,
}

impl<T: Lerp> Tween<T> {
    /// Create a tween running from `start` to `end` over `duration`.
    #[must_use]
    pub fn new(start: T, end: T, duration: Duration, ease: Ease) -> Self {
        Self {
            start,
            end,
            duration,
            ease,
            start_offset: Duration::ZERO,
        }
    }

    /// Delay the start of this tween relative to its timeline.
    #[must_use]
    pub fn delayed(mut self, offset: Duration) -> Self {
        self.start_offset = offset;
        self
    }

    /// The value this tween finishes at.
    #[must_use]
    pub fn end(&self) -> T {
        self.end
    }

    /// Sample the tween at `elapsed` time since its timeline started.
    ///
    /// Before the start offset the start value holds; past the end the end
    /// value holds. A zero-duration tween is already at its end.
    #[must_use]
    pub fn sample(&self, elapsed: Duration) -> T {
        let Some(local) = elapsed.checked_sub(self.start_offset) else {
            return self.start;
        };
        if self.duration.is_zero() || local >= self.duration {
            return self.end;
        }
        let t = local.as_secs_f32() / self.duration.as_secs_f32();
        self.start.lerp_to(self.end, self.ease.evaluate(t))
    }

    /// Whether the tween has reached its end value at `elapsed`.
    #[must_use]
    pub fn is_done(&self, elapsed: Duration) -> bool {
        elapsed >= self.start_offset + self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_endpoints() {
        let tween = Tween::new(
            0.0_f32,
            10.0,
            Duration::from_millis(100),
            Ease::Linear,
        );
        assert_eq!(tween.sample(Duration::ZERO), 0.0);
        assert_eq!(tween.sample(Duration::from_millis(100)), 10.0);
        assert_eq!(tween.sample(Duration::from_millis(500)), 10.0);
    }

    #[test]
    fn test_sample_midpoint_linear() {
        let tween = Tween::new(
            0.0_f32,
            10.0,
            Duration::from_millis(100),
            Ease::Linear,
        );
        let mid = tween.sample(Duration::from_millis(50));
        assert!((mid - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_start_offset_holds_start_value() {
        let tween = Tween::new(
            1.0_f32,
            2.0,
            Duration::from_millis(100),
            Ease::Linear,
        )
        .delayed(Duration::from_millis(50));
        assert_eq!(tween.sample(Duration::from_millis(25)), 1.0);
        assert!(!tween.is_done(Duration::from_millis(125)));
        assert!(tween.is_done(Duration::from_millis(150)));
    }

    #[test]
    fn test_vec3_channel() {
        let tween = Tween::new(
            Vec3::ZERO,
            Vec3::new(2.0, 4.0, 6.0),
            Duration::from_millis(100),
            Ease::Linear,
        );
        let mid = tween.sample(Duration::from_millis(50));
        assert!((mid - Vec3::new(1.0, 2.0, 3.0)).length() < 1e-4);
    }

    #[test]
    fn test_zero_duration_is_end() {
        let tween =
            Tween::new(3.0_f32, 7.0, Duration::ZERO, Ease::ExpoInOut);
        assert_eq!(tween.sample(Duration::ZERO), 7.0);
        assert!(tween.is_done(Duration::ZERO));
    }
}
