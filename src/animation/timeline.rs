//! The composite timeline behind one camera move.
//!
//! A [`MoveTimeline`] bundles the concurrent tweens issued by a single
//! `animate_to` call: camera position target, look-at target, and the two
//! integrator damping ramps. At most one timeline is ever live; starting a
//! new move cancels the previous one through its [`CancelToken`] before
//! the replacement is built.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use glam::Vec3;
use web_time::{Duration, Instant};

use super::tween::Tween;

/// Cooperative cancellation handle for a timeline.
///
/// Cloned tokens share the same flag, so a handle kept by the issuer can
/// cancel a timeline owned elsewhere.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create an un-cancelled token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel the timeline this token belongs to.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    /// Whether the token has been cancelled.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// The four concurrent tween channels of a camera move.
#[derive(Debug, Clone, Copy)]
pub struct TimelineChannels {
    /// Camera position integrator target.
    pub position: Tween<Vec3>,
    /// Look-at integrator target.
    pub look: Tween<Vec3>,
    /// Camera position integrator damping ramp.
    pub position_damping: Tween<f32>,
    /// Look-at integrator damping ramp.
    pub look_damping: Tween<f32>,
}

/// Values sampled from a timeline at one instant.
#[derive(Debug, Clone, Copy)]
pub struct TimelineSample {
    /// Where the camera position integrator should currently aim.
    pub position_target: Vec3,
    /// Where the look-at integrator should currently aim.
    pub look_target: Vec3,
    /// Current damping for the position integrator.
    pub position_damping: f32,
    /// Current damping for the look-at integrator.
    pub look_damping: f32,
}

/// Result of advancing a timeline by one frame.
#[derive(Debug, Clone, Copy)]
pub enum TimelineFrame {
    /// The move is still in flight.
    Active(TimelineSample),
    /// The move just reached its end; the sample holds the final targets.
    /// Returned exactly once.
    Finished(TimelineSample),
    /// The timeline was cancelled (or already finished) and produced no
    /// sample.
    Idle,
}

/// The ephemeral composite of tweens belonging to one `animate_to` call.
#[derive(Debug)]
pub struct MoveTimeline {
    started_at: Instant,
    duration: Duration,
    channels: TimelineChannels,
    token: CancelToken,
    completed: bool,
    overview: bool,
}

impl MoveTimeline {
    /// Build a timeline starting at `started_at` and running for
    /// `duration`. `overview` marks whole-group framing moves for the
    /// choreographer's look-back rule.
    #[must_use]
    pub fn new(
        started_at: Instant,
        duration: Duration,
        channels: TimelineChannels,
        overview: bool,
    ) -> Self {
        Self {
            started_at,
            duration,
            channels,
            token: CancelToken::new(),
            completed: false,
            overview,
        }
    }

    /// A clone of this timeline's cancellation token.
    #[must_use]
    pub fn token(&self) -> CancelToken {
        self.token.clone()
    }

    /// Whether this move frames the whole wall.
    #[must_use]
    pub fn is_overview(&self) -> bool {
        self.overview
    }

    /// Cancel the timeline. Subsequent [`advance`](Self::advance) calls
    /// yield [`TimelineFrame::Idle`].
    pub fn kill(&self) {
        self.token.cancel();
    }

    /// Whether the timeline still produces samples.
    #[must_use]
    pub fn is_live(&self) -> bool {
        !self.completed && !self.token.is_cancelled()
    }

    /// Advance to `now` and sample all channels.
    pub fn advance(&mut self, now: Instant) -> TimelineFrame {
        if self.completed || self.token.is_cancelled() {
            return TimelineFrame::Idle;
        }

        let elapsed = now.saturating_duration_since(self.started_at);
        let sample = TimelineSample {
            position_target: self.channels.position.sample(elapsed),
            look_target: self.channels.look.sample(elapsed),
            position_damping: self.channels.position_damping.sample(elapsed),
            look_damping: self.channels.look_damping.sample(elapsed),
        };

        if elapsed >= self.duration {
            self.completed = true;
            TimelineFrame::Finished(sample)
        } else {
            TimelineFrame::Active(sample)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::easing::Ease;

    fn make_channels(duration: Duration) -> TimelineChannels {
        TimelineChannels {
            position: Tween::new(
                Vec3::ZERO,
                Vec3::new(100.0, 0.0, 0.0),
                duration,
                Ease::Linear,
            ),
            look: Tween::new(Vec3::ZERO, Vec3::ONE, duration, Ease::Linear),
            position_damping: Tween::new(
                0.01,
                0.1,
                duration / 2,
                Ease::ExpoIn,
            ),
            look_damping: Tween::new(0.006, 0.1, duration / 2, Ease::ExpoIn),
        }
    }

    #[test]
    fn test_advance_lifecycle() {
        let start = Instant::now();
        let duration = Duration::from_millis(100);
        let mut tl =
            MoveTimeline::new(start, duration, make_channels(duration), false);

        assert!(matches!(
            tl.advance(start + Duration::from_millis(10)),
            TimelineFrame::Active(_)
        ));
        let TimelineFrame::Finished(sample) = tl.advance(start + duration)
        else {
            panic!("expected Finished at the end of the duration");
        };
        assert!((sample.position_target.x - 100.0).abs() < 1e-4);
        assert!((sample.position_damping - 0.1).abs() < 1e-6);

        // Finished is reported exactly once.
        assert!(matches!(
            tl.advance(start + duration + Duration::from_millis(1)),
            TimelineFrame::Idle
        ));
        assert!(!tl.is_live());
    }

    #[test]
    fn test_damping_ramp_reaches_settle_at_half_duration() {
        let start = Instant::now();
        let duration = Duration::from_millis(200);
        let mut tl =
            MoveTimeline::new(start, duration, make_channels(duration), false);

        let TimelineFrame::Active(sample) =
            tl.advance(start + Duration::from_millis(100))
        else {
            panic!("expected Active at half duration");
        };
        assert!((sample.position_damping - 0.1).abs() < 1e-6);
        assert!((sample.look_damping - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_kill_silences_timeline() {
        let start = Instant::now();
        let duration = Duration::from_millis(100);
        let mut tl =
            MoveTimeline::new(start, duration, make_channels(duration), false);

        tl.kill();
        assert!(!tl.is_live());
        assert!(matches!(
            tl.advance(start + Duration::from_millis(10)),
            TimelineFrame::Idle
        ));
    }

    #[test]
    fn test_token_cancel_from_clone() {
        let start = Instant::now();
        let duration = Duration::from_millis(100);
        let mut tl =
            MoveTimeline::new(start, duration, make_channels(duration), false);

        let token = tl.token();
        token.cancel();
        assert!(matches!(tl.advance(start), TimelineFrame::Idle));
    }

    #[test]
    fn test_overview_flag() {
        let start = Instant::now();
        let duration = Duration::from_millis(10);
        let tl =
            MoveTimeline::new(start, duration, make_channels(duration), true);
        assert!(tl.is_overview());
    }
}
