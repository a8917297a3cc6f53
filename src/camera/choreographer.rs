//! Randomized camera move planning.
//!
//! `animate_to` turns a target (a panel, the whole wall, or nothing)
//! into one [`MoveTimeline`] driving the two integrators' targets and
//! damping. Starting a new move always supersedes the previous timeline;
//! there is no queueing.

use glam::{Vec2, Vec3};
use rand::Rng;
use web_time::{Duration, Instant};

use super::framing;
use super::integrator::Integrator;
use crate::animation::{MoveTimeline, TimelineChannels, TimelineFrame};
use crate::animation::tween::Tween;
use crate::interact::ZoomSession;
use crate::options::MotionOptions;
use crate::scene::{NodeId, SceneGraph};
use crate::util::easing::Ease;

/// What a camera move should frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveTarget {
    /// A deliberate zoom onto one node.
    Node(NodeId),
    /// The whole wall (double-tap reset / overview).
    Group,
    /// Ambient drift: anchor on a uniformly random panel.
    Random,
}

/// Per-move flags.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveOptions {
    /// True when the move was triggered by discrete keyboard navigation;
    /// keyboard moves are snappier and use a sharper ease.
    pub key: bool,
}

/// Read-only surroundings a move is planned against.
pub struct MoveContext<'a> {
    /// Scene to query node positions and bounds from.
    pub scene: &'a SceneGraph,
    /// The wall group node (panels are its children).
    pub wall: NodeId,
    /// Viewport size in pixels.
    pub viewport: Vec2,
    /// Camera vertical field of view in degrees.
    pub fovy: f32,
    /// Camera far clip distance.
    pub zfar: f32,
    /// Current camera eye position, for the speed-extension rule.
    pub eye: Vec3,
    /// Motion tuning constants.
    pub motion: &'a MotionOptions,
}

/// Camera pose produced each tick: eye position and look-at point.
#[derive(Debug, Clone, Copy)]
pub struct CameraPose {
    /// Smoothed camera position.
    pub eye: Vec3,
    /// Smoothed look-at target.
    pub look: Vec3,
}

/// Owns the two smoothing integrators and the (at most one) live move
/// timeline.
pub struct Choreographer {
    position: Integrator,
    look: Integrator,
    timeline: Option<MoveTimeline>,
}

impl Choreographer {
    /// Create a choreographer at rest, camera at `eye` looking at `look`.
    #[must_use]
    pub fn new(eye: Vec3, look: Vec3, motion: &MotionOptions) -> Self {
        Self {
            position: Integrator::new(eye, motion.position_damping),
            look: Integrator::new(look, motion.look_damping),
            timeline: None,
        }
    }

    /// Whether a move timeline is currently live.
    #[must_use]
    pub fn is_moving(&self) -> bool {
        self.timeline.as_ref().is_some_and(MoveTimeline::is_live)
    }

    /// Magnitude of the camera position velocity, in units per
    /// millisecond.
    #[must_use]
    pub fn velocity(&self) -> f32 {
        self.position.velocity().length()
    }

    /// Where the position integrator is currently aiming.
    #[must_use]
    pub fn position_target(&self) -> Vec3 {
        self.position.target
    }

    /// Advance the live timeline to `now`, feeding integrator targets and
    /// damping. Returns `true` exactly once per move, when its timeline
    /// finishes.
    pub fn advance(&mut self, now: Instant) -> bool {
        let Some(timeline) = self.timeline.as_mut() else {
            return false;
        };
        match timeline.advance(now) {
            TimelineFrame::Active(sample) => {
                self.position.target = sample.position_target;
                self.look.target = sample.look_target;
                self.position.damping = sample.position_damping;
                self.look.damping = sample.look_damping;
                false
            }
            TimelineFrame::Finished(sample) => {
                self.position.target = sample.position_target;
                self.look.target = sample.look_target;
                self.position.damping = sample.position_damping;
                self.look.damping = sample.look_damping;
                self.timeline = None;
                true
            }
            TimelineFrame::Idle => {
                self.timeline = None;
                false
            }
        }
    }

    /// Step both integrators by the frame delta and return the smoothed
    /// pose.
    pub fn integrate(&mut self, dt_ms: f32) -> CameraPose {
        CameraPose {
            eye: self.position.update(dt_ms),
            look: self.look.update(dt_ms),
        }
    }

    /// Plan and start a camera move.
    ///
    /// Supersedes any live timeline. The move's effect is entirely
    /// through integrator targets and damping; completion is observed via
    /// [`advance`](Self::advance).
    pub fn animate_to<R: Rng>(
        &mut self,
        target: MoveTarget,
        move_options: MoveOptions,
        ctx: &MoveContext<'_>,
        session: &mut ZoomSession,
        now: Instant,
        rng: &mut R,
    ) {
        let motion = ctx.motion;
        let mut duration_ms = rng.random_range(
            motion.drift_duration_min_ms..motion.drift_duration_max_ms,
        );
        let do_fit = rng.random::<f32>() < motion.fit_probability;
        let mut do_overview =
            rng.random::<f32>() < motion.overview_probability;
        if session.last_overview {
            // Never two overview moves back to back.
            do_overview = false;
        }
        let jitter_scale = if ctx.viewport.x < motion.narrow_viewport_px {
            motion.narrow_drift_scale
        } else {
            1.0
        };

        let (anchor_node, explicit) = match target {
            MoveTarget::Node(node) => (node, true),
            MoveTarget::Group => (ctx.wall, true),
            MoveTarget::Random => (pick_random_panel(ctx, rng), false),
        };
        let anchor = ctx.scene.world_position(anchor_node);

        let z_span = if rng.random::<f32>() < motion.drift_z_far_probability
        {
            motion.drift_z_far
        } else {
            motion.drift_z_near
        };
        let mut position = anchor
            + Vec3::new(
                (rng.random::<f32>() * 2.0 - 1.0)
                    * motion.drift_spread_x
                    * jitter_scale,
                (rng.random::<f32>() * 2.0 - 1.0)
                    * motion.drift_spread_y
                    * jitter_scale,
                rng.random::<f32>().mul_add(z_span, motion.drift_z_base),
            );
        let mut look = anchor
            + if do_fit {
                Vec3::ZERO
            } else {
                Vec3::new(
                    (rng.random::<f32>() * 2.0 - 1.0)
                        * motion.look_jitter_xy
                        * jitter_scale,
                    (rng.random::<f32>() * 2.0 - 1.0)
                        * motion.look_jitter_xy
                        * jitter_scale,
                    (rng.random::<f32>() * 2.0 - 1.0) * motion.look_jitter_z,
                )
            };

        if move_options.key {
            duration_ms *= 0.5;
        }

        if do_fit && !explicit {
            position.x = look.x;
            position.y = look.y;
            position.z = motion.fit_z;
        }

        if do_overview && !explicit {
            let framing = framing::fit(
                &ctx.scene.bounds(ctx.wall),
                ctx.viewport,
                ctx.fovy,
            );
            look = Vec3::ZERO;
            position = Vec3::new(0.0, 0.0, framing.position.z);
        }

        if explicit {
            // A deliberate target takes precedence over fit/overview:
            // frame it head-on, and move faster than ambient drift.
            let framing = framing::fit(
                &ctx.scene.bounds(anchor_node),
                ctx.viewport,
                ctx.fovy,
            );
            position = framing.position;
            look = framing.target;
            duration_ms *= 0.5;
        }

        let is_group = target == MoveTarget::Group;
        if (do_overview || do_fit || is_group) && position.z > ctx.zfar {
            position.z = ctx.zfar * 0.9;
        }

        // Very long jumps must not be abruptly fast: stretch the duration
        // when the required average speed exceeds the limit.
        let avg_speed = ctx.eye.distance(look) / duration_ms;
        if avg_speed > motion.speed_limit && !session.last_overview {
            duration_ms += avg_speed * 1000.0;
        }

        let ease = if move_options.key {
            Ease::QuintInOut
        } else {
            Ease::ExpoInOut
        };
        let settle_damping = if explicit {
            motion.settle_damping_focus
        } else {
            motion.settle_damping_drift
        };

        if let Some(previous) = self.timeline.take() {
            previous.kill();
        }

        let duration = Duration::from_secs_f32(duration_ms / 1000.0);
        let channels = TimelineChannels {
            position: Tween::new(
                self.position.target,
                position,
                duration,
                ease,
            ),
            look: Tween::new(self.look.target, look, duration, ease),
            position_damping: Tween::new(
                self.position.damping,
                settle_damping,
                duration / 2,
                Ease::ExpoIn,
            ),
            look_damping: Tween::new(
                self.look.damping,
                settle_damping,
                duration / 2,
                Ease::ExpoIn,
            ),
        };
        let overview = do_overview || is_group;
        session.last_overview = overview;

        log::debug!(
            "camera move: target={target:?} duration={duration_ms:.0}ms \
             fit={do_fit} overview={overview} key={}",
            move_options.key
        );
        self.timeline =
            Some(MoveTimeline::new(now, duration, channels, overview));
    }

    #[cfg(test)]
    pub(crate) fn timeline_mut(&mut self) -> Option<&mut MoveTimeline> {
        self.timeline.as_mut()
    }
}

/// Uniformly random wall child; falls back to the wall itself while the
/// wall is still empty.
fn pick_random_panel<R: Rng>(ctx: &MoveContext<'_>, rng: &mut R) -> NodeId {
    let panels = ctx.scene.children(ctx.wall);
    if panels.is_empty() {
        ctx.wall
    } else {
        panels[rng.random_range(0..panels.len())]
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::scene::PLACEHOLDER_NAME;

    fn test_scene() -> (SceneGraph, NodeId) {
        let mut scene = SceneGraph::new();
        let wall =
            scene.add_node(scene.root(), "wall", Vec3::ZERO, Vec3::ZERO);
        for i in 0..6 {
            let group = scene.add_node(
                wall,
                "frame",
                Vec3::new(i as f32 * 1600.0 - 4000.0, 0.0, 0.0),
                Vec3::ZERO,
            );
            let _ = scene.add_node(
                group,
                PLACEHOLDER_NAME,
                Vec3::ZERO,
                Vec3::new(1280.0, 960.0, 10.0),
            );
        }
        (scene, wall)
    }

    fn test_ctx<'a>(
        scene: &'a SceneGraph,
        wall: NodeId,
        motion: &'a MotionOptions,
    ) -> MoveContext<'a> {
        MoveContext {
            scene,
            wall,
            viewport: Vec2::new(1280.0, 720.0),
            fovy: 25.0,
            zfar: 40_000.0,
            eye: Vec3::new(0.0, 0.0, 3000.0),
            motion,
        }
    }

    #[test]
    fn test_new_move_supersedes_previous_timeline() {
        let (scene, wall) = test_scene();
        let motion = MotionOptions::default();
        let ctx = test_ctx(&scene, wall, &motion);
        let mut session = ZoomSession::new(false);
        let mut rng = StdRng::seed_from_u64(11);
        let mut choreographer =
            Choreographer::new(ctx.eye, Vec3::ZERO, &motion);
        let start = Instant::now();

        choreographer.animate_to(
            MoveTarget::Random,
            MoveOptions::default(),
            &ctx,
            &mut session,
            start,
            &mut rng,
        );
        let first_token = choreographer.timeline_mut().unwrap().token();

        choreographer.animate_to(
            MoveTarget::Random,
            MoveOptions::default(),
            &ctx,
            &mut session,
            start,
            &mut rng,
        );
        assert!(first_token.is_cancelled());
        assert!(choreographer.is_moving());
    }

    #[test]
    fn test_overview_never_repeats() {
        let (scene, wall) = test_scene();
        let motion = MotionOptions::default();
        let ctx = test_ctx(&scene, wall, &motion);
        let mut session = ZoomSession::new(false);
        let mut rng = StdRng::seed_from_u64(42);
        let mut choreographer =
            Choreographer::new(ctx.eye, Vec3::ZERO, &motion);
        let start = Instant::now();

        let mut previous_overview = false;
        let mut seen_overview = false;
        for _ in 0..2000 {
            choreographer.animate_to(
                MoveTarget::Random,
                MoveOptions::default(),
                &ctx,
                &mut session,
                start,
                &mut rng,
            );
            let overview = session.last_overview;
            assert!(
                !(overview && previous_overview),
                "two consecutive overview moves"
            );
            seen_overview |= overview;
            previous_overview = overview;
        }
        // With p = 0.05 over 2000 draws, overview moves must occur.
        assert!(seen_overview);
    }

    #[test]
    fn test_explicit_target_frames_head_on() {
        let (scene, wall) = test_scene();
        let motion = MotionOptions::default();
        let ctx = test_ctx(&scene, wall, &motion);
        let mut session = ZoomSession::new(false);
        let mut rng = StdRng::seed_from_u64(3);
        let mut choreographer =
            Choreographer::new(ctx.eye, Vec3::ZERO, &motion);
        let start = Instant::now();

        let group = scene.children(wall)[2];
        let node = scene.child_by_name(group, PLACEHOLDER_NAME).unwrap();
        choreographer.animate_to(
            MoveTarget::Node(node),
            MoveOptions::default(),
            &ctx,
            &mut session,
            start,
            &mut rng,
        );

        // Run the timeline to its end and check the final targets.
        let mut finished = false;
        let deadline = start + Duration::from_secs(30);
        while !finished {
            finished = choreographer.advance(deadline);
        }
        let expected = framing::fit(&scene.bounds(node), ctx.viewport, ctx.fovy);
        let target = choreographer.position_target();
        assert!((target - expected.position).length() < 1e-2);
    }

    #[test]
    fn test_group_target_marks_overview() {
        let (scene, wall) = test_scene();
        let motion = MotionOptions::default();
        let ctx = test_ctx(&scene, wall, &motion);
        let mut session = ZoomSession::new(false);
        let mut rng = StdRng::seed_from_u64(5);
        let mut choreographer =
            Choreographer::new(ctx.eye, Vec3::ZERO, &motion);
        let start = Instant::now();

        choreographer.animate_to(
            MoveTarget::Group,
            MoveOptions::default(),
            &ctx,
            &mut session,
            start,
            &mut rng,
        );
        assert!(session.last_overview);
    }

    #[test]
    fn test_far_clip_clamp_for_group_moves() {
        let (scene, wall) = test_scene();
        let motion = MotionOptions::default();
        let mut ctx = test_ctx(&scene, wall, &motion);
        // A tiny far plane forces the clamp.
        ctx.zfar = 1000.0;
        let mut session = ZoomSession::new(false);
        let mut rng = StdRng::seed_from_u64(9);
        let mut choreographer =
            Choreographer::new(ctx.eye, Vec3::ZERO, &motion);
        let start = Instant::now();

        choreographer.animate_to(
            MoveTarget::Group,
            MoveOptions::default(),
            &ctx,
            &mut session,
            start,
            &mut rng,
        );
        let deadline = start + Duration::from_secs(60);
        while !choreographer.advance(deadline) {}
        assert!(choreographer.position_target().z <= 900.0 + 1e-3);
    }
}
