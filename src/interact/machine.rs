//! Event-to-command translation.
//!
//! The machine owns no camera or scene state. It picks against the scene,
//! consults the session, and emits at most one command per event; the
//! engine applies commands to the choreographer, session, and prefetch
//! bridge.

use glam::Vec2;
use web_time::{Duration, Instant};

use crate::camera::Camera;
use crate::engine::{Direction, WallCommand};
use crate::interact::event::{InputEvent, NavKey};
use crate::interact::session::ZoomSession;
use crate::options::MotionOptions;
use crate::scene::{NodeId, SceneGraph};

/// Everything needed to resolve a pointer position to a scene node.
pub struct PickContext<'a> {
    /// Scene to pick against.
    pub scene: &'a SceneGraph,
    /// Current camera (for the unprojected ray).
    pub camera: &'a Camera,
    /// Viewport size in pixels.
    pub viewport: Vec2,
}

/// Visibility timer for the hover-revealed UI affordance.
///
/// Any pointer activity shows it; it hides again a fixed interval after
/// the last event.
#[derive(Debug)]
pub struct HoverAffordance {
    visible_until: Option<Instant>,
    hide_after: Duration,
}

impl HoverAffordance {
    /// Create a hidden affordance that stays visible for `hide_ms` after
    /// each poke.
    #[must_use]
    pub fn new(hide_ms: u64) -> Self {
        Self {
            visible_until: None,
            hide_after: Duration::from_millis(hide_ms),
        }
    }

    /// Register pointer activity at `now`.
    pub fn poke(&mut self, now: Instant) {
        self.visible_until = Some(now + self.hide_after);
    }

    /// Whether the affordance should be visible at `now`.
    #[must_use]
    pub fn is_visible(&self, now: Instant) -> bool {
        self.visible_until.is_some_and(|until| now < until)
    }
}

/// Stateless-per-event interpreter of normalized input.
#[derive(Debug)]
pub struct InteractionMachine {
    affordance: HoverAffordance,
}

impl InteractionMachine {
    /// Create a machine tuned by the motion options.
    #[must_use]
    pub fn new(motion: &MotionOptions) -> Self {
        Self {
            affordance: HoverAffordance::new(motion.hover_hide_ms),
        }
    }

    /// The hover affordance timer.
    #[must_use]
    pub fn affordance(&self) -> &HoverAffordance {
        &self.affordance
    }

    /// Translate one event into at most one command.
    pub fn handle_event(
        &mut self,
        event: InputEvent,
        ctx: &PickContext<'_>,
        session: &ZoomSession,
        now: Instant,
    ) -> Option<WallCommand> {
        match event {
            InputEvent::Hover { at: _ } => {
                self.affordance.poke(now);
                None
            }
            InputEvent::Click { at } => self.handle_click(at, ctx, session),
            InputEvent::DoubleTap => Some(WallCommand::Overview),
            InputEvent::Key(key) => {
                // Keyboard navigation only applies on non-touch hosts and
                // only while a panel is being visited.
                if session.is_touch || session.target.is_none() {
                    return None;
                }
                let direction = match key {
                    NavKey::Left => Direction::Previous,
                    NavKey::Right => Direction::Next,
                };
                Some(WallCommand::Navigate { direction })
            }
        }
    }

    fn handle_click(
        &self,
        at: Vec2,
        ctx: &PickContext<'_>,
        session: &ZoomSession,
    ) -> Option<WallCommand> {
        let Some(node) = pick_placeholder(at, ctx) else {
            // A miss only matters while zoomed: it releases the session.
            return session.target.map(|_| WallCommand::ExitZoom);
        };

        match session.target {
            Some(target) if target.placeholder == node => {
                // Tapping the panel being visited pages through the wall,
                // but only on touch and only once the approach settled.
                if session.is_touch
                    && session.approach_done(ctx.scene, node)
                {
                    let direction = if at.x < ctx.viewport.x * 0.5 {
                        Direction::Previous
                    } else {
                        Direction::Next
                    };
                    Some(WallCommand::Navigate { direction })
                } else {
                    None
                }
            }
            _ => Some(WallCommand::ZoomTo {
                node,
                via_key: false,
            }),
        }
    }
}

/// Nearest placeholder under the pointer, if any.
fn pick_placeholder(at: Vec2, ctx: &PickContext<'_>) -> Option<NodeId> {
    let ray = ctx.camera.ray_from_screen(at, ctx.viewport);
    ctx.scene
        .intersect(&ray, ctx.scene.root())
        .into_iter()
        .find(|hit| ctx.scene.node(hit.node).name.contains("placeholder"))
        .map(|hit| hit.node)
}
