//! The zoom session: which panel the camera is deliberately visiting.
//!
//! The session never stores a state tag. Whether the visit is still
//! approaching or has settled is derived from the scene's `approach_done`
//! flag, so there is no second copy of the truth to fall out of sync.

use crate::panel::PanelId;
use crate::scene::{NodeId, SceneGraph};

/// The panel a zoom session is visiting, with its picked placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ZoomTarget {
    /// The visited panel.
    pub panel: PanelId,
    /// The placeholder node the zoom was issued against.
    pub placeholder: NodeId,
}

/// Deferred work to run once the camera settles on the zoom target:
/// mark the approach done and swap in the high-resolution texture.
///
/// Replaces completion callbacks; the engine takes the action by value
/// at settle time, so a superseded zoom simply drops it.
#[derive(Debug, Clone, Copy)]
pub struct ApproachAction {
    /// The placeholder whose material gets the zoom texture.
    pub placeholder: NodeId,
}

/// Derived phase of the zoom session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomState {
    /// No deliberate target; ambient drift owns the camera.
    Idle,
    /// Flying toward the target panel.
    Approaching(PanelId),
    /// Settled on the target panel; same-panel taps navigate.
    Settled(PanelId),
}

/// Mutable state of the current (or absent) zoom interaction.
#[derive(Debug)]
pub struct ZoomSession {
    /// The panel being visited, if any.
    pub target: Option<ZoomTarget>,
    /// Pending settle work for the current approach.
    pub approach: Option<ApproachAction>,
    /// Whether the host is a touch device (changes tap semantics).
    pub is_touch: bool,
    /// Whether the previous camera move framed the whole wall. Read by
    /// the choreographer to avoid consecutive overviews.
    pub last_overview: bool,
}

impl ZoomSession {
    /// Fresh idle session.
    #[must_use]
    pub fn new(is_touch: bool) -> Self {
        Self {
            target: None,
            approach: None,
            is_touch,
            last_overview: false,
        }
    }

    /// Derive the session phase from the scene.
    #[must_use]
    pub fn state(&self, scene: &SceneGraph) -> ZoomState {
        match self.target {
            None => ZoomState::Idle,
            Some(target) => {
                if self.approach_done(scene, target.placeholder) {
                    ZoomState::Settled(target.panel)
                } else {
                    ZoomState::Approaching(target.panel)
                }
            }
        }
    }

    /// Whether the current target's frame has completed its approach.
    #[must_use]
    pub fn approach_done(
        &self,
        scene: &SceneGraph,
        placeholder: NodeId,
    ) -> bool {
        scene
            .parent(placeholder)
            .is_some_and(|group| scene.node(group).approach_done)
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::scene::PLACEHOLDER_NAME;

    #[test]
    fn test_state_follows_scene_flag() {
        let mut scene = SceneGraph::new();
        let group =
            scene.add_node(scene.root(), "frame", Vec3::ZERO, Vec3::ZERO);
        let placeholder = scene.add_node(
            group,
            PLACEHOLDER_NAME,
            Vec3::ZERO,
            Vec3::new(100.0, 100.0, 10.0),
        );

        let mut session = ZoomSession::new(false);
        assert_eq!(session.state(&scene), ZoomState::Idle);

        session.target = Some(ZoomTarget {
            panel: PanelId(0),
            placeholder,
        });
        assert_eq!(session.state(&scene), ZoomState::Approaching(PanelId(0)));

        scene.node_mut(group).approach_done = true;
        assert_eq!(session.state(&scene), ZoomState::Settled(PanelId(0)));
    }
}
