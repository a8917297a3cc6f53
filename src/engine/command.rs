//! Commands produced by the interaction machine and applied by the
//! engine.

use crate::scene::NodeId;

/// Which neighbor a navigation step selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// One grid position to the left, wrapping at the first panel.
    Previous,
    /// One grid position to the right, wrapping at the last panel.
    Next,
}

/// One state-changing operation on the wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallCommand {
    /// Begin (or redirect) a zoom session onto a placeholder node.
    ZoomTo {
        /// The picked placeholder.
        node: NodeId,
        /// Whether the zoom came from keyboard navigation.
        via_key: bool,
    },
    /// End the zoom session and resume ambient drift.
    ExitZoom,
    /// Step the zoom session to an adjacent panel.
    Navigate {
        /// Step direction.
        direction: Direction,
    },
    /// Frame the whole wall.
    Overview,
}
