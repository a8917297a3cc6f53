//! Fit-to-bounds framing solver.
//!
//! Computes the camera distance needed to frame a bounding volume in the
//! viewport, aspect-ratio aware. The branching is asymmetric on purpose:
//! panels are mostly landscape or portrait photographs, and narrow
//! viewports must see the full width of a wide panel rather than crop it.

use glam::{Vec2, Vec3};

use crate::scene::Bounds;

/// Distance margin so framed volumes never touch the viewport edge.
const FIT_MARGIN: f32 = 1.1;

/// A solved camera framing: where to stand and where to look.
#[derive(Debug, Clone, Copy)]
pub struct Framing {
    /// Camera position, head-on over the volume center.
    pub position: Vec3,
    /// Look-at target (the volume center).
    pub target: Vec3,
}

/// Compute the camera placement that fits `bounds` in a viewport of the
/// given pixel size with vertical field of view `fovy_deg`.
///
/// In every aspect combination except landscape-viewport over
/// portrait-volume, a volume wider than the viewport has its effective
/// vertical extent widened so the full width stays visible.
#[must_use]
pub fn fit(bounds: &Bounds, viewport: Vec2, fovy_deg: f32) -> Framing {
    let aspect = viewport.x / viewport.y;
    let volume_aspect = if bounds.size.y > 0.0 {
        bounds.size.x / bounds.size.y
    } else {
        1.0
    };

    let mut height = bounds.size.y;
    let viewport_landscape = aspect >= 1.0;
    let volume_portrait = volume_aspect < 1.0;
    if !(viewport_landscape && volume_portrait) && aspect < volume_aspect {
        // The width governs: scale the height up by how much wider the
        // volume is than the viewport.
        height *= volume_aspect * viewport.y / viewport.x;
    }

    let distance =
        height / 2.0 / (fovy_deg.to_radians() / 2.0).tan() * FIT_MARGIN;
    Framing {
        position: bounds.center + Vec3::new(0.0, 0.0, distance),
        target: bounds.center,
    }
}
