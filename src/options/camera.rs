use serde::{Deserialize, Serialize};

/// Camera projection parameters.
///
/// The defaults reproduce the gallery's cinematic long-lens look: a
/// narrow field of view with a very distant far plane so overview moves
/// can pull far back from the wall.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Initial camera distance from the wall plane.
    pub initial_distance: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 25.0,
            znear: 100.0,
            zfar: 40_000.0,
            initial_distance: 3000.0,
        }
    }
}
