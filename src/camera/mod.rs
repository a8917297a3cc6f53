//! Camera state, smoothing integrators, framing math, and move planning.

pub mod choreographer;
pub mod core;
pub mod framing;
pub mod integrator;

pub use choreographer::{
    CameraPose, Choreographer, MoveContext, MoveOptions, MoveTarget,
};
pub use core::Camera;
pub use framing::{fit, Framing};
pub use integrator::Integrator;
