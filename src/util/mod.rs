//! Small shared helpers: easing curves and frame timing.

pub mod easing;
pub mod frame_timing;

pub use easing::Ease;
pub use frame_timing::FrameClock;
