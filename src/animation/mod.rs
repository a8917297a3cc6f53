//! Tween primitive and the camera move timeline.

pub mod timeline;
pub mod tween;

pub use timeline::{
    CancelToken, MoveTimeline, TimelineChannels, TimelineFrame,
    TimelineSample,
};
pub use tween::{Lerp, Tween};
