//! Input events, the zoom session, and the interaction state machine.

pub mod event;
pub mod machine;
pub mod session;

pub use event::{InputEvent, NavKey};
pub use machine::{HoverAffordance, InteractionMachine, PickContext};
pub use session::{ApproachAction, ZoomSession, ZoomState, ZoomTarget};
