//! Normalized input events fed by the host shell.
//!
//! The host translates raw pointer/touch/keyboard input into these before
//! handing them to the engine; click and touch-end arrive as the same
//! event.

use glam::Vec2;

/// Arrow keys used for panel navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    /// Step to the previous panel.
    Left,
    /// Step to the next panel.
    Right,
}

/// One normalized input event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Pointer moved (or touch started/moved) at viewport coordinates.
    Hover {
        /// Pointer position in pixels, origin top-left.
        at: Vec2,
    },
    /// Click or touch-end at viewport coordinates.
    Click {
        /// Pointer position in pixels, origin top-left.
        at: Vec2,
    },
    /// Double tap anywhere.
    DoubleTap,
    /// Arrow key released.
    Key(NavKey),
}
