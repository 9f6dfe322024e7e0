//! Input events consumed by the sketch engine.
//!
//! Mouse and touch are unified into [`PointerEvent`]; positions are in
//! drawing-surface pixels. Only the primary button/finger reaches the
//! engine.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up,
    /// Pointer left the surface. Ends a gesture exactly like [`PointerEvent::Up`].
    Leave,
}

/// Keyboard input for the inline text field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyEvent {
    Character(String),
    Backspace,
    Enter,
    Escape,
}
