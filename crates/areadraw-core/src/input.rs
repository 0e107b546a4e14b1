//! Pointer events delivered by the host surface.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

impl MouseButton {
    /// Map a DOM-style button index (0 = left, 1 = middle, 2 = right).
    pub fn from_index(index: u16) -> Option<Self> {
        match index {
            0 => Some(MouseButton::Left),
            1 => Some(MouseButton::Middle),
            2 => Some(MouseButton::Right),
            _ => None,
        }
    }

    /// DOM-style button index.
    pub fn index(self) -> u16 {
        match self {
            MouseButton::Left => 0,
            MouseButton::Middle => 1,
            MouseButton::Right => 2,
        }
    }
}

/// Event types a surface can be asked to listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    MouseDown,
    MouseUp,
    MouseMove,
    MouseLeave,
    ContextMenu,
    /// Base image finished loading.
    Load,
    /// Base image failed to load.
    Error,
}

impl EventKind {
    /// DOM event name.
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::MouseDown => "mousedown",
            EventKind::MouseUp => "mouseup",
            EventKind::MouseMove => "mousemove",
            EventKind::MouseLeave => "mouseleave",
            EventKind::ContextMenu => "contextmenu",
            EventKind::Load => "load",
            EventKind::Error => "error",
        }
    }
}

/// Pointer event with a position relative to the top-left of the drawing surface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, button: MouseButton },
    Up { position: Point, button: MouseButton },
    Move { position: Point },
    Leave,
    ContextMenu,
}

impl PointerEvent {
    /// The listener kind this event is delivered through.
    pub fn kind(&self) -> EventKind {
        match self {
            PointerEvent::Down { .. } => EventKind::MouseDown,
            PointerEvent::Up { .. } => EventKind::MouseUp,
            PointerEvent::Move { .. } => EventKind::MouseMove,
            PointerEvent::Leave => EventKind::MouseLeave,
            PointerEvent::ContextMenu => EventKind::ContextMenu,
        }
    }

    /// Pointer position, if the event carries one.
    pub fn position(&self) -> Option<Point> {
        match self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Up { position, .. }
            | PointerEvent::Move { position } => Some(*position),
            PointerEvent::Leave | PointerEvent::ContextMenu => None,
        }
    }

    /// Left-button press at `(x, y)`.
    pub fn down(x: f64, y: f64) -> Self {
        PointerEvent::Down {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    /// Left-button release at `(x, y)`.
    pub fn up(x: f64, y: f64) -> Self {
        PointerEvent::Up {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    /// Pointer motion to `(x, y)`.
    pub fn moved(x: f64, y: f64) -> Self {
        PointerEvent::Move {
            position: Point::new(x, y),
        }
    }
}
