//! Host input events consumed by the whiteboard.
//!
//! Coordinates are in the drawing surface's local space. Events are
//! serializable so a session can be recorded and replayed verbatim.

use crate::element::InkColor;
use crate::tools::ToolKind;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PointerEvent {
    Down { position: Point },
    Move { position: Point },
    Up,
    /// Pointer left the surface; ends the gesture like `Up`.
    Leave,
}

/// Everything the host can deliver to a whiteboard.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoardEvent {
    Pointer(PointerEvent),
    /// New logical size of the drawing surface.
    Resize { width: f64, height: f64 },
    SelectTool(ToolKind),
    SelectColor(InkColor),
    /// Toolbar save button.
    Save,
}

impl BoardEvent {
    pub fn down(x: f64, y: f64) -> Self {
        BoardEvent::Pointer(PointerEvent::Down {
            position: Point::new(x, y),
        })
    }

    pub fn move_to(x: f64, y: f64) -> Self {
        BoardEvent::Pointer(PointerEvent::Move {
            position: Point::new(x, y),
        })
    }

    pub fn up() -> Self {
        BoardEvent::Pointer(PointerEvent::Up)
    }

    pub fn leave() -> Self {
        BoardEvent::Pointer(PointerEvent::Leave)
    }

    pub fn resize(width: f64, height: f64) -> Self {
        BoardEvent::Resize { width, height }
    }
}
