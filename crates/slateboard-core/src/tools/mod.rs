//! Tool system for the whiteboard.
//!
//! A tool decides how the same pointer stream turns into geometry. The
//! policy is applied per element variant, so an element keeps the semantics
//! of the tool it was created with even if the toolbar changes mid-gesture.

use crate::element::{DrawingElement, ElementKind, InkColor};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ToolKind {
    #[default]
    Pen,
    Eraser,
    Rectangle,
    Circle,
}

impl ToolKind {
    /// All tools in toolbar order.
    pub const ALL: [ToolKind; 4] = [
        ToolKind::Pen,
        ToolKind::Eraser,
        ToolKind::Rectangle,
        ToolKind::Circle,
    ];

    /// Get display name for this tool.
    pub fn name(self) -> &'static str {
        match self {
            ToolKind::Pen => "Pen",
            ToolKind::Eraser => "Eraser",
            ToolKind::Rectangle => "Rectangle",
            ToolKind::Circle => "Circle",
        }
    }
}

/// Start a new element for `tool` at the pointer-down position.
pub fn begin(tool: ToolKind, color: InkColor, at: Point) -> DrawingElement {
    DrawingElement::new(tool, color, at)
}

/// Apply one pointer movement to an in-progress element.
///
/// - ink / eraser: append the coordinate.
/// - rectangle / circle: `extent = point - origin` (may go negative).
pub fn extend(kind: &mut ElementKind, point: Point) {
    match kind {
        ElementKind::Ink(stroke) | ElementKind::Eraser(stroke) => stroke.push(point),
        ElementKind::Rectangle(drag) | ElementKind::Circle(drag) => drag.drag_to(point),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Vec2;

    #[test]
    fn test_default_tool_is_pen() {
        assert_eq!(ToolKind::default(), ToolKind::Pen);
    }

    #[test]
    fn test_ink_appends_every_point() {
        let mut el = begin(ToolKind::Pen, InkColor::BLACK, Point::new(0.0, 0.0));
        for i in 1..=500 {
            extend(el.kind_mut(), Point::new(i as f64, 0.0));
        }
        assert_eq!(el.kind().as_stroke().unwrap().len(), 501);
    }

    #[test]
    fn test_eraser_follows_ink_rule() {
        let mut ink = begin(ToolKind::Pen, InkColor::BLACK, Point::new(1.0, 1.0));
        let mut eraser = begin(ToolKind::Eraser, InkColor::BLACK, Point::new(1.0, 1.0));
        for p in [Point::new(2.0, 3.0), Point::new(5.0, 8.0)] {
            extend(ink.kind_mut(), p);
            extend(eraser.kind_mut(), p);
        }
        assert_eq!(
            ink.kind().as_stroke().unwrap().points(),
            eraser.kind().as_stroke().unwrap().points()
        );
    }

    #[test]
    fn test_shape_extent_tracks_latest_pointer() {
        let mut el = begin(ToolKind::Rectangle, InkColor::BLACK, Point::new(10.0, 10.0));
        extend(el.kind_mut(), Point::new(50.0, 10.0));
        extend(el.kind_mut(), Point::new(0.0, -5.0));
        let drag = el.kind().as_drag_box().unwrap();
        assert_eq!(drag.origin, Point::new(10.0, 10.0));
        assert_eq!(drag.extent, Vec2::new(-10.0, -15.0));
    }

    #[test]
    fn test_tool_serde_names() {
        let json = serde_json::to_string(&ToolKind::Rectangle).unwrap();
        assert_eq!(json, "\"rectangle\"");
        let tool: ToolKind = serde_json::from_str("\"pen\"").unwrap();
        assert_eq!(tool, ToolKind::Pen);
    }
}
