//! Projection of a scene to drawable primitives.

use crate::renderer::RenderStyle;
use kurbo::{Point, Rect};
use slateboard_core::{DrawingElement, ElementKind, InkColor, Scene};

/// How a primitive combines with what is already painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Composite {
    /// Paint over existing pixels.
    SourceOver,
    /// Remove existing pixels under the stroke, revealing the background.
    DestinationOut,
}

/// A drawable primitive in surface coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// Polyline with round joins and caps.
    Polyline {
        points: Vec<Point>,
        width: f64,
        color: InkColor,
        composite: Composite,
    },
    /// Rectangle outline with positive width and height.
    Rect {
        rect: Rect,
        width: f64,
        color: InkColor,
    },
    /// Circle outline.
    Circle {
        center: Point,
        radius: f64,
        width: f64,
        color: InkColor,
    },
}

/// Project one element.
pub fn project_element(element: &DrawingElement, style: &RenderStyle) -> Primitive {
    match element.kind() {
        ElementKind::Ink(stroke) => Primitive::Polyline {
            points: stroke.points().to_vec(),
            width: style.ink_width,
            color: element.color(),
            composite: Composite::SourceOver,
        },
        ElementKind::Eraser(stroke) => Primitive::Polyline {
            points: stroke.points().to_vec(),
            width: style.eraser_width,
            color: InkColor::WHITE,
            composite: Composite::DestinationOut,
        },
        ElementKind::Rectangle(drag) => Primitive::Rect {
            rect: drag.normalized_rect(),
            width: style.shape_width,
            color: element.color(),
        },
        ElementKind::Circle(drag) => {
            let (center, radius) = drag.circle();
            Primitive::Circle {
                center,
                radius,
                width: style.shape_width,
                color: element.color(),
            }
        }
    }
}

/// Project the whole scene, back to front.
///
/// Pure function of its inputs: projecting the same scene twice yields the
/// same primitives.
pub fn project(scene: &Scene, style: &RenderStyle) -> Vec<Primitive> {
    scene
        .iter()
        .map(|element| project_element(element, style))
        .collect()
}
