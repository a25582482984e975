//! Origin/extent geometry shared by rectangle and circle elements.

use kurbo::{Point, Rect, Vec2};
use serde::{Deserialize, Serialize};

/// A box dragged out from a fixed origin.
///
/// `extent` is `pointer - origin` and may be negative on either axis when
/// the pointer moved left of or above the origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DragBox {
    /// Anchor point, fixed at creation.
    pub origin: Point,
    /// Signed size of the box.
    pub extent: Vec2,
}

impl DragBox {
    /// A zero-extent box at `origin`.
    pub fn anchored_at(origin: Point) -> Self {
        Self {
            origin,
            extent: Vec2::ZERO,
        }
    }

    pub fn new(origin: Point, extent: Vec2) -> Self {
        Self { origin, extent }
    }

    /// Stretch the box so its far corner sits at `pointer`.
    pub(crate) fn drag_to(&mut self, pointer: Point) {
        self.extent = pointer - self.origin;
    }

    /// The box with positive width and height, covering the same area.
    pub fn normalized_rect(&self) -> Rect {
        Rect::from_points(self.origin, self.origin + self.extent)
    }

    /// Circle inscribed on the larger side of the box.
    ///
    /// Center is `origin + extent / 2`, radius is half of the larger
    /// absolute dimension, so the result is always a true circle.
    pub fn circle(&self) -> (Point, f64) {
        let center = self.origin + self.extent / 2.0;
        let radius = self.extent.x.abs().max(self.extent.y.abs()) / 2.0;
        (center, radius)
    }

    pub fn is_degenerate(&self) -> bool {
        self.extent.x == 0.0 && self.extent.y == 0.0
    }
}
