//! Ordered element list that defines paint order.

use crate::element::DrawingElement;
use kurbo::Rect;
use serde::{Deserialize, Serialize};

/// All elements on the board, back to front.
///
/// Insertion order is z-order: later elements paint over earlier ones.
/// Only the interaction session mutates existing elements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    elements: Vec<DrawingElement>,
}

impl Scene {
    /// Create a new empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element on top and return its index.
    pub fn push(&mut self, element: DrawingElement) -> usize {
        self.elements.push(element);
        self.elements.len() - 1
    }

    pub fn get(&self, index: usize) -> Option<&DrawingElement> {
        self.elements.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut DrawingElement> {
        self.elements.get_mut(index)
    }

    /// Elements in paint order (back to front).
    pub fn iter(&self) -> impl Iterator<Item = &DrawingElement> {
        self.elements.iter()
    }

    /// Check if the scene is empty.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Get the number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Get the bounding box of all elements.
    pub fn bounds(&self) -> Option<Rect> {
        self.elements
            .iter()
            .map(DrawingElement::bounds)
            .reduce(|acc, b| acc.union(b))
    }

    /// Serialize the scene to JSON (debug dumps, not a storage format).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
