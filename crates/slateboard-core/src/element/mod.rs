//! Drawn elements: the data representation of a single object on the board.

mod drag_box;
mod stroke;

pub use drag_box::DragBox;
pub use stroke::Stroke;

use crate::tools::ToolKind;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;

/// Error returned when a color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("color must start with '#': {0:?}")]
    MissingHash(String),
    #[error("expected 3, 6 or 8 hex digits, got {0}")]
    BadLength(usize),
    #[error("invalid hex digit in {0:?}")]
    BadDigit(String),
}

/// Stroke color of an element (RGBA8).
///
/// Serialized as a `#rrggbb` / `#rrggbbaa` string so event scripts can use
/// the same notation as a color picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct InkColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl InkColor {
    pub const BLACK: InkColor = InkColor::new(0, 0, 0, 255);
    pub const WHITE: InkColor = InkColor::new(255, 255, 255, 255);
    pub const RED: InkColor = InkColor::new(255, 0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(color: &str) -> Result<Self, ColorParseError> {
        let hex = color
            .trim()
            .strip_prefix('#')
            .ok_or_else(|| ColorParseError::MissingHash(color.to_string()))?;

        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorParseError::BadDigit(color.to_string()));
        }
        let byte = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16)
                .map_err(|_| ColorParseError::BadDigit(color.to_string()))
        };

        match hex.len() {
            3 => {
                // #rgb -> #rrggbb
                let r = byte(0..1)? * 17;
                let g = byte(1..2)? * 17;
                let b = byte(2..3)? * 17;
                Ok(Self::rgb(r, g, b))
            }
            6 => Ok(Self::rgb(byte(0..2)?, byte(2..4)?, byte(4..6)?)),
            8 => Ok(Self::new(byte(0..2)?, byte(2..4)?, byte(4..6)?, byte(6..8)?)),
            len => Err(ColorParseError::BadLength(len)),
        }
    }

    /// Format as `#rrggbb`, or `#rrggbbaa` when not fully opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl Default for InkColor {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for InkColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for InkColor {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for InkColor {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<InkColor> for String {
    fn from(color: InkColor) -> Self {
        color.to_hex()
    }
}

/// Geometry of an element, one variant per tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    Ink(Stroke),
    Eraser(Stroke),
    Rectangle(DragBox),
    Circle(DragBox),
}

impl ElementKind {
    /// The tool that produced this geometry.
    pub fn tool(&self) -> ToolKind {
        match self {
            ElementKind::Ink(_) => ToolKind::Pen,
            ElementKind::Eraser(_) => ToolKind::Eraser,
            ElementKind::Rectangle(_) => ToolKind::Rectangle,
            ElementKind::Circle(_) => ToolKind::Circle,
        }
    }

    pub fn as_stroke(&self) -> Option<&Stroke> {
        match self {
            ElementKind::Ink(s) | ElementKind::Eraser(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_drag_box(&self) -> Option<&DragBox> {
        match self {
            ElementKind::Rectangle(b) | ElementKind::Circle(b) => Some(b),
            _ => None,
        }
    }
}

/// One committed or in-progress object on the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrawingElement {
    id: ElementId,
    color: InkColor,
    kind: ElementKind,
}

impl DrawingElement {
    /// Create an element anchored at `at`.
    ///
    /// Ink and eraser elements start with a single point, shapes start with
    /// a zero extent.
    pub fn new(tool: ToolKind, color: InkColor, at: Point) -> Self {
        let kind = match tool {
            ToolKind::Pen => ElementKind::Ink(Stroke::starting_at(at)),
            ToolKind::Eraser => ElementKind::Eraser(Stroke::starting_at(at)),
            ToolKind::Rectangle => ElementKind::Rectangle(DragBox::anchored_at(at)),
            ToolKind::Circle => ElementKind::Circle(DragBox::anchored_at(at)),
        };
        Self {
            id: Uuid::new_v4(),
            color,
            kind,
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn color(&self) -> InkColor {
        self.color
    }

    pub fn tool(&self) -> ToolKind {
        self.kind.tool()
    }

    pub fn kind(&self) -> &ElementKind {
        &self.kind
    }

    /// Geometry is only mutable from inside the crate (tool policy).
    pub(crate) fn kind_mut(&mut self) -> &mut ElementKind {
        &mut self.kind
    }

    /// Axis-aligned bounds of the geometry (not including stroke width).
    pub fn bounds(&self) -> Rect {
        match &self.kind {
            ElementKind::Ink(s) | ElementKind::Eraser(s) => s.bounds(),
            ElementKind::Rectangle(b) => b.normalized_rect(),
            ElementKind::Circle(b) => {
                let (center, radius) = b.circle();
                Rect::new(
                    center.x - radius,
                    center.y - radius,
                    center.x + radius,
                    center.y + radius,
                )
            }
        }
    }

    /// Zero-length stroke or zero-extent shape. Still a valid element.
    pub fn is_degenerate(&self) -> bool {
        match &self.kind {
            ElementKind::Ink(s) | ElementKind::Eraser(s) => s.is_degenerate(),
            ElementKind::Rectangle(b) | ElementKind::Circle(b) => b.is_degenerate(),
        }
    }
}
