//! Renderer trait abstraction.

use kurbo::Size;
use serde::{Deserialize, Serialize};
use slateboard_core::{InkColor, Scene};
use thiserror::Error;

/// Largest surface side, in pixels, that will be rasterized.
pub const MAX_SURFACE_DIMENSION: u32 = 16_384;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Rendering surface unavailable ({width}x{height})")]
    SurfaceUnavailable { width: f64, height: f64 },
    #[error("Encoding failed: {0}")]
    Encode(String),
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Stroke widths and background used when projecting a scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    /// Pen stroke width.
    pub ink_width: f64,
    /// Eraser stroke width.
    pub eraser_width: f64,
    /// Outline width for rectangles and circles.
    pub shape_width: f64,
    /// Color shown wherever nothing is painted (including erased areas).
    pub background: InkColor,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            ink_width: 2.0,
            eraser_width: 20.0,
            shape_width: 2.0,
            background: InkColor::WHITE,
        }
    }
}

impl RenderStyle {
    /// Set the background color.
    pub fn with_background(mut self, color: InkColor) -> Self {
        self.background = color;
        self
    }
}

/// Context for a single render pass.
///
/// Holds the scene by shared reference, so the scene cannot change while a
/// pass is running.
pub struct RenderContext<'a> {
    /// The scene to render.
    pub scene: &'a Scene,
    /// Surface size in logical pixels.
    pub surface_size: Size,
    pub style: RenderStyle,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(scene: &'a Scene, surface_size: Size) -> Self {
        Self {
            scene,
            surface_size,
            style: RenderStyle::default(),
        }
    }

    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: InkColor) -> Self {
        self.style.background = color;
        self
    }

    /// Whole-pixel dimensions of the surface, or `None` if it has no area
    /// or a side exceeds [`MAX_SURFACE_DIMENSION`].
    pub fn pixel_size(&self) -> Option<(u32, u32)> {
        let to_px = |v: f64| {
            let px = v.ceil();
            if v.is_finite() && v >= 1.0 && px <= MAX_SURFACE_DIMENSION as f64 {
                Some(px as u32)
            } else {
                None
            }
        };
        Some((to_px(self.surface_size.width)?, to_px(self.surface_size.height)?))
    }
}

/// Trait for rendering backends.
pub trait Renderer {
    /// Render the full scene for a frame.
    ///
    /// Called after every scene or surface change; must produce the same
    /// output for the same scene and surface.
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()>;

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> InkColor {
        ctx.style.background
    }
}
