//! CPU rasterizer built on tiny-skia.
//!
//! Primitives are painted onto a transparent content layer first, so an
//! eraser stroke (destination-out) only removes pixels painted before it.
//! The content layer is then composited over the background.

use crate::pipeline::{Composite, Primitive, project};
use crate::renderer::{RenderContext, RenderResult, Renderer, RendererError};
use slateboard_core::InkColor;
use tiny_skia::{
    BlendMode, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, PixmapPaint, Stroke,
    Transform,
};

/// A rendered frame: straight-alpha RGBA8 pixels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterFrame {
    /// RGBA pixel data (4 bytes per pixel, row-major).
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl RasterFrame {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA of the pixel at (x, y), or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + x as usize) * 4;
        let p = &self.pixels[i..i + 4];
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Encode the frame as PNG bytes.
    pub fn encode_png(&self) -> RenderResult<Vec<u8>> {
        let mut png_data = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut png_data, self.width, self.height);
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder
                .write_header()
                .map_err(|e| RendererError::Encode(e.to_string()))?;
            writer
                .write_image_data(self.pixels())
                .map_err(|e| RendererError::Encode(e.to_string()))?;
            writer
                .finish()
                .map_err(|e| RendererError::Encode(e.to_string()))?;
        }
        Ok(png_data)
    }

    fn from_pixmap(pixmap: &Pixmap) -> Self {
        Self {
            pixels: unpremultiply_alpha(pixmap.data()),
            width: pixmap.width(),
            height: pixmap.height(),
        }
    }
}

/// Anything that can hand over the frame currently on screen.
pub trait FrameSource {
    /// The last successfully rendered frame, if the surface has one.
    fn current_frame(&self) -> Option<&RasterFrame>;
}

/// tiny-skia backed renderer keeping the last rendered frame.
#[derive(Debug, Default)]
pub struct RasterRenderer {
    frame: Option<RasterFrame>,
}

impl RasterRenderer {
    /// Create a new renderer with no frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rasterize a context into a fresh frame without touching the cached one.
    pub fn rasterize(&self, ctx: &RenderContext) -> RenderResult<RasterFrame> {
        let unavailable = || RendererError::SurfaceUnavailable {
            width: ctx.surface_size.width,
            height: ctx.surface_size.height,
        };
        let (width, height) = ctx.pixel_size().ok_or_else(unavailable)?;

        let mut content = Pixmap::new(width, height).ok_or_else(unavailable)?;
        for primitive in project(ctx.scene, &ctx.style) {
            paint_primitive(&mut content, &primitive);
        }

        let mut surface = Pixmap::new(width, height).ok_or_else(unavailable)?;
        surface.fill(to_skia_color(self.background_color(ctx)));
        surface.draw_pixmap(
            0,
            0,
            content.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );

        Ok(RasterFrame::from_pixmap(&surface))
    }
}

impl Renderer for RasterRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) -> RenderResult<()> {
        match self.rasterize(ctx) {
            Ok(frame) => {
                self.frame = Some(frame);
                Ok(())
            }
            Err(e) => {
                // Nothing is displayed on a surface without area.
                self.frame = None;
                Err(e)
            }
        }
    }
}

impl FrameSource for RasterRenderer {
    fn current_frame(&self) -> Option<&RasterFrame> {
        self.frame.as_ref()
    }
}

fn paint_primitive(pixmap: &mut Pixmap, primitive: &Primitive) {
    let (path, width, color, composite) = match primitive {
        Primitive::Polyline {
            points,
            width,
            color,
            composite,
        } => (polyline_path(points), *width, *color, *composite),
        Primitive::Rect { rect, width, color } => {
            let path = tiny_skia::Rect::from_ltrb(
                rect.x0 as f32,
                rect.y0 as f32,
                rect.x1 as f32,
                rect.y1 as f32,
            )
            .map(PathBuilder::from_rect);
            (path, *width, *color, Composite::SourceOver)
        }
        Primitive::Circle {
            center,
            radius,
            width,
            color,
        } => {
            let path = PathBuilder::from_circle(center.x as f32, center.y as f32, *radius as f32);
            (path, *width, *color, Composite::SourceOver)
        }
    };

    // Degenerate geometry has no path; it stays in the scene but paints nothing.
    let Some(path) = path else {
        return;
    };

    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, color.a);
    paint.anti_alias = true;
    paint.blend_mode = match composite {
        Composite::SourceOver => BlendMode::SourceOver,
        Composite::DestinationOut => BlendMode::DestinationOut,
    };

    let stroke = Stroke {
        width: width as f32,
        line_cap: LineCap::Round,
        line_join: LineJoin::Round,
        ..Stroke::default()
    };

    pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
}

fn polyline_path(points: &[kurbo::Point]) -> Option<Path> {
    let (first, rest) = points.split_first()?;
    let mut pb = PathBuilder::new();
    pb.move_to(first.x as f32, first.y as f32);
    for p in rest {
        pb.line_to(p.x as f32, p.y as f32);
    }
    pb.finish()
}

fn to_skia_color(color: InkColor) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

/// Convert premultiplied alpha to straight alpha.
///
/// tiny-skia stores premultiplied pixels, PNG expects straight alpha.
fn unpremultiply_alpha(data: &[u8]) -> Vec<u8> {
    let mut result = Vec::with_capacity(data.len());

    for chunk in data.chunks_exact(4) {
        let a = chunk[3];
        if a == 255 {
            result.extend_from_slice(chunk);
        } else if a > 0 {
            let unpremul = |c: u8| ((c as u32 * 255 + a as u32 / 2) / a as u32).min(255) as u8;
            result.extend_from_slice(&[unpremul(chunk[0]), unpremul(chunk[1]), unpremul(chunk[2]), a]);
        } else {
            result.extend_from_slice(&[0, 0, 0, 0]);
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;
    use slateboard_core::{BoardEvent, Scene, ToolKind, Whiteboard};

    const WHITE: [u8; 4] = [255, 255, 255, 255];

    /// Opaque and close to black (edges are anti-aliased).
    fn is_ink(p: Option<[u8; 4]>) -> bool {
        matches!(p, Some([r, g, b, a]) if r < 64 && g < 64 && b < 64 && a > 200)
    }

    /// Close to the white background.
    fn is_paper(p: Option<[u8; 4]>) -> bool {
        matches!(p, Some([r, g, b, a]) if r > 220 && g > 220 && b > 220 && a > 200)
    }

    fn stroke(board: &mut Whiteboard, tool: ToolKind, from: (f64, f64), to: (f64, f64)) {
        board.set_tool(tool);
        board.handle(BoardEvent::down(from.0, from.1));
        board.handle(BoardEvent::move_to(to.0, to.1));
        board.handle(BoardEvent::up());
    }

    fn render(board: &Whiteboard) -> RasterFrame {
        let ctx = RenderContext::new(board.scene(), board.surface_size());
        RasterRenderer::new().rasterize(&ctx).unwrap()
    }

    #[test]
    fn test_empty_scene_is_background() {
        let board = Whiteboard::with_surface_size(Size::new(8.0, 4.0));
        let frame = render(&board);
        assert_eq!((frame.width(), frame.height()), (8, 4));
        assert!(frame.pixels().chunks_exact(4).all(|p| p == WHITE));
    }

    #[test]
    fn test_zero_surface_is_unavailable() {
        let scene = Scene::new();
        let ctx = RenderContext::new(&scene, Size::new(0.0, 100.0));
        assert!(matches!(
            RasterRenderer::new().rasterize(&ctx),
            Err(RendererError::SurfaceUnavailable { .. })
        ));

        let mut renderer = RasterRenderer::new();
        assert!(renderer.build_scene(&ctx).is_err());
        assert!(renderer.current_frame().is_none());
    }

    #[test]
    fn test_background_follows_style() {
        let scene = Scene::new();
        let ctx = RenderContext::new(&scene, Size::new(4.0, 4.0)).with_background(InkColor::RED);
        let renderer = RasterRenderer::new();
        assert_eq!(renderer.background_color(&ctx), InkColor::RED);
        let frame = renderer.rasterize(&ctx).unwrap();
        assert_eq!(frame.pixel(2, 2), Some([255, 0, 0, 255]));
    }

    #[test]
    fn test_ink_paints_pixels() {
        let mut board = Whiteboard::with_surface_size(Size::new(100.0, 100.0));
        stroke(&mut board, ToolKind::Pen, (10.0, 20.0), (90.0, 20.0));
        let frame = render(&board);
        assert!(is_ink(frame.pixel(50, 20)));
        assert_eq!(frame.pixel(50, 40), Some(WHITE));
    }

    #[test]
    fn test_eraser_only_occludes_earlier_elements() {
        let mut board = Whiteboard::with_surface_size(Size::new(100.0, 100.0));
        stroke(&mut board, ToolKind::Pen, (10.0, 20.0), (90.0, 20.0));
        stroke(&mut board, ToolKind::Eraser, (50.0, 0.0), (50.0, 100.0));
        stroke(&mut board, ToolKind::Pen, (10.0, 60.0), (90.0, 60.0));

        let frame = render(&board);
        // first line is cut where the eraser passed, untouched elsewhere
        assert!(is_paper(frame.pixel(50, 20)));
        assert!(is_ink(frame.pixel(20, 20)));
        // the line drawn after the eraser is intact
        assert!(is_ink(frame.pixel(50, 60)));
        // erasing never deletes geometry
        assert_eq!(board.scene().len(), 3);
    }

    #[test]
    fn test_circle_outline() {
        let mut board = Whiteboard::with_surface_size(Size::new(100.0, 100.0));
        board.set_color(InkColor::RED);
        stroke(&mut board, ToolKind::Circle, (30.0, 30.0), (70.0, 70.0));
        let frame = render(&board);
        let edge = frame.pixel(70, 50).unwrap();
        assert!(edge[0] > 200 && edge[1] < 100 && edge[2] < 100, "edge pixel {edge:?}");
        assert_eq!(frame.pixel(50, 50), Some(WHITE));
    }

    #[test]
    fn test_rectangle_drag_direction_is_irrelevant() {
        let mut up_left = Whiteboard::with_surface_size(Size::new(100.0, 100.0));
        stroke(&mut up_left, ToolKind::Rectangle, (80.0, 80.0), (20.0, 20.0));
        let mut down_right = Whiteboard::with_surface_size(Size::new(100.0, 100.0));
        stroke(&mut down_right, ToolKind::Rectangle, (20.0, 20.0), (80.0, 80.0));

        let frame = render(&up_left);
        assert_eq!(frame, render(&down_right));
        assert!(is_ink(frame.pixel(20, 50)));
        assert_eq!(frame.pixel(50, 50), Some(WHITE));
    }

    #[test]
    fn test_degenerate_elements_do_not_fail() {
        let mut board = Whiteboard::with_surface_size(Size::new(10.0, 10.0));
        for tool in ToolKind::ALL {
            board.set_tool(tool);
            board.handle(BoardEvent::down(5.0, 5.0));
            board.handle(BoardEvent::up());
        }
        let frame = render(&board);
        assert_eq!(frame.pixel(0, 0), Some(WHITE));
    }

    #[test]
    fn test_render_is_idempotent() {
        let mut board = Whiteboard::with_surface_size(Size::new(64.0, 64.0));
        stroke(&mut board, ToolKind::Pen, (1.0, 1.0), (60.0, 33.0));
        stroke(&mut board, ToolKind::Eraser, (30.0, 0.0), (30.0, 64.0));
        stroke(&mut board, ToolKind::Circle, (10.0, 10.0), (40.0, 50.0));

        let mut renderer = RasterRenderer::new();
        let ctx = RenderContext::new(board.scene(), board.surface_size());
        renderer.build_scene(&ctx).unwrap();
        let first = renderer.current_frame().cloned().unwrap();
        renderer.build_scene(&ctx).unwrap();
        assert_eq!(renderer.current_frame(), Some(&first));
    }

    #[test]
    fn test_transparent_background_shows_erased_holes() {
        let mut board = Whiteboard::with_surface_size(Size::new(40.0, 40.0));
        stroke(&mut board, ToolKind::Pen, (0.0, 20.0), (40.0, 20.0));
        stroke(&mut board, ToolKind::Eraser, (20.0, 0.0), (20.0, 40.0));
        let ctx = RenderContext::new(board.scene(), board.surface_size())
            .with_background(InkColor::new(0, 0, 0, 0));
        let frame = RasterRenderer::new().rasterize(&ctx).unwrap();
        assert_eq!(frame.pixel(20, 20).map(|p| p[3]), Some(0));
        assert!(is_ink(frame.pixel(5, 20)));
    }

    #[test]
    fn test_encode_png_header() {
        let board = Whiteboard::with_surface_size(Size::new(12.0, 7.0));
        let png_bytes = render(&board).encode_png().unwrap();
        assert_eq!(&png_bytes[..8], b"\x89PNG\r\n\x1a\n");

        let decoder = png::Decoder::new(png_bytes.as_slice());
        let reader = decoder.read_info().unwrap();
        assert_eq!(reader.info().width, 12);
        assert_eq!(reader.info().height, 7);
    }

    #[test]
    fn test_unpremultiply() {
        assert_eq!(unpremultiply_alpha(&[64, 0, 0, 128]), vec![128, 0, 0, 128]);
        assert_eq!(unpremultiply_alpha(&[9, 9, 9, 0]), vec![0, 0, 0, 0]);
    }
}
