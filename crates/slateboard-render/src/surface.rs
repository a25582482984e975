//! A whiteboard wired to a renderer and a download sink.

use crate::export::{DownloadSink, ExportBridge};
use crate::raster::{FrameSource, RasterFrame, RasterRenderer};
use crate::renderer::{RenderContext, RenderStyle, Renderer};
use slateboard_core::{BoardEvent, Change, Whiteboard};

/// Drives a [`Whiteboard`] from host events, re-rendering after every
/// visible change and exporting on save.
pub struct DrawingSurface<S: DownloadSink> {
    board: Whiteboard,
    renderer: RasterRenderer,
    style: RenderStyle,
    exporter: ExportBridge,
    sink: S,
    render_count: usize,
}

impl<S: DownloadSink> DrawingSurface<S> {
    /// Wrap a board and render its initial state.
    pub fn new(board: Whiteboard, sink: S) -> Self {
        let mut surface = Self {
            board,
            renderer: RasterRenderer::new(),
            style: RenderStyle::default(),
            exporter: ExportBridge::new(),
            sink,
            render_count: 0,
        };
        surface.render();
        surface
    }

    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self.render();
        self
    }

    pub fn with_exporter(mut self, exporter: ExportBridge) -> Self {
        self.exporter = exporter;
        self
    }

    /// Apply one host event.
    pub fn dispatch(&mut self, event: BoardEvent) -> Change {
        let change = self.board.handle(event);
        if change.needs_render() {
            self.render();
        }
        if change == Change::SaveRequested {
            self.exporter.save(&self.renderer, &self.sink);
        }
        change
    }

    /// Render the whole scene to the current surface size.
    ///
    /// On a surface with no area the previous frame is dropped, so a later
    /// save delivers nothing.
    pub fn render(&mut self) {
        let ctx = RenderContext::new(self.board.scene(), self.board.surface_size())
            .with_style(self.style);
        if let Err(e) = self.renderer.build_scene(&ctx) {
            log::debug!("Render skipped: {}", e);
        }
        self.render_count += 1;
    }

    pub fn board(&self) -> &Whiteboard {
        &self.board
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// The frame currently on display.
    pub fn frame(&self) -> Option<&RasterFrame> {
        self.renderer.current_frame()
    }

    /// Number of render passes run so far.
    pub fn render_count(&self) -> usize {
        self.render_count
    }
}

impl<S: DownloadSink> FrameSource for DrawingSurface<S> {
    fn current_frame(&self) -> Option<&RasterFrame> {
        self.frame()
    }
}
