//! Slateboard Render Library
//!
//! Turns a whiteboard scene into pixels and hands PNG exports to the host.
//! The default implementation rasterizes on the CPU with tiny-skia.

mod export;
pub mod pipeline;
mod raster;
mod renderer;
mod surface;

pub use export::{
    DEFAULT_EXPORT_FILENAME, DownloadSink, ExportBridge, ExportError, ExportResult, FileDownload,
    MemoryDownload,
};
pub use pipeline::{Composite, Primitive};
pub use raster::{FrameSource, RasterFrame, RasterRenderer};
pub use renderer::{
    MAX_SURFACE_DIMENSION, RenderContext, RenderResult, RenderStyle, Renderer, RendererError,
};
pub use surface::DrawingSurface;
