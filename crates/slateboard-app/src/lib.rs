//! Slateboard headless host.
//!
//! Replays a recorded event script against a drawing surface, the same way
//! an interactive host would feed it pointer and toolbar events.

use kurbo::{Rect, Size};
use serde::{Deserialize, Serialize};
use slateboard_core::{BoardEvent, DEFAULT_SURFACE_SIZE, ToolKind, Whiteboard};
use slateboard_render::{
    DEFAULT_EXPORT_FILENAME, DownloadSink, DrawingSurface, ExportBridge, ExportError, FileDownload,
    RenderStyle,
};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Host errors.
#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Failed to read script {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid script: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Export sink unavailable: {0}")]
    Sink(#[from] ExportError),
}

/// Logical surface dimensions in a script.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceDims {
    pub width: f64,
    pub height: f64,
}

impl From<SurfaceDims> for Size {
    fn from(dims: SurfaceDims) -> Self {
        Size::new(dims.width, dims.height)
    }
}

/// A recorded session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    /// Initial surface size; defaults to 800x600.
    #[serde(default)]
    pub surface: Option<SurfaceDims>,
    #[serde(default)]
    pub style: RenderStyle,
    /// Name given to exported images.
    #[serde(default = "default_filename")]
    pub filename: String,
    pub events: Vec<BoardEvent>,
}

fn default_filename() -> String {
    DEFAULT_EXPORT_FILENAME.to_string()
}

impl ReplayScript {
    pub fn from_json(json: &str) -> Result<Self, ReplayError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: &Path) -> Result<Self, ReplayError> {
        let json = std::fs::read_to_string(path).map_err(|source| ReplayError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    fn surface_size(&self) -> Size {
        self.surface.map(Size::from).unwrap_or(DEFAULT_SURFACE_SIZE)
    }
}

/// What a replay produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ReplaySummary {
    pub events: usize,
    pub elements: usize,
    pub renders: usize,
    pub saves: usize,
    /// Element count per tool, in toolbar order.
    pub per_tool: Vec<(ToolKind, usize)>,
    /// Union of all element bounds, `None` for an empty scene.
    pub extent: Option<Rect>,
}

/// Dispatch every event of `script` to a fresh surface delivering into `sink`.
pub fn replay<S: DownloadSink>(script: &ReplayScript, sink: S) -> (DrawingSurface<S>, ReplaySummary) {
    let board = Whiteboard::with_surface_size(script.surface_size());
    let mut surface = DrawingSurface::new(board, sink)
        .with_style(script.style)
        .with_exporter(ExportBridge::new().with_filename(script.filename.as_str()));

    let mut saves = 0;
    for event in &script.events {
        if *event == BoardEvent::Save {
            saves += 1;
        }
        surface.dispatch(*event);
    }

    let scene = surface.board().scene();
    let per_tool = ToolKind::ALL
        .iter()
        .map(|&tool| (tool, scene.iter().filter(|e| e.tool() == tool).count()))
        .collect();
    let summary = ReplaySummary {
        events: script.events.len(),
        elements: scene.len(),
        renders: surface.render_count(),
        saves,
        per_tool,
        extent: scene.bounds(),
    };
    (surface, summary)
}

/// Load `script_path` and replay it, writing exports into `output_dir`.
pub fn run(script_path: &Path, output_dir: &Path) -> Result<ReplaySummary, ReplayError> {
    let script = ReplayScript::load(script_path)?;
    let sink = FileDownload::new(output_dir.to_path_buf())?;
    log::info!(
        "Replaying {} events from {}",
        script.events.len(),
        script_path.display()
    );
    let (surface, summary) = replay(&script, sink);
    if log::log_enabled!(log::Level::Trace) {
        match surface.board().scene().to_json() {
            Ok(json) => log::trace!("Final scene:\n{}", json),
            Err(e) => log::trace!("Scene dump failed: {}", e),
        }
    }
    Ok(summary)
}
