//! Raster export: encode the displayed surface and hand it to the host.

use crate::raster::FrameSource;
use crate::renderer::RendererError;
use std::fs;
use std::path::PathBuf;
use std::sync::RwLock;
use thiserror::Error;

/// File name used for exported images.
pub const DEFAULT_EXPORT_FILENAME: &str = "whiteboard.png";

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Rendering surface unavailable")]
    NoFrame,
    #[error(transparent)]
    Render(#[from] RendererError),
    #[error("IO error: {0}")]
    Io(String),
    #[error("Sink error: {0}")]
    Sink(String),
}

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;

/// Host capability that delivers exported bytes to the user
/// (browser download, file on disk, clipboard...).
pub trait DownloadSink {
    fn deliver(&self, filename: &str, bytes: &[u8]) -> ExportResult<()>;
}

/// Writes deliveries as files into a directory.
pub struct FileDownload {
    /// Base directory for delivered files.
    base_path: PathBuf,
}

impl FileDownload {
    /// Create a sink writing into `base_path`.
    ///
    /// Creates the directory if it doesn't exist.
    pub fn new(base_path: PathBuf) -> ExportResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path).map_err(|e| {
                ExportError::Io(format!("Failed to create export directory: {}", e))
            })?;
        }
        Ok(Self { base_path })
    }

    /// Get the file path for a delivered file name.
    pub fn file_path(&self, filename: &str) -> PathBuf {
        // Sanitize to keep deliveries inside the base directory
        let safe_name: String = filename
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        let safe_name = safe_name.trim_start_matches('.');
        let safe_name = if safe_name.is_empty() {
            DEFAULT_EXPORT_FILENAME
        } else {
            safe_name
        };
        self.base_path.join(safe_name)
    }
}

impl DownloadSink for FileDownload {
    fn deliver(&self, filename: &str, bytes: &[u8]) -> ExportResult<()> {
        let path = self.file_path(filename);
        fs::write(&path, bytes)
            .map_err(|e| ExportError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
        log::info!("Exported {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

/// Keeps deliveries in memory, for tests and embedding hosts.
#[derive(Default)]
pub struct MemoryDownload {
    deliveries: RwLock<Vec<(String, Vec<u8>)>>,
}

impl MemoryDownload {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything delivered so far, oldest first.
    pub fn deliveries(&self) -> Vec<(String, Vec<u8>)> {
        self.deliveries
            .read()
            .map(|d| d.clone())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.deliveries.read().map(|d| d.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DownloadSink for MemoryDownload {
    fn deliver(&self, filename: &str, bytes: &[u8]) -> ExportResult<()> {
        let mut deliveries = self
            .deliveries
            .write()
            .map_err(|e| ExportError::Sink(format!("Lock error: {}", e)))?;
        deliveries.push((filename.to_string(), bytes.to_vec()));
        Ok(())
    }
}

/// The toolbar's save action.
#[derive(Debug, Clone)]
pub struct ExportBridge {
    filename: String,
}

impl Default for ExportBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl ExportBridge {
    pub fn new() -> Self {
        Self {
            filename: DEFAULT_EXPORT_FILENAME.to_string(),
        }
    }

    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Encode the frame on display as PNG and deliver it.
    pub fn export(&self, source: &dyn FrameSource, sink: &dyn DownloadSink) -> ExportResult<usize> {
        let frame = source.current_frame().ok_or(ExportError::NoFrame)?;
        let png_data = frame.encode_png()?;
        sink.deliver(&self.filename, &png_data)?;
        Ok(png_data.len())
    }

    /// Save action: like [`export`](Self::export), but failures are logged
    /// and swallowed. Returns whether an image was delivered.
    pub fn save(&self, source: &dyn FrameSource, sink: &dyn DownloadSink) -> bool {
        match self.export(source, sink) {
            Ok(len) => {
                log::info!("Saved {} ({} bytes)", self.filename(), len);
                true
            }
            Err(e) => {
                log::warn!("Save ignored: {}", e);
                false
            }
        }
    }
}
