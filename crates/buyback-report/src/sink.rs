//! Export sinks: where a rendered summary goes once the user asks for it.

use crate::{render_summary, Summary};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Destination for an exported summary, e.g. a clipboard, printer or file.
///
/// Exports are single-shot: the sink receives the full text once.
pub trait ExportSink {
    fn export(&mut self, text: &str) -> Result<(), ExportError>;
}

/// Sink writing to any `io::Write`, such as stdout or an in-memory buffer.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    inner: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(inner: W) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> ExportSink for WriterSink<W> {
    fn export(&mut self, text: &str) -> Result<(), ExportError> {
        self.inner.write_all(text.as_bytes())?;
        self.inner.flush()?;
        Ok(())
    }
}

/// Sink that replaces the contents of a file.
#[derive(Debug, Clone)]
pub struct FileSink {
    path: PathBuf,
}

impl FileSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ExportSink for FileSink {
    fn export(&mut self, text: &str) -> Result<(), ExportError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, text)?;
        info!(path = %self.path.display(), bytes = text.len(), "summary exported");
        Ok(())
    }
}

/// Encoding used when exporting a summary.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExportFormat {
    #[default]
    Text,
    Json,
}

/// Render `summary` in `format` and hand it to `sink`.
pub fn export_summary<S: ExportSink + ?Sized>(
    sink: &mut S,
    summary: &Summary,
    format: ExportFormat,
) -> Result<(), ExportError> {
    let text = match format {
        ExportFormat::Text => render_summary(summary),
        ExportFormat::Json => {
            let mut json = serde_json::to_string_pretty(summary)?;
            json.push('\n');
            json
        }
    };
    sink.export(&text)
}
