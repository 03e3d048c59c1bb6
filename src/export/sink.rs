use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::export::{ExportConfig, encode_output};
use crate::foundation::error::GodcropResult;
use crate::render::cpu::RenderOutput;

/// Destination for exported frames.
pub trait ExportSink {
    /// Encode and deliver one frame.
    fn export(&mut self, out: &RenderOutput, cfg: &ExportConfig) -> GodcropResult<()>;
}

/// In-memory sink for tests and previews.
#[derive(Debug, Default)]
pub struct InMemorySink {
    files: Vec<(ExportConfig, Vec<u8>)>,
}

impl InMemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Encoded files in export order, with the config used for each.
    pub fn files(&self) -> &[(ExportConfig, Vec<u8>)] {
        &self.files
    }
}

impl ExportSink for InMemorySink {
    fn export(&mut self, out: &RenderOutput, cfg: &ExportConfig) -> GodcropResult<()> {
        let bytes = encode_output(out, cfg)?;
        self.files.push((cfg.clone(), bytes));
        Ok(())
    }
}

/// Writes each export to a fixed path, creating parent directories.
#[derive(Debug, Clone)]
pub struct FileExportSink {
    path: PathBuf,
}

impl FileExportSink {
    /// Sink writing to `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Output path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ExportSink for FileExportSink {
    fn export(&mut self, out: &RenderOutput, cfg: &ExportConfig) -> GodcropResult<()> {
        let bytes = encode_output(out, cfg)?;
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        std::fs::write(&self.path, &bytes)
            .with_context(|| format!("write '{}'", self.path.display()))?;
        tracing::debug!(path = %self.path.display(), bytes = bytes.len(), "exported");
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/sink.rs"]
mod tests;
