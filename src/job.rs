//! JSON job files: one image, one crop, one export.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::assets::library::ImageEntry;
use crate::export::ExportConfig;
use crate::export::sink::ExportSink;
use crate::foundation::error::{GodcropError, GodcropResult};
use crate::render::cpu::{CompositeOpts, RenderOutput};
use crate::render::watermark::{WatermarkDescriptor, WatermarkFont};
use crate::scene::state::CropState;
use crate::session::{Container, EditorSession};

fn default_density() -> f64 {
    1.0
}

/// Everything needed to render and export one crop.
///
/// ```json
/// {
///   "image": "photo.jpg",
///   "container": { "width": 440, "height": 440 },
///   "crop": { "aspect_ratio": 1.0, "shape": "star" },
///   "watermark": { "enabled": true, "text": "GOD CROP" },
///   "watermark_font": "fonts/Inter-Bold.ttf",
///   "export": { "format": "png" }
/// }
/// ```
///
/// Relative paths are resolved against the job file's directory when loaded with
/// [`CropJob::from_path`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CropJob {
    /// Source image.
    pub image: PathBuf,
    /// Layout container the frame is fitted into.
    pub container: Container,
    /// Device pixel density.
    #[serde(default = "default_density")]
    pub density: f64,
    /// Crop state.
    #[serde(default)]
    pub crop: CropState,
    /// Watermark settings.
    #[serde(default)]
    pub watermark: WatermarkDescriptor,
    /// Font for text watermarks.
    #[serde(default)]
    pub watermark_font: Option<PathBuf>,
    /// Export settings.
    #[serde(default)]
    pub export: ExportConfig,
}

impl CropJob {
    /// Parse a job from JSON.
    pub fn from_reader<R: std::io::Read>(r: R) -> GodcropResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| GodcropError::serde(format!("parse crop job JSON: {e}")))
    }

    /// Parse a job file, resolving relative paths against its directory.
    pub fn from_path(path: impl AsRef<Path>) -> GodcropResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            GodcropError::validation(format!("open crop job '{}': {e}", path.display()))
        })?;
        let mut job = Self::from_reader(BufReader::new(f))?;
        if let Some(base) = path.parent() {
            job.resolve_relative_to(base);
        }
        Ok(job)
    }

    /// Make relative image and font paths relative to `base`.
    pub fn resolve_relative_to(&mut self, base: &Path) {
        if self.image.is_relative() {
            self.image = base.join(&self.image);
        }
        if let Some(font) = self.watermark_font.as_mut()
            && font.is_relative()
        {
            *font = base.join(&*font);
        }
    }

    /// Check container, density, and that a visible text watermark comes with a font.
    pub fn validate(&self) -> GodcropResult<()> {
        let Container { width, height } = self.container;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(GodcropError::validation(
                "container dimensions must be finite and > 0",
            ));
        }
        if !self.density.is_finite() || self.density <= 0.0 {
            return Err(GodcropError::validation("density must be finite and > 0"));
        }
        if self.watermark.needs_font() && self.watermark_font.is_none() {
            return Err(GodcropError::validation(
                "watermark is enabled but the job sets no watermark_font",
            ));
        }
        Ok(())
    }

    /// Load the inputs and render the composite.
    #[tracing::instrument(skip_all, fields(image = %self.image.display()))]
    pub fn render(&self) -> GodcropResult<RenderOutput> {
        self.validate()?;

        let mut opts = CompositeOpts::default().with_density(self.density);
        if let Some(path) = &self.watermark_font {
            opts = opts.with_watermark_font(WatermarkFont::from_path(path)?);
        }

        let mut session = EditorSession::new(self.container, opts)?;
        session.set_crop(self.crop.clone())?;
        session.set_watermark(self.watermark.clone())?;
        session.set_export_config(self.export.clone());
        session.add_image(ImageEntry::load(&self.image)?)?;

        session
            .current()
            .cloned()
            .ok_or_else(|| GodcropError::render("image decoded to an empty raster"))
    }

    /// Render and hand the result to `sink`.
    pub fn render_to(&self, sink: &mut dyn ExportSink) -> GodcropResult<RenderOutput> {
        let out = self.render()?;
        sink.export(&out, &self.export)?;
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../tests/unit/job.rs"]
mod tests;
