//! Encoding composited frames for export.

use std::io::Cursor;
use std::path::Path;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::core::Rgba8Premul;
use crate::foundation::error::{GodcropError, GodcropResult};
use crate::foundation::math::{premul_over_opaque, unpremultiply_px};
use crate::render::cpu::RenderOutput;

/// Export sinks.
pub mod sink;

/// Output container format.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExportFormat {
    /// Lossy JPEG; transparency is flattened.
    #[default]
    Jpeg,
    /// Lossless PNG with alpha.
    Png,
    /// WebP with alpha.
    Webp,
    /// AVIF with alpha.
    Avif,
}

impl ExportFormat {
    /// MIME type, e.g. `image/jpeg`.
    pub fn mime_type(self) -> &'static str {
        self.image_format().to_mime_type()
    }

    /// Conventional file extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Png => "png",
            ExportFormat::Webp => "webp",
            ExportFormat::Avif => "avif",
        }
    }

    /// Infer the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        match image::ImageFormat::from_path(path).ok()? {
            image::ImageFormat::Jpeg => Some(ExportFormat::Jpeg),
            image::ImageFormat::Png => Some(ExportFormat::Png),
            image::ImageFormat::WebP => Some(ExportFormat::Webp),
            image::ImageFormat::Avif => Some(ExportFormat::Avif),
            _ => None,
        }
    }

    fn image_format(self) -> image::ImageFormat {
        match self {
            ExportFormat::Jpeg => image::ImageFormat::Jpeg,
            ExportFormat::Png => image::ImageFormat::Png,
            ExportFormat::Webp => image::ImageFormat::WebP,
            ExportFormat::Avif => image::ImageFormat::Avif,
        }
    }
}

/// Export settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Container format.
    pub format: ExportFormat,
    /// Lossy quality in `[0, 1]`; only JPEG honours it.
    pub quality: f64,
    /// Keep source metadata. Composited buffers carry none, so this is accepted and ignored.
    pub keep_metadata: bool,
    /// Background JPEG output is flattened onto; alpha is forced opaque.
    pub jpeg_background: Rgba8Premul,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format: ExportFormat::Jpeg,
            quality: 0.9,
            keep_metadata: true,
            jpeg_background: Rgba8Premul::from_straight_rgba(0, 0, 0, 255),
        }
    }
}

impl ExportConfig {
    /// JPEG quality on the encoder's `1..=100` scale.
    pub fn jpeg_quality(&self) -> u8 {
        if !self.quality.is_finite() {
            return 90;
        }
        (self.quality.clamp(0.0, 1.0) * 100.0).round().clamp(1.0, 100.0) as u8
    }
}

/// Encode a composited frame into `cfg.format`.
#[tracing::instrument(skip_all, fields(format = ?cfg.format, width = out.width, height = out.height))]
pub fn encode_output(out: &RenderOutput, cfg: &ExportConfig) -> GodcropResult<Vec<u8>> {
    let expected = (out.width as usize) * (out.height as usize) * 4;
    if out.data.len() != expected {
        return Err(GodcropError::render(format!(
            "frame buffer is {} bytes, expected {expected}",
            out.data.len()
        )));
    }

    let mut buf = Vec::new();
    match cfg.format {
        ExportFormat::Jpeg => {
            let bg = cfg.jpeg_background;
            let bg = [bg.r, bg.g, bg.b, 255];
            let rgb: Vec<u8> = out
                .data
                .chunks_exact(4)
                .flat_map(|px| premul_over_opaque([px[0], px[1], px[2], px[3]], bg))
                .collect();
            let mut enc =
                image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, cfg.jpeg_quality());
            enc.encode(&rgb, out.width, out.height, image::ExtendedColorType::Rgb8)
                .context("encode jpeg")?;
        }
        ExportFormat::Png | ExportFormat::Webp | ExportFormat::Avif => {
            let rgba: Vec<u8> = out
                .data
                .chunks_exact(4)
                .flat_map(|px| unpremultiply_px([px[0], px[1], px[2], px[3]]))
                .collect();
            let img = image::RgbaImage::from_raw(out.width, out.height, rgba)
                .ok_or_else(|| GodcropError::render("frame buffer does not match dimensions"))?;
            image::DynamicImage::ImageRgba8(img)
                .write_to(&mut Cursor::new(&mut buf), cfg.format.image_format())
                .with_context(|| format!("encode {}", cfg.format.mime_type()))?;
        }
    }
    if !cfg.keep_metadata {
        tracing::debug!("keep_metadata=false has no effect on composited output");
    }
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/export/mod.rs"]
mod tests;
