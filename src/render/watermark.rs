use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::Context as _;
use serde::{Deserialize, Serialize};

use crate::foundation::core::{FrameGeometry, Point};
use crate::foundation::error::{GodcropError, GodcropResult};
use crate::foundation::math::Fnv1a64;

/// Distance of the watermark's right edge and baseline from the frame's bottom-right corner.
pub const WATERMARK_PADDING_PX: f64 = 12.0;

/// Watermark font size in logical pixels.
pub const WATERMARK_FONT_SIZE_PX: f32 = 12.0;

/// Watermark content type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WatermarkKind {
    /// Text drawn with the watermark font.
    #[default]
    Text,
    /// Raster logo. Carried in the model; not drawn by the compositor.
    Image,
}

/// Watermark anchor.
///
/// Only [`WatermarkPosition::BottomRight`] is laid out by the compositor; other anchors are
/// placed by callers that draw after the clip has been released.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WatermarkPosition {
    /// Frame center.
    Center,
    /// Bottom-right corner with fixed padding.
    #[default]
    BottomRight,
    /// Top-left corner.
    TopLeft,
    /// Repeated across the frame.
    Tile,
}

/// Watermark settings for one render.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WatermarkDescriptor {
    /// Draw the watermark at all.
    #[serde(default)]
    pub enabled: bool,
    /// Content type.
    #[serde(default)]
    pub kind: WatermarkKind,
    /// Text content for [`WatermarkKind::Text`].
    #[serde(default)]
    pub text: Option<String>,
    /// Image reference for [`WatermarkKind::Image`].
    #[serde(default)]
    pub image_ref: Option<String>,
    /// Opacity in `[0, 1]`; out-of-range values are clamped at draw time.
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Relative size. Carried in the model; the compositor draws at a fixed size.
    #[serde(default = "default_scale")]
    pub scale: f64,
    /// Anchor.
    #[serde(default)]
    pub position: WatermarkPosition,
}

fn default_opacity() -> f64 {
    0.5
}

fn default_scale() -> f64 {
    1.0
}

impl Default for WatermarkDescriptor {
    fn default() -> Self {
        Self {
            enabled: false,
            kind: WatermarkKind::Text,
            text: Some("GOD CROP".to_string()),
            image_ref: None,
            opacity: default_opacity(),
            scale: default_scale(),
            position: WatermarkPosition::BottomRight,
        }
    }
}

impl WatermarkDescriptor {
    /// An enabled text watermark.
    pub fn text(text: impl Into<String>, opacity: f64) -> Self {
        Self {
            enabled: true,
            text: Some(text.into()),
            opacity,
            ..Self::default()
        }
    }

    /// Text to draw, if this descriptor produces any visible text.
    pub fn visible_text(&self) -> Option<&str> {
        if !self.enabled || self.kind != WatermarkKind::Text {
            return None;
        }
        self.text.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Return `true` when drawing this watermark requires a font.
    pub fn needs_font(&self) -> bool {
        self.visible_text().is_some() && self.effective_opacity() > 0.0
    }

    /// Opacity clamped to `[0, 1]`; non-finite values draw nothing.
    pub fn effective_opacity(&self) -> f32 {
        if self.opacity.is_finite() {
            self.opacity.clamp(0.0, 1.0) as f32
        } else {
            0.0
        }
    }
}

/// Origin for a right-aligned text run: its left edge at `x` and its baseline at `y`.
///
/// The run's right edge ends [`WATERMARK_PADDING_PX`] left of the frame's right edge and its
/// baseline sits [`WATERMARK_PADDING_PX`] above the frame's bottom edge.
pub fn watermark_origin(frame: FrameGeometry, text_width: f64) -> Point {
    Point::new(
        frame.width() - WATERMARK_PADDING_PX - text_width,
        frame.height() - WATERMARK_PADDING_PX,
    )
}

/// Raw font bytes shared between renders.
#[derive(Clone, Debug)]
pub struct WatermarkFont {
    bytes: Arc<Vec<u8>>,
    key: u64,
}

impl WatermarkFont {
    /// Wrap font bytes (TTF/OTF).
    pub fn from_bytes(bytes: Vec<u8>) -> GodcropResult<Self> {
        if bytes.is_empty() {
            return Err(GodcropError::decode("font file is empty"));
        }
        let mut h = Fnv1a64::new_default();
        h.write_u64(bytes.len() as u64);
        h.write_bytes(&bytes);
        Ok(Self {
            key: h.finish(),
            bytes: Arc::new(bytes),
        })
    }

    /// Read a font file from disk.
    pub fn from_path(path: impl AsRef<Path>) -> GodcropResult<Self> {
        let path = path.as_ref();
        let bytes =
            std::fs::read(path).with_context(|| format!("read font '{}'", path.display()))?;
        Self::from_bytes(bytes)
    }

    /// Borrow the font bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Content hash identifying this font across renders.
    pub(crate) fn key(&self) -> u64 {
        self.key
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub(crate) struct TextBrushRgba8 {
    pub(crate) r: u8,
    pub(crate) g: u8,
    pub(crate) b: u8,
    pub(crate) a: u8,
}

impl TextBrushRgba8 {
    pub(crate) const WHITE: Self = Self {
        r: 255,
        g: 255,
        b: 255,
        a: 255,
    };
}

/// Shaped single-line text plus the metrics needed to anchor it.
pub(crate) struct ShapedText {
    pub(crate) layout: parley::Layout<TextBrushRgba8>,
    pub(crate) width: f64,
    pub(crate) baseline: f64,
}

/// Stateful helper for building Parley text layouts from raw font bytes.
///
/// Fonts are registered once per distinct byte content; the contexts are caches and never
/// influence the shaped result.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    families: HashMap<u64, String>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: HashMap::new(),
        }
    }

    fn family_for(&mut self, font: &WatermarkFont) -> GodcropResult<String> {
        if let Some(name) = self.families.get(&font.key) {
            return Ok(name.clone());
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(font.bytes().to_vec()), None);
        let family_id = families
            .first()
            .map(|(id, _)| *id)
            .ok_or_else(|| GodcropError::decode("no font families registered from font bytes"))?;

        let family_name = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| GodcropError::decode("registered font family has no name"))?
            .to_string();
        self.families.insert(font.key, family_name.clone());
        Ok(family_name)
    }

    /// Shape `text` on a single unbroken line.
    pub(crate) fn layout_line(
        &mut self,
        text: &str,
        font: &WatermarkFont,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> GodcropResult<ShapedText> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(GodcropError::validation(
                "text size_px must be finite and > 0",
            ));
        }
        let family_name = self.family_for(font)?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);

        let baseline = layout
            .lines()
            .next()
            .map(|line| f64::from(line.metrics().baseline))
            .unwrap_or(0.0);
        let width = f64::from(layout.width());
        Ok(ShapedText {
            layout,
            width,
            baseline,
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/watermark.rs"]
mod tests;
