use std::collections::HashMap;
use std::sync::Arc;

use crate::assets::decode::SourceImage;
use crate::foundation::core::{Affine, BezPath, FrameGeometry};
use crate::foundation::error::{GodcropError, GodcropResult};
use crate::render::fit::cover_fit;
use crate::render::watermark::{
    TextBrushRgba8, TextLayoutEngine, WATERMARK_FONT_SIZE_PX, WatermarkDescriptor, WatermarkFont,
    WatermarkKind, WatermarkPosition, watermark_origin,
};
use crate::shape::builder::build_path;
use crate::shape::descriptor::ShapeDescriptor;
use crate::shape::path::ClosedPath;

/// Edge stroke width in logical pixels.
pub const EDGE_STROKE_WIDTH_PX: f64 = 1.0;

/// Edge stroke alpha: white at 5%.
pub const EDGE_STROKE_ALPHA: u8 = 13;

#[derive(Clone, Debug)]
/// Options for the CPU compositor.
pub struct CompositeOpts {
    /// Device pixel density; physical size is `ceil(logical * density)`.
    pub device_pixel_density: f64,
    /// Font used for text watermarks. Required to render a visible text watermark.
    pub watermark_font: Option<WatermarkFont>,
}

impl Default for CompositeOpts {
    fn default() -> Self {
        Self {
            device_pixel_density: 1.0,
            watermark_font: None,
        }
    }
}

impl CompositeOpts {
    /// Set the device pixel density.
    pub fn with_density(mut self, density: f64) -> Self {
        self.device_pixel_density = density;
        self
    }

    /// Set the watermark font.
    pub fn with_watermark_font(mut self, font: WatermarkFont) -> Self {
        self.watermark_font = Some(font);
        self
    }
}

/// One composited frame.
#[derive(Clone, Debug)]
pub struct RenderOutput {
    /// Physical width in pixels.
    pub width: u32,
    /// Physical height in pixels.
    pub height: u32,
    /// Density the frame was rendered at.
    pub density: f64,
    /// Logical frame.
    pub frame: FrameGeometry,
    /// Row-major premultiplied RGBA8.
    pub data: Vec<u8>,
    /// Clip boundary in logical coordinates.
    pub boundary: ClosedPath,
}

impl RenderOutput {
    /// Premultiplied RGBA8 at physical pixel `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = self.data.get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }
}

/// Stateful compositor.
///
/// Each call to [`CompositeRenderer::render`] draws into a fresh context and pixmap. The renderer
/// only keeps caches (shaped-text contexts, registered fonts, the last source paint) that never
/// change the output for a given input.
pub struct CompositeRenderer {
    opts: CompositeOpts,
    text_engine: TextLayoutEngine,
    fonts: HashMap<u64, vello_cpu::peniko::FontData>,
    image_cache: Option<(u64, vello_cpu::Image)>,
}

impl std::fmt::Debug for CompositeRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeRenderer")
            .field("opts", &self.opts)
            .field("fonts", &self.fonts.len())
            .finish_non_exhaustive()
    }
}

impl CompositeRenderer {
    /// Create a renderer. Fails when the density is not finite and positive.
    pub fn new(opts: CompositeOpts) -> GodcropResult<Self> {
        let d = opts.device_pixel_density;
        if !d.is_finite() || d <= 0.0 {
            return Err(GodcropError::validation(
                "device_pixel_density must be finite and > 0",
            ));
        }
        Ok(Self {
            opts,
            text_engine: TextLayoutEngine::new(),
            fonts: HashMap::new(),
            image_cache: None,
        })
    }

    /// Options the renderer was created with.
    pub fn opts(&self) -> &CompositeOpts {
        &self.opts
    }

    /// Fail when `watermark` would draw text but no font is configured.
    pub fn check_watermark(&self, watermark: &WatermarkDescriptor) -> GodcropResult<()> {
        if watermark.needs_font() && self.opts.watermark_font.is_none() {
            return Err(GodcropError::validation(
                "text watermark is enabled but no watermark font is configured",
            ));
        }
        Ok(())
    }

    /// Composite `image` into `frame`, clipped to `shape`, with `watermark` on top.
    ///
    /// Returns `Ok(None)` when the image has not finished loading, and a validation error when a
    /// visible text watermark has no font.
    #[tracing::instrument(
        skip_all,
        fields(shape = shape.kind_name(), width = frame.width(), height = frame.height())
    )]
    pub fn render(
        &mut self,
        image: &SourceImage,
        frame: FrameGeometry,
        shape: &ShapeDescriptor,
        watermark: &WatermarkDescriptor,
    ) -> GodcropResult<Option<RenderOutput>> {
        let Some(place) = cover_fit(image.size(), frame) else {
            tracing::debug!("source image not ready, skipping render");
            return Ok(None);
        };

        let density = self.opts.device_pixel_density;
        let width = physical_px(frame.width(), density, "width")?;
        let height = physical_px(frame.height(), density, "height")?;
        let base = Affine::scale(density);

        let mut ctx = vello_cpu::RenderContext::new(width, height);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        let boundary = build_path(shape, frame);
        if boundary.is_empty() {
            tracing::debug!("empty boundary, nothing visible");
        } else {
            let paint = self.image_paint_for(image)?;
            let size = image.size();
            let (iw, ih) = (f64::from(size.width), f64::from(size.height));

            ctx.set_transform(affine_to_cpu(base));
            ctx.push_clip_layer(&bezpath_to_cpu(boundary.bez()));
            let placement = base
                * Affine::translate((place.x0, place.y0))
                * Affine::scale_non_uniform(place.width() / iw, place.height() / ih);
            ctx.set_transform(affine_to_cpu(placement));
            ctx.set_paint(paint);
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(0.0, 0.0, iw, ih));
            ctx.pop_layer();

            // Clip released: the full stroke width straddles the boundary.
            let edge = build_path(shape, frame);
            ctx.set_transform(affine_to_cpu(base));
            ctx.set_stroke(vello_cpu::kurbo::Stroke::new(EDGE_STROKE_WIDTH_PX));
            ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                255,
                255,
                255,
                EDGE_STROKE_ALPHA,
            ));
            ctx.stroke_path(&bezpath_to_cpu(edge.bez()));
        }

        self.draw_watermark(&mut ctx, base, frame, watermark)?;

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        ctx.render_to_pixmap(&mut pixmap);

        Ok(Some(RenderOutput {
            width: u32::from(width),
            height: u32::from(height),
            density,
            frame,
            data: pixmap.data_as_u8_slice().to_vec(),
            boundary,
        }))
    }

    fn draw_watermark(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        base: Affine,
        frame: FrameGeometry,
        watermark: &WatermarkDescriptor,
    ) -> GodcropResult<()> {
        if watermark.enabled && watermark.kind == WatermarkKind::Image {
            tracing::debug!("image watermarks are not drawn");
        }
        let Some(text) = watermark.visible_text() else {
            return Ok(());
        };
        if watermark.position != WatermarkPosition::BottomRight {
            tracing::debug!(position = ?watermark.position, "watermark anchored bottom-right");
        }
        let opacity = watermark.effective_opacity();
        if opacity <= 0.0 {
            return Ok(());
        }
        let Some(font) = self.opts.watermark_font.clone() else {
            return Err(GodcropError::validation(
                "text watermark is enabled but no watermark font is configured",
            ));
        };

        let shaped = self
            .text_engine
            .layout_line(text, &font, WATERMARK_FONT_SIZE_PX, TextBrushRgba8::WHITE)
            .map_err(|e| GodcropError::render(format!("lay out watermark text: {e}")))?;
        let font_data = self.font_data_for(&font);

        let origin = watermark_origin(frame, shaped.width);
        let tr = base * Affine::translate((origin.x, origin.y - shaped.baseline));
        ctx.set_transform(affine_to_cpu(tr));
        if opacity < 1.0 {
            ctx.push_opacity_layer(opacity);
        }
        for line in shaped.layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(&font_data)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        if opacity < 1.0 {
            ctx.pop_layer();
        }
        Ok(())
    }

    fn font_data_for(&mut self, font: &WatermarkFont) -> vello_cpu::peniko::FontData {
        self.fonts
            .entry(font.key())
            .or_insert_with(|| {
                vello_cpu::peniko::FontData::new(
                    vello_cpu::peniko::Blob::from(font.bytes().to_vec()),
                    0,
                )
            })
            .clone()
    }

    fn image_paint_for(&mut self, image: &SourceImage) -> GodcropResult<vello_cpu::Image> {
        if let Some((key, paint)) = &self.image_cache
            && *key == image.key()
        {
            return Ok(paint.clone());
        }
        let size = image.size();
        let pixmap = pixmap_from_premul_bytes(image.rgba8_premul(), size.width, size.height)?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };
        self.image_cache = Some((image.key(), paint.clone()));
        Ok(paint)
    }
}

/// Physical pixel count for a logical length.
fn physical_px(logical: f64, density: f64, axis: &str) -> GodcropResult<u16> {
    let px = (logical * density).ceil();
    if !px.is_finite() || px < 1.0 || px > f64::from(u16::MAX) {
        return Err(GodcropError::render(format!(
            "physical {axis} {px} is outside 1..={}",
            u16::MAX
        )));
    }
    Ok(px as u16)
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::LineTo(p) => out.line_to(vello_cpu::kurbo::Point::new(p.x, p.y)),
            PathEl::QuadTo(p1, p2) => out.quad_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
            ),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(
                vello_cpu::kurbo::Point::new(p1.x, p1.y),
                vello_cpu::kurbo::Point::new(p2.x, p2.y),
                vello_cpu::kurbo::Point::new(p3.x, p3.y),
            ),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn pixmap_from_premul_bytes(
    bytes: &[u8],
    width: u32,
    height: u32,
) -> GodcropResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| GodcropError::render("source width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| GodcropError::render("source height exceeds u16"))?;
    let pixels = bytes
        .chunks_exact(4)
        .map(|px| vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]]))
        .collect::<Vec<_>>();
    if pixels.len() != (width as usize) * (height as usize) {
        return Err(GodcropError::render("source byte length mismatch"));
    }
    let opaque = bytes.chunks_exact(4).all(|px| px[3] == 255);
    Ok(vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, !opaque))
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
