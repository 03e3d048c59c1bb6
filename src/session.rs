//! Editor session: the state behind one open editor and its latest composite.

use crate::assets::library::{ImageEntry, ImageId, ImageLibrary};
use crate::detect::{DetectionRequest, SubjectDetector, apply_subject_detection};
use crate::export::ExportConfig;
use crate::export::sink::ExportSink;
use crate::foundation::core::FrameGeometry;
use crate::foundation::error::{GodcropError, GodcropResult};
use crate::render::cpu::{CompositeOpts, CompositeRenderer, RenderOutput};
use crate::render::watermark::WatermarkDescriptor;
use crate::scene::state::{CropState, ShapeConfig, ShapePreset};

/// Size of the area the frame is laid out in, in logical pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Container {
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

/// Loaded images, crop and watermark settings, and the composite derived from them.
///
/// Every mutation re-derives the frame and re-renders the whole composite; nothing is diffed.
#[derive(Debug)]
pub struct EditorSession {
    renderer: CompositeRenderer,
    library: ImageLibrary,
    crop: CropState,
    watermark: WatermarkDescriptor,
    export: ExportConfig,
    container: Container,
    current: Option<RenderOutput>,
}

impl EditorSession {
    /// Start an empty session.
    pub fn new(container: Container, opts: CompositeOpts) -> GodcropResult<Self> {
        Ok(Self {
            renderer: CompositeRenderer::new(opts)?,
            library: ImageLibrary::new(),
            crop: CropState::default(),
            watermark: WatermarkDescriptor::default(),
            export: ExportConfig::default(),
            container,
            current: None,
        })
    }

    /// Loaded images.
    pub fn library(&self) -> &ImageLibrary {
        &self.library
    }

    /// Crop state.
    pub fn crop(&self) -> &CropState {
        &self.crop
    }

    /// Watermark settings.
    pub fn watermark(&self) -> &WatermarkDescriptor {
        &self.watermark
    }

    /// Export settings.
    pub fn export_config(&self) -> &ExportConfig {
        &self.export
    }

    /// Latest composite, if an image is selected and ready.
    pub fn current(&self) -> Option<&RenderOutput> {
        self.current.as_ref()
    }

    /// Add a decoded image; the first image added becomes the selection.
    pub fn add_image(&mut self, entry: ImageEntry) -> GodcropResult<()> {
        self.commit(|s| s.library.add(entry))
    }

    /// Select a loaded image. Unknown ids are ignored.
    pub fn select_image(&mut self, id: ImageId) -> GodcropResult<()> {
        if !self.library.entries().iter().any(|e| e.id() == id) {
            return Ok(());
        }
        self.commit(|s| {
            s.library.select(id);
        })
    }

    /// Drop every image and the composite.
    pub fn clear_images(&mut self) {
        self.library.clear();
        self.current = None;
    }

    /// Resize the layout container.
    pub fn set_container(&mut self, container: Container) -> GodcropResult<()> {
        self.commit(|s| s.container = container)
    }

    /// Pick an aspect ratio (`0` for free).
    pub fn set_aspect_ratio(&mut self, aspect_ratio: f64) -> GodcropResult<()> {
        self.commit(|s| s.crop.aspect_ratio = aspect_ratio)
    }

    /// Pick a shape preset.
    pub fn set_shape(&mut self, shape: ShapePreset) -> GodcropResult<()> {
        self.commit(|s| s.crop.shape = shape)
    }

    /// Set the corner radius used by the rounded preset.
    pub fn set_corner_radius(&mut self, corner_radius: f64) -> GodcropResult<()> {
        self.commit(|s| s.crop.corner_radius = corner_radius)
    }

    /// Edit shape parameters in place.
    pub fn update_shape_config(&mut self, f: impl FnOnce(&mut ShapeConfig)) -> GodcropResult<()> {
        self.commit(|s| f(&mut s.crop.shape_config))
    }

    /// Replace the whole crop state.
    pub fn set_crop(&mut self, crop: CropState) -> GodcropResult<()> {
        self.commit(|s| s.crop = crop)
    }

    /// Replace the watermark settings.
    pub fn set_watermark(&mut self, watermark: WatermarkDescriptor) -> GodcropResult<()> {
        self.commit(|s| s.watermark = watermark)
    }

    /// Replace the export settings. Does not re-render.
    pub fn set_export_config(&mut self, export: ExportConfig) {
        self.export = export;
    }

    /// Frame for the selected image, or `None` when nothing is selected or the selected image
    /// has not finished loading.
    pub fn frame(&self) -> GodcropResult<Option<FrameGeometry>> {
        let Some(entry) = self.library.selected() else {
            return Ok(None);
        };
        if !entry.image().is_ready() {
            return Ok(None);
        }
        self.crop
            .frame_in(
                self.container.width,
                self.container.height,
                entry.image().size(),
            )
            .map(Some)
    }

    /// Re-derive the frame and re-render the composite from scratch.
    pub fn refresh(&mut self) -> GodcropResult<()> {
        let Some(frame) = self.frame()? else {
            self.current = None;
            return Ok(());
        };
        let Some(entry) = self.library.selected() else {
            self.current = None;
            return Ok(());
        };
        let shape = self.crop.shape_descriptor();
        self.current = self
            .renderer
            .render(entry.image(), frame, &shape, &self.watermark)?;
        Ok(())
    }

    /// Apply `edit`, validate and re-render. On failure every edited field is restored and the
    /// previous composite stays current.
    fn commit(&mut self, edit: impl FnOnce(&mut Self)) -> GodcropResult<()> {
        let library = self.library.clone();
        let crop = self.crop.clone();
        let watermark = self.watermark.clone();
        let container = self.container;

        edit(self);
        let res = self.check().and_then(|()| self.refresh());
        if res.is_err() {
            self.library = library;
            self.crop = crop;
            self.watermark = watermark;
            self.container = container;
        }
        res
    }

    /// Checks that hold whether or not an image is selected.
    fn check(&self) -> GodcropResult<()> {
        FrameGeometry::check_layout(
            self.container.width,
            self.container.height,
            self.crop.aspect_ratio,
        )?;
        self.renderer.check_watermark(&self.watermark)
    }

    /// Ask `detector` for the subject of the selected image and move the crop region onto it.
    ///
    /// Failures are logged and leave the crop state unchanged. Returns `true` when it changed.
    pub fn detect_subject(
        &mut self,
        detector: &mut dyn SubjectDetector,
        request: &DetectionRequest,
    ) -> GodcropResult<bool> {
        if self.library.selected().is_none() {
            tracing::debug!("no image selected, skipping detection");
            return Ok(false);
        }
        if !apply_subject_detection(&mut self.crop, detector, request) {
            return Ok(false);
        }
        self.refresh()?;
        Ok(true)
    }

    /// Encode the current composite into `sink` with the session's export settings.
    pub fn export_to(&self, sink: &mut dyn ExportSink) -> GodcropResult<()> {
        let out = self
            .current
            .as_ref()
            .ok_or_else(|| GodcropError::validation("nothing to export: no composite rendered"))?;
        sink.export(out, &self.export)
    }
}

#[cfg(test)]
#[path = "../tests/unit/session.rs"]
mod tests;
