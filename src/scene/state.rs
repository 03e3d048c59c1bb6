use serde::{Deserialize, Serialize};

use crate::foundation::core::{FrameGeometry, ImageSize};
use crate::foundation::error::GodcropResult;
use crate::shape::descriptor::ShapeDescriptor;

/// Named shape the user picks in the editor.
///
/// Names without dedicated geometry (`ellipse`, `bubble`, `shield`, `teardrop`, `location`,
/// `cloud`, `wave`) map to the full-frame rectangle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShapePreset {
    /// Full-frame rectangle.
    #[default]
    Square,
    /// Circle with the shorter side as diameter.
    Circle,
    /// Full frame; no dedicated geometry.
    Ellipse,
    /// Rectangle with the configured corner radius.
    Rounded,
    /// Stadium: corner radius of half the shorter side.
    Pill,
    /// Rectangle with a corner radius of 28% of the shorter side.
    Squircle,
    /// Triangle with a vertex on top.
    Triangle,
    /// Square rotated onto its vertices.
    Diamond,
    /// Five-sided polygon.
    Pentagon,
    /// Six-sided polygon.
    Hexagon,
    /// Eight-sided polygon.
    Octagon,
    /// Polygon with the configured side count.
    Polygon,
    /// Star with the configured points and inner radius.
    Star,
    /// Heart.
    Heart,
    /// Full frame; no dedicated geometry.
    Bubble,
    /// Full frame; no dedicated geometry.
    Shield,
    /// Scalloped 24-point star.
    Badge,
    /// Full frame; no dedicated geometry.
    Teardrop,
    /// Full frame; no dedicated geometry.
    Location,
    /// Full frame; no dedicated geometry.
    Cloud,
    /// Seeded organic outline with the configured complexity.
    Blob,
    /// Full frame; no dedicated geometry.
    Wave,
    /// Seeded organic outline with the configured complexity.
    Liquid,
    /// Custom SVG path data.
    SvgPath,
    /// Tilted ellipse placeholder for a subject cutout.
    AiCutout,
}

impl ShapePreset {
    /// Presets offered in the shape picker, in display order.
    pub const PICKER: [ShapePreset; 15] = [
        ShapePreset::Square,
        ShapePreset::Circle,
        ShapePreset::Rounded,
        ShapePreset::Pill,
        ShapePreset::Squircle,
        ShapePreset::Triangle,
        ShapePreset::Diamond,
        ShapePreset::Pentagon,
        ShapePreset::Hexagon,
        ShapePreset::Octagon,
        ShapePreset::Star,
        ShapePreset::Heart,
        ShapePreset::Blob,
        ShapePreset::Liquid,
        ShapePreset::SvgPath,
    ];

    /// Return `true` when the preset's slider edits the corner radius rather than complexity.
    pub fn uses_corner_radius(self) -> bool {
        self == ShapePreset::Rounded
    }

    /// Return `true` for the organic presets whose slider edits complexity.
    pub fn uses_complexity(self) -> bool {
        matches!(self, ShapePreset::Blob | ShapePreset::Liquid)
    }
}

/// Per-shape parameters that survive switching between presets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeConfig {
    /// Sides of the free polygon.
    pub sides: u32,
    /// Star points.
    pub points: u32,
    /// Star inner radius ratio.
    pub inner_radius: f64,
    /// Organic seed.
    pub seed: f64,
    /// Custom SVG path data.
    pub svg_path: Option<String>,
    /// Organic control point count.
    pub complexity: u32,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            sides: 5,
            points: 5,
            inner_radius: 0.5,
            seed: 0.5,
            svg_path: None,
            complexity: 8,
        }
    }
}

/// Normalized subject rectangle, each component nominally in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CropRegion {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Default for CropRegion {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 1.0,
            height: 1.0,
        }
    }
}

/// Everything the editor knows about the current crop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropState {
    /// Normalized crop region left edge.
    pub x: f64,
    /// Normalized crop region top edge.
    pub y: f64,
    /// Normalized crop region width.
    pub width: f64,
    /// Normalized crop region height.
    pub height: f64,
    /// Rotation in degrees. Carried; not applied by the compositor.
    pub rotation: f64,
    /// Zoom. Carried; not applied by the compositor.
    pub scale: f64,
    /// `width / height` of the frame; `0` is "free".
    pub aspect_ratio: f64,
    /// Selected shape.
    pub shape: ShapePreset,
    /// Corner radius for [`ShapePreset::Rounded`].
    pub corner_radius: f64,
    /// Shape parameters.
    pub shape_config: ShapeConfig,
}

impl Default for CropState {
    fn default() -> Self {
        let region = CropRegion::default();
        Self {
            x: region.x,
            y: region.y,
            width: region.width,
            height: region.height,
            rotation: 0.0,
            scale: 1.0,
            aspect_ratio: 1.0,
            shape: ShapePreset::Square,
            corner_radius: 12.0,
            shape_config: ShapeConfig::default(),
        }
    }
}

impl CropState {
    /// Current crop region.
    pub fn region(&self) -> CropRegion {
        CropRegion {
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
        }
    }

    /// Replace the crop region, leaving every other field untouched.
    pub fn set_region(&mut self, region: CropRegion) {
        self.x = region.x;
        self.y = region.y;
        self.width = region.width;
        self.height = region.height;
    }

    /// Shape descriptor for the selected preset and current parameters.
    pub fn shape_descriptor(&self) -> ShapeDescriptor {
        let cfg = &self.shape_config;
        match self.shape {
            ShapePreset::Square => ShapeDescriptor::Rect,
            ShapePreset::Circle => ShapeDescriptor::Circle,
            ShapePreset::Rounded => ShapeDescriptor::Rounded {
                corner_radius: self.corner_radius,
            },
            ShapePreset::Pill => ShapeDescriptor::Pill,
            ShapePreset::Squircle => ShapeDescriptor::Squircle,
            ShapePreset::Triangle => ShapeDescriptor::triangle(),
            ShapePreset::Diamond => ShapeDescriptor::diamond(),
            ShapePreset::Pentagon => ShapeDescriptor::pentagon(),
            ShapePreset::Hexagon => ShapeDescriptor::hexagon(),
            ShapePreset::Octagon => ShapeDescriptor::octagon(),
            ShapePreset::Polygon => ShapeDescriptor::polygon(cfg.sides),
            ShapePreset::Star => ShapeDescriptor::Star {
                points: cfg.points,
                inner_radius_ratio: cfg.inner_radius,
            },
            ShapePreset::Heart => ShapeDescriptor::Heart,
            ShapePreset::Badge => ShapeDescriptor::badge(),
            ShapePreset::Blob | ShapePreset::Liquid => ShapeDescriptor::Organic {
                seed: cfg.seed,
                complexity: cfg.complexity,
            },
            ShapePreset::SvgPath => ShapeDescriptor::CustomPath {
                path_data: cfg.svg_path.clone(),
            },
            ShapePreset::AiCutout => ShapeDescriptor::EllipseApprox,
            ShapePreset::Ellipse
            | ShapePreset::Bubble
            | ShapePreset::Shield
            | ShapePreset::Teardrop
            | ShapePreset::Location
            | ShapePreset::Cloud
            | ShapePreset::Wave => ShapeDescriptor::Rect,
        }
    }

    /// Frame for this state's aspect ratio inside a container.
    pub fn frame_in(
        &self,
        container_width: f64,
        container_height: f64,
        source: ImageSize,
    ) -> GodcropResult<FrameGeometry> {
        FrameGeometry::fit_container(container_width, container_height, self.aspect_ratio, source)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/state.rs"]
mod tests;
