//! godcrop crops images to shapes.
//!
//! The engine turns a frame size and a declarative [`ShapeDescriptor`] into a clip boundary,
//! cover-fits a source image into the frame, strokes a hairline edge, draws an optional text
//! watermark and rasterizes the result at any device pixel density:
//!
//! - Build boundaries with [`build_path`]
//! - Composite with a [`CompositeRenderer`]
//! - Drive everything from an [`EditorSession`] or a JSON [`CropJob`]
//! - Encode through an [`ExportSink`]
#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod assets;
pub mod detect;
pub mod export;
mod foundation;
pub mod job;
pub mod render;
pub mod scene;
pub mod session;
pub mod shape;

pub use crate::foundation::core::{
    Affine, BezPath, CONTAINER_PADDING_PX, FrameGeometry, ImageSize, Point, Rect, Rgba8Premul,
    Vec2,
};
pub use crate::foundation::error::{GodcropError, GodcropResult};

pub use crate::assets::decode::{SourceImage, decode_image};
pub use crate::assets::library::{ImageEntry, ImageId, ImageLibrary};
pub use crate::detect::{
    DetectionRequest, SubjectBox, SubjectDetector, apply_subject_detection, parse_subject_box,
};
pub use crate::export::sink::{ExportSink, FileExportSink, InMemorySink};
pub use crate::export::{ExportConfig, ExportFormat, encode_output};
pub use crate::job::CropJob;
pub use crate::render::cpu::{CompositeOpts, CompositeRenderer, RenderOutput};
pub use crate::render::fit::cover_fit;
pub use crate::render::watermark::{
    WatermarkDescriptor, WatermarkFont, WatermarkKind, WatermarkPosition, watermark_origin,
};
pub use crate::scene::presets::{AspectCategory, AspectRatioPreset, aspect_presets, find_aspect};
pub use crate::scene::state::{CropRegion, CropState, ShapeConfig, ShapePreset};
pub use crate::session::{Container, EditorSession};
pub use crate::shape::builder::{build_path, effective_corner_radius};
pub use crate::shape::descriptor::ShapeDescriptor;
pub use crate::shape::path::ClosedPath;
