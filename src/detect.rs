//! Subject detection seam.
//!
//! The detector itself is an external service. This module owns the request shape, the
//! collaborator trait and defensive parsing of the service's answer.

use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{GodcropError, GodcropResult};
use crate::scene::state::{CropRegion, CropState};

/// Normalization scale of detector coordinates.
pub const SUBJECT_BOX_SCALE: f64 = 1000.0;

/// Instruction sent alongside the image.
pub const SUBJECT_PROMPT: &str = "Return the [ymin, xmin, ymax, xmax] coordinates of the main \
subject of this image in normalized values (0 to 1000). Use JSON format.";

/// One image submitted for detection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetectionRequest {
    /// Encoded image bytes.
    pub bytes: Vec<u8>,
    /// MIME type of `bytes`, e.g. `image/jpeg`.
    pub mime_type: String,
}

impl DetectionRequest {
    /// Build a request from a file, inferring the MIME type from its extension.
    pub fn from_path(path: impl AsRef<Path>) -> GodcropResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).with_context(|| format!("read '{}'", path.display()))?;
        let mime_type = image::ImageFormat::from_path(path)
            .map(|f| f.to_mime_type().to_string())
            .unwrap_or_else(|_| "application/octet-stream".to_string());
        Ok(Self { bytes, mime_type })
    }

    /// Prompt accompanying the image.
    pub fn prompt(&self) -> &'static str {
        SUBJECT_PROMPT
    }
}

/// External subject detector.
///
/// Implementations return the raw response text; parsing stays in this crate.
pub trait SubjectDetector {
    /// Ask the detector for the main subject's bounding box.
    fn detect(&mut self, request: &DetectionRequest) -> GodcropResult<String>;
}

/// Subject bounding box in detector coordinates (`0..=1000` on both axes).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SubjectBox {
    /// Top edge.
    pub ymin: f64,
    /// Left edge.
    pub xmin: f64,
    /// Bottom edge.
    pub ymax: f64,
    /// Right edge.
    pub xmax: f64,
}

impl SubjectBox {
    /// Normalized crop region covering the box.
    pub fn to_region(self) -> CropRegion {
        CropRegion {
            x: self.xmin / SUBJECT_BOX_SCALE,
            y: self.ymin / SUBJECT_BOX_SCALE,
            width: (self.xmax - self.xmin) / SUBJECT_BOX_SCALE,
            height: (self.ymax - self.ymin) / SUBJECT_BOX_SCALE,
        }
    }
}

/// Parse a detector response of the form `[ymin, xmin, ymax, xmax]`.
pub fn parse_subject_box(text: &str) -> GodcropResult<SubjectBox> {
    let v: serde_json::Value = serde_json::from_str(text.trim())
        .map_err(|e| GodcropError::detection(format!("response is not JSON: {e}")))?;
    let arr = v
        .as_array()
        .ok_or_else(|| GodcropError::detection("response is not a JSON array"))?;
    if arr.len() != 4 {
        return Err(GodcropError::detection(format!(
            "expected 4 coordinates, got {}",
            arr.len()
        )));
    }

    let mut c = [0.0f64; 4];
    for (slot, value) in c.iter_mut().zip(arr) {
        let n = value
            .as_f64()
            .ok_or_else(|| GodcropError::detection("coordinate is not a number"))?;
        if !(0.0..=SUBJECT_BOX_SCALE).contains(&n) {
            return Err(GodcropError::detection(format!(
                "coordinate {n} outside 0..={SUBJECT_BOX_SCALE}"
            )));
        }
        *slot = n;
    }

    let [ymin, xmin, ymax, xmax] = c;
    if ymin > ymax || xmin > xmax {
        return Err(GodcropError::detection("box edges are inverted"));
    }
    Ok(SubjectBox {
        ymin,
        xmin,
        ymax,
        xmax,
    })
}

/// Run `detector` and move the crop region onto the detected subject.
///
/// Any failure is logged and leaves `state` unchanged. Returns `true` when the region changed.
#[tracing::instrument(skip_all, fields(mime = %request.mime_type, bytes = request.bytes.len()))]
pub fn apply_subject_detection(
    state: &mut CropState,
    detector: &mut dyn SubjectDetector,
    request: &DetectionRequest,
) -> bool {
    let text = match detector.detect(request) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(error = %e, "subject detection failed");
            return false;
        }
    };
    match parse_subject_box(&text) {
        Ok(b) => {
            let region = b.to_region();
            tracing::debug!(?region, "subject detected");
            state.set_region(region);
            true
        }
        Err(e) => {
            tracing::warn!(error = %e, "ignoring detection response");
            false
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/detect.rs"]
mod tests;
