use crate::foundation::error::{GodcropError, GodcropResult};

pub use kurbo::{Affine, BezPath, Point, Rect, Vec2};

/// Padding kept free around the frame on each side of the container, in logical pixels.
pub const CONTAINER_PADDING_PX: f64 = 20.0;

/// Pixel dimensions of a source raster.
///
/// Zero dimensions mean the image has not finished loading.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImageSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ImageSize {
    /// Create a size from pixel dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Return `true` when both dimensions are non-zero.
    pub fn is_ready(self) -> bool {
        self.width > 0 && self.height > 0
    }

    /// Native `width / height` ratio, or `None` while the image is not ready.
    pub fn ratio(self) -> Option<f64> {
        self.is_ready()
            .then(|| f64::from(self.width) / f64::from(self.height))
    }
}

/// Destination canvas size in device-independent (logical) pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct FrameGeometry {
    width: f64,
    height: f64,
}

impl<'de> serde::Deserialize<'de> for FrameGeometry {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Repr {
            width: f64,
            height: f64,
        }

        let Repr { width, height } = <Repr as serde::Deserialize>::deserialize(deserializer)?;
        Self::new(width, height).map_err(serde::de::Error::custom)
    }
}

impl FrameGeometry {
    /// Create a validated frame; both sides must be finite and `> 0`.
    pub fn new(width: f64, height: f64) -> GodcropResult<Self> {
        if !width.is_finite() || !height.is_finite() {
            return Err(GodcropError::validation("frame dimensions must be finite"));
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(GodcropError::validation("frame dimensions must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Derive the frame shown inside a container for a given aspect ratio.
    ///
    /// `aspect_ratio == 0.0` means "free": the source image's native ratio is used instead. The
    /// frame fills the padded container width and shrinks to the padded height when needed.
    pub fn fit_container(
        container_width: f64,
        container_height: f64,
        aspect_ratio: f64,
        source: ImageSize,
    ) -> GodcropResult<Self> {
        Self::check_layout(container_width, container_height, aspect_ratio)?;
        let available_w = container_width - CONTAINER_PADDING_PX * 2.0;
        let available_h = container_height - CONTAINER_PADDING_PX * 2.0;

        let ratio = if aspect_ratio == 0.0 {
            source.ratio().ok_or_else(|| {
                GodcropError::validation("free aspect ratio requires a loaded source image")
            })?
        } else {
            aspect_ratio
        };

        let mut width = available_w;
        let mut height = available_w / ratio;
        if height > available_h {
            height = available_h;
            width = height * ratio;
        }
        Self::new(width, height)
    }

    /// Check the parts of a layout that do not depend on the source image: the padded container
    /// must leave room, and the aspect ratio must be `0` (free) or finite and `> 0`.
    pub fn check_layout(
        container_width: f64,
        container_height: f64,
        aspect_ratio: f64,
    ) -> GodcropResult<()> {
        let available_w = container_width - CONTAINER_PADDING_PX * 2.0;
        let available_h = container_height - CONTAINER_PADDING_PX * 2.0;
        if !(available_w > 0.0 && available_h > 0.0) {
            return Err(GodcropError::validation(format!(
                "container {container_width}x{container_height} leaves no room for a frame"
            )));
        }
        if aspect_ratio != 0.0 && !(aspect_ratio.is_finite() && aspect_ratio > 0.0) {
            return Err(GodcropError::validation(format!(
                "aspect ratio must be finite and > 0, got {aspect_ratio}"
            )));
        }
        Ok(())
    }

    /// Frame width in logical pixels.
    pub fn width(self) -> f64 {
        self.width
    }

    /// Frame height in logical pixels.
    pub fn height(self) -> f64 {
        self.height
    }

    /// `width / height`.
    pub fn ratio(self) -> f64 {
        self.width / self.height
    }

    /// Length of the shorter side.
    pub fn short_side(self) -> f64 {
        self.width.min(self.height)
    }

    /// Frame center in logical coordinates.
    pub fn center(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    /// Full-frame rectangle anchored at the origin.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }
}

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel premultiplied by alpha.
    pub r: u8,
    /// Green channel premultiplied by alpha.
    pub g: u8,
    /// Blue channel premultiplied by alpha.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Convert straight-alpha RGBA8 into premultiplied RGBA8.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Pixel bytes in `[r, g, b, a]` order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
