use std::sync::Arc;

use anyhow::Context;

use crate::foundation::core::ImageSize;
use crate::foundation::error::{GodcropError, GodcropResult};
use crate::foundation::math::Fnv1a64;

/// Source raster in premultiplied RGBA8 form.
///
/// A source with zero dimensions is "pending": it stands for an image that has not finished
/// loading, and renders of it are no-ops.
#[derive(Clone, Debug)]
pub struct SourceImage {
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
    key: u64,
}

impl SourceImage {
    /// A source that has not finished loading.
    pub fn pending() -> Self {
        Self {
            width: 0,
            height: 0,
            rgba8_premul: Arc::new(Vec::new()),
            key: 0,
        }
    }

    /// Build from tightly packed straight-alpha RGBA8 pixels.
    pub fn from_rgba8(width: u32, height: u32, mut rgba8: Vec<u8>) -> GodcropResult<Self> {
        premultiply_rgba8_in_place(&mut rgba8);
        Self::from_rgba8_premul(width, height, rgba8)
    }

    /// Build from tightly packed premultiplied RGBA8 pixels.
    pub fn from_rgba8_premul(width: u32, height: u32, rgba8_premul: Vec<u8>) -> GodcropResult<Self> {
        let expected = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        if rgba8_premul.len() != expected {
            return Err(GodcropError::decode(format!(
                "pixel buffer is {} bytes, expected {expected} for {width}x{height}",
                rgba8_premul.len()
            )));
        }

        let mut h = Fnv1a64::new_default();
        h.write_u64(u64::from(width));
        h.write_u64(u64::from(height));
        h.write_bytes(&rgba8_premul);
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
            key: h.finish(),
        })
    }

    /// Native pixel dimensions.
    pub fn size(&self) -> ImageSize {
        ImageSize::new(self.width, self.height)
    }

    /// Return `true` once the image has non-zero dimensions.
    pub fn is_ready(&self) -> bool {
        self.size().is_ready()
    }

    /// Pixel bytes in row-major premultiplied RGBA8.
    pub fn rgba8_premul(&self) -> &[u8] {
        &self.rgba8_premul
    }

    /// Content hash of dimensions and pixels.
    pub(crate) fn key(&self) -> u64 {
        self.key
    }
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> GodcropResult<SourceImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    SourceImage::from_rgba8(width, height, rgba.into_raw())
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
