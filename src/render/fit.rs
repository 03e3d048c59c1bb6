use crate::foundation::core::{FrameGeometry, ImageSize, Rect};

/// Placement of a source image that covers `frame` completely ("cover" fit).
///
/// Images wider than the frame are scaled to the frame height and centered horizontally; all
/// others are scaled to the frame width and centered vertically. Overflow lands outside the frame
/// and is removed by the clip. Returns `None` while the image is not ready.
pub fn cover_fit(image: ImageSize, frame: FrameGeometry) -> Option<Rect> {
    let image_ratio = image.ratio()?;
    let (fw, fh) = (frame.width(), frame.height());

    let rect = if image_ratio > frame.ratio() {
        let draw_w = fh * image_ratio;
        let x = (fw - draw_w) / 2.0;
        Rect::new(x, 0.0, x + draw_w, fh)
    } else {
        let draw_h = fw / image_ratio;
        let y = (fh - draw_h) / 2.0;
        Rect::new(0.0, y, fw, y + draw_h)
    };
    Some(rect)
}

#[cfg(test)]
#[path = "../../tests/unit/render/fit.rs"]
mod tests;
