use super::*;
use crate::render::watermark::WatermarkKind;

fn solid(w: u32, h: u32, rgba: [u8; 4]) -> SourceImage {
    let mut bytes = Vec::with_capacity((w * h * 4) as usize);
    for _ in 0..w * h {
        bytes.extend_from_slice(&rgba);
    }
    SourceImage::from_rgba8(w, h, bytes).unwrap()
}

fn frame(w: f64, h: f64) -> FrameGeometry {
    FrameGeometry::new(w, h).unwrap()
}

fn renderer() -> CompositeRenderer {
    CompositeRenderer::new(CompositeOpts::default()).unwrap()
}

fn fixture_font() -> WatermarkFont {
    WatermarkFont::from_path(concat!(
        env!("CARGO_MANIFEST_DIR"),
        "/tests/fixtures/fonts/DejaVuSans-Bold.ttf"
    ))
    .unwrap()
}

#[test]
fn pending_image_renders_nothing() {
    let mut r = renderer();
    let out = r
        .render(
            &SourceImage::pending(),
            frame(100.0, 100.0),
            &ShapeDescriptor::Circle,
            &WatermarkDescriptor::default(),
        )
        .unwrap();
    assert!(out.is_none());
}

#[test]
fn circle_clips_corners() {
    let mut r = renderer();
    let out = r
        .render(
            &solid(64, 64, [255, 0, 0, 255]),
            frame(100.0, 100.0),
            &ShapeDescriptor::Circle,
            &WatermarkDescriptor::default(),
        )
        .unwrap()
        .unwrap();
    assert_eq!((out.width, out.height), (100, 100));
    assert_eq!(out.data.len(), 100 * 100 * 4);
    assert_eq!(out.pixel(50, 50), Some([255, 0, 0, 255]));
    assert_eq!(out.pixel(0, 0), Some([0, 0, 0, 0]));
    assert_eq!(out.pixel(99, 99), Some([0, 0, 0, 0]));
    assert_eq!(out.pixel(100, 0), None);
}

#[test]
fn rendering_is_idempotent() {
    let mut r = renderer();
    let img = solid(30, 20, [10, 200, 30, 255]);
    let shape = ShapeDescriptor::Organic {
        seed: 0.77,
        complexity: 8,
    };
    let wm = WatermarkDescriptor::default();
    let a = r.render(&img, frame(120.0, 80.0), &shape, &wm).unwrap().unwrap();
    let b = r.render(&img, frame(120.0, 80.0), &shape, &wm).unwrap().unwrap();
    assert_eq!(a.data, b.data);
    assert_eq!(a.boundary, b.boundary);
}

#[test]
fn edge_stroke_is_faint_white() {
    let mut r = renderer();
    let out = r
        .render(
            &solid(8, 8, [0, 0, 0, 255]),
            frame(40.0, 40.0),
            &ShapeDescriptor::Rect,
            &WatermarkDescriptor::default(),
        )
        .unwrap()
        .unwrap();
    // Interior stays black.
    assert_eq!(out.pixel(20, 20), Some([0, 0, 0, 255]));
    // Border pixel picks up a little white.
    let edge = out.pixel(0, 20).unwrap();
    assert!(edge[0] > 0 && edge[0] < 16, "edge {edge:?}");
}

#[test]
fn density_scales_physical_size() {
    let mut r = CompositeRenderer::new(CompositeOpts::default().with_density(2.5)).unwrap();
    let out = r
        .render(
            &solid(4, 4, [0, 0, 255, 255]),
            frame(101.0, 40.0),
            &ShapeDescriptor::Rect,
            &WatermarkDescriptor::default(),
        )
        .unwrap()
        .unwrap();
    assert_eq!((out.width, out.height), (253, 100));
    assert_eq!(out.density, 2.5);
    assert_eq!(out.frame, frame(101.0, 40.0));
    assert_eq!(out.pixel(126, 50), Some([0, 0, 255, 255]));
}

#[test]
fn degenerate_polygon_is_fully_transparent() {
    let mut r = renderer();
    let out = r
        .render(
            &solid(16, 16, [255, 255, 255, 255]),
            frame(50.0, 50.0),
            &ShapeDescriptor::RegularPolygon {
                sides: 2,
                start_angle: 0.0,
            },
            &WatermarkDescriptor::default(),
        )
        .unwrap()
        .unwrap();
    assert!(out.boundary.is_empty());
    assert!(out.data.iter().all(|&b| b == 0));
}

#[test]
fn oversized_frame_is_a_render_error() {
    let mut r = renderer();
    let err = r
        .render(
            &solid(2, 2, [0, 0, 0, 255]),
            frame(70_000.0, 10.0),
            &ShapeDescriptor::Rect,
            &WatermarkDescriptor::default(),
        )
        .unwrap_err();
    assert!(matches!(err, GodcropError::Render(_)));
}

#[test]
fn invalid_density_is_rejected() {
    for d in [0.0, -1.0, f64::NAN, f64::INFINITY] {
        assert!(CompositeRenderer::new(CompositeOpts::default().with_density(d)).is_err());
    }
}

#[test]
fn visible_watermark_without_font_is_an_error() {
    let mut r = renderer();
    let img = solid(10, 10, [50, 60, 70, 255]);
    let f = frame(300.0, 200.0);
    let wm = WatermarkDescriptor::text("GOD CROP", 0.5);
    assert!(r.check_watermark(&wm).is_err());
    let err = r.render(&img, f, &ShapeDescriptor::Rect, &wm).unwrap_err();
    assert!(matches!(err, GodcropError::Validation(_)));

    // Nothing visible, so no font needed.
    for wm in [
        WatermarkDescriptor::default(),
        WatermarkDescriptor::text("GOD CROP", 0.0),
        WatermarkDescriptor::text("  ", 1.0),
    ] {
        r.check_watermark(&wm).unwrap();
        assert!(r.render(&img, f, &ShapeDescriptor::Rect, &wm).unwrap().is_some());
    }
}

#[test]
fn watermark_draws_in_bottom_right_corner_at_half_opacity() {
    let mut r =
        CompositeRenderer::new(CompositeOpts::default().with_watermark_font(fixture_font()))
            .unwrap();
    let img = solid(10, 10, [0, 0, 0, 255]);
    let f = frame(300.0, 200.0);
    let plain = r
        .render(&img, f, &ShapeDescriptor::Rect, &WatermarkDescriptor::default())
        .unwrap()
        .unwrap();
    let marked = r
        .render(
            &img,
            f,
            &ShapeDescriptor::Rect,
            &WatermarkDescriptor::text("GOD CROP", 0.5),
        )
        .unwrap()
        .unwrap();
    assert_ne!(plain.data, marked.data);

    // Text ends at x = 288 with its baseline at y = 188.
    let (mut max_x, mut max_red) = (0, 0);
    for y in 0..marked.height {
        for x in 0..marked.width {
            if plain.pixel(x, y) != marked.pixel(x, y) {
                assert!(x >= 150 && x <= 289, "changed pixel at ({x}, {y})");
                assert!(y >= 170 && y <= 192, "changed pixel at ({x}, {y})");
                max_x = max_x.max(x);
                max_red = max_red.max(marked.pixel(x, y).unwrap()[0]);
            }
        }
    }
    assert!((284..=288).contains(&max_x), "rightmost lit column {max_x}");
    // White at 50% over opaque black.
    assert!((126..=129).contains(&max_red), "peak red {max_red}");

    // Image-kind watermarks are not drawn.
    let mut logo = WatermarkDescriptor::text("GOD CROP", 1.0);
    logo.kind = WatermarkKind::Image;
    let img_kind = r
        .render(&img, f, &ShapeDescriptor::Rect, &logo)
        .unwrap()
        .unwrap();
    assert_eq!(plain.data, img_kind.data);
}
