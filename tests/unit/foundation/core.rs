use super::*;

#[test]
fn frame_rejects_degenerate_sizes() {
    assert!(FrameGeometry::new(0.0, 10.0).is_err());
    assert!(FrameGeometry::new(10.0, -1.0).is_err());
    assert!(FrameGeometry::new(f64::NAN, 10.0).is_err());
    assert!(FrameGeometry::new(f64::INFINITY, 10.0).is_err());
    assert!(FrameGeometry::new(1.0, 1.0).is_ok());
}

#[test]
fn frame_helpers() {
    let f = FrameGeometry::new(300.0, 200.0).unwrap();
    assert_eq!(f.short_side(), 200.0);
    assert_eq!(f.center(), Point::new(150.0, 100.0));
    assert_eq!(f.rect(), Rect::new(0.0, 0.0, 300.0, 200.0));
    assert!((f.ratio() - 1.5).abs() < 1e-12);
}

#[test]
fn fit_container_width_limited() {
    let f = FrameGeometry::fit_container(440.0, 440.0, 16.0 / 9.0, ImageSize::default()).unwrap();
    assert!((f.width() - 400.0).abs() < 1e-9);
    assert!((f.height() - 225.0).abs() < 1e-9);
}

#[test]
fn fit_container_height_limited() {
    let f = FrameGeometry::fit_container(440.0, 240.0, 1.0, ImageSize::default()).unwrap();
    assert!((f.width() - 200.0).abs() < 1e-9);
    assert!((f.height() - 200.0).abs() < 1e-9);
}

#[test]
fn fit_container_free_ratio_uses_source() {
    let src = ImageSize::new(1920, 1080);
    let f = FrameGeometry::fit_container(440.0, 440.0, 0.0, src).unwrap();
    assert!((f.width() - 400.0).abs() < 1e-9);
    assert!((f.height() - 225.0).abs() < 1e-9);

    assert!(FrameGeometry::fit_container(440.0, 440.0, 0.0, ImageSize::default()).is_err());
}

#[test]
fn fit_container_rejects_tiny_containers() {
    assert!(FrameGeometry::fit_container(40.0, 400.0, 1.0, ImageSize::default()).is_err());
    assert!(FrameGeometry::fit_container(400.0, 400.0, -2.0, ImageSize::default()).is_err());
}

#[test]
fn frame_deserialization_is_validated() {
    let f: FrameGeometry = serde_json::from_str(r#"{ "width": 300, "height": 200 }"#).unwrap();
    assert_eq!(f, FrameGeometry::new(300.0, 200.0).unwrap());
    assert!(serde_json::from_str::<FrameGeometry>(r#"{ "width": -1, "height": 5 }"#).is_err());
    assert!(serde_json::from_str::<FrameGeometry>(r#"{ "width": 0, "height": 5 }"#).is_err());
}

#[test]
fn layout_check_needs_no_source() {
    assert!(FrameGeometry::check_layout(440.0, 440.0, 0.0).is_ok());
    assert!(FrameGeometry::check_layout(440.0, 440.0, 1.5).is_ok());
    assert!(FrameGeometry::check_layout(440.0, 440.0, -1.0).is_err());
    assert!(FrameGeometry::check_layout(440.0, 440.0, f64::NAN).is_err());
    assert!(FrameGeometry::check_layout(440.0, 440.0, f64::INFINITY).is_err());
    assert!(FrameGeometry::check_layout(30.0, 440.0, 1.0).is_err());
}

#[test]
fn image_size_ready_and_ratio() {
    assert!(!ImageSize::new(0, 10).is_ready());
    assert_eq!(ImageSize::new(0, 0).ratio(), None);
    assert_eq!(ImageSize::new(4, 2).ratio(), Some(2.0));
}

#[test]
fn premul_rounding() {
    let p = Rgba8Premul::from_straight_rgba(255, 255, 255, 13);
    assert_eq!(p.to_array(), [13, 13, 13, 13]);
    assert_eq!(Rgba8Premul::transparent().to_array(), [0, 0, 0, 0]);
}
