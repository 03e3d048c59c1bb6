use super::*;

#[test]
fn defaults_match_editor_start_state() {
    let s = CropState::default();
    assert_eq!(s.aspect_ratio, 1.0);
    assert_eq!(s.shape, ShapePreset::Square);
    assert_eq!(s.corner_radius, 12.0);
    assert_eq!(s.shape_config.sides, 5);
    assert_eq!(s.shape_config.points, 5);
    assert_eq!(s.shape_config.inner_radius, 0.5);
    assert_eq!(s.shape_config.complexity, 8);
    assert_eq!(s.region(), CropRegion::default());
    assert_eq!(s.shape_descriptor(), ShapeDescriptor::Rect);
}

#[test]
fn presets_map_to_descriptors() {
    let mut s = CropState::default();
    let cases = [
        (ShapePreset::Circle, ShapeDescriptor::Circle),
        (
            ShapePreset::Rounded,
            ShapeDescriptor::Rounded {
                corner_radius: 12.0,
            },
        ),
        (ShapePreset::Hexagon, ShapeDescriptor::hexagon()),
        (ShapePreset::Diamond, ShapeDescriptor::diamond()),
        (ShapePreset::Polygon, ShapeDescriptor::polygon(5)),
        (
            ShapePreset::Star,
            ShapeDescriptor::Star {
                points: 5,
                inner_radius_ratio: 0.5,
            },
        ),
        (ShapePreset::Badge, ShapeDescriptor::badge()),
        (
            ShapePreset::Liquid,
            ShapeDescriptor::Organic {
                seed: 0.5,
                complexity: 8,
            },
        ),
        (
            ShapePreset::SvgPath,
            ShapeDescriptor::CustomPath { path_data: None },
        ),
        (ShapePreset::AiCutout, ShapeDescriptor::EllipseApprox),
        (ShapePreset::Cloud, ShapeDescriptor::Rect),
        (ShapePreset::Ellipse, ShapeDescriptor::Rect),
    ];
    for (preset, expected) in cases {
        s.shape = preset;
        assert_eq!(s.shape_descriptor(), expected, "{preset:?}");
    }
}

#[test]
fn shape_config_edits_flow_into_descriptor() {
    let mut s = CropState {
        shape: ShapePreset::Polygon,
        ..CropState::default()
    };
    s.shape_config.sides = 9;
    assert_eq!(s.shape_descriptor(), ShapeDescriptor::polygon(9));

    s.shape = ShapePreset::SvgPath;
    s.shape_config.svg_path = Some("M0,0 L10,0 L10,10 Z".to_string());
    assert_eq!(
        s.shape_descriptor(),
        ShapeDescriptor::CustomPath {
            path_data: Some("M0,0 L10,0 L10,10 Z".to_string())
        }
    );
}

#[test]
fn partial_json_fills_defaults() {
    let s: CropState =
        serde_json::from_str(r#"{ "shape": "blob", "shape_config": { "seed": 0.25 } }"#).unwrap();
    assert_eq!(s.shape, ShapePreset::Blob);
    assert_eq!(s.shape_config.seed, 0.25);
    assert_eq!(s.shape_config.complexity, 8);
    assert_eq!(s.corner_radius, 12.0);
    assert!(s.shape.uses_complexity());
    assert!(!s.shape.uses_corner_radius());
}

#[test]
fn frame_uses_aspect_ratio_and_padding() {
    let s = CropState {
        aspect_ratio: 16.0 / 9.0,
        ..CropState::default()
    };
    let f = s.frame_in(440.0, 1000.0, ImageSize::new(0, 0)).unwrap();
    assert_eq!(f.width(), 400.0);
    assert!((f.height() - 225.0).abs() < 1e-9);

    let free = CropState {
        aspect_ratio: 0.0,
        ..CropState::default()
    };
    let f = free.frame_in(1000.0, 440.0, ImageSize::new(300, 200)).unwrap();
    assert_eq!(f.height(), 400.0);
    assert!((f.width() - 600.0).abs() < 1e-9);
    assert!(free.frame_in(1000.0, 440.0, ImageSize::new(0, 0)).is_err());
}

#[test]
fn picker_lists_fifteen_presets() {
    assert_eq!(ShapePreset::PICKER.len(), 15);
    assert!(!ShapePreset::PICKER.contains(&ShapePreset::AiCutout));
}
