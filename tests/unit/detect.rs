use super::*;

struct Canned(GodcropResult<String>);

impl SubjectDetector for Canned {
    fn detect(&mut self, _request: &DetectionRequest) -> GodcropResult<String> {
        match &self.0 {
            Ok(s) => Ok(s.clone()),
            Err(e) => Err(GodcropError::detection(e.to_string())),
        }
    }
}

fn request() -> DetectionRequest {
    DetectionRequest {
        bytes: vec![0xff, 0xd8],
        mime_type: "image/jpeg".to_string(),
    }
}

#[test]
fn parses_box_and_maps_to_region() {
    let b = parse_subject_box(" [100, 200, 600, 900]\n").unwrap();
    assert_eq!(
        b,
        SubjectBox {
            ymin: 100.0,
            xmin: 200.0,
            ymax: 600.0,
            xmax: 900.0
        }
    );
    let r = b.to_region();
    assert_eq!(r.x, 0.2);
    assert_eq!(r.y, 0.1);
    assert!((r.width - 0.7).abs() < 1e-12);
    assert!((r.height - 0.5).abs() < 1e-12);
}

#[test]
fn rejects_malformed_responses() {
    for text in [
        "",
        "not json",
        r#"{"box": [1, 2, 3, 4]}"#,
        "[1, 2, 3]",
        "[1, 2, 3, 4, 5]",
        r#"[1, "2", 3, 4]"#,
        "[0, 0, 1001, 10]",
        "[-1, 0, 10, 10]",
        "[500, 0, 100, 10]",
    ] {
        let err = parse_subject_box(text).unwrap_err();
        assert!(matches!(err, GodcropError::Detection(_)), "{text}");
    }
}

#[test]
fn successful_detection_updates_only_the_region() {
    let mut state = CropState {
        corner_radius: 30.0,
        ..CropState::default()
    };
    let mut det = Canned(Ok("[0, 250, 500, 750]".to_string()));
    assert!(apply_subject_detection(&mut state, &mut det, &request()));
    assert_eq!(state.x, 0.25);
    assert_eq!(state.y, 0.0);
    assert_eq!(state.width, 0.5);
    assert_eq!(state.height, 0.5);
    assert_eq!(state.corner_radius, 30.0);
}

#[test]
fn malformed_response_leaves_state_unchanged() {
    let before = CropState::default();
    let mut state = before.clone();
    let mut det = Canned(Ok("[1, 2]".to_string()));
    assert!(!apply_subject_detection(&mut state, &mut det, &request()));
    assert_eq!(state, before);

    let mut det = Canned(Err(GodcropError::detection("offline")));
    assert!(!apply_subject_detection(&mut state, &mut det, &request()));
    assert_eq!(state, before);
}

#[test]
fn request_from_path_infers_mime() {
    let dir = std::env::temp_dir().join(format!("godcrop_detect_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let p = dir.join("photo.png");
    std::fs::write(&p, b"\x89PNG").unwrap();
    let req = DetectionRequest::from_path(&p).unwrap();
    assert_eq!(req.mime_type, "image/png");
    assert_eq!(req.bytes.len(), 4);
    assert!(req.prompt().contains("ymin"));
    let _ = std::fs::remove_dir_all(&dir);
}
