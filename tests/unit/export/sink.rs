use super::*;
use crate::export::ExportFormat;
use crate::foundation::core::FrameGeometry;
use crate::shape::path::ClosedPath;

fn output() -> RenderOutput {
    RenderOutput {
        width: 2,
        height: 1,
        density: 1.0,
        frame: FrameGeometry::new(2.0, 1.0).unwrap(),
        data: vec![255, 0, 0, 255, 0, 0, 0, 0],
        boundary: ClosedPath::empty(),
    }
}

#[test]
fn in_memory_sink_collects_files() {
    let mut sink = InMemorySink::new();
    let png = ExportConfig {
        format: ExportFormat::Png,
        ..ExportConfig::default()
    };
    sink.export(&output(), &png).unwrap();
    sink.export(&output(), &ExportConfig::default()).unwrap();
    assert_eq!(sink.files().len(), 2);
    assert_eq!(sink.files()[0].0.format, ExportFormat::Png);
    assert_eq!(&sink.files()[1].1[..2], &[0xff, 0xd8]);
}

#[test]
fn file_sink_creates_parent_dirs() {
    let dir = std::env::temp_dir().join(format!("godcrop_sink_{}", std::process::id()));
    let path = dir.join("nested").join("out.png");
    let mut sink = FileExportSink::new(&path);
    let cfg = ExportConfig {
        format: ExportFormat::Png,
        ..ExportConfig::default()
    };
    sink.export(&output(), &cfg).unwrap();
    assert_eq!(sink.path(), path.as_path());

    let img = image::open(&path).unwrap().to_rgba8();
    assert_eq!(img.get_pixel(0, 0).0, [255, 0, 0, 255]);
    assert_eq!(img.get_pixel(1, 0).0[3], 0);
    let _ = std::fs::remove_dir_all(&dir);
}
