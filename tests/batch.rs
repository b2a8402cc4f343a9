use std::fs;
use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use image_convert::action::convert::{ArchiveDecision, ConversionAdapter};
use image_convert::config::config::TargetFormat;
use image_convert::config::ports::{AppConfig, ConversionPort};
use image_convert::error::ConvertError;
use zip::{CompressionMethod, ZipArchive};

fn write_png(path: &Path, seed: u8) {
    let img = RgbaImage::from_fn(6, 5, |x, y| Rgba([seed, x as u8 * 30, y as u8 * 40, 255]));
    let mut buffer = Vec::new();
    DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buffer), ImageFormat::Png)
        .unwrap();
    fs::write(path, buffer).unwrap();
}

fn config(inputs: Vec<String>, output: &Path, format: TargetFormat, zip: bool) -> AppConfig {
    AppConfig {
        inputs,
        output: output.to_string_lossy().to_string(),
        format,
        compress: false,
        max_size_mb: 1.0,
        use_worker: true,
        export_archive: zip,
        archive_compression: CompressionMethod::Stored,
        include: vec!["*.png".to_string()],
        exclude: None,
        no_progress: true,
    }
}

fn entries(dir: &Path) -> Vec<String> {
    let mut names: Vec<_> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

#[test]
fn directory_batch_writes_outputs_and_archive() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    write_png(&src.path().join("c.png"), 3);
    write_png(&src.path().join("a.png"), 1);
    write_png(&src.path().join("b.png"), 2);

    let adapter = ConversionAdapter::new(ArchiveDecision::FromConfig);
    adapter
        .execute(config(
            vec![src.path().to_string_lossy().to_string()],
            out.path(),
            TargetFormat::Jpeg,
            true,
        ))
        .unwrap();

    assert_eq!(entries(out.path()), vec!["a.jpeg", "b.jpeg", "c.jpeg", "files.zip"]);

    let zip_bytes = fs::read(out.path().join("files.zip")).unwrap();
    let mut archive = ZipArchive::new(Cursor::new(zip_bytes)).unwrap();
    let names: Vec<_> = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_string())
        .collect();
    assert_eq!(names, vec!["a.jpeg", "b.jpeg", "c.jpeg"]);

    let decoded = image::load_from_memory(&fs::read(out.path().join("b.jpeg")).unwrap()).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (6, 5));
}

#[test]
fn single_output_never_writes_archive() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let input = src.path().join("only.png");
    write_png(&input, 9);

    ConversionAdapter::new(ArchiveDecision::FromConfig)
        .execute(config(
            vec![input.to_string_lossy().to_string()],
            out.path(),
            TargetFormat::Svg,
            true,
        ))
        .unwrap();

    assert_eq!(entries(out.path()), vec!["only.svg"]);
    let svg = fs::read_to_string(out.path().join("only.svg")).unwrap();
    assert!(svg.starts_with("<svg"));
}

#[test]
fn empty_selection_reports_validation_and_creates_nothing() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let target = out.path().join("never");

    let err = ConversionAdapter::new(ArchiveDecision::FromConfig)
        .execute(config(
            vec![src.path().to_string_lossy().to_string()],
            &target,
            TargetFormat::Png,
            false,
        ))
        .unwrap_err();

    assert_eq!(err.notification(), "Please select an image.");
    assert!(!target.exists());
}

#[test]
fn failing_file_stops_the_batch_with_partial_output() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let first = src.path().join("first.png");
    let broken = src.path().join("broken.png");
    let third = src.path().join("third.png");
    write_png(&first, 1);
    fs::write(&broken, b"this is not a png").unwrap();
    write_png(&third, 3);

    let inputs = [first, broken, third]
        .iter()
        .map(|p| p.to_string_lossy().to_string())
        .collect();
    let err = ConversionAdapter::new(ArchiveDecision::FromConfig)
        .execute(config(inputs, out.path(), TargetFormat::Png, true))
        .unwrap_err();

    assert!(matches!(err, ConvertError::Decode(_)));
    assert!(err.notification().starts_with("Error: Failed to decode image: "));
    assert_eq!(entries(out.path()), vec!["first.png"]);
}

#[test]
fn compression_flag_runs_through_the_pipeline() {
    let src = tempfile::tempdir().unwrap();
    let out = tempfile::tempdir().unwrap();
    let input = src.path().join("photo.png");
    write_png(&input, 5);

    let mut cfg = config(
        vec![input.to_string_lossy().to_string()],
        out.path(),
        TargetFormat::Webp,
        false,
    );
    cfg.compress = true;
    ConversionAdapter::new(ArchiveDecision::FromConfig).execute(cfg).unwrap();

    let bytes = fs::read(out.path().join("photo.webp")).unwrap();
    assert!(!bytes.is_empty());
    assert_eq!(image::guess_format(&bytes).unwrap(), ImageFormat::WebP);
}
