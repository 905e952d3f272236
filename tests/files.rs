mod common;

use canny_pipeline::image::io::load_color_image;
use canny_pipeline::image::{from_color_image, to_color_image};
use canny_pipeline::{run_file, PipelineError, PipelineParams};
use common::synthetic_image::checkerboard;
use image::{DynamicImage, Rgb, RgbImage};
use std::path::Path;

fn write_rgb_fixture(path: &Path, w: u32, h: u32) {
    let img = RgbImage::from_fn(w, h, |x, y| {
        if (x / 8 + y / 8) % 2 == 0 {
            Rgb([30, 60, 90])
        } else {
            Rgb([240, 200, 180])
        }
    });
    img.save(path).unwrap();
}

#[test]
fn png_run_writes_same_sized_edge_map() {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("board.png");
    write_rgb_fixture(&input, 40, 24);

    let output = dir.path().join("out").join("edges.png");
    let (report, written) = run_file(&input, &output, PipelineParams::default()).unwrap();

    assert_eq!(written, output);
    assert_eq!((report.input.width, report.input.height), (40, 24));
    let edges = load_color_image(&written).unwrap().to_luma8();
    assert_eq!(edges.dimensions(), (40, 24));
    let nonzero = edges.pixels().filter(|p| p.0[0] > 0).count();
    assert_eq!(nonzero, report.edge_pixels);
    // Dark frame left by the unprocessed borders.
    assert!((0..40).all(|x| edges.get_pixel(x, 0).0[0] == 0));
}

#[test]
fn jpeg_output_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("board.png");
    write_rgb_fixture(&input, 16, 16);
    let (_, written) =
        run_file(&input, &dir.path().join("edges.JPEG"), PipelineParams::default()).unwrap();
    assert!(written.ends_with("edges.JPEG"));
    assert!(written.exists());
}

#[test]
fn bad_extension_fails_before_reading_input() {
    let dir = tempfile::tempdir().unwrap();
    let err = run_file(
        &dir.path().join("missing.png"),
        &dir.path().join("edges.gif"),
        PipelineParams::default(),
    )
    .unwrap_err();
    assert!(matches!(err, PipelineError::UnsupportedExtension(ext) if ext == "gif"));
    assert!(!dir.path().join("edges.gif").exists());
}

#[test]
fn invalid_kernel_fails_before_reading_input() {
    let dir = tempfile::tempdir().unwrap();
    let mut params = PipelineParams::default();
    params.gaussian.sigma = 0.0;
    let err = run_file(
        &dir.path().join("missing.png"),
        &dir.path().join("edges.png"),
        params,
    )
    .unwrap_err();
    assert!(matches!(err, PipelineError::InvalidKernelParameter(_)));
}

#[test]
fn missing_input_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = run_file(
        &dir.path().join("missing.png"),
        &dir.path().join("edges.png"),
        PipelineParams::default(),
    )
    .unwrap_err();
    assert!(matches!(err, PipelineError::Decode { .. }));
    assert!(!dir.path().join("edges.png").exists());
}

#[test]
fn grayscale_round_trip_is_exact() {
    let rgb = DynamicImage::ImageRgb8(RgbImage::from_fn(23, 11, |x, y| {
        Rgb([(x * 11) as u8, (y * 23) as u8, ((x * y) % 256) as u8])
    }));
    let back = to_color_image(&from_color_image(&rgb).unwrap());
    assert_eq!(back, rgb.to_luma8());

    let tensor = checkerboard(9, 14, 2);
    let again = from_color_image(&DynamicImage::ImageLuma8(to_color_image(&tensor))).unwrap();
    assert_eq!(again, tensor);
}
