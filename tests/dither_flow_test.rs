//! End-to-end decode, dither, encode flow through real image files.

use std::path::Path;

use disperse::codec;
use error_diffusion::{Disperser, PixelMode, Quantizer};
use pretty_assertions::assert_eq;

/// Write a grayscale PNG fixture.
fn write_gray_png(path: &Path, samples: &[u8], width: u32, height: u32) {
    image::save_buffer(path, samples, width, height, image::ExtendedColorType::L8)
        .expect("failed to write test fixture");
}

/// Write an RGB PNG fixture.
fn write_rgb_png(path: &Path, samples: &[u8], width: u32, height: u32) {
    image::save_buffer(path, samples, width, height, image::ExtendedColorType::Rgb8)
        .expect("failed to write test fixture");
}

#[test]
fn test_grayscale_flow_known_grid() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("grid.png");
    let output = dir.path().join("grid-out.png");
    write_gray_png(&input, &[100, 200, 50, 150], 2, 2);

    let mut buffer = codec::decode(&input, PixelMode::Grayscale).unwrap();
    Disperser::new(Quantizer::Threshold)
        .dither(&mut buffer)
        .unwrap();
    codec::encode(&buffer, &output).unwrap();

    let written = image::open(&output).unwrap().to_luma8();
    assert_eq!(written.dimensions(), (2, 2));
    assert_eq!(written.as_raw(), &vec![0, 255, 0, 255]);
}

#[test]
fn test_grayscale_flow_outputs_binary_levels() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("gradient.png");
    let output = dir.path().join("gradient-out.png");

    let samples: Vec<u8> = (0..16 * 16).map(|i| i as u8).collect();
    write_gray_png(&input, &samples, 16, 16);

    let mut buffer = codec::decode(&input, PixelMode::Grayscale).unwrap();
    Disperser::new(Quantizer::Threshold)
        .dither(&mut buffer)
        .unwrap();
    codec::encode(&buffer, &output).unwrap();

    let written = image::open(&output).unwrap().to_luma8();
    assert_eq!(written.dimensions(), (16, 16));
    for &v in written.as_raw() {
        assert!(v == 0 || v == 255, "pixel {v} is not a threshold level");
    }
}

#[test]
fn test_color_flow_lands_on_uniform_levels() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("color.png");
    let output = dir.path().join("color-out.png");

    let samples: Vec<u8> = (0..8 * 8 * 3).map(|i| (i * 11 % 256) as u8).collect();
    write_rgb_png(&input, &samples, 8, 8);

    let mut buffer = codec::decode(&input, PixelMode::Rgb).unwrap();
    Disperser::new(Quantizer::uniform(4).unwrap())
        .dither(&mut buffer)
        .unwrap();
    codec::encode(&buffer, &output).unwrap();

    let written = image::open(&output).unwrap().to_rgb8();
    assert_eq!(written.dimensions(), (8, 8));
    for &v in written.as_raw() {
        assert!(
            [0, 64, 128, 192].contains(&v),
            "pixel {v} is not a 4-level output"
        );
    }
}

#[test]
fn test_decode_missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.png");

    let err = codec::decode(&missing, PixelMode::Grayscale).unwrap_err();
    assert!(
        matches!(err, codec::CodecError::Read { .. }),
        "expected a read error, got: {err}"
    );
}

#[test]
fn test_jpeg_input_round_trips_through_png_output() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("photo.jpg");
    let output = codec::default_output_path(&input);

    let samples: Vec<u8> = (0..16 * 16).map(|i| (i % 256) as u8).collect();
    image::save_buffer(&input, &samples, 16, 16, image::ExtendedColorType::L8)
        .expect("failed to write test fixture");

    let mut buffer = codec::decode(&input, PixelMode::Grayscale).unwrap();
    Disperser::new(Quantizer::Threshold)
        .dither(&mut buffer)
        .unwrap();
    codec::encode(&buffer, &output).unwrap();

    assert_eq!(output, dir.path().join("photo-dithered.png"));
    let written = image::open(&output).unwrap().to_luma8();
    assert_eq!(written.dimensions(), (16, 16));
    for &v in written.as_raw() {
        assert!(v == 0 || v == 255, "pixel {v} is not a threshold level");
    }
}
