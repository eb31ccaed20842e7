//! Synthetic input images written as PNG files.

use dark_channel::{quantize, RgbImage};
use dehaze::rendering::encode_png;
use std::path::{Path, PathBuf};

/// Airlight used by [`hazy_scene`].
pub const AIRLIGHT: [f64; 3] = [210.0, 215.0, 220.0];

/// Scene of coloured stripes seen through haze that thickens to the left.
///
/// Every pixel is `J * t + A * (1 - t)` with `t` rising from 0.4 to 0.9
/// across the width.
pub fn hazy_scene(width: usize, height: usize) -> RgbImage {
    let mut data = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let t = 0.4 + 0.5 * x as f64 / (width.max(2) - 1) as f64;
            let stripe = if (y / 10) % 2 == 0 { 190.0 } else { 40.0 };
            let scene = [stripe, 60.0, 30.0 + ((x * 2) % 100) as f64];
            for c in 0..3 {
                data.push((scene[c] * t + AIRLIGHT[c] * (1.0 - t)).floor());
            }
        }
    }
    RgbImage::from_values(width, height, data).unwrap()
}

/// Encode `image` into `dir/name` and return the path.
pub fn write_png_fixture(dir: &Path, name: &str, image: &RgbImage) -> PathBuf {
    let path = dir.join(name);
    let bytes = encode_png(&quantize(image)).unwrap();
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Encode `image` as JPEG into `dir/name` and return the path.
pub fn write_jpeg_fixture(dir: &Path, name: &str, scene: &RgbImage) -> PathBuf {
    let path = dir.join(name);
    let quantized = quantize(scene);
    let buffer = image::RgbImage::from_raw(
        quantized.width() as u32,
        quantized.height() as u32,
        quantized.into_bytes(),
    )
    .unwrap();
    buffer
        .save_with_format(&path, image::ImageFormat::Jpeg)
        .unwrap();
    path
}

/// Write a YAML config file and return its path.
pub fn write_config(dir: &Path, yaml: &str) -> PathBuf {
    let path = dir.join("dehaze.yaml");
    std::fs::write(&path, yaml).unwrap();
    path
}
