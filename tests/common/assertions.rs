//! Assertion helpers for tests.

use dark_channel::RgbImage;
use dehaze::rendering::read_image;
use pretty_assertions::assert_eq;
use std::path::Path;

/// Assert `path` is a decodable PNG of the given size and return it.
pub fn assert_png_file(path: &Path, width: usize, height: usize) -> RgbImage {
    assert!(path.exists(), "Expected output {}", path.display());
    let image = read_image(path)
        .unwrap_or_else(|e| panic!("Failed to decode {}: {}", path.display(), e));
    assert_eq!(
        (image.width(), image.height()),
        (width, height),
        "Unexpected size for {}",
        path.display()
    );
    image
}

/// Assert every pixel of `image` equals `rgb`.
pub fn assert_uniform(image: &RgbImage, rgb: [f64; 3]) {
    for (i, px) in image.pixels().enumerate() {
        assert_eq!(px, rgb, "Pixel {} differs", i);
    }
}

/// Assert every value of a grey artifact lies in `[lo, hi]`.
pub fn assert_grey_within(image: &RgbImage, lo: f64, hi: f64) {
    for px in image.pixels() {
        assert_eq!(px[0], px[1]);
        assert_eq!(px[1], px[2]);
        assert!(
            (lo..=hi).contains(&px[0]),
            "Value {} outside [{}, {}]",
            px[0],
            lo,
            hi
        );
    }
}
