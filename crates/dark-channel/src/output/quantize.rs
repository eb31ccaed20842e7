//! Conversion of floating point artifacts to 8-bit images.

use crate::api::DehazeError;
use crate::image::{Grid, RgbImage, CHANNELS, MAX_CHANNEL_VALUE};

/// An 8-bit image with one (grey) or three (RGB) interleaved channels.
///
/// This is the form every artifact takes before being handed to an encoder.
///
/// # Example
///
/// ```
/// use dark_channel::{quantize, RgbImage};
///
/// let image = RgbImage::from_values(2, 1, vec![-12.0, 99.9, 300.0, 0.0, 1.5, 255.0]).unwrap();
/// let out = quantize(&image);
/// assert_eq!(out.channels(), 3);
/// assert_eq!(out.as_bytes(), &[0, 99, 255, 0, 1, 255]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizedImage {
    width: usize,
    height: usize,
    channels: usize,
    data: Vec<u8>,
}

impl QuantizedImage {
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// 1 for grey artifacts, 3 for RGB.
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Interleaved bytes in row-major order.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Widen an RGB result back to a floating point image.
    ///
    /// Returns [`DehazeError::Shape`] for a grey image.
    pub fn to_rgb_image(&self) -> Result<RgbImage, DehazeError> {
        if self.channels != CHANNELS {
            return Err(DehazeError::Shape(format!(
                "expected {} channels, image has {}",
                CHANNELS, self.channels
            )));
        }
        RgbImage::from_rgb8(self.width, self.height, &self.data)
    }
}

/// Clip to `[0, 255]` and truncate toward zero.
#[inline]
pub fn quantize_value(v: f64) -> u8 {
    v.clamp(0.0, MAX_CHANNEL_VALUE) as u8
}

/// Quantize an RGB image (for example recovered radiance).
pub fn quantize(image: &RgbImage) -> QuantizedImage {
    QuantizedImage {
        width: image.width(),
        height: image.height(),
        channels: CHANNELS,
        data: image.as_slice().iter().map(|&v| quantize_value(v)).collect(),
    }
}

/// Quantize a grid after multiplying every value by `scale`.
///
/// A dark channel is already in display range (`scale = 1`); transmission
/// maps live in `[0, 1]` and are shown with `scale = 255`.
pub fn quantize_grid(grid: &Grid, scale: f64) -> QuantizedImage {
    QuantizedImage {
        width: grid.width(),
        height: grid.height(),
        channels: 1,
        data: grid
            .values()
            .iter()
            .map(|&v| quantize_value(v * scale))
            .collect(),
    }
}
