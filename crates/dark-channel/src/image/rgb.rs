//! Floating point RGB image buffer.

use crate::api::DehazeError;

/// Number of color channels in every [`RgbImage`].
pub const CHANNELS: usize = 3;

/// Color depth of input and output images (values lie in `0..COLOR_DEPTH`).
pub const COLOR_DEPTH: usize = 256;

/// Largest representable channel value, `COLOR_DEPTH - 1`.
pub const MAX_CHANNEL_VALUE: f64 = (COLOR_DEPTH - 1) as f64;

/// An M x N x 3 image with `f64` channel values.
///
/// Pixels are stored row-major with interleaved channels, so the value of
/// channel `c` at row `y`, column `x` lives at `(y * width + x) * 3 + c`.
/// Values conventionally lie in `[0, 255]` but intermediate images (for
/// example the light-normalized image or recovered radiance) may leave that
/// range.
///
/// # Example
///
/// ```
/// use dark_channel::RgbImage;
///
/// let image = RgbImage::from_rgb8(2, 1, &[10, 20, 30, 40, 50, 60]).unwrap();
/// assert_eq!(image.width(), 2);
/// assert_eq!(image.height(), 1);
/// assert_eq!(image.pixel(0, 1), [40.0, 50.0, 60.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RgbImage {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl RgbImage {
    /// Build an image from interleaved 8-bit RGB samples.
    pub fn from_rgb8(width: usize, height: usize, samples: &[u8]) -> Result<Self, DehazeError> {
        check_dimensions(width, height, samples.len())?;
        Ok(Self {
            width,
            height,
            data: samples.iter().map(|&v| v as f64).collect(),
        })
    }

    /// Build an image from interleaved floating point RGB samples.
    ///
    /// Every sample must be finite.
    pub fn from_values(width: usize, height: usize, data: Vec<f64>) -> Result<Self, DehazeError> {
        check_dimensions(width, height, data.len())?;
        if let Some(pos) = data.iter().position(|v| !v.is_finite()) {
            return Err(DehazeError::Shape(format!(
                "sample {} is not a finite number",
                pos
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build an image where every pixel has the same color.
    pub fn uniform(width: usize, height: usize, rgb: [f64; 3]) -> Result<Self, DehazeError> {
        let data = (0..width * height).flat_map(|_| rgb).collect();
        Self::from_values(width, height, data)
    }

    /// Shape is known to be valid because it was derived from another image.
    pub(crate) fn from_parts(width: usize, height: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), width * height * CHANNELS);
        Self {
            width,
            height,
            data,
        }
    }

    /// Image width (N) in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height (M) in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels, `M * N`.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Interleaved samples in row-major order.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Iterate over pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = [f64; 3]> + '_ {
        self.data.chunks_exact(CHANNELS).map(|p| [p[0], p[1], p[2]])
    }

    /// Color at row `y`, column `x`.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the image.
    #[inline]
    pub fn pixel(&self, y: usize, x: usize) -> [f64; 3] {
        assert!(y < self.height && x < self.width, "pixel out of bounds");
        let i = (y * self.width + x) * CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Pixel at a flattened row-major index.
    #[inline]
    pub(crate) fn pixel_at(&self, index: usize) -> [f64; 3] {
        let i = index * CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    /// Smallest and largest sample over all channels.
    pub fn min_max(&self) -> (f64, f64) {
        self.data
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    /// Apply `f(value, channel)` to every sample, producing a new image.
    pub fn map_channels(&self, f: impl Fn(f64, usize) -> f64) -> Self {
        let data = self
            .data
            .iter()
            .enumerate()
            .map(|(i, &v)| f(v, i % CHANNELS))
            .collect();
        Self::from_parts(self.width, self.height, data)
    }
}

fn check_dimensions(width: usize, height: usize, len: usize) -> Result<(), DehazeError> {
    if width == 0 || height == 0 {
        return Err(DehazeError::Shape(format!(
            "image dimensions must be positive, got {}x{}",
            width, height
        )));
    }
    let expected = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(CHANNELS))
        .ok_or_else(|| DehazeError::Shape(format!("image {}x{} is too large", width, height)))?;
    if len != expected {
        return Err(DehazeError::Shape(format!(
            "expected {} samples for a {}x{} RGB image, got {}",
            expected, width, height, len
        )));
    }
    Ok(())
}
