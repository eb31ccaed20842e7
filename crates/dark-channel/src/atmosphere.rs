//! Atmosphere light estimation.
//!
//! Pixels whose dark channel is brightest are the most haze-opaque ones
//! (typically sky or distant scenery). The atmosphere light is taken as the
//! per-channel maximum of the source image over those pixels, then clamped.

use std::cmp::Ordering;

use crate::api::DehazeError;
use crate::image::{Grid, RgbImage};

/// Global atmosphere light, one value per RGB channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphereLight(pub [f64; 3]);

impl AtmosphereLight {
    /// Channel values as an array.
    #[inline]
    pub fn channels(&self) -> [f64; 3] {
        self.0
    }

    /// Check that every channel is strictly positive so it can be used as a
    /// divisor.
    pub fn ensure_positive(&self) -> Result<(), DehazeError> {
        match self.0.iter().position(|&v| v.is_nan() || v <= 0.0) {
            Some(channel) => Err(DehazeError::Division {
                channel,
                value: self.0[channel],
            }),
            None => Ok(()),
        }
    }
}

/// Number of candidate pixels taken for a `pixel_count` image with fraction `p`.
#[inline]
pub fn candidate_count(pixel_count: usize, top_fraction: f64) -> usize {
    (pixel_count as f64 * top_fraction).floor() as usize
}

/// Flattened indices of the `count` pixels with the highest dark channel.
///
/// Ranking is by descending dark channel value; equal values are ordered by
/// ascending row-major index. Under this total order the selected set is
/// exactly the first `count` entries of a stable descending sort, so results
/// are reproducible across platforms. The returned indices are in rank order.
pub fn brightest_indices(dark: &Grid, count: usize) -> Vec<usize> {
    let values = dark.values();
    let rank = |&a: &usize, &b: &usize| -> Ordering {
        values[b].total_cmp(&values[a]).then(a.cmp(&b))
    };

    let mut indices: Vec<usize> = (0..values.len()).collect();
    let count = count.min(indices.len());
    if count == 0 {
        return Vec::new();
    }
    if count < indices.len() {
        indices.select_nth_unstable_by(count - 1, rank);
        indices.truncate(count);
    }
    indices.sort_unstable_by(rank);
    indices
}

/// Estimate the atmosphere light of `image` from its dark channel.
///
/// Selects `floor(M * N * top_fraction)` positions with the highest dark
/// channel, takes the per-channel maximum of `image` over them and clamps each
/// channel to `atm_max`.
///
/// Returns [`DehazeError::Estimation`] if no position would be selected.
///
/// # Example
///
/// ```
/// use dark_channel::{dark_channel, estimate_atmosphere, RgbImage};
///
/// let image = RgbImage::uniform(4, 4, [100.0, 150.0, 240.0]).unwrap();
/// let dark = dark_channel(&image, 3).unwrap();
/// let light = estimate_atmosphere(&image, &dark, 0.5, 220.0).unwrap();
/// assert_eq!(light.channels(), [100.0, 150.0, 220.0]);
/// ```
pub fn estimate_atmosphere(
    image: &RgbImage,
    dark: &Grid,
    top_fraction: f64,
    atm_max: f64,
) -> Result<AtmosphereLight, DehazeError> {
    if (dark.width(), dark.height()) != (image.width(), image.height()) {
        return Err(DehazeError::Shape(format!(
            "dark channel is {}x{} but image is {}x{}",
            dark.width(),
            dark.height(),
            image.width(),
            image.height()
        )));
    }

    let count = candidate_count(image.pixel_count(), top_fraction);
    if count == 0 {
        return Err(DehazeError::Estimation(format!(
            "no candidate pixels: {} pixels x fraction {} rounds down to 0",
            image.pixel_count(),
            top_fraction
        )));
    }

    let candidates = brightest_indices(dark, count);
    let mut light = [f64::NEG_INFINITY; 3];
    for &index in &candidates {
        let pixel = image.pixel_at(index);
        for c in 0..3 {
            light[c] = light[c].max(pixel[c]);
        }
    }

    tracing::debug!(
        candidates = count,
        r = light[0],
        g = light[1],
        b = light[2],
        "Estimated atmosphere light before clamping"
    );

    Ok(AtmosphereLight(light.map(|v| v.min(atm_max))))
}
