//! Raw transmission estimation.

use crate::api::DehazeError;
use crate::atmosphere::AtmosphereLight;
use crate::image::{Grid, RgbImage};
use crate::window_min::dark_channel;

/// Estimate the raw transmission map `1 - omega * dark(I / A)`.
///
/// The image is first divided channel-wise by the atmosphere light, then its
/// dark channel is taken with the same `window` used for the source dark
/// channel. `omega` below 1 keeps a small amount of haze so distant scenery
/// still reads as distant.
///
/// Raw values are at most 1 but may be negative where a pixel is brighter
/// than the atmosphere light.
///
/// Returns [`DehazeError::Division`] if any atmosphere light channel is not
/// strictly positive.
pub fn estimate_transmission(
    image: &RgbImage,
    light: &AtmosphereLight,
    omega: f64,
    window: usize,
) -> Result<Grid, DehazeError> {
    light.ensure_positive()?;

    let a = light.channels();
    let normalized = image.map_channels(|v, c| v / a[c]);
    let dark = dark_channel(&normalized, window)?;
    let raw = dark.map(|d| 1.0 - omega * d);

    let (lo, hi) = raw.min_max();
    tracing::debug!(min = lo, max = hi, "Raw transmission range");

    Ok(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_equal_to_light_gives_one_minus_omega() {
        let image = RgbImage::uniform(3, 3, [120.0, 80.0, 60.0]).unwrap();
        let light = AtmosphereLight([120.0, 80.0, 60.0]);
        let raw = estimate_transmission(&image, &light, 0.95, 3).unwrap();
        for &t in raw.values() {
            assert!((t - 0.05).abs() < 1e-12);
        }
    }

    #[test]
    fn test_black_image_is_fully_transmissive() {
        let image = RgbImage::uniform(2, 2, [0.0; 3]).unwrap();
        let light = AtmosphereLight([200.0; 3]);
        let raw = estimate_transmission(&image, &light, 0.95, 15).unwrap();
        assert_eq!(raw.values(), &[1.0; 4]);
    }

    #[test]
    fn test_normalization_is_per_channel() {
        // Blue is dim relative to its light, so it dominates the dark channel.
        let image = RgbImage::uniform(1, 1, [200.0, 200.0, 50.0]).unwrap();
        let light = AtmosphereLight([200.0, 200.0, 100.0]);
        let raw = estimate_transmission(&image, &light, 1.0, 1).unwrap();
        assert!((raw.get(0, 0) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_non_positive_light_is_division_error() {
        let image = RgbImage::uniform(2, 2, [10.0; 3]).unwrap();
        let light = AtmosphereLight([10.0, 10.0, 0.0]);
        assert_eq!(
            estimate_transmission(&image, &light, 0.95, 3),
            Err(DehazeError::Division {
                channel: 2,
                value: 0.0
            })
        );
    }
}
