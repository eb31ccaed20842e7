//! Transmission floor and edge-aware refinement.

use super::guided_filter::EdgeAwareFilter;
use crate::api::DehazeError;
use crate::image::{Grid, RgbImage};

/// Floor every transmission value at `t_min`.
///
/// The radiance inversion divides by transmission, so this floor is what
/// keeps heavily hazed regions from blowing up.
pub fn clamp_transmission(raw: &Grid, t_min: f64) -> Grid {
    raw.map(|t| t.max(t_min))
}

/// Scale `image` to `[0, 1]` using its global minimum and maximum.
///
/// The range is taken over all channels together, so relative channel
/// balance is preserved. Returns [`DehazeError::Numeric`] for an image with a
/// single value everywhere.
pub fn normalize_guidance(image: &RgbImage) -> Result<RgbImage, DehazeError> {
    let (lo, hi) = image.min_max();
    let range = hi - lo;
    if !(range > 0.0) {
        return Err(DehazeError::Numeric(format!(
            "cannot normalize guidance: every sample equals {}",
            lo
        )));
    }
    Ok(image.map_channels(|v, _| (v - lo) / range))
}

/// Smooth a clamped transmission map against the edges of `image`.
///
/// The image is normalized with [`normalize_guidance`] and handed to `filter`
/// together with `radius` and `eps`. Filter failures are returned unchanged.
/// The filtered map can overshoot near strong edges, so it is limited to
/// `[t_min, 1]` afterwards.
pub fn refine_transmission(
    image: &RgbImage,
    clamped: &Grid,
    t_min: f64,
    filter: &dyn EdgeAwareFilter,
    radius: usize,
    eps: f64,
) -> Result<Grid, DehazeError> {
    let guidance = normalize_guidance(image)?;
    let refined = filter.refine(&guidance, clamped, radius, eps)?;

    if (refined.width(), refined.height()) != (clamped.width(), clamped.height()) {
        return Err(DehazeError::Shape(format!(
            "edge-aware filter returned {}x{} for a {}x{} map",
            refined.width(),
            refined.height(),
            clamped.width(),
            clamped.height()
        )));
    }

    let (lo, hi) = refined.min_max();
    tracing::debug!(min = lo, max = hi, radius, eps, "Refined transmission range");

    Ok(refined.map(|t| t.clamp(t_min, 1.0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Returns a fixed value everywhere.
    struct Fixed(f64);

    impl EdgeAwareFilter for Fixed {
        fn refine(
            &self,
            guidance: &RgbImage,
            input: &Grid,
            _radius: usize,
            _eps: f64,
        ) -> Result<Grid, DehazeError> {
            let (lo, hi) = guidance.min_max();
            assert!(lo >= 0.0 && hi <= 1.0, "guidance not normalized");
            Grid::filled(input.width(), input.height(), self.0)
        }
    }

    struct Failing;

    impl EdgeAwareFilter for Failing {
        fn refine(&self, _: &RgbImage, _: &Grid, _: usize, _: f64) -> Result<Grid, DehazeError> {
            Err(DehazeError::Numeric("boom".to_string()))
        }
    }

    #[test]
    fn test_clamp_floors_values() {
        let raw = Grid::new(2, 2, vec![-0.4, 0.1, 0.5, 1.0]).unwrap();
        assert_eq!(
            clamp_transmission(&raw, 0.2).values(),
            &[0.2, 0.2, 0.5, 1.0]
        );
    }

    #[test]
    fn test_normalize_guidance_uses_global_range() {
        let image = RgbImage::from_values(1, 2, vec![10.0, 20.0, 30.0, 50.0, 60.0, 110.0]).unwrap();
        let norm = normalize_guidance(&image).unwrap();
        assert_eq!(norm.pixel(0, 0), [0.0, 0.1, 0.2]);
        assert_eq!(norm.pixel(1, 0), [0.4, 0.5, 1.0]);
    }

    #[test]
    fn test_normalize_guidance_rejects_flat_image() {
        let image = RgbImage::uniform(3, 3, [7.0; 3]).unwrap();
        assert!(matches!(
            normalize_guidance(&image),
            Err(DehazeError::Numeric(_))
        ));
    }

    #[test]
    fn test_refine_delegates_to_filter() {
        let image = RgbImage::from_rgb8(2, 1, &[0, 0, 0, 255, 255, 255]).unwrap();
        let clamped = Grid::filled(2, 1, 0.2).unwrap();
        let refined = refine_transmission(&image, &clamped, 0.2, &Fixed(0.7), 40, 1e-3).unwrap();
        assert_eq!(refined.values(), &[0.7, 0.7]);
    }

    #[test]
    fn test_refined_map_is_kept_within_floor_and_one() {
        let image = RgbImage::from_rgb8(2, 1, &[0, 0, 0, 255, 255, 255]).unwrap();
        let clamped = Grid::filled(2, 1, 0.2).unwrap();
        let low = refine_transmission(&image, &clamped, 0.2, &Fixed(0.05), 40, 1e-3).unwrap();
        assert_eq!(low.values(), &[0.2, 0.2]);
        let high = refine_transmission(&image, &clamped, 0.2, &Fixed(1.3), 40, 1e-3).unwrap();
        assert_eq!(high.values(), &[1.0, 1.0]);
    }

    #[test]
    fn test_refine_propagates_filter_error() {
        let image = RgbImage::from_rgb8(2, 1, &[0, 0, 0, 255, 255, 255]).unwrap();
        let clamped = Grid::filled(2, 1, 0.2).unwrap();
        assert_eq!(
            refine_transmission(&image, &clamped, 0.2, &Failing, 40, 1e-3),
            Err(DehazeError::Numeric("boom".to_string()))
        );
    }
}
