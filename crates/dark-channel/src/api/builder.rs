//! Dehazer builder -- the primary ergonomic entry point for the crate.
//!
//! [`Dehazer`] wraps the dark channel prior pipeline with fluent
//! configuration and a pluggable edge-aware filter.

use super::error::DehazeError;
use super::options::DehazeOptions;
use crate::atmosphere::estimate_atmosphere;
use crate::image::RgbImage;
use crate::output::DehazeResult;
use crate::radiance::recover_radiance;
use crate::transmission::{
    clamp_transmission, estimate_transmission, refine_transmission, EdgeAwareFilter, GuidedFilter,
};
use crate::window_min::dark_channel;

/// High-level single image dehazer.
///
/// # Design
///
/// - Configuration methods consume and return `self` (standard builder pattern)
/// - [`dehaze()`](Self::dehaze) takes `&self`, so one dehazer can process
///   any number of images, including from several threads at once
/// - Parameters are validated at the start of every run, before any stage
///   executes, so a failed run never yields partial output
///
/// # Example
///
/// ```
/// use dark_channel::{Artifact, Dehazer, RgbImage};
///
/// let image = RgbImage::uniform(4, 4, [100.0, 100.0, 100.0]).unwrap();
/// let dehazer = Dehazer::new()
///     .window(3)
///     .top_fraction(0.5)
///     .guided(false);
///
/// let result = dehazer.dehaze(&image).unwrap();
/// assert_eq!(result.atmosphere().channels(), [100.0, 100.0, 100.0]);
///
/// let radiance = result.render(Artifact::RadianceRefined);
/// assert!(radiance.as_bytes().iter().all(|&v| v == 100));
/// ```
pub struct Dehazer {
    options: DehazeOptions,
    filter: Box<dyn EdgeAwareFilter + Send + Sync>,
}

impl Default for Dehazer {
    fn default() -> Self {
        Self::new()
    }
}

impl Dehazer {
    /// Create a dehazer with default options and the [`GuidedFilter`].
    pub fn new() -> Self {
        Self::with_options(DehazeOptions::default())
    }

    /// Create a dehazer from a complete set of options.
    pub fn with_options(options: DehazeOptions) -> Self {
        Self {
            options,
            filter: Box::new(GuidedFilter),
        }
    }

    /// Options used by this dehazer.
    pub fn options(&self) -> &DehazeOptions {
        &self.options
    }

    /// Replace the edge-aware filter used for refinement.
    pub fn filter(mut self, filter: impl EdgeAwareFilter + Send + Sync + 'static) -> Self {
        self.filter = Box::new(filter);
        self
    }

    /// Set the transmission floor.
    #[inline]
    pub fn t_min(mut self, t_min: f64) -> Self {
        self.options = self.options.t_min(t_min);
        self
    }

    /// Set the atmosphere light ceiling.
    #[inline]
    pub fn atm_max(mut self, atm_max: f64) -> Self {
        self.options = self.options.atm_max(atm_max);
        self
    }

    /// Set the dark channel window size.
    #[inline]
    pub fn window(mut self, window: usize) -> Self {
        self.options = self.options.window(window);
        self
    }

    /// Set the fraction of pixels used for atmosphere estimation.
    #[inline]
    pub fn top_fraction(mut self, top_fraction: f64) -> Self {
        self.options = self.options.top_fraction(top_fraction);
        self
    }

    /// Set the haze removal strength.
    #[inline]
    pub fn omega(mut self, omega: f64) -> Self {
        self.options = self.options.omega(omega);
        self
    }

    /// Enable or disable edge-aware refinement.
    #[inline]
    pub fn guided(mut self, guided: bool) -> Self {
        self.options = self.options.guided(guided);
        self
    }

    /// Set the edge-aware filter radius.
    #[inline]
    pub fn radius(mut self, radius: usize) -> Self {
        self.options = self.options.radius(radius);
        self
    }

    /// Set the edge-aware filter regularization.
    #[inline]
    pub fn eps(mut self, eps: f64) -> Self {
        self.options = self.options.eps(eps);
        self
    }

    /// Dehaze one image.
    ///
    /// Runs the full pipeline in order:
    /// 1. Dark channel of the source image
    /// 2. Atmosphere light from the brightest dark channel pixels
    /// 3. Raw transmission from the dark channel of `I / A`
    /// 4. Transmission floored at `t_min`, then optionally refined
    /// 5. Radiance recovered with both the floored and the refined map
    pub fn dehaze(&self, image: &RgbImage) -> Result<DehazeResult, DehazeError> {
        let opts = &self.options;
        opts.validate()?;

        let dark = dark_channel(image, opts.window)?;
        let atmosphere = estimate_atmosphere(image, &dark, opts.top_fraction, opts.atm_max)?;
        let raw = estimate_transmission(image, &atmosphere, opts.omega, opts.window)?;

        let clamped = clamp_transmission(&raw, opts.t_min);
        let refined = if opts.guided {
            refine_transmission(
                image,
                &clamped,
                opts.t_min,
                self.filter.as_ref(),
                opts.radius,
                opts.eps,
            )?
        } else {
            clamped.clone()
        };

        let radiance_raw = recover_radiance(image, &atmosphere, &clamped)?;
        let radiance_refined = recover_radiance(image, &atmosphere, &refined)?;

        tracing::debug!(
            width = image.width(),
            height = image.height(),
            atmosphere = ?atmosphere.channels(),
            guided = opts.guided,
            "Dehazed image"
        );

        Ok(DehazeResult {
            dark_channel: dark,
            atmosphere,
            raw_transmission: raw,
            clamped_transmission: clamped,
            refined_transmission: refined,
            radiance_raw,
            radiance_refined,
        })
    }
}
