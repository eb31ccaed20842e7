//! Dehazing options and configuration.
//!
//! This module provides the [`DehazeOptions`] struct holding every tunable
//! parameter of the pipeline.

use super::error::DehazeError;
use crate::image::MAX_CHANNEL_VALUE;

/// Configuration options for the dark channel prior pipeline.
///
/// Options are a plain value: each [`Dehazer`](crate::Dehazer) owns its own
/// copy and nothing is read from global state.
///
/// # Defaults
///
/// The defaults follow He et al. (CVPR 2009) with a conservative floor:
/// - `t_min`: 0.2
/// - `atm_max`: 220
/// - `window`: 15
/// - `top_fraction`: 0.0001 (brightest 0.01% of the dark channel)
/// - `omega`: 0.95
/// - `guided`: true
/// - `radius`: 40
/// - `eps`: 0.001
///
/// # Example
///
/// ```
/// use dark_channel::DehazeOptions;
///
/// let options = DehazeOptions::new()
///     .window(7)
///     .omega(0.9)
///     .guided(false);
/// assert!(options.validate().is_ok());
///
/// assert!(DehazeOptions::new().window(0).validate().is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DehazeOptions {
    /// Lower bound on transmission used for radiance recovery.
    ///
    /// Must lie in `[0, 255]`. Values above 1 floor every pixel to a constant
    /// transmission.
    ///
    /// Default: `0.2`
    pub t_min: f64,

    /// Upper bound on each atmosphere light channel, in `[0, 255]`.
    ///
    /// Default: `220`
    pub atm_max: f64,

    /// Side length of the dark channel window, at least 1.
    ///
    /// Even sizes are allowed; see [`dark_channel`](crate::dark_channel) for
    /// how the window is aligned.
    ///
    /// Default: `15`
    pub window: usize,

    /// Fraction of pixels, in `(0, 1]`, used to estimate the atmosphere light.
    ///
    /// Default: `0.0001`
    pub top_fraction: f64,

    /// Fraction of haze removed, in `[0, 1]`.
    ///
    /// Default: `0.95`
    pub omega: f64,

    /// Whether to refine transmission with the edge-aware filter.
    ///
    /// Default: `true`
    pub guided: bool,

    /// Edge-aware filter radius, at least 1.
    ///
    /// Default: `40`
    pub radius: usize,

    /// Edge-aware filter regularization, strictly positive.
    ///
    /// Default: `0.001`
    pub eps: f64,
}

impl Default for DehazeOptions {
    fn default() -> Self {
        Self {
            t_min: 0.2,
            atm_max: 220.0,
            window: 15,
            top_fraction: 0.0001,
            omega: 0.95,
            guided: true,
            radius: 40,
            eps: 1e-3,
        }
    }
}

impl DehazeOptions {
    /// Create options with default values.
    ///
    /// This is equivalent to `DehazeOptions::default()` but more discoverable.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the transmission floor.
    #[inline]
    pub fn t_min(mut self, t_min: f64) -> Self {
        self.t_min = t_min;
        self
    }

    /// Set the atmosphere light ceiling.
    #[inline]
    pub fn atm_max(mut self, atm_max: f64) -> Self {
        self.atm_max = atm_max;
        self
    }

    /// Set the dark channel window size.
    #[inline]
    pub fn window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Set the fraction of pixels used for atmosphere estimation.
    #[inline]
    pub fn top_fraction(mut self, top_fraction: f64) -> Self {
        self.top_fraction = top_fraction;
        self
    }

    /// Set the haze removal strength.
    #[inline]
    pub fn omega(mut self, omega: f64) -> Self {
        self.omega = omega;
        self
    }

    /// Enable or disable edge-aware refinement.
    #[inline]
    pub fn guided(mut self, guided: bool) -> Self {
        self.guided = guided;
        self
    }

    /// Set the edge-aware filter radius.
    #[inline]
    pub fn radius(mut self, radius: usize) -> Self {
        self.radius = radius;
        self
    }

    /// Set the edge-aware filter regularization.
    #[inline]
    pub fn eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Check every parameter against its valid range.
    ///
    /// Returns the first violation as [`DehazeError::Parameter`].
    pub fn validate(&self) -> Result<(), DehazeError> {
        if self.window == 0 {
            return Err(DehazeError::parameter("window", "must be at least 1"));
        }
        if !(self.top_fraction > 0.0 && self.top_fraction <= 1.0) {
            return Err(DehazeError::parameter(
                "top_fraction",
                format!("must be in (0, 1], got {}", self.top_fraction),
            ));
        }
        if self.radius == 0 {
            return Err(DehazeError::parameter("radius", "must be at least 1"));
        }
        if !(self.eps > 0.0 && self.eps.is_finite()) {
            return Err(DehazeError::parameter(
                "eps",
                format!("must be a positive number, got {}", self.eps),
            ));
        }
        if !(0.0..=MAX_CHANNEL_VALUE).contains(&self.t_min) {
            return Err(DehazeError::parameter(
                "t_min",
                format!("must be in [0, {}], got {}", MAX_CHANNEL_VALUE, self.t_min),
            ));
        }
        if !(0.0..=MAX_CHANNEL_VALUE).contains(&self.atm_max) {
            return Err(DehazeError::parameter(
                "atm_max",
                format!("must be in [0, {}], got {}", MAX_CHANNEL_VALUE, self.atm_max),
            ));
        }
        if !(0.0..=1.0).contains(&self.omega) {
            return Err(DehazeError::parameter(
                "omega",
                format!("must be in [0, 1], got {}", self.omega),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rejected_name(options: DehazeOptions) -> &'static str {
        match options.validate() {
            Err(DehazeError::Parameter { name, .. }) => name,
            other => panic!("expected parameter error, got {:?}", other),
        }
    }

    #[test]
    fn test_defaults() {
        let options = DehazeOptions::default();
        assert_eq!(options.t_min, 0.2);
        assert_eq!(options.atm_max, 220.0);
        assert_eq!(options.window, 15);
        assert_eq!(options.top_fraction, 0.0001);
        assert_eq!(options.omega, 0.95);
        assert!(options.guided);
        assert_eq!(options.radius, 40);
        assert_eq!(options.eps, 1e-3);
        assert!(options.validate().is_ok());
    }

    #[test]
    fn test_builder_chaining() {
        let options = DehazeOptions::new()
            .t_min(0.1)
            .atm_max(240.0)
            .window(9)
            .top_fraction(0.001)
            .omega(0.8)
            .guided(false)
            .radius(20)
            .eps(1e-4);
        assert_eq!(options.t_min, 0.1);
        assert_eq!(options.atm_max, 240.0);
        assert_eq!(options.window, 9);
        assert_eq!(options.top_fraction, 0.001);
        assert_eq!(options.omega, 0.8);
        assert!(!options.guided);
        assert_eq!(options.radius, 20);
        assert_eq!(options.eps, 1e-4);
    }

    #[test]
    fn test_invalid_parameters_are_named() {
        assert_eq!(rejected_name(DehazeOptions::new().window(0)), "window");
        assert_eq!(rejected_name(DehazeOptions::new().top_fraction(0.0)), "top_fraction");
        assert_eq!(rejected_name(DehazeOptions::new().top_fraction(1.5)), "top_fraction");
        assert_eq!(rejected_name(DehazeOptions::new().top_fraction(f64::NAN)), "top_fraction");
        assert_eq!(rejected_name(DehazeOptions::new().radius(0)), "radius");
        assert_eq!(rejected_name(DehazeOptions::new().eps(0.0)), "eps");
        assert_eq!(rejected_name(DehazeOptions::new().eps(f64::INFINITY)), "eps");
        assert_eq!(rejected_name(DehazeOptions::new().t_min(-0.1)), "t_min");
        assert_eq!(rejected_name(DehazeOptions::new().t_min(256.0)), "t_min");
        assert_eq!(rejected_name(DehazeOptions::new().atm_max(300.0)), "atm_max");
        assert_eq!(rejected_name(DehazeOptions::new().atm_max(f64::NAN)), "atm_max");
        assert_eq!(rejected_name(DehazeOptions::new().omega(1.01)), "omega");
    }

    #[test]
    fn test_boundary_values_accepted() {
        let options = DehazeOptions::new()
            .t_min(0.0)
            .atm_max(255.0)
            .window(1)
            .top_fraction(1.0)
            .omega(0.0)
            .radius(1);
        assert!(options.validate().is_ok());
    }
}
