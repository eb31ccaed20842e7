//! dark-channel: single image haze removal with the dark channel prior
//!
//! This library recovers a haze-free image from one hazy RGB photograph
//! following He, Sun and Tang, "Single Image Haze Removal Using Dark Channel
//! Prior" (CVPR 2009), with transmission refinement by the guided filter
//! (ECCV 2010).
//!
//! # Quick Start
//!
//! The [`Dehazer`] builder is the primary entry point:
//!
//! ```
//! use dark_channel::{Artifact, Dehazer, RgbImage};
//!
//! // A tiny 4x4 image with a brighter top half.
//! let samples: Vec<u8> = (0..16)
//!     .flat_map(|i| if i < 8 { [200, 200, 210] } else { [90, 60, 40] })
//!     .collect();
//! let image = RgbImage::from_rgb8(4, 4, &samples).unwrap();
//!
//! let result = Dehazer::new()
//!     .window(3)
//!     .top_fraction(0.25)
//!     .radius(2)
//!     .dehaze(&image)
//!     .unwrap();
//!
//! let dehazed = result.render(Artifact::RadianceRefined);
//! assert_eq!(dehazed.width(), 4);
//! assert_eq!(dehazed.as_bytes().len(), 4 * 4 * 3);
//! ```
//!
//! # Haze Model
//!
//! A hazy observation `I` mixes the scene radiance `J` with a global
//! atmosphere light `A` according to the transmission `t`:
//!
//! ```text
//! I(x) = J(x) * t(x) + A * (1 - t(x))
//! ```
//!
//! The dark channel prior states that in haze-free outdoor patches at least
//! one channel is close to zero. Taking the dark channel of both sides of the
//! model divided by `A` yields an estimate of `t`, after which `J` follows by
//! inversion.
//!
//! # Pipeline Overview
//!
//! ```text
//! RgbImage (M x N x 3, values 0..=255)
//!     |
//!     v
//! dark_channel            (window minimum over all channels)
//!     |
//!     v
//! estimate_atmosphere     (per-channel max over brightest dark pixels,
//!     |                    clamped to atm_max)
//!     v
//! estimate_transmission   (1 - omega * dark_channel(I / A))
//!     |
//!     v
//! clamp_transmission      (floor at t_min)
//!     |
//!     +---> refine_transmission (guided filter, optional)
//!     |           |
//!     v           v
//! recover_radiance        ((I - A) / t + A, for both maps)
//!     |
//!     v
//! DehazeResult            (five artifacts, quantized on demand)
//! ```
//!
//! Every stage is a pure function of its inputs and produces a new value.
//! Stages are also exported individually for callers that need only part of
//! the pipeline.
//!
//! # Numeric Safeguards
//!
//! - The atmosphere light is clamped to `atm_max` so a blown-out sky does not
//!   wash out the result, and must be strictly positive before dividing by it
//! - Transmission is floored at `t_min` before radiance recovery so the
//!   inversion never divides by a value near zero
//! - Recovered radiance is only clipped to `[0, 255]` when quantized

pub mod api;
pub mod atmosphere;
pub mod image;
pub mod output;
pub mod radiance;
pub mod transmission;
pub mod window_min;


pub use api::{DehazeError, DehazeOptions, Dehazer};
pub use atmosphere::{estimate_atmosphere, AtmosphereLight};
pub use image::{Grid, RgbImage, COLOR_DEPTH, MAX_CHANNEL_VALUE};
pub use output::{quantize, quantize_grid, Artifact, DehazeResult, QuantizedImage};
pub use radiance::recover_radiance;
pub use transmission::{
    clamp_transmission, estimate_transmission, normalize_guidance, refine_transmission,
    EdgeAwareFilter, GuidedFilter,
};
pub use window_min::dark_channel;
