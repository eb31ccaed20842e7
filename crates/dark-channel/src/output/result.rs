//! The complete set of pipeline artifacts.

use super::quantize::{quantize, quantize_grid, QuantizedImage};
use crate::atmosphere::AtmosphereLight;
use crate::image::{Grid, RgbImage, MAX_CHANNEL_VALUE};

/// One of the five display artifacts produced by a pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Artifact {
    /// Dark channel of the source image (grey).
    DarkChannel,
    /// Transmission floored at `t_min`, scaled to `[0, 255]` (grey).
    RawTransmission,
    /// Refined transmission, scaled to `[0, 255]` (grey).
    RefinedTransmission,
    /// Radiance recovered with the floored raw transmission (RGB).
    RadianceRaw,
    /// Radiance recovered with the refined transmission (RGB).
    RadianceRefined,
}

impl Artifact {
    /// All artifacts in pipeline order.
    pub const ALL: [Artifact; 5] = [
        Artifact::DarkChannel,
        Artifact::RawTransmission,
        Artifact::RefinedTransmission,
        Artifact::RadianceRaw,
        Artifact::RadianceRefined,
    ];

    /// Short stable name, suitable as a file name suffix.
    pub fn name(self) -> &'static str {
        match self {
            Artifact::DarkChannel => "dark",
            Artifact::RawTransmission => "rawt",
            Artifact::RefinedTransmission => "refinedt",
            Artifact::RadianceRaw => "radiance-rawt",
            Artifact::RadianceRefined => "radiance-refinedt",
        }
    }
}

/// Everything computed while dehazing one image.
///
/// Floating point intermediates are kept alongside the display artifacts so
/// callers can inspect any stage. Each artifact is rendered on demand from
/// its own stored value; retrieving one never consumes another.
#[derive(Debug, Clone)]
pub struct DehazeResult {
    pub(crate) dark_channel: Grid,
    pub(crate) atmosphere: AtmosphereLight,
    pub(crate) raw_transmission: Grid,
    pub(crate) clamped_transmission: Grid,
    pub(crate) refined_transmission: Grid,
    pub(crate) radiance_raw: RgbImage,
    pub(crate) radiance_refined: RgbImage,
}

impl DehazeResult {
    pub fn width(&self) -> usize {
        self.dark_channel.width()
    }

    pub fn height(&self) -> usize {
        self.dark_channel.height()
    }

    pub fn dark_channel(&self) -> &Grid {
        &self.dark_channel
    }

    /// Atmosphere light after clamping to `atm_max`.
    pub fn atmosphere(&self) -> AtmosphereLight {
        self.atmosphere
    }

    /// Unfloored transmission `1 - omega * dark(I / A)`.
    pub fn raw_transmission(&self) -> &Grid {
        &self.raw_transmission
    }

    /// Raw transmission floored at `t_min`.
    pub fn clamped_transmission(&self) -> &Grid {
        &self.clamped_transmission
    }

    /// Edge-refined transmission (equal to the clamped map when refinement
    /// is disabled).
    pub fn refined_transmission(&self) -> &Grid {
        &self.refined_transmission
    }

    /// Unclipped radiance recovered with the clamped raw transmission.
    pub fn radiance_raw(&self) -> &RgbImage {
        &self.radiance_raw
    }

    /// Unclipped radiance recovered with the refined transmission.
    pub fn radiance_refined(&self) -> &RgbImage {
        &self.radiance_refined
    }

    /// Render one artifact as an 8-bit image.
    pub fn render(&self, artifact: Artifact) -> QuantizedImage {
        match artifact {
            Artifact::DarkChannel => quantize_grid(&self.dark_channel, 1.0),
            Artifact::RawTransmission => {
                quantize_grid(&self.clamped_transmission, MAX_CHANNEL_VALUE)
            }
            Artifact::RefinedTransmission => {
                quantize_grid(&self.refined_transmission, MAX_CHANNEL_VALUE)
            }
            Artifact::RadianceRaw => quantize(&self.radiance_raw),
            Artifact::RadianceRefined => quantize(&self.radiance_refined),
        }
    }
}
