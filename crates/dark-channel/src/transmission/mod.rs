//! Transmission estimation and refinement.
//!
//! Transmission `t(x)` is the fraction of scene light reaching the camera
//! without being scattered. The haze model `I = J * t + A * (1 - t)` makes it
//! recoverable from the dark channel of `I / A`:
//!
//! 1. [`estimate_transmission`] derives the raw map `1 - omega * dark(I / A)`
//! 2. [`clamp_transmission`] floors it at `t_min`
//! 3. [`refine_transmission`] optionally smooths it with an
//!    [`EdgeAwareFilter`] guided by the source image

mod box_filter;
mod estimate;
mod guided_filter;
mod refine;

pub use estimate::estimate_transmission;
pub use guided_filter::{EdgeAwareFilter, GuidedFilter};
pub use refine::{clamp_transmission, normalize_guidance, refine_transmission};
