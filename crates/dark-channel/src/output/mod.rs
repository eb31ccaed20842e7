//! Pipeline output: quantization and the artifact bundle.
//!
//! [`DehazeResult`] owns every intermediate of a pipeline run. Display
//! artifacts are produced from it with [`DehazeResult::render()`], which
//! clips and truncates values through [`quantize`] / [`quantize_grid`].

mod quantize;
mod result;

pub use quantize::{quantize, quantize_grid, quantize_value, QuantizedImage};
pub use result::{Artifact, DehazeResult};
