//! Image and grid buffers shared by every pipeline stage.

mod grid;
mod rgb;

pub use grid::Grid;
pub use rgb::{RgbImage, CHANNELS, COLOR_DEPTH, MAX_CHANNEL_VALUE};
