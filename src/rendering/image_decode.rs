use crate::error::AppError;
use dark_channel::RgbImage;
use std::path::Path;

/// Decode an encoded raster image (PNG, JPEG, BMP, TIFF, GIF, WebP) into
/// an RGB image with values in `[0, 255]`.
///
/// The format is detected from the content, not the file name. Grey input is
/// replicated to all three channels, alpha is dropped and 16-bit samples are
/// scaled to 8 bits.
pub fn decode_image(bytes: &[u8]) -> Result<RgbImage, AppError> {
    let decoded = image::load_from_memory(bytes).map_err(|e| AppError::Decode(e.to_string()))?;
    let color = decoded.color();
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();

    tracing::debug!(width, height, color = ?color, "Decoded image");

    Ok(RgbImage::from_rgb8(
        width as usize,
        height as usize,
        rgb.as_raw(),
    )?)
}

/// Read and decode an image file.
pub fn read_image(path: &Path) -> Result<RgbImage, AppError> {
    let bytes = std::fs::read(path)?;
    decode_image(&bytes)
}
