use crate::error::AppError;
use dark_channel::QuantizedImage;
use std::io::Cursor;
use std::path::Path;

/// Encode an 8-bit artifact as PNG (grayscale for 1 channel, RGB for 3).
pub fn encode_png(image: &QuantizedImage) -> Result<Vec<u8>, AppError> {
    let color_type = match image.channels() {
        1 => png::ColorType::Grayscale,
        3 => png::ColorType::Rgb,
        n => {
            return Err(AppError::PngEncode(format!(
                "cannot encode {} channel image",
                n
            )))
        }
    };

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder =
            png::Encoder::new(&mut buf, image.width() as u32, image.height() as u32);
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Default);
        let mut writer = encoder
            .write_header()
            .map_err(|e| AppError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(image.as_bytes())
            .map_err(|e| AppError::PngEncode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Encode and write a PNG file.
pub fn write_png(path: &Path, image: &QuantizedImage) -> Result<(), AppError> {
    let bytes = encode_png(image)?;
    std::fs::write(path, &bytes)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Wrote PNG");
    Ok(())
}
