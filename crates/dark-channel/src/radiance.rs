//! Scene radiance recovery.

use crate::api::DehazeError;
use crate::atmosphere::AtmosphereLight;
use crate::image::{Grid, RgbImage, CHANNELS};

/// Invert the haze model: `J = (I - A) / t + A` for every pixel and channel.
///
/// `transmission` must already be floored (see
/// [`clamp_transmission`](crate::clamp_transmission)); the same value is
/// used for all three channels of a pixel. No clamping is applied to the
/// result, which may lie outside `[0, 255]` and is brought back into range
/// by [`quantize`](crate::quantize).
///
/// # Example
///
/// ```
/// use dark_channel::{recover_radiance, AtmosphereLight, Grid, RgbImage};
///
/// let image = RgbImage::uniform(1, 1, [150.0, 150.0, 150.0]).unwrap();
/// let light = AtmosphereLight([200.0, 200.0, 200.0]);
/// let t = Grid::filled(1, 1, 0.5).unwrap();
///
/// let radiance = recover_radiance(&image, &light, &t).unwrap();
/// assert_eq!(radiance.pixel(0, 0), [100.0, 100.0, 100.0]);
/// ```
pub fn recover_radiance(
    image: &RgbImage,
    light: &AtmosphereLight,
    transmission: &Grid,
) -> Result<RgbImage, DehazeError> {
    if (transmission.width(), transmission.height()) != (image.width(), image.height()) {
        return Err(DehazeError::Shape(format!(
            "transmission is {}x{} but image is {}x{}",
            transmission.width(),
            transmission.height(),
            image.width(),
            image.height()
        )));
    }

    let a = light.channels();
    let data = image
        .as_slice()
        .chunks_exact(CHANNELS)
        .zip(transmission.values())
        .flat_map(|(px, &t)| [0, 1, 2].map(|c| (px[c] - a[c]) / t + a[c]))
        .collect();

    Ok(RgbImage::from_parts(image.width(), image.height(), data))
}
