pub mod image_decode;
pub mod png_codec;

pub use image_decode::{decode_image, read_image};
pub use png_codec::{encode_png, write_png};
