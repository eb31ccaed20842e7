use dark_channel::DehazeError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Image decode error: {0}")]
    Decode(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("Config error in {path}: {message}")]
    Config { path: PathBuf, message: String },

    #[error("Dehaze error: {0}")]
    Dehaze(#[from] DehazeError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
