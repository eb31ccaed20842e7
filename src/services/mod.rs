pub mod dehaze_service;

pub use dehaze_service::{BatchReport, DehazeService, ProcessedImage};
