//! Dehaze - single image haze removal
//!
//! Command line front end for the `dark-channel` crate: configuration,
//! PNG decoding and encoding, output naming and batch processing.
//! This library exposes modules for integration testing.

pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
