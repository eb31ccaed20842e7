//! Public API for the dark-channel crate.
//!
//! This module provides the high-level API: the [`Dehazer`] builder, its
//! [`DehazeOptions`] and the [`DehazeError`] error type.

mod builder;
mod error;
mod options;

pub use builder::Dehazer;
pub use error::DehazeError;
pub use options::DehazeOptions;
