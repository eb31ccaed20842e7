//! Unified error type for the dark-channel public API.
//!
//! Every stage of the pipeline reports failures through [`DehazeError`].
//! Errors are detected before any artifact is produced and are returned to
//! the caller unmodified; nothing is retried or replaced by a default.

use thiserror::Error;

/// Error type for the dehazing pipeline.
///
/// # Example
///
/// ```
/// use dark_channel::{DehazeError, RgbImage};
///
/// let err = RgbImage::from_rgb8(0, 4, &[]).unwrap_err();
/// assert!(matches!(err, DehazeError::Shape(_)));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DehazeError {
    /// Input is not a well-formed M x N x 3 grid, or a dimension is zero.
    #[error("shape error: {0}")]
    Shape(String),

    /// A pipeline parameter is outside its valid range.
    #[error("invalid parameter `{name}`: {reason}")]
    Parameter {
        /// Parameter name as exposed to callers
        name: &'static str,
        /// Human readable constraint that was violated
        reason: String,
    },

    /// The atmosphere light candidate set is empty.
    #[error("estimation error: {0}")]
    Estimation(String),

    /// An atmosphere light channel is not strictly positive.
    #[error("division error: atmosphere light channel {channel} is {value}, must be > 0")]
    Division {
        /// Channel index (0 = R, 1 = G, 2 = B)
        channel: usize,
        /// Offending value after clamping
        value: f64,
    },

    /// The edge-aware filter failed on degenerate input.
    #[error("numeric error: {0}")]
    Numeric(String),
}

impl DehazeError {
    pub(crate) fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        DehazeError::Parameter {
            name,
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parameter_error_message() {
        let err = DehazeError::parameter("window", "must be at least 1");
        assert_eq!(
            err.to_string(),
            "invalid parameter `window`: must be at least 1"
        );
    }

    #[test]
    fn test_division_error_message() {
        let err = DehazeError::Division {
            channel: 2,
            value: 0.0,
        };
        assert_eq!(
            err.to_string(),
            "division error: atmosphere light channel 2 is 0, must be > 0"
        );
    }

    #[test]
    fn test_shape_error_message() {
        let err = DehazeError::Shape("expected 12 values, got 11".to_string());
        assert_eq!(err.to_string(), "shape error: expected 12 values, got 11");
    }
}
