//! Construction-time validation errors

use thiserror::Error;

/// Errors raised while constructing a discrete system
///
/// All variants are validation failures detected before any object is
/// returned. Once a system exists, `step` and `reset` cannot fail.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SystemError {
    #[error("Invalid sampling time: {0}")]
    InvalidSamplingTime(String),

    #[error("Invalid buffer size: {0}")]
    InvalidBufferSize(String),

    #[error("Invalid coefficients: {0}")]
    InvalidCoefficients(String),

    #[error("Invalid dimensions: {0}")]
    InvalidDimensions(String),
}

pub type Result<T> = std::result::Result<T, SystemError>;

/// Check that a sampling period is strictly positive (rejects NaN too)
pub(crate) fn check_sampling_time(sampling_time: f64, owner: &str) -> Result<()> {
    if sampling_time > 0.0 {
        Ok(())
    } else {
        Err(SystemError::InvalidSamplingTime(format!(
            "{}: sampling time must be > 0, got {}",
            owner, sampling_time
        )))
    }
}

pub(crate) fn check_buffer_size(buffer_size: usize, owner: &str) -> Result<()> {
    if buffer_size == 0 {
        Err(SystemError::InvalidBufferSize(format!(
            "{}: buffer size must be > 0",
            owner
        )))
    } else {
        Ok(())
    }
}
