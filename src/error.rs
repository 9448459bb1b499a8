//! Error module for the popcode library.
use std::error::Error;
use std::fmt;

/// Error types for the library.
#[derive(Debug, PartialEq)]
pub enum PopCodeError {
    /// Error for invalid parameters, e.g., a non-positive neuron count or tuning width.
    InvalidParameter(String),
    /// Error for a negative or non-finite expected rate passed to the spike sampler.
    InvalidRate(f64),
    /// Error for an unknown tuning curve name.
    UnknownCurve(String),
    /// Error for invalid operations, e.g., starting a session that is already running.
    InvalidOperation(String),
    /// Error for I/O operations.
    IOError(String),
}

impl fmt::Display for PopCodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PopCodeError::InvalidParameter(e) => write!(f, "Invalid parameter: {}", e),
            PopCodeError::InvalidRate(rate) => write!(
                f,
                "Invalid expected rate: {} (must be finite and non-negative)",
                rate
            ),
            PopCodeError::UnknownCurve(name) => write!(
                f,
                "Unknown tuning curve: {} (must be one of: gaussian, square, sine)",
                name
            ),
            PopCodeError::InvalidOperation(e) => write!(f, "Invalid operation: {}", e),
            PopCodeError::IOError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl Error for PopCodeError {}
