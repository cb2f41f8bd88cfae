// Error types for the touchscreen calibrator
//
// This module defines custom error types for calibration and configuration,
// providing structured error handling with numeric error codes.

mod calibration;
mod config;

pub use calibration::{log_calibration_error, CalibrationError, CalibrationErrorCodes, SinkError};
pub use config::ConfigError;

/// Error codes for structured error reporting
///
/// This trait provides a standard way to get error codes and messages
/// from custom error types, so callers can report failures consistently.
pub trait ErrorCode {
    /// Get the numeric error code
    fn code(&self) -> i32;

    /// Get the human-readable error message
    fn message(&self) -> String;
}
