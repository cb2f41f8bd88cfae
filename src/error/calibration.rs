// Calibration error types and constants

use crate::error::ErrorCode;
use log::error;
use std::fmt;

/// Calibration error code constants
///
/// Single source of truth for the numeric codes carried by
/// [`CalibrationError`], so front ends can map failures without
/// matching on message text.
///
/// Error code range: 2001-2005
pub struct CalibrationErrorCodes {}

impl CalibrationErrorCodes {
    /// Fewer than four clicks were accepted before finishing
    pub const INSUFFICIENT_CLICKS: i32 = 2001;

    /// Target grid size cannot compensate for the corner inset
    pub const INVALID_BLOCK_COUNT: i32 = 2002;

    /// Display width or height is zero
    pub const INVALID_DIMENSIONS: i32 = 2003;

    /// The result sink refused the computed range
    pub const SINK_FAILURE: i32 = 2004;

    /// The session already produced a range
    pub const ALREADY_FINISHED: i32 = 2005;
}

/// Log a calibration error with structured context
///
/// This function logs calibration errors with structured fields including:
/// - code: Numeric error code for programmatic handling
/// - component: The component where the error occurred
/// - message: Human-readable error message
/// - context: The operation that failed
///
/// The logging is non-blocking and will not panic on failure.
pub fn log_calibration_error(err: &CalibrationError, context: &str) {
    error!(
        "Calibration error in {}: code={}, component=Calibrator, message={}",
        context,
        err.code(),
        err.message()
    );
}

/// Failure reported by a [`crate::calibration::CalibrationSink`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkError {
    reason: String,
}

impl SinkError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl fmt::Display for SinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sink rejected calibration: {}", self.reason)
    }
}

impl std::error::Error for SinkError {}

impl From<std::io::Error> for SinkError {
    fn from(err: std::io::Error) -> Self {
        SinkError::new(err.to_string())
    }
}

impl From<serde_json::Error> for SinkError {
    fn from(err: serde_json::Error) -> Self {
        SinkError::new(err.to_string())
    }
}

/// Calibration-related errors
///
/// These errors cover the finishing step of a calibration session. A
/// rejected click is not an error: `add_click` reports it by returning
/// `false`.
///
/// Error code range: 2001-2005
#[derive(Debug, Clone, PartialEq)]
pub enum CalibrationError {
    /// Finish requested before all corners were clicked
    InsufficientClicks { required: usize, collected: usize },

    /// Target grid must have more than two blocks per axis
    InvalidBlockCount { num_blocks: u32 },

    /// Display dimensions must be non-zero
    InvalidDimensions { width: u32, height: u32 },

    /// Result sink reported a failure
    SinkFailure { reason: String },

    /// Session already finished
    AlreadyFinished,
}

impl ErrorCode for CalibrationError {
    fn code(&self) -> i32 {
        match self {
            CalibrationError::InsufficientClicks { .. } => {
                CalibrationErrorCodes::INSUFFICIENT_CLICKS
            }
            CalibrationError::InvalidBlockCount { .. } => {
                CalibrationErrorCodes::INVALID_BLOCK_COUNT
            }
            CalibrationError::InvalidDimensions { .. } => {
                CalibrationErrorCodes::INVALID_DIMENSIONS
            }
            CalibrationError::SinkFailure { .. } => CalibrationErrorCodes::SINK_FAILURE,
            CalibrationError::AlreadyFinished => CalibrationErrorCodes::ALREADY_FINISHED,
        }
    }

    fn message(&self) -> String {
        match self {
            CalibrationError::InsufficientClicks {
                required,
                collected,
            } => {
                format!("Insufficient clicks: need {}, got {}", required, collected)
            }
            CalibrationError::InvalidBlockCount { num_blocks } => {
                format!(
                    "Invalid block count: need more than 2 blocks, got {}",
                    num_blocks
                )
            }
            CalibrationError::InvalidDimensions { width, height } => {
                format!("Invalid display dimensions: {}x{}", width, height)
            }
            CalibrationError::SinkFailure { reason } => {
                format!("Calibration sink failed: {}", reason)
            }
            CalibrationError::AlreadyFinished => "Calibration already finished".to_string(),
        }
    }
}

impl fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "CalibrationError::{:?} (code {}): {}",
            self,
            self.code(),
            self.message()
        )
    }
}

impl std::error::Error for CalibrationError {}

impl From<SinkError> for CalibrationError {
    fn from(err: SinkError) -> Self {
        CalibrationError::SinkFailure { reason: err.reason }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calibration_error_codes() {
        assert_eq!(
            CalibrationError::InsufficientClicks {
                required: 4,
                collected: 2
            }
            .code(),
            CalibrationErrorCodes::INSUFFICIENT_CLICKS
        );
        assert_eq!(
            CalibrationError::InvalidBlockCount { num_blocks: 2 }.code(),
            CalibrationErrorCodes::INVALID_BLOCK_COUNT
        );
        assert_eq!(
            CalibrationError::InvalidDimensions {
                width: 0,
                height: 480
            }
            .code(),
            CalibrationErrorCodes::INVALID_DIMENSIONS
        );
        assert_eq!(
            CalibrationError::SinkFailure {
                reason: "test".to_string()
            }
            .code(),
            CalibrationErrorCodes::SINK_FAILURE
        );
        assert_eq!(
            CalibrationError::AlreadyFinished.code(),
            CalibrationErrorCodes::ALREADY_FINISHED
        );
    }

    #[test]
    fn test_calibration_error_messages() {
        let err = CalibrationError::InsufficientClicks {
            required: 4,
            collected: 3,
        };
        assert_eq!(err.message(), "Insufficient clicks: need 4, got 3");

        let err = CalibrationError::InvalidBlockCount { num_blocks: 2 };
        assert!(err.message().contains("got 2"));

        let err = CalibrationError::InvalidDimensions {
            width: 0,
            height: 600,
        };
        assert_eq!(err.message(), "Invalid display dimensions: 0x600");

        let err = CalibrationError::SinkFailure {
            reason: "driver refused".to_string(),
        };
        assert_eq!(err.message(), "Calibration sink failed: driver refused");

        let err = CalibrationError::AlreadyFinished;
        assert!(err.message().contains("already finished"));
    }

    #[test]
    fn test_calibration_error_display() {
        let err = CalibrationError::AlreadyFinished;
        let display = format!("{}", err);
        assert!(display.contains("CalibrationError"));
        assert!(display.contains(&err.code().to_string()));
    }

    #[test]
    fn test_sink_error_conversion() {
        let err: CalibrationError = SinkError::new("read-only property").into();
        match err {
            CalibrationError::SinkFailure { reason } => {
                assert_eq!(reason, "read-only property");
            }
            other => panic!("Expected SinkFailure, got {:?}", other),
        }
    }

    #[test]
    fn test_io_error_into_sink_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let sink_err: SinkError = io_err.into();
        assert!(sink_err.reason().contains("pipe closed"));
    }
}
