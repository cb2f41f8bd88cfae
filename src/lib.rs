// Touch Calibrator Core
// Four-point touchscreen calibration: click collection and range computation

// Module declarations
pub mod calibration;
pub mod config;
pub mod error;

// Re-exports for convenience
pub use calibration::{AxisRange, CalibrationSink, Calibrator, ClickPoint, Corner};
pub use config::{AppConfig, CalibratorConfig};
pub use error::{CalibrationError, ErrorCode, SinkError};
