// Calibration module - four-point touchscreen calibration
//
// This module provides the pieces of a calibration session:
// 1. Calibrator: collects one click per target corner and finishes the session
// 2. validation: double-click and mis-click heuristics applied to each click
// 3. mapping: turns four clicks into a corrected AxisRange
// 4. CalibrationSink: receives the finished range
//
// The calibration workflow:
// 1. Create a Calibrator with the range currently in effect
// 2. Feed clicks until all four corners are accepted
// 3. Finish with the display size to compute and deliver the new range

pub mod mapping;
pub mod procedure;
pub mod progress;
pub mod range;
pub mod sink;
pub mod validation;

pub use mapping::CalibrationOutcome;
pub use procedure::{Calibrator, DEFAULT_THRESHOLD_DOUBLECLICK, DEFAULT_THRESHOLD_MISCLICK};
pub use progress::{CalibrationPhase, ClickPoint, ClickSet, Corner, NUM_CORNERS};
pub use range::AxisRange;
pub use sink::{CalibrationSink, CollectingSink, ReportFormat, ReportSink};
pub use validation::MisclickVerdict;
