// Result sinks for finished calibrations
//
// The calibrator does not know how a range is applied to a device. That is
// the job of a sink supplied by the platform integration: it receives the
// computed range and swap flag exactly once per successful finish.

use std::io::Write;

use serde::Serialize;

use crate::calibration::mapping::CalibrationOutcome;
use crate::calibration::range::AxisRange;
use crate::error::SinkError;

/// Destination for a finished calibration
pub trait CalibrationSink {
    /// Apply or persist the computed range
    ///
    /// An `Err` is reported to the caller of `finish` as
    /// `CalibrationError::SinkFailure`.
    fn finish_data(&mut self, axys: &AxisRange, swap_xy: bool) -> Result<(), SinkError>;
}

impl<F> CalibrationSink for F
where
    F: FnMut(&AxisRange, bool) -> Result<(), SinkError>,
{
    fn finish_data(&mut self, axys: &AxisRange, swap_xy: bool) -> Result<(), SinkError> {
        self(axys, swap_xy)
    }
}

/// Sink that keeps every outcome it receives
#[derive(Debug, Default, Clone)]
pub struct CollectingSink {
    outcomes: Vec<CalibrationOutcome>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outcomes(&self) -> &[CalibrationOutcome] {
        &self.outcomes
    }

    pub fn last(&self) -> Option<&CalibrationOutcome> {
        self.outcomes.last()
    }
}

impl CalibrationSink for CollectingSink {
    fn finish_data(&mut self, axys: &AxisRange, swap_xy: bool) -> Result<(), SinkError> {
        self.outcomes.push(CalibrationOutcome {
            axys: *axys,
            swap_xy,
        });
        Ok(())
    }
}

/// Output format of a [`ReportSink`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

#[derive(Serialize)]
struct ReportPayload<'a> {
    device: &'a str,
    #[serde(flatten)]
    axys: &'a AxisRange,
    swap_xy: bool,
}

/// Sink that prints the outcome as a report
///
/// Nothing is applied to the device; the report tells the user which
/// values to configure.
pub struct ReportSink<W: Write> {
    writer: W,
    device_name: String,
    format: ReportFormat,
}

impl<W: Write> ReportSink<W> {
    pub fn new(writer: W, device_name: impl Into<String>, format: ReportFormat) -> Self {
        Self {
            writer,
            device_name: device_name.into(),
            format,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_text(&mut self, axys: &AxisRange, swap_xy: bool) -> std::io::Result<()> {
        writeln!(self.writer, "Calibrating device '{}'", self.device_name)?;
        writeln!(self.writer, "  min_x={}", axys.x_min)?;
        writeln!(self.writer, "  max_x={}", axys.x_max)?;
        writeln!(self.writer, "  min_y={}", axys.y_min)?;
        writeln!(self.writer, "  max_y={}", axys.y_max)?;
        writeln!(self.writer, "  swap_xy={}", swap_xy)?;
        Ok(())
    }
}

impl<W: Write> CalibrationSink for ReportSink<W> {
    fn finish_data(&mut self, axys: &AxisRange, swap_xy: bool) -> Result<(), SinkError> {
        match self.format {
            ReportFormat::Text => self.write_text(axys, swap_xy)?,
            ReportFormat::Json => {
                let payload = ReportPayload {
                    device: &self.device_name,
                    axys,
                    swap_xy,
                };
                serde_json::to_writer_pretty(&mut self.writer, &payload)?;
                writeln!(self.writer)?;
            }
        }
        self.writer.flush()?;
        Ok(())
    }
}
