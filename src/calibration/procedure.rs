// Calibrator - four-corner click collection workflow
//
// This module manages the calibration state machine for one session:
// 1. Collect a click on each target corner (UL, UR, LL, LR)
// 2. Suppress double-clicks and report probable mis-clicks on the way
// 3. Finish: compute the corrected AxisRange and hand it to a sink
//
// Empty -> Collecting(1..3) -> Ready -> Finished

use crate::calibration::mapping::{compute_outcome, CalibrationOutcome};
use crate::calibration::progress::{CalibrationPhase, ClickPoint, ClickSet, Corner, NUM_CORNERS};
use crate::calibration::range::AxisRange;
use crate::calibration::sink::CalibrationSink;
use crate::calibration::validation::{is_double_click, misclick_verdict, MisclickVerdict};
use crate::config::CalibratorConfig;
use crate::error::{log_calibration_error, CalibrationError};

/// Default pixel distance under which a click repeats the previous one
pub const DEFAULT_THRESHOLD_DOUBLECLICK: i32 = 7;

/// Default pixel distance used by the mis-click heuristic
pub const DEFAULT_THRESHOLD_MISCLICK: i32 = 15;

/// Calibrator manages the click collection for one calibration session
#[derive(Debug, Clone)]
pub struct Calibrator {
    /// Device name, only used in diagnostics
    device_name: String,
    /// Range currently in effect on the device
    old_axys: AxisRange,
    verbose: bool,
    clicks: ClickSet,
    threshold_doubleclick: i32,
    threshold_misclick: i32,
    last_verdict: Option<MisclickVerdict>,
    finished: bool,
}

impl Calibrator {
    /// Create a new calibrator
    ///
    /// # Arguments
    /// * `device_name` - Device identifier for diagnostics
    /// * `old_axys` - Range currently in effect, used as the scale reference
    /// * `verbose` - Emit debug diagnostics for every click
    pub fn new(device_name: impl Into<String>, old_axys: AxisRange, verbose: bool) -> Self {
        Self {
            device_name: device_name.into(),
            old_axys,
            verbose,
            clicks: ClickSet::new(),
            threshold_doubleclick: DEFAULT_THRESHOLD_DOUBLECLICK,
            threshold_misclick: DEFAULT_THRESHOLD_MISCLICK,
            last_verdict: None,
            finished: false,
        }
    }

    /// Create with thresholds and verbosity taken from configuration
    pub fn from_config(
        device_name: impl Into<String>,
        old_axys: AxisRange,
        config: &CalibratorConfig,
    ) -> Self {
        let mut calibrator = Self::new(device_name, old_axys, config.verbose);
        calibrator.set_threshold_doubleclick(config.threshold_doubleclick);
        calibrator.set_threshold_misclick(config.threshold_misclick);
        calibrator
    }

    /// Set the double-click threshold (0 or below disables the check)
    pub fn set_threshold_doubleclick(&mut self, threshold: i32) {
        self.threshold_doubleclick = threshold;
    }

    /// Set the mis-click threshold
    pub fn set_threshold_misclick(&mut self, threshold: i32) {
        self.threshold_misclick = threshold;
    }

    pub fn threshold_doubleclick(&self) -> i32 {
        self.threshold_doubleclick
    }

    pub fn threshold_misclick(&self) -> i32 {
        self.threshold_misclick
    }

    /// Number of accepted clicks (0-4)
    pub fn num_clicks(&self) -> usize {
        self.clicks.len()
    }

    pub fn device_name(&self) -> &str {
        &self.device_name
    }

    pub fn old_axys(&self) -> &AxisRange {
        &self.old_axys
    }

    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Accepted clicks in corner order
    pub fn clicks(&self) -> &[ClickPoint] {
        self.clicks.as_slice()
    }

    /// Mis-click verdict for the most recently accepted click
    ///
    /// `None` after the first click, since there is nothing to compare it with.
    pub fn last_verdict(&self) -> Option<MisclickVerdict> {
        self.last_verdict
    }

    /// Current position in the session state machine
    pub fn phase(&self) -> CalibrationPhase {
        if self.finished {
            CalibrationPhase::Finished
        } else {
            CalibrationPhase::from_click_count(self.clicks.len())
        }
    }

    /// Corner the user should click next, if any
    pub fn next_corner(&self) -> Option<Corner> {
        if self.finished {
            return None;
        }
        Corner::from_index(self.clicks.len())
    }

    /// Add a click for the next corner
    ///
    /// # Arguments
    /// * `x`, `y` - Raw device coordinates of the click
    ///
    /// # Returns
    /// * `true` - Click accepted
    /// * `false` - Click rejected as a double-click (or session already
    ///   complete); state is unchanged and the user should click again
    pub fn add_click(&mut self, x: i32, y: i32) -> bool {
        let candidate = ClickPoint::new(x, y);
        let index = self.clicks.len();

        if !self.phase().accepts_clicks() {
            tracing::warn!(
                "[Calibrator] Ignoring click {} (X={}, Y={}) on '{}': {} clicks already collected",
                index,
                x,
                y,
                self.device_name,
                NUM_CORNERS
            );
            return false;
        }

        if let Some(previous) = self.clicks.last() {
            if is_double_click(previous, candidate, self.threshold_doubleclick) {
                if self.verbose {
                    tracing::debug!(
                        "[Calibrator] Not adding click {} (X={}, Y={}): within {} pixels of previous click",
                        index,
                        x,
                        y,
                        self.threshold_doubleclick
                    );
                }
                return false;
            }
        }

        let verdict = misclick_verdict(&self.clicks, candidate, self.threshold_misclick);
        match verdict {
            Some(MisclickVerdict::Misclick) => tracing::warn!(
                "[Calibrator] Click {} (X={}, Y={}) looks like a mis-click (threshold {})",
                index,
                x,
                y,
                self.threshold_misclick
            ),
            Some(MisclickVerdict::GoodClick) => tracing::debug!(
                "[Calibrator] Click {} (X={}, Y={}) looks like a good click",
                index,
                x,
                y
            ),
            None => {}
        }

        if !self.clicks.push(candidate) {
            return false;
        }
        self.last_verdict = verdict;

        if self.verbose {
            tracing::debug!("[Calibrator] Adding click {} (X={}, Y={})", index, x, y);
        }

        true
    }

    /// Compute the calibrated range without delivering it
    ///
    /// # Arguments
    /// * `width`, `height` - Display size in pixels
    /// * `num_blocks` - Grid divisions of the calibration target (must be > 2)
    ///
    /// # Returns
    /// * `Ok(CalibrationOutcome)` - Range and axis-swap flag
    /// * `Err(CalibrationError)` - Clicks missing or invalid parameters
    pub fn compute(
        &self,
        width: u32,
        height: u32,
        num_blocks: u32,
    ) -> Result<CalibrationOutcome, CalibrationError> {
        if self.clicks.len() != NUM_CORNERS {
            return Err(CalibrationError::InsufficientClicks {
                required: NUM_CORNERS,
                collected: self.clicks.len(),
            });
        }
        if num_blocks <= 2 {
            return Err(CalibrationError::InvalidBlockCount { num_blocks });
        }
        if width == 0 || height == 0 {
            return Err(CalibrationError::InvalidDimensions { width, height });
        }

        Ok(compute_outcome(
            self.clicks,
            &self.old_axys,
            width,
            height,
            num_blocks,
        ))
    }

    /// Finish calibration and deliver the new range to `sink`
    ///
    /// # Arguments
    /// * `width`, `height` - Display size in pixels
    /// * `num_blocks` - Grid divisions of the calibration target (must be > 2)
    /// * `sink` - Platform integration receiving the range and swap flag
    ///
    /// # Returns
    /// * `Ok(AxisRange)` - Range accepted by the sink
    /// * `Err(CalibrationError)` - Preconditions unmet or sink failure
    ///
    /// # Errors
    /// - Fewer than four clicks accepted (sink is not called)
    /// - `num_blocks <= 2` or a zero display dimension (sink is not called)
    /// - Sink rejected the range; the session stays Ready and can retry
    /// - Session already finished
    pub fn finish<S>(
        &mut self,
        width: u32,
        height: u32,
        num_blocks: u32,
        sink: &mut S,
    ) -> Result<AxisRange, CalibrationError>
    where
        S: CalibrationSink + ?Sized,
    {
        if self.finished {
            let err = CalibrationError::AlreadyFinished;
            log_calibration_error(&err, "finish");
            return Err(err);
        }

        let outcome = self.compute(width, height, num_blocks).inspect_err(|err| {
            log_calibration_error(err, "finish");
        })?;

        tracing::info!(
            "[Calibrator] Calibrated '{}': {} (swap_xy={})",
            self.device_name,
            outcome.axys,
            outcome.swap_xy
        );

        sink.finish_data(&outcome.axys, outcome.swap_xy)
            .map_err(CalibrationError::from)
            .inspect_err(|err| {
                log_calibration_error(err, "finish_data");
            })?;

        self.finished = true;
        Ok(outcome.axys)
    }

    /// Reset the calibrator to start collecting clicks again
    pub fn reset(&mut self) {
        self.clicks.clear();
        self.last_verdict = None;
        self.finished = false;
    }
}

#[cfg(test)]
#[path = "procedure_tests.rs"]
mod tests;
