// AxisRange - raw coordinate bounds of a touch device
//
// A range describes the linear mapping from raw device coordinates to the
// display: raw x_min lands on the left edge, raw x_max on the right edge,
// and likewise for y. The calibrator reads the range currently in effect
// and produces a corrected one.

use std::fmt;

/// Min/max raw coordinate on each axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct AxisRange {
    pub x_min: i32,
    pub x_max: i32,
    pub y_min: i32,
    pub y_max: i32,
}

impl AxisRange {
    pub fn new(x_min: i32, x_max: i32, y_min: i32, y_max: i32) -> Self {
        Self {
            x_min,
            x_max,
            y_min,
            y_max,
        }
    }

    /// Identity range for a display of the given size
    ///
    /// Used when the device reports no usable precalibration: raw
    /// coordinates are assumed to already be display pixels.
    pub fn for_display(width: u32, height: u32) -> Self {
        Self::new(
            0,
            i32::try_from(width).unwrap_or(i32::MAX),
            0,
            i32::try_from(height).unwrap_or(i32::MAX),
        )
    }

    /// Signed span of the x axis (negative when the axis is inverted)
    pub fn width(&self) -> i32 {
        self.x_max - self.x_min
    }

    /// Signed span of the y axis (negative when the axis is inverted)
    pub fn height(&self) -> i32 {
        self.y_max - self.y_min
    }
}

impl fmt::Display for AxisRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x={}..{} y={}..{}",
            self.x_min, self.x_max, self.y_min, self.y_max
        )
    }
}
