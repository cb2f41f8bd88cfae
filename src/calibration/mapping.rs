// Range computation for a finished calibration
//
// Turns the four corner clicks into a new AxisRange. The swap of the
// clicked corners happens before the math and the swap of the resulting
// bounds after it; rotated devices need both.
//
// Arithmetic follows the classic four-point calibrator exactly: bounds and
// deltas are computed in f32 and truncated toward zero.

use crate::calibration::progress::{ClickSet, Corner};
use crate::calibration::range::AxisRange;

/// Range produced by a calibration together with its axis-swap flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CalibrationOutcome {
    pub axys: AxisRange,
    pub swap_xy: bool,
}

fn span(min: i32, max: i32) -> f32 {
    (i64::from(max) - i64::from(min)) as f32
}

/// Check if the device axes are rotated relative to the display
///
/// The two upper corners should differ mostly in x. When their y
/// displacement is larger, the device reports x and y swapped.
pub fn detect_swap(clicks: &ClickSet) -> bool {
    let ul = clicks[Corner::UpperLeft];
    let ur = clicks[Corner::UpperRight];
    (i64::from(ul.x) - i64::from(ur.x)).abs() < (i64::from(ul.y) - i64::from(ur.y)).abs()
}

/// Relabel the clicked corners of a swapped device
///
/// On a device with swapped axes the user's second click lands where the
/// device believes the lower-left corner is, and vice versa.
pub fn swap_clicked_corners(clicks: &mut ClickSet) {
    clicks.swap(Corner::LowerLeft, Corner::UpperRight);
}

/// Raw bounds scaled through the previous range
///
/// Each bound averages the two clicks on the matching edge of the target.
/// The previous range converts click positions measured in display pixels
/// back into raw device units.
pub fn scaled_bounds(clicks: &ClickSet, old: &AxisRange, width: u32, height: u32) -> AxisRange {
    let scale_x = span(old.x_min, old.x_max) / width as f32;
    let scale_y = span(old.y_min, old.y_max) / height as f32;

    let edge = |a: i32, b: i32, scale: f32, origin: i32| -> i32 {
        ((i64::from(a) + i64::from(b)) as f32 * scale / 2.0 + origin as f32) as i32
    };

    let ul = clicks[Corner::UpperLeft];
    let ur = clicks[Corner::UpperRight];
    let ll = clicks[Corner::LowerLeft];
    let lr = clicks[Corner::LowerRight];

    AxisRange {
        x_min: edge(ul.x, ll.x, scale_x, old.x_min),
        x_max: edge(ur.x, lr.x, scale_x, old.x_min),
        y_min: edge(ul.y, ur.y, scale_y, old.y_min),
        y_max: edge(ll.y, lr.y, scale_y, old.y_min),
    }
}

/// Inset of the target from the screen edge, in raw units
///
/// The targets sit one grid block in from each edge, so the clicked span
/// covers `num_blocks - 2` blocks. `num_blocks` must be greater than 2.
pub fn inset_delta(min: i32, max: i32, num_blocks: u32) -> i32 {
    (span(min, max) / (num_blocks as f32 - 2.0)) as i32
}

/// Widen the clicked bounds out to the physical screen edges
pub fn expand_to_screen_edges(bounds: AxisRange, num_blocks: u32) -> AxisRange {
    let delta_x = inset_delta(bounds.x_min, bounds.x_max, num_blocks);
    let delta_y = inset_delta(bounds.y_min, bounds.y_max, num_blocks);

    AxisRange {
        x_min: bounds.x_min.saturating_sub(delta_x),
        x_max: bounds.x_max.saturating_add(delta_x),
        y_min: bounds.y_min.saturating_sub(delta_y),
        y_max: bounds.y_max.saturating_add(delta_y),
    }
}

/// Cross-swap final bounds for a device with swapped axes
///
/// Exchanges x_min with y_max and y_min with x_max.
pub fn swap_range_axes(range: AxisRange) -> AxisRange {
    AxisRange {
        x_min: range.y_max,
        x_max: range.y_min,
        y_min: range.x_max,
        y_max: range.x_min,
    }
}

/// Run the full computation on a complete set of clicks
///
/// `clicks` is taken by value: the corner relabelling for swapped devices
/// only affects this computation.
pub fn compute_outcome(
    mut clicks: ClickSet,
    old: &AxisRange,
    width: u32,
    height: u32,
    num_blocks: u32,
) -> CalibrationOutcome {
    let swap_xy = detect_swap(&clicks);
    if swap_xy {
        swap_clicked_corners(&mut clicks);
    }

    let bounds = scaled_bounds(&clicks, old, width, height);
    let mut axys = expand_to_screen_edges(bounds, num_blocks);

    if swap_xy {
        axys = swap_range_axes(axys);
    }

    CalibrationOutcome { axys, swap_xy }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::progress::ClickPoint;

    fn corners(ul: (i32, i32), ur: (i32, i32), ll: (i32, i32), lr: (i32, i32)) -> ClickSet {
        ClickSet::from_corners(ul.into(), ur.into(), ll.into(), lr.into())
    }

    #[test]
    fn test_detect_swap_vertical_upper_edge() {
        let clicks = corners((0, 0), (0, 100), (100, 0), (100, 100));
        assert!(detect_swap(&clicks));
    }

    #[test]
    fn test_detect_swap_horizontal_upper_edge() {
        let clicks = corners((0, 0), (100, 0), (0, 100), (100, 100));
        assert!(!detect_swap(&clicks));
    }

    #[test]
    fn test_detect_swap_tie_is_not_swapped() {
        let clicks = corners((0, 0), (50, 50), (0, 100), (100, 100));
        assert!(!detect_swap(&clicks));
    }

    #[test]
    fn test_swap_clicked_corners_exchanges_ll_and_ur() {
        let mut clicks = corners((1, 2), (3, 4), (5, 6), (7, 8));
        swap_clicked_corners(&mut clicks);
        assert_eq!(clicks[Corner::UpperRight], ClickPoint::new(5, 6));
        assert_eq!(clicks[Corner::LowerLeft], ClickPoint::new(3, 4));
        assert_eq!(clicks[Corner::UpperLeft], ClickPoint::new(1, 2));
        assert_eq!(clicks[Corner::LowerRight], ClickPoint::new(7, 8));
    }

    #[test]
    fn test_scaled_bounds_midpoints() {
        let clicks = corners((10, 10), (90, 10), (10, 90), (90, 90));
        let old = AxisRange::new(0, 1000, 0, 1000);
        let bounds = scaled_bounds(&clicks, &old, 100, 100);
        assert_eq!(bounds, AxisRange::new(100, 900, 100, 900));
    }

    #[test]
    fn test_scaled_bounds_offsets_by_old_minimum() {
        let clicks = corners((10, 20), (90, 20), (10, 80), (90, 80));
        let old = AxisRange::new(200, 1200, 100, 600);
        // scale_x = 10, scale_y = 5
        let bounds = scaled_bounds(&clicks, &old, 100, 100);
        assert_eq!(bounds, AxisRange::new(300, 1100, 200, 500));
    }

    #[test]
    fn test_scaled_bounds_truncates_toward_zero() {
        let clicks = corners((1, 1), (2, 1), (1, 2), (2, 2));
        let old = AxisRange::new(0, 3, 0, 3);
        // scale = 0.75; x_min = 2 * 0.75 / 2 = 0.75 -> 0, x_max = 4 * 0.75 / 2 = 1.5 -> 1
        let bounds = scaled_bounds(&clicks, &old, 4, 4);
        assert_eq!(bounds, AxisRange::new(0, 1, 0, 1));
    }

    #[test]
    fn test_inset_delta_truncates() {
        assert_eq!(inset_delta(100, 900, 8), 133);
        assert_eq!(inset_delta(100, 900, 10), 100);
        // Inverted axis truncates toward zero, not down
        assert_eq!(inset_delta(900, 100, 8), -133);
    }

    #[test]
    fn test_expand_to_screen_edges() {
        let expanded = expand_to_screen_edges(AxisRange::new(100, 900, 100, 900), 10);
        assert_eq!(expanded, AxisRange::new(0, 1000, 0, 1000));
    }

    #[test]
    fn test_swap_range_axes_cross_pattern() {
        let swapped = swap_range_axes(AxisRange::new(1, 2, 3, 4));
        assert_eq!(swapped, AxisRange::new(4, 3, 2, 1));
    }

    #[test]
    fn test_compute_outcome_plain() {
        let clicks = corners((10, 10), (90, 10), (10, 90), (90, 90));
        let old = AxisRange::new(0, 1000, 0, 1000);
        let outcome = compute_outcome(clicks, &old, 100, 100, 10);
        assert!(!outcome.swap_xy);
        assert_eq!(outcome.axys, AxisRange::new(0, 1000, 0, 1000));
    }

    #[test]
    fn test_compute_outcome_swapped() {
        let clicks = corners((20, 10), (20, 90), (80, 10), (80, 90));
        let old = AxisRange::new(0, 1000, 0, 1000);
        let outcome = compute_outcome(clicks, &old, 100, 100, 10);
        assert!(outcome.swap_xy);
        // Before the final swap: x=125..875, y=0..1000
        assert_eq!(outcome.axys, AxisRange::new(1000, 0, 875, 125));
    }
}
