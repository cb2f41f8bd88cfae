// Progress tracking for calibration workflow
//
// This module provides the types that describe how far a calibration
// session has come: which target corner is next, the clicks accepted so
// far, and the overall phase of the session.

use std::ops::Index;

/// Number of target corners clicked per session
pub const NUM_CORNERS: usize = 4;

/// Calibration target corner, in the order the user is asked to click them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Corner {
    UpperLeft,
    UpperRight,
    LowerLeft,
    LowerRight,
}

impl Corner {
    /// All corners in click order
    pub const ALL: [Corner; NUM_CORNERS] = [
        Corner::UpperLeft,
        Corner::UpperRight,
        Corner::LowerLeft,
        Corner::LowerRight,
    ];

    /// Slot of this corner in the click sequence
    pub fn index(self) -> usize {
        match self {
            Corner::UpperLeft => 0,
            Corner::UpperRight => 1,
            Corner::LowerLeft => 2,
            Corner::LowerRight => 3,
        }
    }

    /// Corner expected for the given slot, if any
    pub fn from_index(index: usize) -> Option<Corner> {
        Corner::ALL.get(index).copied()
    }

    /// Get the next corner in the calibration sequence
    ///
    /// # Returns
    /// * `Some(Corner)` - Next corner to click
    /// * `None` - All corners clicked
    pub fn next(self) -> Option<Corner> {
        match self {
            Corner::UpperLeft => Some(Corner::UpperRight),
            Corner::UpperRight => Some(Corner::LowerLeft),
            Corner::LowerLeft => Some(Corner::LowerRight),
            Corner::LowerRight => None,
        }
    }

    /// Get human-readable name for display
    pub fn display_name(self) -> &'static str {
        match self {
            Corner::UpperLeft => "UPPER-LEFT",
            Corner::UpperRight => "UPPER-RIGHT",
            Corner::LowerLeft => "LOWER-LEFT",
            Corner::LowerRight => "LOWER-RIGHT",
        }
    }
}

/// Raw device coordinate of one accepted click
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub struct ClickPoint {
    pub x: i32,
    pub y: i32,
}

impl ClickPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for ClickPoint {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

/// Fixed-capacity buffer of accepted clicks, one slot per corner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ClickSet {
    points: [ClickPoint; NUM_CORNERS],
    len: usize,
}

impl ClickSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a full set directly from the four corner clicks
    pub fn from_corners(
        upper_left: ClickPoint,
        upper_right: ClickPoint,
        lower_left: ClickPoint,
        lower_right: ClickPoint,
    ) -> Self {
        Self {
            points: [upper_left, upper_right, lower_left, lower_right],
            len: NUM_CORNERS,
        }
    }

    /// Append a click to the next free slot
    ///
    /// Returns `false` and leaves the set untouched when all slots are taken.
    pub fn push(&mut self, point: ClickPoint) -> bool {
        if self.is_full() {
            return false;
        }
        self.points[self.len] = point;
        self.len += 1;
        true
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == NUM_CORNERS
    }

    /// Click stored in slot `index`, if that slot has been filled
    pub fn get(&self, index: usize) -> Option<ClickPoint> {
        self.as_slice().get(index).copied()
    }

    /// Most recently accepted click
    pub fn last(&self) -> Option<ClickPoint> {
        self.as_slice().last().copied()
    }

    pub fn as_slice(&self) -> &[ClickPoint] {
        &self.points[..self.len]
    }

    /// Exchange the clicks stored for two corners
    pub fn swap(&mut self, a: Corner, b: Corner) {
        self.points.swap(a.index(), b.index());
    }

    pub fn clear(&mut self) {
        self.points = [ClickPoint::default(); NUM_CORNERS];
        self.len = 0;
    }
}

impl Index<Corner> for ClickSet {
    type Output = ClickPoint;

    fn index(&self, corner: Corner) -> &ClickPoint {
        &self.points[corner.index()]
    }
}

/// Position of a session in the click-collection state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum CalibrationPhase {
    /// No click accepted yet
    Empty,
    /// Between one and three clicks accepted
    Collecting(u8),
    /// All four corners clicked, ready to finish
    Ready,
    /// A range has been computed and delivered to the sink
    Finished,
}

impl CalibrationPhase {
    /// Phase implied by a click count for an unfinished session
    pub fn from_click_count(count: usize) -> Self {
        match count {
            0 => CalibrationPhase::Empty,
            n if n < NUM_CORNERS => CalibrationPhase::Collecting(n as u8),
            _ => CalibrationPhase::Ready,
        }
    }

    /// Check if more clicks are accepted in this phase
    pub fn accepts_clicks(&self) -> bool {
        matches!(
            self,
            CalibrationPhase::Empty | CalibrationPhase::Collecting(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_sequence() {
        assert_eq!(Corner::UpperLeft.next(), Some(Corner::UpperRight));
        assert_eq!(Corner::UpperRight.next(), Some(Corner::LowerLeft));
        assert_eq!(Corner::LowerLeft.next(), Some(Corner::LowerRight));
        assert_eq!(Corner::LowerRight.next(), None);
    }

    #[test]
    fn test_corner_index_matches_all() {
        for (i, corner) in Corner::ALL.iter().enumerate() {
            assert_eq!(corner.index(), i);
            assert_eq!(Corner::from_index(i), Some(*corner));
        }
        assert_eq!(Corner::from_index(4), None);
    }

    #[test]
    fn test_corner_display_name() {
        assert_eq!(Corner::UpperLeft.display_name(), "UPPER-LEFT");
        assert_eq!(Corner::LowerRight.display_name(), "LOWER-RIGHT");
    }

    #[test]
    fn test_click_set_push_until_full() {
        let mut set = ClickSet::new();
        assert!(set.is_empty());
        for i in 0..4 {
            assert!(set.push(ClickPoint::new(i, i * 10)));
        }
        assert!(set.is_full());
        assert!(!set.push(ClickPoint::new(99, 99)));
        assert_eq!(set.len(), 4);
        assert_eq!(set[Corner::LowerRight], ClickPoint::new(3, 30));
        assert_eq!(set.last(), Some(ClickPoint::new(3, 30)));
    }

    #[test]
    fn test_click_set_get_ignores_unfilled_slots() {
        let mut set = ClickSet::new();
        set.push(ClickPoint::new(5, 6));
        assert_eq!(set.get(0), Some(ClickPoint::new(5, 6)));
        assert_eq!(set.get(1), None);
    }

    #[test]
    fn test_click_set_swap_and_clear() {
        let mut set = ClickSet::from_corners(
            ClickPoint::new(1, 1),
            ClickPoint::new(2, 2),
            ClickPoint::new(3, 3),
            ClickPoint::new(4, 4),
        );
        set.swap(Corner::LowerLeft, Corner::UpperRight);
        assert_eq!(set[Corner::UpperRight], ClickPoint::new(3, 3));
        assert_eq!(set[Corner::LowerLeft], ClickPoint::new(2, 2));

        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.last(), None);
    }

    #[test]
    fn test_phase_from_click_count() {
        assert_eq!(CalibrationPhase::from_click_count(0), CalibrationPhase::Empty);
        assert_eq!(
            CalibrationPhase::from_click_count(2),
            CalibrationPhase::Collecting(2)
        );
        assert_eq!(CalibrationPhase::from_click_count(4), CalibrationPhase::Ready);
        assert!(CalibrationPhase::Collecting(3).accepts_clicks());
        assert!(!CalibrationPhase::Ready.accepts_clicks());
        assert!(!CalibrationPhase::Finished.accepts_clicks());
    }
}
