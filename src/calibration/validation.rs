// Click validation heuristics for calibration
//
// Two checks run on every candidate click before it is accepted:
// - Double-click suppression rejects a click that lands right next to the
//   previous one (a bounce or an accidental second tap).
// - Mis-click detection compares the candidate with earlier clicks and
//   produces an advisory verdict. It never rejects a click.

use crate::calibration::progress::{ClickPoint, ClickSet};

/// Advisory outcome of the mis-click heuristic
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MisclickVerdict {
    /// Candidate is plausibly aligned with the earlier clicks
    GoodClick,
    /// Candidate is far from every coordinate of a reference click
    Misclick,
}

impl MisclickVerdict {
    pub fn is_misclick(&self) -> bool {
        matches!(self, MisclickVerdict::Misclick)
    }
}

/// Absolute difference widened to i64 so extreme raw values cannot overflow
fn distance(a: i32, b: i32) -> i64 {
    (i64::from(a) - i64::from(b)).abs()
}

/// Check if `candidate` repeats `previous` within `threshold` on both axes
///
/// A threshold of zero or below disables the check.
pub fn is_double_click(previous: ClickPoint, candidate: ClickPoint, threshold: i32) -> bool {
    threshold > 0
        && distance(candidate.x, previous.x) < i64::from(threshold)
        && distance(candidate.y, previous.y) < i64::from(threshold)
}

/// Four-difference test of `candidate` against one reference click
///
/// Each candidate coordinate is compared with both coordinates of the
/// reference. Only when all four differences exceed `threshold` is the
/// candidate considered out of line with the reference.
pub fn is_far_from(candidate: ClickPoint, reference: ClickPoint, threshold: i32) -> bool {
    let t = i64::from(threshold);
    distance(candidate.x, reference.x) > t
        && distance(candidate.x, reference.y) > t
        && distance(candidate.y, reference.x) > t
        && distance(candidate.y, reference.y) > t
}

/// Mis-click verdict for a candidate about to join `clicks`
///
/// The second and third clicks are compared with the first one. The
/// fourth click is compared with the second and the third, and is flagged
/// when either comparison fails.
///
/// # Returns
/// * `Some(MisclickVerdict)` - Verdict for the second to fourth click
/// * `None` - No reference clicks apply (first click, or set already full)
pub fn misclick_verdict(
    clicks: &ClickSet,
    candidate: ClickPoint,
    threshold: i32,
) -> Option<MisclickVerdict> {
    let references: &[usize] = match clicks.len() {
        1 | 2 => &[0],
        3 => &[1, 2],
        _ => return None,
    };

    let flagged = references
        .iter()
        .filter_map(|&i| clicks.get(i))
        .any(|reference| is_far_from(candidate, reference, threshold));

    Some(if flagged {
        MisclickVerdict::Misclick
    } else {
        MisclickVerdict::GoodClick
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(points: &[(i32, i32)]) -> ClickSet {
        let mut set = ClickSet::new();
        for &p in points {
            set.push(p.into());
        }
        set
    }

    #[test]
    fn test_double_click_within_threshold() {
        let prev = ClickPoint::new(100, 100);
        assert!(is_double_click(prev, ClickPoint::new(103, 102), 7));
        assert!(is_double_click(prev, ClickPoint::new(94, 106), 7));
    }

    #[test]
    fn test_double_click_boundary_is_exclusive() {
        let prev = ClickPoint::new(100, 100);
        assert!(!is_double_click(prev, ClickPoint::new(107, 100), 7));
        assert!(!is_double_click(prev, ClickPoint::new(100, 93), 7));
    }

    #[test]
    fn test_double_click_needs_both_axes_close() {
        let prev = ClickPoint::new(100, 100);
        assert!(!is_double_click(prev, ClickPoint::new(101, 900), 7));
    }

    #[test]
    fn test_double_click_disabled() {
        let prev = ClickPoint::new(100, 100);
        assert!(!is_double_click(prev, prev, 0));
        assert!(!is_double_click(prev, prev, -3));
    }

    #[test]
    fn test_far_from_compares_crossed_coordinates() {
        // x is far from reference x, but close to reference y
        let reference = ClickPoint::new(100, 500);
        assert!(!is_far_from(ClickPoint::new(505, 900), reference, 15));
        assert!(is_far_from(ClickPoint::new(900, 900), reference, 15));
    }

    #[test]
    fn test_zero_misclick_threshold_keeps_literal_comparison() {
        let reference = ClickPoint::new(100, 100);
        // Every difference is > 0 except the shared coordinate
        assert!(!is_far_from(ClickPoint::new(100, 900), reference, 0));
        assert!(is_far_from(ClickPoint::new(900, 900), reference, 0));
    }

    #[test]
    fn test_verdict_none_for_first_and_full() {
        let empty = ClickSet::new();
        assert_eq!(misclick_verdict(&empty, ClickPoint::new(1, 1), 15), None);

        let full = set_of(&[(1, 1), (2, 2), (3, 3), (4, 4)]);
        assert_eq!(misclick_verdict(&full, ClickPoint::new(1, 1), 15), None);
    }

    #[test]
    fn test_verdict_second_click_against_first() {
        let clicks = set_of(&[(100, 100)]);
        assert_eq!(
            misclick_verdict(&clicks, ClickPoint::new(900, 100), 15),
            Some(MisclickVerdict::GoodClick)
        );
        assert_eq!(
            misclick_verdict(&clicks, ClickPoint::new(900, 900), 15),
            Some(MisclickVerdict::Misclick)
        );
    }

    #[test]
    fn test_verdict_fourth_click_against_second_or_third() {
        let clicks = set_of(&[(100, 100), (900, 100), (100, 900)]);
        // Shares a coordinate with both UR and LL
        assert_eq!(
            misclick_verdict(&clicks, ClickPoint::new(900, 900), 15),
            Some(MisclickVerdict::GoodClick)
        );

        // Shares a coordinate with LL only; UR comparison flags it
        let clicks = set_of(&[(100, 100), (900, 200), (300, 500)]);
        let verdict = misclick_verdict(&clicks, ClickPoint::new(500, 700), 15);
        assert_eq!(verdict, Some(MisclickVerdict::Misclick));
        assert!(verdict.unwrap().is_misclick());
    }
}
