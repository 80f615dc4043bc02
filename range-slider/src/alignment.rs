//! Converts raw slider values into legal ones.
//!
//! A legal value is inside `[min, max]` and sits on a mark or a step point.
//! Callers clamp first and align second: pointer positions past either end of
//! the track map to values outside the range.

use crate::range::{Marks, SliderRange};

/// Clamps `value` into `[min, max]`.
///
/// NaN is treated as an invalid input and clamps to `min`.
pub fn clamp_value(value: f64, range: &SliderRange) -> f64 {
    if value.is_nan() || value <= range.min() {
        return range.min();
    }
    if value >= range.max() {
        return range.max();
    }
    value
}

/// Returns `true` when `value` lies outside `[min, max]`.
pub fn is_value_out_of_range(value: f64, range: &SliderRange) -> bool {
    value < range.min() || value > range.max()
}

/// Number of decimal places in the textual form of `step`.
///
/// ```
/// use range_slider::alignment::step_precision;
///
/// assert_eq!(step_precision(1.0), 0);
/// assert_eq!(step_precision(0.1), 1);
/// assert_eq!(step_precision(0.025), 3);
/// ```
pub fn step_precision(step: f64) -> usize {
    let text = step.to_string();
    text.find('.').map_or(0, |dot| text.len() - dot - 1)
}

/// Rounds `value` to `precision` decimal places, halves away from zero.
///
/// `0.30000000000000004` becomes `0.3` and `2.5` at precision `0` becomes
/// `3.0`.
pub fn round_to_precision(value: f64, precision: usize) -> f64 {
    let factor = 10f64.powi(i32::try_from(precision).unwrap_or(i32::MAX));
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round() / factor
}

/// Finds the legal point closest to `value`.
///
/// Candidates are the in-range marks in ascending order followed by the step
/// point nearest to `value`, rounded to the step's decimal precision. The
/// first candidate wins an exact tie, so a mark beats an equally distant step
/// point. Without any candidate the result is `min`.
pub fn closest_point(value: f64, range: &SliderRange, marks: &Marks) -> f64 {
    let step_candidate = range.last_step_index().map(|last| {
        let index = ((value - range.min()) / range.step()).round();
        let index = if index.is_nan() { 0.0 } else { index };
        range.step_point(index.clamp(0.0, last as f64) as u64)
    });

    let mut closest: Option<(f64, f64)> = None;
    for point in marks.positions_within(range).chain(step_candidate) {
        let distance = (value - point).abs();
        match closest {
            Some((_, best)) if distance >= best => {}
            _ => closest = Some((point, distance)),
        }
    }

    closest.map_or(range.min(), |(point, _)| point)
}

/// Snaps `value` to the closest legal point.
///
/// With stepping disabled the point is a mark position and is returned as is.
/// Otherwise it is rounded to the step's decimal precision, mark or not, so
/// repeated drags do not accumulate floating point drift.
///
/// ```
/// use range_slider::{Marks, SliderRange, alignment::align_value};
///
/// let range = SliderRange::new(0.0, 1.0, 0.1).unwrap();
/// assert_eq!(align_value(0.34, &range, &Marks::new()), 0.3);
/// ```
pub fn align_value(value: f64, range: &SliderRange, marks: &Marks) -> f64 {
    let point = closest_point(value, range, marks);
    if !range.has_step() {
        return point;
    }
    round_to_precision(point, step_precision(range.step()))
}

/// Clamps, then aligns.
pub fn clamp_align_value(value: f64, range: &SliderRange, marks: &Marks) -> f64 {
    align_value(clamp_value(value, range), range, marks)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::points::slider_points;

    fn range(min: f64, max: f64, step: f64) -> SliderRange {
        SliderRange::new(min, max, step).unwrap()
    }

    #[test]
    fn test_clamp_value() {
        let r = range(0.0, 10.0, 1.0);
        assert_eq!(clamp_value(-3.0, &r), 0.0);
        assert_eq!(clamp_value(0.0, &r), 0.0);
        assert_eq!(clamp_value(4.2, &r), 4.2);
        assert_eq!(clamp_value(10.0, &r), 10.0);
        assert_eq!(clamp_value(12.0, &r), 10.0);
        assert_eq!(clamp_value(f64::NAN, &r), 0.0);
        assert_eq!(clamp_value(f64::INFINITY, &r), 10.0);
    }

    #[test]
    fn test_out_of_range() {
        let r = range(0.0, 10.0, 1.0);
        assert!(is_value_out_of_range(-0.1, &r));
        assert!(is_value_out_of_range(10.1, &r));
        assert!(!is_value_out_of_range(0.0, &r));
        assert!(!is_value_out_of_range(10.0, &r));
    }

    #[test]
    fn test_step_precision() {
        assert_eq!(step_precision(0.0), 0);
        assert_eq!(step_precision(5.0), 0);
        assert_eq!(step_precision(0.5), 1);
        assert_eq!(step_precision(0.01), 2);
        assert_eq!(step_precision(1.25), 2);
    }

    #[test]
    fn test_round_to_precision() {
        assert_eq!(round_to_precision(0.1 + 0.2, 1), 0.3);
        assert_eq!(round_to_precision(4.6, 0), 5.0);
        assert_eq!(round_to_precision(-1.26, 1), -1.3);
        assert_eq!(round_to_precision(2.5, 0), 3.0);
        assert_eq!(round_to_precision(-2.5, 0), -3.0);
        assert_eq!(round_to_precision(f64::MAX, 3), f64::MAX);
    }

    #[test]
    fn test_marks_only_alignment_picks_closest_mark() {
        let r = range(0.0, 100.0, 0.0);
        let marks = Marks::new().with(0.0, "0").with(50.0, "50").with(100.0, "100");
        assert_eq!(align_value(37.0, &r, &marks), 50.0);
        assert_eq!(align_value(24.0, &r, &marks), 0.0);
        assert_eq!(align_value(99.0, &r, &marks), 100.0);
    }

    #[test]
    fn test_marks_only_tie_prefers_lower_mark() {
        let r = range(0.0, 100.0, 0.0);
        let marks = Marks::new().with(0.0, "0").with(50.0, "50");
        assert_eq!(align_value(25.0, &r, &marks), 0.0);
    }

    #[test]
    fn test_mark_beats_equally_distant_step_point() {
        let r = range(0.0, 100.0, 10.0);
        let marks = Marks::new().with(33.0, "third");
        // 31.5 is 1.5 away from the mark and from step point 30.
        assert_eq!(closest_point(31.5, &r, &marks), 33.0);
        assert_eq!(closest_point(31.0, &r, &marks), 30.0);
        // 34.0 is closer to the mark than to step point 30.
        assert_eq!(closest_point(34.0, &r, &marks), 33.0);
        // 36.5 rounds to step point 40, 3.5 away; the mark is 3.5 away too.
        assert_eq!(closest_point(36.5, &r, &marks), 33.0);
    }

    #[test]
    fn test_step_rounding() {
        let r = range(0.0, 10.0, 1.0);
        assert_eq!(align_value(4.6, &r, &Marks::new()), 5.0);
        assert_eq!(align_value(4.4, &r, &Marks::new()), 4.0);
    }

    #[test]
    fn test_step_candidate_never_exceeds_max() {
        let r = range(0.0, 11.0, 3.0);
        assert_eq!(align_value(11.0, &r, &Marks::new()), 9.0);
    }

    #[test]
    fn test_step_with_offset_min() {
        let r = range(5.0, 25.0, 10.0);
        assert_eq!(align_value(12.0, &r, &Marks::new()), 15.0);
        assert_eq!(align_value(9.0, &r, &Marks::new()), 5.0);
    }

    #[test]
    fn test_out_of_range_marks_are_ignored() {
        let r = range(0.0, 100.0, 0.0);
        let marks = Marks::new().with(0.0, "0").with(105.0, "beyond");
        assert_eq!(align_value(100.0, &r, &marks), 0.0);
    }

    #[test]
    fn test_no_points_falls_back_to_min() {
        let r = range(-10.0, 10.0, 0.0);
        assert_eq!(align_value(7.0, &r, &Marks::new()), -10.0);
    }

    #[test]
    fn test_zero_mark_is_a_real_point() {
        let r = range(-10.0, 10.0, 0.0);
        let marks = Marks::new().with(0.0, "origin");
        assert_eq!(align_value(1.0, &r, &marks), 0.0);
    }

    #[test]
    fn test_marks_round_to_step_precision() {
        let marks = Marks::new().with(2.5, "quarter");
        let r = range(0.0, 10.0, 1.0);
        assert_eq!(align_value(2.4, &r, &marks), 3.0);
        assert_eq!(align_value(2.9, &r, &marks), 3.0);

        let r = range(0.0, 10.0, 0.5);
        assert_eq!(align_value(2.4, &r, &marks), 2.5);

        let r = range(0.0, 1.0, 0.1);
        let marks = Marks::new().with(0.25, "quarter");
        assert_eq!(align_value(0.26, &r, &marks), 0.3);
    }

    #[test]
    fn test_fractional_step_has_no_drift() {
        let r = range(0.0, 1.0, 0.1);
        assert_eq!(align_value(0.71, &r, &Marks::new()), 0.7);
        assert_eq!(align_value(0.29, &r, &Marks::new()), 0.3);
    }

    proptest! {
        #[test]
        fn clamp_is_bounded_and_idempotent(
            value in -1.0e6f64..1.0e6,
            min in -1.0e3f64..1.0e3,
            span in 0.0f64..1.0e3,
        ) {
            let r = range(min, min + span, 1.0);
            let once = clamp_value(value, &r);
            prop_assert!(once >= r.min() && once <= r.max());
            prop_assert_eq!(clamp_value(once, &r), once);
        }

        #[test]
        fn aligned_values_are_points_in_range(
            value in -500.0f64..500.0,
            step_index in 0usize..4,
            mark_positions in proptest::collection::vec(-20.0f64..120.0, 0..5),
        ) {
            let step = [0.0, 0.5, 1.0, 7.0][step_index];
            let r = range(0.0, 100.0, step);
            let marks: Marks = mark_positions.into_iter().map(|p| (p, "m")).collect();
            let aligned = clamp_align_value(value, &r, &marks);
            prop_assert!(aligned >= r.min() && aligned <= r.max());

            let points = slider_points(&r, &marks);
            if step > 0.0 || marks.positions_within(&r).next().is_some() {
                // Marks finer than the step are rounded to the step's precision.
                let tolerance = 10f64.powi(-(step_precision(step) as i32)) / 2.0 + 1e-9;
                prop_assert!(
                    points.iter().any(|p| (p - aligned).abs() <= tolerance),
                    "{aligned} not in {points:?}"
                );
            } else {
                prop_assert_eq!(aligned, r.min());
            }
        }
    }
}
