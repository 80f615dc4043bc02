//! The ordered set of legal snap points and its cache.

use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;
use tracing::trace;

use crate::range::{Marks, SliderRange};

/// Every legal value of a slider in ascending order.
///
/// The set is the union of the in-range mark positions and the step points
/// `min + i * step` that do not exceed `max`. Step points are rounded to the
/// step's precision so they compare equal to aligned values. The list holds
/// one entry per step point; use [`PointSet`] to walk neighbours without
/// building it.
///
/// ```
/// use range_slider::{Marks, SliderRange, points::slider_points};
///
/// let range = SliderRange::new(0.0, 10.0, 5.0).unwrap();
/// let marks = Marks::new().with(2.5, "quarter").with(5.0, "half");
/// assert_eq!(slider_points(&range, &marks), vec![0.0, 2.5, 5.0, 10.0]);
/// ```
pub fn slider_points(range: &SliderRange, marks: &Marks) -> Vec<f64> {
    let marks: Vec<f64> = marks.positions_within(range).collect();
    PointSet::new(*range, &marks).to_vec()
}

/// Borrowed view of a slider's points that finds neighbours by arithmetic.
///
/// Step points are computed from their index, so no lookup allocates even
/// for ranges with billions of steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointSet<'a> {
    range: SliderRange,
    marks: &'a [f64],
}

impl<'a> PointSet<'a> {
    /// Creates the view. `marks` must be ascending and inside `range`.
    pub fn new(range: SliderRange, marks: &'a [f64]) -> Self {
        Self { range, marks }
    }

    /// Smallest point strictly greater than `value`.
    pub fn next_above(&self, value: f64) -> Option<f64> {
        let index = self.marks.partition_point(|point| *point <= value);
        let mark = self.marks.get(index).copied();
        match (mark, self.step_above(value)) {
            (Some(mark), Some(step)) => Some(mark.min(step)),
            (mark, step) => mark.or(step),
        }
    }

    /// Largest point strictly less than `value`.
    pub fn next_below(&self, value: f64) -> Option<f64> {
        let index = self.marks.partition_point(|point| *point < value);
        let mark = index.checked_sub(1).map(|index| self.marks[index]);
        match (mark, self.step_below(value)) {
            (Some(mark), Some(step)) => Some(mark.max(step)),
            (mark, step) => mark.or(step),
        }
    }

    /// Every point in ascending order.
    pub fn to_vec(&self) -> Vec<f64> {
        let mut points = self.marks.to_vec();
        if let Some(last) = self.range.last_step_index() {
            points.extend((0..=last).map(|index| self.range.step_point(index)));
        }
        points.sort_by(f64::total_cmp);
        points.dedup();
        points
    }

    fn step_above(&self, value: f64) -> Option<f64> {
        let last = self.range.last_step_index()?;
        let estimate = ((value - self.range.min()) / self.range.step()).floor();
        // Rounded step points may sit on either side of the estimate.
        let mut index = if estimate > 0.0 {
            (estimate as u64).min(last).saturating_sub(1)
        } else {
            0
        };
        while index <= last {
            let point = self.range.step_point(index);
            if point > value {
                return Some(point);
            }
            index += 1;
        }
        None
    }

    fn step_below(&self, value: f64) -> Option<f64> {
        let last = self.range.last_step_index()?;
        let estimate = ((value - self.range.min()) / self.range.step()).ceil();
        let mut index = if estimate > 0.0 {
            (estimate as u64).saturating_add(1).min(last)
        } else {
            0
        };
        loop {
            let point = self.range.step_point(index);
            if point < value {
                return Some(point);
            }
            index = index.checked_sub(1)?;
        }
    }
}

/// Lazily collected mark positions for [`PointSet`], keyed by mark
/// positions and step.
///
/// The key leaves out `min` and `max`: a change of the interval alone keeps
/// serving the old points until [`PointCache::invalidate`] is called.
#[derive(Debug, Default, Clone)]
pub struct PointCache {
    key: Option<u64>,
    range: SliderRange,
    marks: Vec<f64>,
}

impl PointCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached point set, refreshing it when the marks or the step
    /// changed since the last call.
    pub fn points(&mut self, range: &SliderRange, marks: &Marks) -> PointSet<'_> {
        let key = cache_key(range, marks);
        if self.key != Some(key) {
            self.range = *range;
            self.marks = marks.positions_within(range).collect();
            self.key = Some(key);
            trace!(marks = self.marks.len(), "refreshed slider points");
        }
        PointSet::new(self.range, &self.marks)
    }

    /// Drops the cached points so the next [`PointCache::points`] call
    /// refreshes them.
    pub fn invalidate(&mut self) {
        self.key = None;
    }
}

fn cache_key(range: &SliderRange, marks: &Marks) -> u64 {
    let mut hasher = FxHasher::default();
    range.step().to_bits().hash(&mut hasher);
    marks.len().hash(&mut hasher);
    for position in marks.positions() {
        position.to_bits().hash(&mut hasher);
    }
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(min: f64, max: f64, step: f64) -> SliderRange {
        SliderRange::new(min, max, step).unwrap()
    }

    #[test]
    fn test_points_union_sorted_distinct() {
        let marks = Marks::new().with(3.0, "c").with(1.5, "b").with(4.0, "d");
        assert_eq!(
            slider_points(&range(0.0, 4.0, 1.0), &marks),
            vec![0.0, 1.0, 1.5, 2.0, 3.0, 4.0]
        );
    }

    #[test]
    fn test_points_without_step_are_marks() {
        let marks = Marks::new().with(50.0, "b").with(0.0, "a").with(200.0, "out");
        assert_eq!(
            slider_points(&range(0.0, 100.0, 0.0), &marks),
            vec![0.0, 50.0]
        );
    }

    #[test]
    fn test_points_fractional_step() {
        assert_eq!(
            slider_points(&range(0.0, 0.5, 0.1), &Marks::new()),
            vec![0.0, 0.1, 0.2, 0.3, 0.4, 0.5]
        );
    }

    #[test]
    fn test_points_stop_before_max() {
        assert_eq!(
            slider_points(&range(0.0, 11.0, 3.0), &Marks::new()),
            vec![0.0, 3.0, 6.0, 9.0]
        );
    }

    #[test]
    fn test_degenerate_range() {
        assert_eq!(slider_points(&range(5.0, 5.0, 1.0), &Marks::new()), vec![5.0]);
        assert!(slider_points(&range(5.0, 5.0, 0.0), &Marks::new()).is_empty());
    }

    #[test]
    fn test_cache_recomputes_on_step_or_marks_change() {
        let mut cache = PointCache::new();
        let marks = Marks::new();
        assert_eq!(cache.points(&range(0.0, 2.0, 1.0), &marks).to_vec(), [0.0, 1.0, 2.0]);
        assert_eq!(cache.points(&range(0.0, 2.0, 2.0), &marks).to_vec(), [0.0, 2.0]);

        let marks = marks.with(0.5, "half");
        assert_eq!(
            cache.points(&range(0.0, 2.0, 2.0), &marks).to_vec(),
            [0.0, 0.5, 2.0]
        );
    }

    #[test]
    fn test_cache_ignores_interval_until_invalidated() {
        let mut cache = PointCache::new();
        let marks = Marks::new();
        assert_eq!(cache.points(&range(0.0, 2.0, 1.0), &marks).to_vec(), [0.0, 1.0, 2.0]);

        let wider = range(0.0, 4.0, 1.0);
        assert_eq!(cache.points(&wider, &marks).to_vec(), [0.0, 1.0, 2.0]);
        assert_eq!(cache.points(&wider, &marks).next_above(2.0), None);

        cache.invalidate();
        assert_eq!(
            cache.points(&wider, &marks).to_vec(),
            [0.0, 1.0, 2.0, 3.0, 4.0]
        );
    }

    #[test]
    fn test_neighbours_merge_marks_and_steps() {
        let marks = [2.5, 7.0];
        let set = PointSet::new(range(0.0, 10.0, 3.0), &marks);
        assert_eq!(set.next_above(0.0), Some(2.5));
        assert_eq!(set.next_above(2.5), Some(3.0));
        assert_eq!(set.next_above(6.0), Some(7.0));
        assert_eq!(set.next_above(9.0), None);
        assert_eq!(set.next_below(9.0), Some(7.0));
        assert_eq!(set.next_below(3.0), Some(2.5));
        assert_eq!(set.next_below(0.0), None);
        assert_eq!(set.next_above(-5.0), Some(0.0));
        assert_eq!(set.next_below(50.0), Some(9.0));
    }

    #[test]
    fn test_neighbours_without_step() {
        let marks = [0.0, 10.0, 40.0];
        let set = PointSet::new(range(0.0, 100.0, 0.0), &marks);
        assert_eq!(set.next_above(10.0), Some(40.0));
        assert_eq!(set.next_below(10.0), Some(0.0));
        assert_eq!(set.next_above(40.0), None);
    }

    #[test]
    fn test_neighbours_with_fractional_step() {
        let set = PointSet::new(range(0.0, 1.0, 0.1), &[]);
        assert_eq!(set.next_above(0.3), Some(0.4));
        assert_eq!(set.next_below(0.3), Some(0.2));
        assert_eq!(set.next_above(0.9), Some(1.0));
        assert_eq!(set.next_below(0.1), Some(0.0));
    }

    #[test]
    fn test_neighbours_in_huge_range() {
        let set = PointSet::new(range(0.0, 1.0e9, 1.0e-3), &[]);
        assert_eq!(set.next_above(5.0), Some(5.001));
        assert_eq!(set.next_below(5.0), Some(4.999));
        assert_eq!(set.next_below(1.0e9), Some(999_999_999.999));
        assert_eq!(set.next_above(1.0e9), None);
    }
}
