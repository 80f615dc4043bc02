//! Slider configuration primitives: the numeric range and the marks placed on
//! it.
//!
//! [`SliderRange`] is validated once at construction so the rest of the crate
//! can rely on `min <= max` and a finite, non-negative step. [`Marks`] keeps
//! its positions sorted and unique.

use thiserror::Error;

use crate::alignment::{round_to_precision, step_precision};

/// Errors produced when building a [`SliderRange`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum RangeError {
    /// `min` or `max` is NaN or infinite.
    #[error("slider bounds must be finite, got min={min} max={max}")]
    NonFinite {
        /// Requested lower bound.
        min: f64,
        /// Requested upper bound.
        max: f64,
    },
    /// `min` is greater than `max`.
    #[error("slider min {min} is greater than max {max}")]
    Inverted {
        /// Requested lower bound.
        min: f64,
        /// Requested upper bound.
        max: f64,
    },
    /// The step is negative, NaN or infinite.
    #[error("slider step must be finite and non-negative, got {0}")]
    InvalidStep(f64),
}

/// The numeric interval a slider covers and the step between its values.
///
/// A step of `0.0` disables step snapping; values then come from marks only.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "RangeParts", into = "RangeParts")
)]
pub struct SliderRange {
    min: f64,
    max: f64,
    step: f64,
}

impl SliderRange {
    /// Creates a validated range.
    ///
    /// # Examples
    ///
    /// ```
    /// use range_slider::{RangeError, SliderRange};
    ///
    /// let range = SliderRange::new(0.0, 10.0, 0.5).unwrap();
    /// assert_eq!(range.step(), 0.5);
    ///
    /// assert_eq!(
    ///     SliderRange::new(5.0, 1.0, 1.0),
    ///     Err(RangeError::Inverted { min: 5.0, max: 1.0 })
    /// );
    /// ```
    pub fn new(min: f64, max: f64, step: f64) -> Result<Self, RangeError> {
        if !min.is_finite() || !max.is_finite() {
            return Err(RangeError::NonFinite { min, max });
        }
        if min > max {
            return Err(RangeError::Inverted { min, max });
        }
        if !step.is_finite() || step < 0.0 {
            return Err(RangeError::InvalidStep(step));
        }
        Ok(Self { min, max, step })
    }

    /// Lower bound of the range.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound of the range.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Distance between adjacent step points, `0.0` when stepping is off.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Returns `true` when values snap to multiples of the step.
    pub fn has_step(&self) -> bool {
        self.step > 0.0
    }

    /// Index of the last step point that does not exceed `max`.
    ///
    /// Returns `None` when stepping is disabled.
    pub fn last_step_index(&self) -> Option<u64> {
        if !self.has_step() {
            return None;
        }
        let ratio = (self.max - self.min) / self.step;
        let nearest = ratio.round();
        // Absorb representation error such as 0.3 / 0.1 = 2.9999999999999996.
        let index = if (ratio - nearest).abs() < 1e-9 {
            nearest
        } else {
            ratio.floor()
        };
        Some(index.max(0.0) as u64)
    }

    /// Value of the `index`-th step point, rounded to the step's precision.
    pub(crate) fn step_point(&self, index: u64) -> f64 {
        let raw = (index as f64).mul_add(self.step, self.min);
        round_to_precision(raw, step_precision(self.step))
    }

    /// Returns `true` if `value` lies inside `[min, max]`.
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub(crate) fn same_interval(&self, other: &Self) -> bool {
        self.min == other.min && self.max == other.max
    }
}

impl Default for SliderRange {
    /// `0..=100` with a step of `1`.
    fn default() -> Self {
        Self {
            min: 0.0,
            max: 100.0,
            step: 1.0,
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct RangeParts {
    min: f64,
    max: f64,
    #[serde(default)]
    step: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<RangeParts> for SliderRange {
    type Error = RangeError;

    fn try_from(parts: RangeParts) -> Result<Self, Self::Error> {
        Self::new(parts.min, parts.max, parts.step)
    }
}

#[cfg(feature = "serde")]
impl From<SliderRange> for RangeParts {
    fn from(range: SliderRange) -> Self {
        Self {
            min: range.min,
            max: range.max,
            step: range.step,
        }
    }
}

/// Labelled positions on the slider.
///
/// Positions are unique and kept in ascending order. Inserting a position
/// that already exists replaces its label.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "Vec<(f64, String)>", into = "Vec<(f64, String)>")
)]
pub struct Marks {
    entries: Vec<(f64, String)>,
}

impl Marks {
    /// Creates an empty set of marks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a mark, replacing the label of an existing mark at `position`.
    ///
    /// Non-finite positions are ignored.
    pub fn insert(&mut self, position: f64, label: impl Into<String>) {
        if !position.is_finite() {
            return;
        }
        let label = label.into();
        match self
            .entries
            .binary_search_by(|(p, _)| p.total_cmp(&position))
        {
            Ok(index) => self.entries[index].1 = label,
            Err(index) => self.entries.insert(index, (position, label)),
        }
    }

    /// Builder form of [`Marks::insert`].
    pub fn with(mut self, position: f64, label: impl Into<String>) -> Self {
        self.insert(position, label);
        self
    }

    /// Parses `position: label` lines.
    ///
    /// Lines without a numeric position or without a label are skipped.
    ///
    /// ```
    /// use range_slider::Marks;
    ///
    /// let marks = Marks::parse_lines("0: Low\n50 : Mid\nbogus\n100: High");
    /// assert_eq!(marks.positions().collect::<Vec<_>>(), vec![0.0, 50.0, 100.0]);
    /// assert_eq!(marks.label(50.0), Some("Mid"));
    /// ```
    pub fn parse_lines(text: &str) -> Self {
        let mut marks = Self::new();
        for line in text.lines() {
            let Some((position, label)) = line.split_once(':') else {
                continue;
            };
            let label = label.trim();
            if label.is_empty() {
                continue;
            }
            if let Ok(position) = position.trim().parse::<f64>() {
                marks.insert(position, label);
            }
        }
        marks
    }

    /// Number of marks.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when there are no marks.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Label of the mark at `position`, if any.
    pub fn label(&self, position: f64) -> Option<&str> {
        self.entries
            .binary_search_by(|(p, _)| p.total_cmp(&position))
            .ok()
            .map(|index| self.entries[index].1.as_str())
    }

    /// Ascending mark positions.
    pub fn positions(&self) -> impl Iterator<Item = f64> + '_ {
        self.entries.iter().map(|(p, _)| *p)
    }

    /// Ascending mark positions that fall inside `range`.
    pub fn positions_within(&self, range: &SliderRange) -> impl Iterator<Item = f64> + '_ {
        let range = *range;
        self.positions().filter(move |p| range.contains(*p))
    }

    /// Ascending `(position, label)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &str)> {
        self.entries.iter().map(|(p, l)| (*p, l.as_str()))
    }
}

impl<L: Into<String>> FromIterator<(f64, L)> for Marks {
    fn from_iter<T: IntoIterator<Item = (f64, L)>>(iter: T) -> Self {
        let mut marks = Self::new();
        for (position, label) in iter {
            marks.insert(position, label);
        }
        marks
    }
}

impl From<Vec<(f64, String)>> for Marks {
    fn from(entries: Vec<(f64, String)>) -> Self {
        entries.into_iter().collect()
    }
}

impl From<Marks> for Vec<(f64, String)> {
    fn from(marks: Marks) -> Self {
        marks.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_validation() {
        assert!(SliderRange::new(0.0, 0.0, 0.0).is_ok());
        assert!(matches!(
            SliderRange::new(f64::NAN, 1.0, 1.0),
            Err(RangeError::NonFinite { .. })
        ));
        assert_eq!(
            SliderRange::new(0.0, 1.0, -0.5),
            Err(RangeError::InvalidStep(-0.5))
        );
        assert!(matches!(
            SliderRange::new(0.0, 1.0, f64::INFINITY),
            Err(RangeError::InvalidStep(_))
        ));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            RangeError::Inverted { min: 3.0, max: 1.0 }.to_string(),
            "slider min 3 is greater than max 1"
        );
        assert_eq!(
            RangeError::InvalidStep(-1.0).to_string(),
            "slider step must be finite and non-negative, got -1"
        );
    }

    #[test]
    fn test_last_step_index() {
        let range = SliderRange::new(0.0, 0.3, 0.1).unwrap();
        assert_eq!(range.last_step_index(), Some(3));

        let range = SliderRange::new(0.0, 11.0, 3.0).unwrap();
        assert_eq!(range.last_step_index(), Some(3));

        let range = SliderRange::new(0.0, 11.0, 0.0).unwrap();
        assert_eq!(range.last_step_index(), None);
    }

    #[test]
    fn test_step_point_is_rounded() {
        let range = SliderRange::new(0.0, 1.0, 0.1).unwrap();
        assert_eq!(range.step_point(3), 0.3);
        assert_eq!(range.step_point(7), 0.7);
    }

    #[test]
    fn test_marks_sorted_and_unique() {
        let marks = Marks::new()
            .with(50.0, "half")
            .with(0.0, "zero")
            .with(50.0, "middle")
            .with(f64::NAN, "nan");
        assert_eq!(marks.len(), 2);
        assert_eq!(marks.positions().collect::<Vec<_>>(), vec![0.0, 50.0]);
        assert_eq!(marks.label(50.0), Some("middle"));
        assert_eq!(marks.label(25.0), None);
    }

    #[test]
    fn test_positions_within() {
        let range = SliderRange::new(0.0, 100.0, 1.0).unwrap();
        let marks: Marks = [(-10.0, "below"), (40.0, "in"), (110.0, "above")]
            .into_iter()
            .collect();
        assert_eq!(marks.positions_within(&range).collect::<Vec<_>>(), vec![40.0]);
    }

    #[test]
    fn test_parse_lines_skips_malformed() {
        let marks = Marks::parse_lines("10:ten\n:empty\nx: nope\n20:\n30 :  thirty ");
        assert_eq!(
            marks.iter().collect::<Vec<_>>(),
            vec![(10.0, "ten"), (30.0, "thirty")]
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_validates_range() {
        let range: SliderRange =
            serde_json::from_str(r#"{"min":0.0,"max":10.0,"step":0.5}"#).unwrap();
        assert_eq!(range, SliderRange::new(0.0, 10.0, 0.5).unwrap());

        let inverted = serde_json::from_str::<SliderRange>(r#"{"min":10.0,"max":0.0}"#);
        assert!(inverted.is_err());

        let marks: Marks = serde_json::from_str(r#"[[50.0,"b"],[0.0,"a"]]"#).unwrap();
        assert_eq!(marks.positions().collect::<Vec<_>>(), vec![0.0, 50.0]);
    }
}
