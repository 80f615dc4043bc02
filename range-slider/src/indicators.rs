//! Render data for the track, step dots and mark labels.
//!
//! Offsets and lengths are percentages of the track length measured from the
//! `min` end, so they apply unchanged to horizontal (from the left) and
//! vertical (from the bottom) sliders.

use crate::{
    geometry::offset_percent,
    interaction::SliderInteraction,
    points::slider_points,
    range::{Marks, SliderRange},
};

/// Highlighted span of a slider, used to flag dots and labels as active.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActiveSpan {
    /// Lower end of the span.
    pub lower: f64,
    /// Upper end of the span.
    pub upper: f64,
    /// Whether everything between `lower` and `upper` counts as active, or
    /// only the point at `upper`.
    pub included: bool,
}

impl ActiveSpan {
    /// Creates a span.
    pub fn new(lower: f64, upper: f64, included: bool) -> Self {
        Self {
            lower,
            upper,
            included,
        }
    }

    /// The span currently highlighted by `slider`.
    pub fn of<S: SliderInteraction>(slider: &S, included: bool) -> Self {
        Self::new(slider.lower_bound(), slider.upper_bound(), included)
    }

    /// Whether `point` is drawn as active.
    pub fn is_active(&self, point: f64) -> bool {
        if self.included {
            self.lower <= point && point <= self.upper
        } else {
            point == self.upper
        }
    }
}

/// A filled piece of track between two adjacent handles.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackSegment {
    /// Index of the handle the segment starts at.
    pub index: usize,
    /// Start of the segment in percent.
    pub offset: f64,
    /// Length of the segment in percent.
    pub length: f64,
}

/// A dot drawn on the track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepDot {
    /// Slider value at the dot.
    pub value: f64,
    /// Position in percent.
    pub offset: f64,
    /// Whether the dot lies in the active span.
    pub active: bool,
}

/// A mark label drawn along the track.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkLabel<'a> {
    /// Mark position.
    pub value: f64,
    /// Position in percent.
    pub offset: f64,
    /// Label text.
    pub label: &'a str,
    /// Whether the mark lies in the active span.
    pub active: bool,
}

/// One segment per pair of adjacent bounds.
///
/// ```
/// use range_slider::{SliderRange, indicators::track_segments};
///
/// let range = SliderRange::new(0.0, 200.0, 1.0).unwrap();
/// let segments = track_segments(&[20.0, 100.0, 150.0], &range);
/// assert_eq!(segments.len(), 2);
/// assert_eq!((segments[0].offset, segments[0].length), (10.0, 40.0));
/// assert_eq!((segments[1].offset, segments[1].length), (50.0, 25.0));
/// ```
pub fn track_segments(bounds: &[f64], range: &SliderRange) -> Vec<TrackSegment> {
    bounds
        .windows(2)
        .enumerate()
        .map(|(index, pair)| {
            let offset = offset_percent(pair[0], range);
            TrackSegment {
                index,
                offset,
                length: offset_percent(pair[1], range) - offset,
            }
        })
        .collect()
}

/// The filled track of a single-handle slider, from `min` to `value`.
pub fn single_track_segment(value: f64, range: &SliderRange) -> TrackSegment {
    TrackSegment {
        index: 0,
        offset: 0.0,
        length: offset_percent(value, range),
    }
}

/// Dots for the in-range marks, plus every step point when `dots` is set.
pub fn step_dots(
    range: &SliderRange,
    marks: &Marks,
    dots: bool,
    span: ActiveSpan,
) -> Vec<StepDot> {
    let points: Vec<f64> = if dots {
        slider_points(range, marks)
    } else {
        marks.positions_within(range).collect()
    };

    points
        .into_iter()
        .map(|value| StepDot {
            value,
            offset: offset_percent(value, range),
            active: span.is_active(value),
        })
        .collect()
}

/// Labels for the in-range marks in ascending order.
pub fn mark_labels<'a>(
    range: &SliderRange,
    marks: &'a Marks,
    span: ActiveSpan,
) -> Vec<MarkLabel<'a>> {
    marks
        .iter()
        .filter(|(value, _)| range.contains(*value))
        .map(|(value, label)| MarkLabel {
            value,
            offset: offset_percent(value, range),
            label,
            active: span.is_active(value),
        })
        .collect()
}
