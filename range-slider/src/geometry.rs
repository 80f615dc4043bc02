//! Pointer geometry: turning pointer coordinates into offsets along the track
//! and offsets into raw slider values.

use crate::range::SliderRange;

/// Direction of the slider's main axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    /// Values grow from left to right.
    #[default]
    Horizontal,
    /// Values grow from bottom to top.
    Vertical,
}

impl Orientation {
    /// Picks the coordinate of `position` that lies on this axis.
    pub fn main_axis(self, position: PointerPosition) -> f64 {
        match self {
            Self::Horizontal => position.x,
            Self::Vertical => position.y,
        }
    }
}

/// A pointer location in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PointerPosition {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate, growing downwards.
    pub y: f64,
}

impl PointerPosition {
    /// Creates a position.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Where the slider track sits on screen.
///
/// `start` is the coordinate of the track's leading edge on the main axis
/// (left edge, or top edge for vertical sliders) and `length` its extent.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TrackGeometry {
    /// Leading edge of the track on the main axis.
    pub start: f64,
    /// Extent of the track on the main axis.
    pub length: f64,
    /// Main axis direction.
    pub orientation: Orientation,
}

impl TrackGeometry {
    /// A horizontal track starting at `0`.
    pub fn horizontal(length: f64) -> Self {
        Self {
            start: 0.0,
            length,
            orientation: Orientation::Horizontal,
        }
    }

    /// A vertical track starting at `0`.
    pub fn vertical(length: f64) -> Self {
        Self {
            start: 0.0,
            length,
            orientation: Orientation::Vertical,
        }
    }

    /// Sets the leading edge.
    pub fn with_start(mut self, start: f64) -> Self {
        self.start = start;
        self
    }

    /// Distance of a main-axis coordinate from the track start.
    pub fn offset_of(&self, coordinate: f64) -> f64 {
        coordinate - self.start
    }

    /// Maps an offset from the track start to a raw, unclamped value.
    ///
    /// Negative offsets count as zero. Offsets past the end produce values
    /// beyond `max`, which callers clamp. On a vertical track the top edge is
    /// `max`. A track without length maps everything to `min`.
    ///
    /// ```
    /// use range_slider::{SliderRange, geometry::TrackGeometry};
    ///
    /// let range = SliderRange::new(0.0, 10.0, 1.0).unwrap();
    /// assert_eq!(TrackGeometry::horizontal(200.0).value_from_offset(50.0, &range), 2.5);
    /// assert_eq!(TrackGeometry::vertical(200.0).value_from_offset(50.0, &range), 7.5);
    /// ```
    pub fn value_from_offset(&self, offset: f64, range: &SliderRange) -> f64 {
        if self.length <= 0.0 || !self.length.is_finite() {
            return range.min();
        }
        let ratio = (offset.max(0.0) / self.length).abs();
        let span = range.max() - range.min();
        match self.orientation {
            Orientation::Horizontal => ratio.mul_add(span, range.min()),
            Orientation::Vertical => (1.0 - ratio).mul_add(span, range.min()),
        }
    }

    /// Offset from the track start at which `value` is drawn.
    pub fn offset_for_value(&self, value: f64, range: &SliderRange) -> f64 {
        let fraction = offset_percent(value, range) / 100.0;
        match self.orientation {
            Orientation::Horizontal => fraction * self.length,
            Orientation::Vertical => (1.0 - fraction) * self.length,
        }
    }
}

/// Position of `value` along the track as a percentage of its length.
///
/// Returns `0.0` for an empty range.
pub fn offset_percent(value: f64, range: &SliderRange) -> f64 {
    let span = range.max() - range.min();
    if span <= 0.0 {
        return 0.0;
    }
    (value - range.min()) / span * 100.0
}

/// Center of a handle on the main axis given its leading edge and extent.
pub fn handle_center(leading_edge: f64, extent: f64) -> f64 {
    leading_edge + extent / 2.0
}

/// Mouse buttons as reported by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    /// Primary button, usually the left one.
    Primary,
    /// Wheel button.
    Middle,
    /// Secondary button, usually the right one.
    Secondary,
    /// Browser "back" button.
    Back,
    /// Browser "forward" button.
    Forward,
}

/// Lifecycle phase of a touch event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    /// A finger touched the surface.
    Start,
    /// A finger moved.
    Move,
    /// A finger left the surface.
    End,
}

/// The device-specific part of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerInput {
    /// A mouse event with the button involved.
    Mouse(MouseButton),
    /// A touch event with the number of touches still on the surface.
    Touch {
        /// Phase of this touch event.
        phase: TouchPhase,
        /// Touches currently on the surface.
        touches: usize,
    },
}

/// Which family of listeners a gesture needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputKind {
    /// Mouse move and mouse up.
    Mouse,
    /// Touch move and touch end.
    Touch,
}

impl PointerInput {
    /// The listener family for this input.
    pub fn kind(&self) -> InputKind {
        match self {
            Self::Mouse(_) => InputKind::Mouse,
            Self::Touch { .. } => InputKind::Touch,
        }
    }

    /// Whether this event may start a drag.
    ///
    /// Mouse drags start only with the primary button; touch drags need a
    /// single finger.
    pub fn can_start_drag(&self) -> bool {
        match *self {
            Self::Mouse(button) => button == MouseButton::Primary,
            Self::Touch { .. } => !self.is_multi_touch_noise(),
        }
    }

    /// Whether this event should abort a running drag.
    pub fn aborts_drag(&self) -> bool {
        matches!(self, Self::Touch { .. }) && self.is_multi_touch_noise()
    }

    fn is_multi_touch_noise(&self) -> bool {
        match *self {
            Self::Mouse(_) => false,
            Self::Touch { phase, touches } => {
                touches > 1 || (phase == TouchPhase::End && touches > 0)
            }
        }
    }
}
