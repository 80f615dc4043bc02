//! Slider with a single handle.
//!
//! ## Usage
//!
//! Create a [`SliderController`] from [`SliderArgs`], tell it where the track
//! is with [`SliderController::set_track`], then forward pointer offsets.
//!
//! ```
//! use range_slider::{SliderArgs, SliderController, SliderRange, TrackGeometry};
//!
//! let range = SliderRange::new(0.0, 10.0, 1.0).unwrap();
//! let mut slider = SliderController::new(SliderArgs::default().range(range));
//! slider.set_track(TrackGeometry::horizontal(100.0));
//!
//! slider.on_pointer_down(46.0);
//! assert_eq!(slider.value(), 5.0);
//! slider.on_pointer_up();
//! ```
use derive_setters::Setters;
use tracing::{debug, trace};

use crate::{
    alignment::{clamp_align_value, is_value_out_of_range},
    callback::{CallbackWith, SliderCallbacks},
    geometry::TrackGeometry,
    interaction::SliderInteraction,
    range::{Marks, SliderRange},
};

/// Arguments for a single-handle slider.
#[derive(Clone, PartialEq, Debug, Default, Setters)]
pub struct SliderArgs {
    /// Interval and step.
    pub range: SliderRange,
    /// Labelled positions, also used as snap points.
    pub marks: Marks,
    /// Controlled value.
    ///
    /// When set, the controller reports changes but leaves committing them
    /// to the owner, who feeds the new value back through
    /// [`SliderController::on_config_change`].
    #[setters(strip_option)]
    pub value: Option<f64>,
    /// Initial value of an uncontrolled slider. Defaults to `min`.
    #[setters(strip_option)]
    pub default_value: Option<f64>,
    /// Ignores presses, so no gesture can start.
    pub disabled: bool,
    /// Event listeners.
    pub callbacks: SliderCallbacks<f64>,
}

impl SliderArgs {
    /// Sets the listener fired when a gesture starts.
    pub fn on_before_change<F>(mut self, on_before_change: F) -> Self
    where
        F: Fn(f64) + Send + Sync + 'static,
    {
        self.callbacks.on_before_change = CallbackWith::new(on_before_change);
        self
    }

    /// Sets the listener fired whenever the value changes.
    pub fn on_change<F>(mut self, on_change: F) -> Self
    where
        F: Fn(f64) + Send + Sync + 'static,
    {
        self.callbacks.on_change = CallbackWith::new(on_change);
        self
    }

    /// Sets the listener fired when a gesture ends.
    pub fn on_after_change<F>(mut self, on_after_change: F) -> Self
    where
        F: Fn(f64) + Send + Sync + 'static,
    {
        self.callbacks.on_after_change = CallbackWith::new(on_after_change);
        self
    }

    fn same_value_config(&self, other: &Self) -> bool {
        self.range == other.range && self.marks == other.marks && self.value == other.value
    }
}

/// State and gesture handling for a single-handle slider.
#[derive(Debug)]
pub struct SliderController {
    args: SliderArgs,
    value: f64,
    dragging: bool,
    track: TrackGeometry,
}

impl SliderController {
    /// Creates the controller. The initial value is the controlled value, else
    /// the default value, else `min`, clamped and aligned.
    pub fn new(args: SliderArgs) -> Self {
        let initial = args
            .value
            .or(args.default_value)
            .unwrap_or(args.range.min());
        let value = clamp_align_value(initial, &args.range, &args.marks);
        Self {
            args,
            value,
            dragging: false,
            track: TrackGeometry::default(),
        }
    }

    /// Current value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Returns whether the handle is being dragged.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Current arguments.
    pub fn args(&self) -> &SliderArgs {
        &self.args
    }

    /// Track geometry used to map offsets to values.
    pub fn track(&self) -> &TrackGeometry {
        &self.track
    }

    /// Updates the track geometry, usually after layout.
    pub fn set_track(&mut self, track: TrackGeometry) {
        self.track = track;
    }

    /// Starts a gesture at `offset` from the track start. Ignored while the
    /// slider is disabled.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn on_pointer_down(&mut self, offset: f64) {
        if self.args.disabled {
            return;
        }
        self.dragging = true;
        let prev_value = self.value;
        self.args.callbacks.on_before_change.call(prev_value);

        let value = self.value_at(offset);
        if value == prev_value {
            return;
        }
        self.change(value);
    }

    /// Continues the gesture. Ignored when no gesture is running.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn on_pointer_move(&mut self, offset: f64) {
        if !self.dragging {
            return;
        }
        let value = self.value_at(offset);
        if value == self.value {
            return;
        }
        self.change(value);
    }

    /// Ends the gesture and reports the final value. Calling it again without
    /// a new gesture does nothing.
    pub fn on_pointer_up(&mut self) {
        if !self.dragging {
            return;
        }
        self.dragging = false;
        trace!(value = self.value, "slider gesture ended");
        self.args.callbacks.on_after_change.call(self.value);
    }

    /// Applies new arguments.
    ///
    /// When range, marks and controlled value are unchanged only the
    /// listeners are replaced. Otherwise the value is realigned; if it moved
    /// and the requested value was outside the new range, `on_change` reports
    /// the corrected value.
    pub fn on_config_change(&mut self, next: SliderArgs) {
        if self.args.same_value_config(&next) {
            self.args = next;
            return;
        }

        let prev_value = self.value;
        let requested = next.value.unwrap_or(prev_value);
        let value = clamp_align_value(requested, &next.range, &next.marks);
        self.args = next;

        if value == prev_value {
            return;
        }

        debug!(prev_value, value, "slider value realigned after config change");
        self.value = value;

        if is_value_out_of_range(requested, &self.args.range) {
            self.args.callbacks.on_change.call(value);
        }
    }

    fn value_at(&self, offset: f64) -> f64 {
        let raw = self.track.value_from_offset(offset, &self.args.range);
        clamp_align_value(raw, &self.args.range, &self.args.marks)
    }

    fn change(&mut self, value: f64) {
        if self.args.value.is_none() {
            self.value = value;
        }
        self.args.callbacks.on_change.call(value);
    }
}

impl SliderInteraction for SliderController {
    type Value = f64;

    fn track(&self) -> &TrackGeometry {
        &self.track
    }

    fn on_pointer_down(&mut self, offset: f64) {
        SliderController::on_pointer_down(self, offset);
    }

    fn on_pointer_move(&mut self, offset: f64) {
        SliderController::on_pointer_move(self, offset);
    }

    fn on_pointer_up(&mut self) {
        SliderController::on_pointer_up(self);
    }

    fn is_dragging(&self) -> bool {
        self.dragging
    }

    fn is_disabled(&self) -> bool {
        self.args.disabled
    }

    fn current(&self) -> f64 {
        self.value
    }

    fn lower_bound(&self) -> f64 {
        self.args.range.min()
    }

    fn upper_bound(&self) -> f64 {
        self.value
    }
}
