//! Slider with several handles.
//!
//! ## Usage
//!
//! A slider with `count` ranges has `count + 1` handles. Pointer-down picks
//! the handle closest to the pointer; moving it either pushes its neighbours
//! ([`Pushable`]), lets it pass through them (`allow_cross`), or stops it at
//! them.
//!
//! ```
//! use range_slider::{MultiSliderArgs, MultiSliderController, TrackGeometry};
//!
//! let mut slider = MultiSliderController::new(
//!     MultiSliderArgs::default()
//!         .default_value(vec![20.0, 80.0])
//!         .allow_cross(false),
//! );
//! slider.set_track(TrackGeometry::horizontal(100.0));
//!
//! slider.on_pointer_down(70.0);
//! slider.on_pointer_move(10.0);
//! slider.on_pointer_up();
//! assert_eq!(slider.bounds(), &[20.0, 20.0]);
//! ```
use derive_setters::Setters;
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::{
    alignment::{align_value, clamp_align_value, clamp_value, is_value_out_of_range},
    callback::{CallbackWith, SliderCallbacks},
    geometry::TrackGeometry,
    interaction::SliderInteraction,
    points::PointCache,
    range::{Marks, SliderRange},
};

use push::Pusher;

mod push;

/// Handle positions of a multi-handle slider, lowest index first.
pub type Bounds = SmallVec<[f64; 4]>;

/// Whether moving a handle pushes its neighbours.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Pushable {
    /// Handles never push each other.
    #[default]
    Disabled,
    /// Keep neighbours at least one unit apart.
    Enabled,
    /// Keep neighbours at least this far apart.
    Distance(f64),
}

impl Pushable {
    /// Minimum distance to keep between neighbours, if pushing is on.
    pub fn threshold(self) -> Option<f64> {
        match self {
            Self::Disabled => None,
            Self::Enabled => Some(1.0),
            Self::Distance(distance) => Some(distance),
        }
    }
}

impl From<bool> for Pushable {
    fn from(enabled: bool) -> Self {
        if enabled {
            Self::Enabled
        } else {
            Self::Disabled
        }
    }
}

impl From<f64> for Pushable {
    fn from(distance: f64) -> Self {
        Self::Distance(distance)
    }
}

/// Arguments for a multi-handle slider.
#[derive(Clone, PartialEq, Debug, Setters)]
pub struct MultiSliderArgs {
    /// Interval and step.
    pub range: SliderRange,
    /// Labelled positions, also used as snap points.
    pub marks: Marks,
    /// Controlled handle values.
    ///
    /// When set, the controller reports changes but leaves committing them
    /// to the owner.
    #[setters(strip_option)]
    pub value: Option<Vec<f64>>,
    /// Initial values of an uncontrolled slider.
    #[setters(strip_option)]
    pub default_value: Option<Vec<f64>>,
    /// Number of ranges; the slider has `count + 1` handles.
    pub count: usize,
    /// Whether handles may pass each other.
    pub allow_cross: bool,
    /// Neighbour pushing. Takes precedence over `allow_cross`.
    #[setters(into)]
    pub pushable: Pushable,
    /// Ignores presses, so no gesture can start.
    pub disabled: bool,
    /// Event listeners.
    pub callbacks: SliderCallbacks<Bounds>,
}

impl Default for MultiSliderArgs {
    fn default() -> Self {
        Self {
            range: SliderRange::default(),
            marks: Marks::default(),
            value: None,
            default_value: None,
            count: 1,
            allow_cross: true,
            pushable: Pushable::Disabled,
            disabled: false,
            callbacks: SliderCallbacks::default(),
        }
    }
}

impl MultiSliderArgs {
    /// Sets the listener fired when a gesture starts.
    pub fn on_before_change<F>(mut self, on_before_change: F) -> Self
    where
        F: Fn(Bounds) + Send + Sync + 'static,
    {
        self.callbacks.on_before_change = CallbackWith::new(on_before_change);
        self
    }

    /// Sets the listener fired whenever a handle moves.
    pub fn on_change<F>(mut self, on_change: F) -> Self
    where
        F: Fn(Bounds) + Send + Sync + 'static,
    {
        self.callbacks.on_change = CallbackWith::new(on_change);
        self
    }

    /// Sets the listener fired when a gesture ends.
    pub fn on_after_change<F>(mut self, on_after_change: F) -> Self
    where
        F: Fn(Bounds) + Send + Sync + 'static,
    {
        self.callbacks.on_after_change = CallbackWith::new(on_after_change);
        self
    }

    fn handle_count(&self) -> usize {
        self.count + 1
    }

    fn same_value_config(&self, other: &Self) -> bool {
        self.range == other.range
            && self.marks == other.marks
            && self.value == other.value
            && self.count == other.count
    }
}

/// Clamps `value` so the active handle cannot pass its neighbours.
///
/// Only applies when crossing is disallowed and a handle is active; a value
/// beyond a neighbour is replaced by the neighbour's value.
pub fn clamp_to_neighbors(
    value: f64,
    active: Option<usize>,
    bounds: &[f64],
    allow_cross: bool,
) -> f64 {
    if allow_cross {
        return value;
    }
    let Some(handle) = active else {
        return value;
    };

    if let Some(left) = handle.checked_sub(1).and_then(|index| bounds.get(index))
        && value <= *left
    {
        return *left;
    }
    if let Some(right) = bounds.get(handle + 1)
        && value >= *right
    {
        return *right;
    }
    value
}

/// Index of the bound nearest to `value`.
///
/// Interior bounds below `value` advance the candidate; the next bound wins
/// only when it is strictly closer.
pub fn closest_bound(value: f64, bounds: &[f64]) -> usize {
    let mut closest = 0;
    for (index, bound) in bounds
        .iter()
        .enumerate()
        .take(bounds.len().saturating_sub(1))
        .skip(1)
    {
        if value > *bound {
            closest = index;
        }
    }

    if let (Some(current), Some(next)) = (bounds.get(closest), bounds.get(closest + 1))
        && (next - value).abs() < (current - value).abs()
    {
        closest += 1;
    }
    closest
}

/// Picks the handle to drag when the pointer lands at `value`.
///
/// Normally that is `closest`. When `closest` and the next handle share a
/// point, the value's side decides; a value right on the shared point keeps
/// the most recently dragged handle if it sits there, else takes the next one.
pub fn bound_need_moving(value: f64, closest: usize, bounds: &[f64], recent: usize) -> usize {
    let next = closest + 1;
    let (Some(&current), Some(&shared)) = (bounds.get(closest), bounds.get(next)) else {
        return closest;
    };
    if current != shared {
        return closest;
    }

    if value < shared {
        closest
    } else if value > shared {
        next
    } else if bounds.get(recent) == Some(&current) {
        recent
    } else {
        next
    }
}

/// State and gesture handling for a multi-handle slider.
#[derive(Debug)]
pub struct MultiSliderController {
    args: MultiSliderArgs,
    bounds: Bounds,
    handle: Option<usize>,
    dragging: bool,
    recent: usize,
    points: PointCache,
    track: TrackGeometry,
}

impl MultiSliderController {
    /// Creates the controller.
    ///
    /// Bounds come from the controlled value, else the default value, else
    /// `count + 1` copies of `min`, resized to `count + 1` and aligned one by
    /// one.
    pub fn new(args: MultiSliderArgs) -> Self {
        let seed = args.value.as_deref().or(args.default_value.as_deref());
        let bounds: Bounds = seed_bounds(seed, args.handle_count(), &args.range)
            .into_iter()
            .map(|value| clamp_align_value(value, &args.range, &args.marks))
            .collect();
        let recent = if bounds.first() == Some(&args.range.max()) {
            0
        } else {
            bounds.len() - 1
        };

        Self {
            args,
            bounds,
            handle: None,
            dragging: false,
            recent,
            points: PointCache::new(),
            track: TrackGeometry::default(),
        }
    }

    /// Current handle positions.
    pub fn bounds(&self) -> &[f64] {
        &self.bounds
    }

    /// Handle being dragged, if any.
    ///
    /// A gesture can outlive its handle when a config change removes it; the
    /// gesture then stays open without an active handle until pointer up.
    pub fn active_handle(&self) -> Option<usize> {
        self.handle
    }

    /// Handle that was dragged most recently.
    pub fn recent_handle(&self) -> usize {
        self.recent
    }

    /// Current arguments.
    pub fn args(&self) -> &MultiSliderArgs {
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

    /// Returns whether a gesture is running.
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Starts a gesture at `offset` from the track start. Ignored while the
    /// slider is disabled.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn on_pointer_down(&mut self, offset: f64) {
        if self.args.disabled {
            return;
        }
        self.dragging = true;
        self.args
            .callbacks
            .on_before_change
            .call(self.bounds.clone());

        let value = self.value_at(offset);
        let closest = closest_bound(value, &self.bounds);
        let target = bound_need_moving(value, closest, &self.bounds, self.recent);

        self.handle = Some(target);
        self.recent = target;
        trace!(target, value, "multi slider gesture started");

        if value == self.bounds[target] {
            return;
        }

        let mut next_bounds = self.bounds.clone();
        next_bounds[target] = value;
        self.change(next_bounds);
    }

    /// Moves the active handle. Ignored when no gesture is running.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn on_pointer_move(&mut self, offset: f64) {
        let Some(handle) = self.handle else {
            return;
        };

        let value = self.value_at(offset);
        let original_value = self.bounds[handle];
        if value == original_value {
            return;
        }

        let mut next_bounds = self.bounds.clone();
        next_bounds[handle] = value;
        let mut next_handle = handle;

        if let Some(threshold) = self.args.pushable.threshold() {
            let points = self.points.points(&self.args.range, &self.args.marks);
            Pusher::new(points, threshold).push_surrounding(
                &mut next_bounds,
                handle,
                original_value,
            );
        } else if self.args.allow_cross {
            next_bounds.sort_by(f64::total_cmp);
            next_handle = next_bounds
                .iter()
                .position(|bound| *bound == value)
                .unwrap_or(handle);
        }

        self.handle = Some(next_handle);
        self.change(next_bounds);
    }

    /// Ends the gesture and reports the final bounds. Calling it again without
    /// a new gesture does nothing.
    pub fn on_pointer_up(&mut self) {
        if !self.dragging {
            return;
        }
        self.dragging = false;
        self.handle = None;
        trace!("multi slider gesture ended");
        self.args
            .callbacks
            .on_after_change
            .call(self.bounds.clone());
    }

    /// Applies new arguments.
    ///
    /// When range, marks, count and controlled value are unchanged only the
    /// listeners are replaced. Otherwise every bound is realigned; if any
    /// previous bound lies outside the new range, `on_change` reports the
    /// corrected bounds.
    pub fn on_config_change(&mut self, next: MultiSliderArgs) {
        if self.args.same_value_config(&next) {
            self.args = next;
            return;
        }

        if !self.args.range.same_interval(&next.range) {
            self.points.invalidate();
        }

        let requested = next.value.as_deref().unwrap_or(&self.bounds);
        let next_bounds: Bounds = resize_bounds(requested, next.handle_count(), &next.range)
            .into_iter()
            .map(|value| clamp_align_value(value, &next.range, &next.marks))
            .collect();
        self.args = next;

        if next_bounds == self.bounds {
            return;
        }

        let was_out_of_range = self
            .bounds
            .iter()
            .any(|bound| is_value_out_of_range(*bound, &self.args.range));
        debug!(
            from = ?self.bounds.as_slice(),
            to = ?next_bounds.as_slice(),
            "multi slider bounds realigned after config change"
        );

        self.bounds = next_bounds;
        let last = self.bounds.len() - 1;
        if let Some(handle) = self.handle
            && handle > last
        {
            debug!(handle, "active handle removed by config change");
            self.handle = None;
        }
        self.recent = self.recent.min(last);

        if was_out_of_range {
            self.args.callbacks.on_change.call(self.bounds.clone());
        }
    }

    fn value_at(&self, offset: f64) -> f64 {
        let range = &self.args.range;
        let raw = clamp_value(self.track.value_from_offset(offset, range), range);
        let value = clamp_to_neighbors(raw, self.handle, &self.bounds, self.args.allow_cross);
        align_value(value, range, &self.args.marks)
    }

    fn change(&mut self, next_bounds: Bounds) {
        if self.args.value.is_none() {
            self.bounds = next_bounds.clone();
        }
        self.args.callbacks.on_change.call(next_bounds);
    }
}

impl SliderInteraction for MultiSliderController {
    type Value = Bounds;

    fn track(&self) -> &TrackGeometry {
        &self.track
    }

    fn on_pointer_down(&mut self, offset: f64) {
        MultiSliderController::on_pointer_down(self, offset);
    }

    fn on_pointer_move(&mut self, offset: f64) {
        MultiSliderController::on_pointer_move(self, offset);
    }

    fn on_pointer_up(&mut self) {
        MultiSliderController::on_pointer_up(self);
    }

    fn is_dragging(&self) -> bool {
        self.dragging
    }

    fn is_disabled(&self) -> bool {
        self.args.disabled
    }

    fn current(&self) -> Bounds {
        self.bounds.clone()
    }

    fn lower_bound(&self) -> f64 {
        self.bounds[0]
    }

    fn upper_bound(&self) -> f64 {
        self.bounds[self.bounds.len() - 1]
    }
}

fn seed_bounds(seed: Option<&[f64]>, len: usize, range: &SliderRange) -> Bounds {
    match seed {
        Some(values) => resize_bounds(values, len, range),
        None => SmallVec::from_elem(range.min(), len),
    }
}

/// Truncates or pads `values` to `len`; padding repeats the last value.
fn resize_bounds(values: &[f64], len: usize, range: &SliderRange) -> Bounds {
    let fill = values.last().copied().unwrap_or(range.min());
    let mut bounds: Bounds = values.iter().copied().take(len).collect();
    bounds.resize(len, fill);
    bounds
}
