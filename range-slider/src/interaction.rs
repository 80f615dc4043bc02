//! Gesture plumbing shared by both slider controllers.
//!
//! Controllers only understand offsets along the track. [`PointerDriver`]
//! sits between the host's raw pointer events and a controller: it filters
//! events that must not start or continue a drag, keeps the grab offset when
//! a press lands on a handle, and holds the move/up listener subscription for
//! exactly as long as a gesture runs.

use std::sync::Arc;

use tracing::{debug, trace};

use crate::geometry::{InputKind, PointerInput, PointerPosition, TrackGeometry};

/// The narrow interface a controller exposes to gesture handling and
/// indicator rendering.
pub trait SliderInteraction {
    /// Value reported to listeners: one number, or all bounds.
    type Value;

    /// Track geometry used to turn coordinates into offsets.
    fn track(&self) -> &TrackGeometry;

    /// Starts a gesture at `offset` from the track start.
    fn on_pointer_down(&mut self, offset: f64);

    /// Continues the running gesture.
    fn on_pointer_move(&mut self, offset: f64);

    /// Ends the running gesture.
    fn on_pointer_up(&mut self);

    /// Whether a gesture is running.
    fn is_dragging(&self) -> bool;

    /// Whether presses are ignored.
    fn is_disabled(&self) -> bool;

    /// Current value.
    fn current(&self) -> Self::Value;

    /// Lower end of the highlighted span.
    fn lower_bound(&self) -> f64;

    /// Upper end of the highlighted span.
    fn upper_bound(&self) -> f64;
}

/// Document-level move/up listeners provided by the host.
///
/// Subscriptions are per input family: a mouse gesture listens for mouse
/// move and mouse up, a touch gesture for touch move and touch end.
pub trait GestureListeners: Send + Sync {
    /// Starts delivering move and up events of `kind` to the driver.
    fn subscribe(&self, kind: InputKind);

    /// Stops delivering them.
    fn unsubscribe(&self, kind: InputKind);
}

/// Guard for a listener subscription. Unsubscribes when released or dropped.
pub struct ListenerGuard {
    listeners: Arc<dyn GestureListeners>,
    kind: InputKind,
    released: bool,
}

impl ListenerGuard {
    /// Subscribes `kind` and returns the guard owning the subscription.
    pub fn subscribe(listeners: Arc<dyn GestureListeners>, kind: InputKind) -> Self {
        listeners.subscribe(kind);
        Self {
            listeners,
            kind,
            released: false,
        }
    }

    /// Input family of the subscription.
    pub fn kind(&self) -> InputKind {
        self.kind
    }

    /// Unsubscribes immediately. Usually you rely on `Drop` instead.
    pub fn release(mut self) {
        self.unsubscribe();
    }

    fn unsubscribe(&mut self) {
        if !self.released {
            self.listeners.unsubscribe(self.kind);
            self.released = true;
        }
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ListenerGuard")
            .field("kind", &self.kind)
            .field("released", &self.released)
            .finish()
    }
}

/// Feeds raw pointer events into a slider controller.
///
/// Dropping the driver releases any active subscription without reporting
/// the end of the gesture.
pub struct PointerDriver<C> {
    controller: C,
    listeners: Arc<dyn GestureListeners>,
    guard: Option<ListenerGuard>,
    drag_offset: f64,
}

impl<C: SliderInteraction> PointerDriver<C> {
    /// Wraps `controller`, subscribing gesture listeners through `listeners`.
    pub fn new(controller: C, listeners: Arc<dyn GestureListeners>) -> Self {
        Self {
            controller,
            listeners,
            guard: None,
            drag_offset: 0.0,
        }
    }

    /// The wrapped controller.
    pub fn controller(&self) -> &C {
        &self.controller
    }

    /// The wrapped controller, mutably. Used for configuration changes and
    /// track updates.
    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    /// Whether move/up listeners are currently subscribed.
    pub fn is_listening(&self) -> bool {
        self.guard.is_some()
    }

    /// Distance between the press and the center of the grabbed handle.
    pub fn drag_offset(&self) -> f64 {
        self.drag_offset
    }

    /// Handles a press.
    ///
    /// `grabbed_handle_center` is the main-axis center of the handle under
    /// the pointer, if the press landed on one. The gesture then starts at
    /// that center and later moves keep the grab offset, so the handle does
    /// not jump under the pointer. Returns whether a gesture started; a
    /// disabled slider never starts one.
    pub fn pointer_down(
        &mut self,
        input: PointerInput,
        position: PointerPosition,
        grabbed_handle_center: Option<f64>,
    ) -> bool {
        if self.controller.is_disabled() || !input.can_start_drag() {
            trace!(?input, "pointer down ignored");
            return false;
        }

        let track = *self.controller.track();
        let mut coordinate = track.orientation.main_axis(position);
        match grabbed_handle_center {
            Some(center) => {
                self.drag_offset = coordinate - center;
                coordinate = center;
            }
            None => self.drag_offset = 0.0,
        }

        if let Some(guard) = self.guard.take() {
            guard.release();
        }
        self.controller.on_pointer_down(track.offset_of(coordinate));
        self.guard = Some(ListenerGuard::subscribe(
            Arc::clone(&self.listeners),
            input.kind(),
        ));
        true
    }

    /// Handles a move delivered by the subscribed listeners.
    ///
    /// A touch event that no longer describes a single-finger drag ends the
    /// gesture instead.
    pub fn pointer_move(&mut self, input: PointerInput, position: PointerPosition) {
        if self.guard.is_none() {
            return;
        }
        if input.aborts_drag() {
            debug!(?input, "gesture aborted by multi-touch input");
            self.end();
            return;
        }

        let track = *self.controller.track();
        let coordinate = track.orientation.main_axis(position) - self.drag_offset;
        self.controller.on_pointer_move(track.offset_of(coordinate));
    }

    /// Handles a release delivered by the subscribed listeners.
    pub fn pointer_up(&mut self) {
        if self.guard.is_none() {
            return;
        }
        self.end();
    }

    /// The slider surface went away mid-gesture.
    ///
    /// Ends the gesture the same way a release would.
    pub fn detach(&mut self) {
        if self.guard.is_none() {
            return;
        }
        debug!("slider surface detached during gesture");
        self.end();
    }

    /// Unwraps the controller, releasing any subscription.
    pub fn into_inner(self) -> C {
        self.controller
    }

    fn end(&mut self) {
        if let Some(guard) = self.guard.take() {
            guard.release();
        }
        self.controller.on_pointer_up();
    }
}

impl<C: std::fmt::Debug> std::fmt::Debug for PointerDriver<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PointerDriver")
            .field("controller", &self.controller)
            .field("guard", &self.guard)
            .field("drag_offset", &self.drag_offset)
            .finish_non_exhaustive()
    }
}
