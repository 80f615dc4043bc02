//! Value alignment and handle coordination for draggable range sliders.
//!
//! The crate holds the state machine behind a slider widget and leaves
//! drawing to the host. A host reports pointer offsets along the track, and
//! the controllers turn them into legal values: clamped to the range and
//! snapped to the nearest mark or step point.
//!
//! # Usage
//!
//! ```
//! use range_slider::{Marks, SliderArgs, SliderController, SliderRange, TrackGeometry};
//!
//! let mut slider = SliderController::new(
//!     SliderArgs::default()
//!         .range(SliderRange::new(0.0, 10.0, 0.5).unwrap())
//!         .marks(Marks::new().with(2.25, "quarter"))
//!         .on_change(|value| println!("value: {value}")),
//! );
//! slider.set_track(TrackGeometry::horizontal(200.0));
//!
//! // The closest point is the mark at 2.25, rounded to the step's precision.
//! slider.on_pointer_down(45.0);
//! assert_eq!(slider.value(), 2.3);
//! slider.on_pointer_move(92.0);
//! slider.on_pointer_up();
//! assert_eq!(slider.value(), 4.5);
//! ```
//!
//! Multi-handle sliders work the same way through [`MultiSliderController`];
//! [`PointerDriver`] adapts raw mouse and touch events for either controller.
#![deny(missing_docs)]
#![cfg_attr(not(test), deny(clippy::unwrap_used))]

pub mod alignment;
pub mod callback;
pub mod geometry;
pub mod indicators;
pub mod interaction;
pub mod multi;
pub mod points;
pub mod range;
pub mod single;

#[cfg(test)]
mod test_support;

pub use callback::{CallbackWith, SliderCallbacks};
pub use geometry::{Orientation, PointerInput, PointerPosition, TrackGeometry};
pub use interaction::{GestureListeners, ListenerGuard, PointerDriver, SliderInteraction};
pub use multi::{Bounds, MultiSliderArgs, MultiSliderController, Pushable};
pub use range::{Marks, RangeError, SliderRange};
pub use single::{SliderArgs, SliderController};
