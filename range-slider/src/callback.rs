//! Callback handles used for slider events.
//!
//! Handles compare by identity (`Arc::ptr_eq`), so args holding them can be
//! compared without comparing closures.

use std::{fmt, sync::Arc};

/// Comparable handle for an event listener taking the slider value.
///
/// Used for `on_before_change`, `on_change` and `on_after_change`.
pub struct CallbackWith<T> {
    handler: Arc<dyn Fn(T) + Send + Sync>,
}

impl<T> CallbackWith<T> {
    /// Create a callback handle from a closure.
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(T) + Send + Sync + 'static,
    {
        Self {
            handler: Arc::new(handler),
        }
    }

    /// Wrap a listener that is already shared. Handles made from the same
    /// `Arc` compare equal.
    pub fn from_shared(handler: Arc<dyn Fn(T) + Send + Sync>) -> Self {
        Self { handler }
    }

    /// A callback that ignores its argument.
    pub fn noop() -> Self {
        Self::new(|_| {})
    }

    /// Invoke the callback.
    pub fn call(&self, value: T) {
        (self.handler)(value)
    }
}

impl<T, F> From<F> for CallbackWith<T>
where
    F: Fn(T) + Send + Sync + 'static,
{
    fn from(handler: F) -> Self {
        Self::new(handler)
    }
}

impl<T> Default for CallbackWith<T> {
    fn default() -> Self {
        Self::noop()
    }
}

impl<T> Clone for CallbackWith<T> {
    fn clone(&self) -> Self {
        Self {
            handler: Arc::clone(&self.handler),
        }
    }
}

impl<T> PartialEq for CallbackWith<T> {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.handler, &other.handler)
    }
}

impl<T> Eq for CallbackWith<T> {}

impl<T> fmt::Debug for CallbackWith<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackWith")
            .field("ptr", &Arc::as_ptr(&self.handler).cast::<()>())
            .finish()
    }
}

/// The three listeners every slider reports to.
///
/// Within one gesture `before_change` fires first, `change` any number of
/// times, and `after_change` exactly once when the pointer is released.
#[derive(Clone, Default, PartialEq, Debug)]
pub struct SliderCallbacks<T> {
    /// Fired on pointer down with the value before the gesture.
    pub on_before_change: CallbackWith<T>,
    /// Fired whenever the value changes.
    pub on_change: CallbackWith<T>,
    /// Fired on pointer up with the final value.
    pub on_after_change: CallbackWith<T>,
}
