use std::sync::Arc;

use parking_lot::Mutex;

use crate::callback::{CallbackWith, SliderCallbacks};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Event<T> {
    Before(T),
    Change(T),
    After(T),
}

/// Records every slider event in arrival order.
#[derive(Clone)]
pub(crate) struct EventLog<T> {
    events: Arc<Mutex<Vec<Event<T>>>>,
}

impl<T: Clone + Send + 'static> EventLog<T> {
    pub(crate) fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub(crate) fn callbacks(&self) -> SliderCallbacks<T> {
        SliderCallbacks {
            on_before_change: self.recorder(Event::Before),
            on_change: self.recorder(Event::Change),
            on_after_change: self.recorder(Event::After),
        }
    }

    /// Drains the recorded events.
    pub(crate) fn take(&self) -> Vec<Event<T>> {
        std::mem::take(&mut *self.events.lock())
    }

    fn recorder(&self, wrap: fn(T) -> Event<T>) -> CallbackWith<T> {
        let events = Arc::clone(&self.events);
        CallbackWith::new(move |value| events.lock().push(wrap(value)))
    }
}
