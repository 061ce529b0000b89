//! Remote data source variants.
//!
//! No network protocol exists for events. `StubRemoteDataSource` mirrors a
//! backend that is never reachable; `InMemoryRemoteDataSource` is a fake
//! backend whose contents callers seed directly.

use crate::model::event::Event;
use crate::source::callback::{GetEventCallback, LoadEventsCallback};
use crate::source::EventsDataSource;
use log::debug;

/// Remote source that never produces data and ignores mutations.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubRemoteDataSource;

impl StubRemoteDataSource {
    pub fn new() -> Self {
        Self
    }
}

impl EventsDataSource for StubRemoteDataSource {
    fn get_events(&mut self, callback: &mut dyn LoadEventsCallback) {
        callback.on_data_not_available();
    }

    fn get_event(&mut self, _id: &str, callback: &mut dyn GetEventCallback) {
        callback.on_data_not_available();
    }

    fn save_event(&mut self, _event: &Event) {}

    fn complete_event(&mut self, _event: &Event) {}

    fn activate_event(&mut self, _event: &Event) {}

    fn clear_completed_events(&mut self) {}

    fn refresh_events(&mut self) {}

    fn delete_all_events(&mut self) {}

    fn delete_event(&mut self, _id: &str) {}
}

/// Fake remote backend holding events in insertion order.
///
/// Reads report `on_data_not_available` when the backend is empty or has
/// been marked unreachable with `set_available(false)`. Mutations apply
/// even while unreachable.
#[derive(Debug, Clone)]
pub struct InMemoryRemoteDataSource {
    events: Vec<Event>,
    available: bool,
}

impl Default for InMemoryRemoteDataSource {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRemoteDataSource {
    pub fn new() -> Self {
        Self::with_events(Vec::new())
    }

    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            events,
            available: true,
        }
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn set_available(&mut self, available: bool) {
        self.available = available;
    }

    /// Replaces an existing event in place or appends a new one.
    pub fn put_event(&mut self, event: Event) {
        match self.events.iter_mut().find(|stored| stored.id() == event.id()) {
            Some(stored) => *stored = event,
            None => self.events.push(event),
        }
    }

    fn set_completed(&mut self, id: &str, completed: bool) {
        if let Some(stored) = self.events.iter_mut().find(|stored| stored.id() == id) {
            stored.completed = completed;
        }
    }
}

impl EventsDataSource for InMemoryRemoteDataSource {
    fn get_events(&mut self, callback: &mut dyn LoadEventsCallback) {
        if !self.available || self.events.is_empty() {
            debug!(
                "event=get_events module=source.remote status=unavailable reachable={}",
                self.available
            );
            callback.on_data_not_available();
            return;
        }
        callback.on_events_loaded(&self.events);
    }

    fn get_event(&mut self, id: &str, callback: &mut dyn GetEventCallback) {
        let found = self
            .available
            .then(|| self.events.iter().find(|event| event.id() == id))
            .flatten();
        match found {
            Some(event) => callback.on_event_loaded(event),
            None => callback.on_data_not_available(),
        }
    }

    fn save_event(&mut self, event: &Event) {
        self.put_event(event.clone());
    }

    fn complete_event(&mut self, event: &Event) {
        self.set_completed(event.id(), true);
    }

    fn activate_event(&mut self, event: &Event) {
        self.set_completed(event.id(), false);
    }

    fn clear_completed_events(&mut self) {
        self.events.retain(Event::is_active);
    }

    fn refresh_events(&mut self) {}

    fn delete_all_events(&mut self) {
        self.events.clear();
    }

    fn delete_event(&mut self, id: &str) {
        self.events.retain(|event| event.id() != id);
    }
}
