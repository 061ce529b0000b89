//! Callback contracts for data source reads.
//!
//! Results are delivered on the caller's thread of control. A channel
//! `Sender` can stand in for a callback when the caller prefers to drain
//! outcomes after the request returns.

use crate::model::event::Event;
use crate::source::EventsDataSource;
use std::sync::mpsc::{channel, Sender};

/// Receives the result of a list read.
pub trait LoadEventsCallback {
    fn on_events_loaded(&mut self, events: &[Event]);
    fn on_data_not_available(&mut self);
}

/// Receives the result of a single-event read.
pub trait GetEventCallback {
    fn on_event_loaded(&mut self, event: &Event);
    fn on_data_not_available(&mut self);
}

/// One callback firing, captured as a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome<T> {
    Loaded(T),
    Unavailable,
}

impl<T> LoadOutcome<T> {
    pub fn loaded(self) -> Option<T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::Unavailable => None,
        }
    }
}

// A send to a dropped receiver means nobody is listening anymore; the result
// is discarded the same way a torn-down view discards it.
impl LoadEventsCallback for Sender<LoadOutcome<Vec<Event>>> {
    fn on_events_loaded(&mut self, events: &[Event]) {
        let _ = self.send(LoadOutcome::Loaded(events.to_vec()));
    }

    fn on_data_not_available(&mut self) {
        let _ = self.send(LoadOutcome::Unavailable);
    }
}

impl GetEventCallback for Sender<LoadOutcome<Event>> {
    fn on_event_loaded(&mut self, event: &Event) {
        let _ = self.send(LoadOutcome::Loaded(event.clone()));
    }

    fn on_data_not_available(&mut self) {
        let _ = self.send(LoadOutcome::Unavailable);
    }
}

/// Runs `get_events` and returns every outcome it delivered, in order.
///
/// A repository request can yield two `Loaded` entries (stale data first,
/// refreshed data second).
pub fn collect_events<S: EventsDataSource + ?Sized>(
    source: &mut S,
) -> Vec<LoadOutcome<Vec<Event>>> {
    let (mut tx, rx) = channel::<LoadOutcome<Vec<Event>>>();
    source.get_events(&mut tx);
    drop(tx);
    rx.into_iter().collect()
}

/// Runs `get_event` and returns every outcome it delivered, in order.
pub fn collect_event<S: EventsDataSource + ?Sized>(
    source: &mut S,
    id: &str,
) -> Vec<LoadOutcome<Event>> {
    let (mut tx, rx) = channel::<LoadOutcome<Event>>();
    source.get_event(id, &mut tx);
    drop(tx);
    rx.into_iter().collect()
}
