//! Data source abstraction over "where events live".
//!
//! # Responsibility
//! - Define the contract shared by local, remote and repository sources.
//! - Deliver read results through callbacks instead of return values.
//!
//! # Invariants
//! - Each read fires exactly one of its callback branches, exactly once,
//!   except `EventsRepository::get_events` which may deliver data twice.
//! - Mutations are fire-and-forget: callers cannot observe completion and
//!   failures are logged by the implementation, never returned.

pub mod callback;
pub mod local;
pub mod remote;

use crate::model::event::Event;
use callback::{GetEventCallback, LoadEventsCallback};

/// Polymorphic event source.
///
/// Implemented by `LocalEventsDataSource`, the remote variants and
/// `EventsRepository` itself, so callers never depend on a concrete type.
pub trait EventsDataSource {
    fn get_events(&mut self, callback: &mut dyn LoadEventsCallback);
    fn get_event(&mut self, id: &str, callback: &mut dyn GetEventCallback);
    fn save_event(&mut self, event: &Event);
    fn complete_event(&mut self, event: &Event);
    fn activate_event(&mut self, event: &Event);
    fn clear_completed_events(&mut self);
    fn refresh_events(&mut self);
    fn delete_all_events(&mut self);
    fn delete_event(&mut self, id: &str);
}

impl<S: EventsDataSource + ?Sized> EventsDataSource for Box<S> {
    fn get_events(&mut self, callback: &mut dyn LoadEventsCallback) {
        (**self).get_events(callback);
    }

    fn get_event(&mut self, id: &str, callback: &mut dyn GetEventCallback) {
        (**self).get_event(id, callback);
    }

    fn save_event(&mut self, event: &Event) {
        (**self).save_event(event);
    }

    fn complete_event(&mut self, event: &Event) {
        (**self).complete_event(event);
    }

    fn activate_event(&mut self, event: &Event) {
        (**self).activate_event(event);
    }

    fn clear_completed_events(&mut self) {
        (**self).clear_completed_events();
    }

    fn refresh_events(&mut self) {
        (**self).refresh_events();
    }

    fn delete_all_events(&mut self) {
        (**self).delete_all_events();
    }

    fn delete_event(&mut self, id: &str) {
        (**self).delete_event(id);
    }
}
