//! Events repository: cache, local store and remote source behind one source.
//!
//! # Responsibility
//! - Choose between the in-memory cache, the local source and the remote
//!   source for reads.
//! - Write through to local then remote on every mutation and keep the cache
//!   in step without forcing a reload.
//!
//! # Invariants
//! - A clean, non-empty cache answers `get_events` without touching either
//!   source.
//! - `on_data_not_available` fires only when local and remote both have nothing.
//! - After `refresh_events`, the next `get_events` reads the local source and
//!   then the remote. The callback can then receive `on_events_loaded` twice:
//!   local data first, remote data second. Callers must tolerate repeats.
//! - Remote data replaces the local table and the cache wholesale.
//! - The cache keeps the order its source delivered; edits keep an event's
//!   slot and new events go last.

use crate::model::event::{Event, EventId};
use crate::source::callback::{GetEventCallback, LoadEventsCallback};
use crate::source::EventsDataSource;
use log::{debug, info};
use std::collections::HashMap;

/// Repository over a local and a remote `EventsDataSource`.
pub struct EventsRepository<L: EventsDataSource, R: EventsDataSource> {
    local: L,
    remote: R,
    cache: EventCache,
    cache_is_dirty: bool,
}

impl<L: EventsDataSource, R: EventsDataSource> EventsRepository<L, R> {
    pub fn new(local: L, remote: R) -> Self {
        Self {
            local,
            remote,
            cache: EventCache::default(),
            cache_is_dirty: false,
        }
    }

    pub fn local(&self) -> &L {
        &self.local
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    /// Returns the cached events in source order.
    pub fn cached_events(&self) -> Vec<Event> {
        self.cache.to_vec()
    }

    pub fn is_cache_dirty(&self) -> bool {
        self.cache_is_dirty
    }

    /// Completes the cached event with `id`.
    ///
    /// Returns `false` without touching any source when `id` is not cached.
    pub fn complete_event_by_id(&mut self, id: &str) -> bool {
        match self.cache.get(id).cloned() {
            Some(event) => {
                self.complete_event(&event);
                true
            }
            None => false,
        }
    }

    /// Activates the cached event with `id`.
    ///
    /// Returns `false` without touching any source when `id` is not cached.
    pub fn activate_event_by_id(&mut self, id: &str) -> bool {
        match self.cache.get(id).cloned() {
            Some(event) => {
                self.activate_event(&event);
                true
            }
            None => false,
        }
    }

    fn replace_cache(&mut self, events: &[Event]) {
        self.cache.replace_all(events);
        self.cache_is_dirty = false;
    }

    fn replace_local(&mut self, events: &[Event]) {
        self.local.delete_all_events();
        for event in events {
            self.local.save_event(event);
        }
    }

    /// Returns `true` when the remote delivered data.
    fn load_from_remote(&mut self, callback: &mut dyn LoadEventsCallback) -> bool {
        let mut capture = Capture::default();
        self.remote.get_events(&mut capture);

        match capture.events {
            Some(events) => {
                info!(
                    "event=remote_refresh module=repository status=ok count={}",
                    events.len()
                );
                self.replace_local(&events);
                self.replace_cache(&events);
                callback.on_events_loaded(&events);
                true
            }
            None => {
                debug!("event=remote_refresh module=repository status=unavailable");
                false
            }
        }
    }
}

impl<L: EventsDataSource, R: EventsDataSource> EventsDataSource for EventsRepository<L, R> {
    fn get_events(&mut self, callback: &mut dyn LoadEventsCallback) {
        if !self.cache_is_dirty && !self.cache.is_empty() {
            debug!(
                "event=get_events module=repository status=ok origin=cache count={}",
                self.cache.len()
            );
            let events = self.cached_events();
            callback.on_events_loaded(&events);
            return;
        }

        let refresh_requested = self.cache_is_dirty;
        let mut capture = Capture::default();
        self.local.get_events(&mut capture);

        match capture.events {
            Some(events) => {
                debug!(
                    "event=get_events module=repository status=ok origin=local count={}",
                    events.len()
                );
                self.replace_cache(&events);
                callback.on_events_loaded(&events);
                if refresh_requested {
                    // Local data is already delivered, so a remote miss is not a failure.
                    self.load_from_remote(callback);
                }
            }
            None => {
                if !self.load_from_remote(callback) {
                    info!("event=get_events module=repository status=unavailable");
                    callback.on_data_not_available();
                }
            }
        }
    }

    fn get_event(&mut self, id: &str, callback: &mut dyn GetEventCallback) {
        if let Some(event) = self.cache.get(id) {
            callback.on_event_loaded(event);
            return;
        }

        let mut capture = CaptureOne::default();
        self.local.get_event(id, &mut capture);
        if capture.event.is_none() {
            self.remote.get_event(id, &mut capture);
        }

        match capture.event {
            Some(event) => {
                self.cache.upsert(event.clone());
                callback.on_event_loaded(&event);
            }
            None => callback.on_data_not_available(),
        }
    }

    fn save_event(&mut self, event: &Event) {
        self.local.save_event(event);
        self.remote.save_event(event);
        self.cache.upsert(event.clone());
    }

    fn complete_event(&mut self, event: &Event) {
        self.local.complete_event(event);
        self.remote.complete_event(event);
        self.cache.upsert(event.to_completed());
    }

    fn activate_event(&mut self, event: &Event) {
        self.local.activate_event(event);
        self.remote.activate_event(event);
        self.cache.upsert(event.to_active());
    }

    fn clear_completed_events(&mut self) {
        self.local.clear_completed_events();
        self.remote.clear_completed_events();
        self.cache.retain(Event::is_active);
    }

    fn refresh_events(&mut self) {
        self.cache_is_dirty = true;
    }

    fn delete_all_events(&mut self) {
        self.local.delete_all_events();
        self.remote.delete_all_events();
        self.cache.clear();
    }

    fn delete_event(&mut self, id: &str) {
        self.local.delete_event(id);
        self.remote.delete_event(id);
        self.cache.remove(id);
    }
}

/// Events keyed by id, iterated in insertion order.
#[derive(Default)]
struct EventCache {
    order: Vec<EventId>,
    by_id: HashMap<EventId, Event>,
}

impl EventCache {
    fn replace_all(&mut self, events: &[Event]) {
        self.clear();
        for event in events {
            self.upsert(event.clone());
        }
    }

    fn get(&self, id: &str) -> Option<&Event> {
        self.by_id.get(id)
    }

    /// Replaces in place when `event.id()` is cached, appends otherwise.
    fn upsert(&mut self, event: Event) {
        if !self.by_id.contains_key(event.id()) {
            self.order.push(event.id().to_string());
        }
        self.by_id.insert(event.id().to_string(), event);
    }

    fn remove(&mut self, id: &str) {
        if self.by_id.remove(id).is_some() {
            self.order.retain(|cached| cached != id);
        }
    }

    fn retain(&mut self, keep: impl Fn(&Event) -> bool) {
        self.by_id.retain(|_, event| keep(event));
        let by_id = &self.by_id;
        self.order.retain(|id| by_id.contains_key(id));
    }

    fn clear(&mut self) {
        self.order.clear();
        self.by_id.clear();
    }

    fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    fn len(&self) -> usize {
        self.order.len()
    }

    fn to_vec(&self) -> Vec<Event> {
        self.order
            .iter()
            .filter_map(|id| self.by_id.get(id))
            .cloned()
            .collect()
    }
}

/// Buffers a source's list result so the repository can act on it before
/// forwarding to its own caller.
#[derive(Default)]
struct Capture {
    events: Option<Vec<Event>>,
}

impl LoadEventsCallback for Capture {
    fn on_events_loaded(&mut self, events: &[Event]) {
        self.events = Some(events.to_vec());
    }

    fn on_data_not_available(&mut self) {
        self.events = None;
    }
}

#[derive(Default)]
struct CaptureOne {
    event: Option<Event>,
}

impl GetEventCallback for CaptureOne {
    fn on_event_loaded(&mut self, event: &Event) {
        self.event = Some(event.clone());
    }

    fn on_data_not_available(&mut self) {}
}
