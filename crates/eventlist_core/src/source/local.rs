//! Local data source backed by the SQLite events DAO.
//!
//! # Invariants
//! - An empty table reads as `on_data_not_available`, not as an empty list.
//! - Store failures are logged and never escape a mutation.
//! - A zero affected-row count is logged as `update_miss`/`delete_miss`.

use crate::model::event::Event;
use crate::source::callback::{GetEventCallback, LoadEventsCallback};
use crate::source::EventsDataSource;
use crate::store::events_dao::{EventsDao, StoreResult};
use log::{debug, error, warn};

pub struct LocalEventsDataSource<D: EventsDao> {
    dao: D,
}

impl<D: EventsDao> LocalEventsDataSource<D> {
    pub fn new(dao: D) -> Self {
        Self { dao }
    }

    pub fn dao(&self) -> &D {
        &self.dao
    }

    fn update(&self, op: &'static str, event: &Event) {
        match self.dao.update_event(event) {
            Ok(0) => warn!(
                "event=update_miss module=source.local status=warn op={op} event_id={}",
                event.id()
            ),
            Ok(_) => debug!(
                "event={op} module=source.local status=ok event_id={}",
                event.id()
            ),
            Err(err) => log_store_error(op, &err),
        }
    }
}

impl<D: EventsDao> EventsDataSource for LocalEventsDataSource<D> {
    fn get_events(&mut self, callback: &mut dyn LoadEventsCallback) {
        match self.dao.get_events() {
            Ok(events) if !events.is_empty() => {
                debug!(
                    "event=get_events module=source.local status=ok count={}",
                    events.len()
                );
                callback.on_events_loaded(&events);
            }
            Ok(_) => {
                debug!("event=get_events module=source.local status=empty");
                callback.on_data_not_available();
            }
            Err(err) => {
                log_store_error("get_events", &err);
                callback.on_data_not_available();
            }
        }
    }

    fn get_event(&mut self, id: &str, callback: &mut dyn GetEventCallback) {
        match self.dao.get_event_by_id(id) {
            Ok(Some(event)) => callback.on_event_loaded(&event),
            Ok(None) => {
                debug!("event=get_event module=source.local status=not_found event_id={id}");
                callback.on_data_not_available();
            }
            Err(err) => {
                log_store_error("get_event", &err);
                callback.on_data_not_available();
            }
        }
    }

    fn save_event(&mut self, event: &Event) {
        if let Err(err) = self.dao.insert_event(event) {
            log_store_error("save_event", &err);
        }
    }

    fn complete_event(&mut self, event: &Event) {
        self.update("complete_event", &event.to_completed());
    }

    fn activate_event(&mut self, event: &Event) {
        self.update("activate_event", &event.to_active());
    }

    fn clear_completed_events(&mut self) {
        let result: StoreResult<usize> = self.dao.get_events().and_then(|events| {
            let mut removed = 0;
            for event in events.iter().filter(|event| event.is_completed()) {
                removed += self.dao.delete_event_by_id(event.id())?;
            }
            Ok(removed)
        });

        match result {
            Ok(removed) => debug!(
                "event=clear_completed module=source.local status=ok removed={removed}"
            ),
            Err(err) => log_store_error("clear_completed", &err),
        }
    }

    fn refresh_events(&mut self) {
        // The repository owns refresh state; nothing is cached here.
    }

    fn delete_all_events(&mut self) {
        if let Err(err) = self.dao.delete_events() {
            log_store_error("delete_all_events", &err);
        }
    }

    fn delete_event(&mut self, id: &str) {
        match self.dao.delete_event_by_id(id) {
            Ok(0) => warn!(
                "event=delete_miss module=source.local status=warn event_id={id}"
            ),
            Ok(_) => debug!("event=delete_event module=source.local status=ok event_id={id}"),
            Err(err) => log_store_error("delete_event", &err),
        }
    }
}

fn log_store_error(op: &str, err: &dyn std::error::Error) {
    error!("event={op} module=source.local status=error error_code=store_failed error={err}");
}
