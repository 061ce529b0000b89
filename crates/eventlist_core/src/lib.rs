//! Core domain logic for the event list feature.
//! This crate is the single source of truth for business invariants.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod presenter;
pub mod repository;
pub mod source;
pub mod store;

pub use config::{ConfigError, CoreConfig};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::event::{Event, EventId, EventValidationError};
pub use model::filter::{FilterType, UnknownFilter};
pub use model::stats::EventStats;
pub use presenter::subscription::Subscription;
pub use presenter::view::EventsView;
pub use presenter::{EditResult, EventsPresenter};
pub use repository::EventsRepository;
pub use source::callback::{
    collect_event, collect_events, GetEventCallback, LoadEventsCallback, LoadOutcome,
};
pub use source::local::LocalEventsDataSource;
pub use source::remote::{InMemoryRemoteDataSource, StubRemoteDataSource};
pub use source::EventsDataSource;
pub use store::events_dao::{EventsDao, SqliteEventsDao, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
