//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the event list screen flow to Dart via FRB.
//! - Own one process-wide presenter session over the events database.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Every call returns an envelope; failures are reported in `message`.
//! - The session is created lazily with default config when `configure`
//!   has not been called.

use crate::snapshot::SnapshotView;
use eventlist_core::db::open_db;
use eventlist_core::logging::init_logging_from_config;
use eventlist_core::{
    collect_event, collect_events, core_version as core_version_inner,
    init_logging as init_logging_inner, CoreConfig, EditResult, Event, EventStats,
    EventsDataSource, EventsPresenter, EventsRepository, FilterType, LoadOutcome,
    LocalEventsDataSource, SqliteEventsDao, StubRemoteDataSource,
};
use log::{info, warn};
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

const DB_PATH_ENV: &str = "EVENTLIST_DB_PATH";

type SessionRepository =
    EventsRepository<LocalEventsDataSource<SqliteEventsDao>, StubRemoteDataSource>;

struct Session {
    presenter: EventsPresenter<SessionRepository, SnapshotView>,
    db_path: PathBuf,
}

static SESSION: Mutex<Option<Session>> = Mutex::new(None);

/// One row of the event list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventItem {
    pub id: String,
    /// Title, or description when the title is blank.
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
}

impl From<&Event> for EventItem {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id().to_string(),
            title: event.title_for_list().to_string(),
            description: event.description.clone(),
            completed: event.completed,
        }
    }
}

/// Last state the presenter pushed to the list screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventsScreenState {
    /// Filtered list; empty when `empty_message` is set.
    pub items: Vec<EventItem>,
    /// Active filter name (`all|active|completed`).
    pub filter: String,
    pub filter_label: Option<String>,
    pub empty_message: Option<String>,
    /// Transient confirmation or error text for a snackbar.
    pub message: Option<String>,
    pub loading: bool,
    pub load_error: bool,
    /// Set when the screen should navigate to the add flow.
    pub show_add_event: bool,
    /// Set when the screen should open details for this id.
    pub open_event_id: Option<String>,
}

/// Result envelope for single-event commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventsActionResponse {
    pub ok: bool,
    pub event_id: Option<String>,
    pub message: String,
}

impl EventsActionResponse {
    fn success(message: impl Into<String>, event_id: String) -> Self {
        Self {
            ok: true,
            event_id: Some(event_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            event_id: None,
            message: message.into(),
        }
    }
}

/// Active/completed counters for the statistics screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventsStatsResponse {
    pub active: u32,
    pub completed: u32,
    pub message: String,
}

/// Exposes core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Opens the events database described by `config_json` and starts a fresh
/// session, cancelling the previous one.
///
/// # FFI contract
/// - `config_json` may be empty to use defaults.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn configure(config_json: String) -> String {
    let result = CoreConfig::from_json_str(&config_json)
        .map_err(|err| err.to_string())
        .and_then(|config| {
            init_logging_from_config(&config)?;
            open_session(&config)
        });

    match result {
        Ok(session) => {
            replace_session(Some(session));
            String::new()
        }
        Err(err) => err,
    }
}

/// Cancels the current session; pending results are dropped.
#[flutter_rust_bridge::frb(sync)]
pub fn events_close() {
    replace_session(None);
}

/// Loads events for `filter` (`all|active|completed`).
///
/// The first load of a session always refreshes from the sources.
#[flutter_rust_bridge::frb(sync)]
pub fn events_load(filter: String, force_update: bool) -> EventsScreenState {
    let filter = match filter.parse::<FilterType>() {
        Ok(filter) => filter,
        Err(err) => return error_state(err.to_string()),
    };
    with_screen(|presenter| {
        presenter.set_filtering(filter);
        presenter.view_mut().begin_call(filter);
        presenter.load_events(force_update);
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn events_complete(event_id: String) -> EventsScreenState {
    with_event(event_id, |presenter, event| presenter.complete_event(event))
}

#[flutter_rust_bridge::frb(sync)]
pub fn events_activate(event_id: String) -> EventsScreenState {
    with_event(event_id, |presenter, event| presenter.activate_event(event))
}

#[flutter_rust_bridge::frb(sync)]
pub fn events_clear_completed() -> EventsScreenState {
    with_screen(|presenter| {
        let filter = presenter.filtering();
        presenter.view_mut().begin_call(filter);
        presenter.clear_completed_events();
    })
}

/// Requests navigation to the add screen.
#[flutter_rust_bridge::frb(sync)]
pub fn events_add_new() -> EventsScreenState {
    with_screen(|presenter| {
        let filter = presenter.filtering();
        presenter.view_mut().begin_call(filter);
        presenter.add_new_event();
    })
}

/// Requests navigation to the detail screen of `event_id`.
#[flutter_rust_bridge::frb(sync)]
pub fn events_open_details(event_id: String) -> EventsScreenState {
    with_event(event_id, |presenter, event| presenter.open_event_details(event))
}

/// Creates (`event_id = None`) or overwrites an event.
///
/// # FFI contract
/// - Rejects events whose title and description are both blank.
/// - On success the next `events_load` shows a saved confirmation.
#[flutter_rust_bridge::frb(sync)]
pub fn events_save(
    event_id: Option<String>,
    title: String,
    description: Option<String>,
) -> EventsActionResponse {
    let description = description
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty());
    let event = match event_id {
        Some(id) => match Event::with_id(id.trim(), title.trim(), description) {
            Ok(event) => event,
            Err(err) => return EventsActionResponse::failure(format!("events_save failed: {err}")),
        },
        None => Event::new(title.trim(), description),
    };
    if event.is_empty() {
        return EventsActionResponse::failure("events_save failed: event cannot be empty");
    }

    let saved = with_session(|session| {
        session.presenter.repository_mut().save_event(&event);
        session.presenter.result(EditResult::Saved);
    });
    match saved {
        Ok(()) => EventsActionResponse::success("Event saved.", event.id().to_string()),
        Err(err) => EventsActionResponse::failure(format!("events_save failed: {err}")),
    }
}

/// Deletes one event; deleting an absent id still succeeds.
#[flutter_rust_bridge::frb(sync)]
pub fn events_delete(event_id: String) -> EventsActionResponse {
    let id = event_id.trim().to_string();
    match with_session(|session| session.presenter.repository_mut().delete_event(&id)) {
        Ok(()) => EventsActionResponse::success("Event deleted.", id),
        Err(err) => EventsActionResponse::failure(format!("events_delete failed: {err}")),
    }
}

/// Counts active and completed events across the whole list.
#[flutter_rust_bridge::frb(sync)]
pub fn events_stats() -> EventsStatsResponse {
    let outcome = with_session(|session| {
        collect_events(session.presenter.repository_mut())
            .into_iter()
            .filter_map(LoadOutcome::loaded)
            .last()
            .unwrap_or_default()
    });

    match outcome {
        Ok(events) => {
            let stats = EventStats::from_events(&events);
            EventsStatsResponse {
                active: saturating_u32(stats.active),
                completed: saturating_u32(stats.completed),
                message: if stats.total() == 0 {
                    "You have no events!".to_string()
                } else {
                    format!("{} event(s).", stats.total())
                },
            }
        }
        Err(err) => EventsStatsResponse {
            message: format!("events_stats failed: {err}"),
            ..EventsStatsResponse::default()
        },
    }
}

fn open_session(config: &CoreConfig) -> Result<Session, String> {
    let db_path = resolve_db_path(config);
    let conn = open_db(&db_path).map_err(|err| format!("events DB open failed: {err}"))?;
    let repository = EventsRepository::new(
        LocalEventsDataSource::new(SqliteEventsDao::new(conn)),
        StubRemoteDataSource::new(),
    );
    info!(
        "event=session_open module=ffi status=ok db_path={}",
        db_path.display()
    );
    Ok(Session {
        presenter: EventsPresenter::new(repository, SnapshotView::default()),
        db_path,
    })
}

fn resolve_db_path(config: &CoreConfig) -> PathBuf {
    if let Ok(raw) = std::env::var(DB_PATH_ENV) {
        let trimmed = raw.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }
    config.db_path.clone()
}

fn replace_session(next: Option<Session>) {
    let mut guard = SESSION.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(previous) = guard.take() {
        previous.presenter.view().detach();
        info!(
            "event=session_close module=ffi status=ok db_path={}",
            previous.db_path.display()
        );
    }
    *guard = next;
}

fn with_session<T>(f: impl FnOnce(&mut Session) -> T) -> Result<T, String> {
    let mut guard = SESSION.lock().unwrap_or_else(PoisonError::into_inner);
    if guard.is_none() {
        *guard = Some(open_session(&CoreConfig::default())?);
    }
    match guard.as_mut() {
        Some(session) => Ok(f(session)),
        None => Err("events session unavailable".to_string()),
    }
}

fn with_screen(
    f: impl FnOnce(&mut EventsPresenter<SessionRepository, SnapshotView>),
) -> EventsScreenState {
    match with_session(|session| {
        f(&mut session.presenter);
        session.presenter.view().snapshot()
    }) {
        Ok(state) => state,
        Err(err) => error_state(err),
    }
}

/// Resolves `event_id` through the repository before running `f`.
fn with_event(
    event_id: String,
    f: impl FnOnce(&mut EventsPresenter<SessionRepository, SnapshotView>, &Event),
) -> EventsScreenState {
    let id = event_id.trim().to_string();
    with_screen(|presenter| {
        let filter = presenter.filtering();
        presenter.view_mut().begin_call(filter);
        let found = collect_event(presenter.repository_mut(), &id)
            .into_iter()
            .find_map(LoadOutcome::loaded);
        match found {
            Some(event) => f(presenter, &event),
            None => {
                warn!("event=resolve_event module=ffi status=not_found event_id={id}");
                presenter
                    .view_mut()
                    .set_message(format!("Event not found: {id}"));
            }
        }
    })
}

fn error_state(message: String) -> EventsScreenState {
    EventsScreenState {
        message: Some(message),
        load_error: true,
        ..EventsScreenState::default()
    }
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{
        configure, core_version, events_activate, events_add_new, events_clear_completed,
        events_close, events_complete, events_delete, events_load, events_open_details,
        events_save, events_stats, init_logging, EventItem,
    };
    use eventlist_core::Event;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_bad_input() {
        assert!(!init_logging("info".to_string(), String::new()).is_empty());
        assert!(!init_logging("verbose".to_string(), "/tmp/logs".to_string()).is_empty());
    }

    #[test]
    fn event_item_uses_list_title() {
        let event = Event::with_id("1", "", Some("details".to_string())).unwrap();
        let item = EventItem::from(&event);
        assert_eq!(item.title, "details");
        assert!(!item.completed);
    }

    #[test]
    fn unknown_filter_is_reported() {
        let state = events_load("done".to_string(), false);
        assert!(state.load_error);
        assert!(state.message.unwrap().contains("unsupported filter"));
    }

    #[test]
    fn configure_rejects_invalid_json() {
        assert!(!configure("{not json".to_string()).is_empty());
    }

    // The session is process-wide, so the whole flow runs in one test.
    #[test]
    fn session_flow_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let config = serde_json::json!({
            "db_path": dir.path().join("events.db"),
        });
        assert_eq!(configure(config.to_string()), "");

        let empty = events_load("all".to_string(), false);
        assert!(empty.load_error);
        assert!(empty.items.is_empty());

        let rejected = events_save(None, "  ".to_string(), None);
        assert!(!rejected.ok);

        let saved = events_save(None, "Buy milk".to_string(), None);
        assert!(saved.ok, "{}", saved.message);
        let milk_id = saved.event_id.unwrap();
        let dog = events_save(Some("dog".to_string()), "Walk dog".to_string(), None);
        assert!(dog.ok, "{}", dog.message);

        let all = events_load("all".to_string(), false);
        assert!(!all.load_error);
        assert_eq!(all.items.len(), 2);
        assert_eq!(all.filter_label.as_deref(), Some("All events"));
        assert_eq!(all.message.as_deref(), Some("Event saved"));
        assert_eq!(events_load("all".to_string(), false).message, None);

        let completed = events_complete(milk_id.clone());
        assert_eq!(completed.message.as_deref(), Some("Event marked complete"));

        let active = events_load("active".to_string(), false);
        assert_eq!(active.items.len(), 1);
        assert_eq!(active.items[0].id, "dog");

        let stats = events_stats();
        assert_eq!((stats.active, stats.completed), (1, 1));

        let reactivated = events_activate(milk_id.clone());
        assert_eq!(reactivated.message.as_deref(), Some("Event marked active"));
        assert_eq!(reactivated.items.len(), 2);

        events_complete("dog".to_string());
        let cleared = events_clear_completed();
        assert_eq!(cleared.message.as_deref(), Some("Completed events cleared"));
        assert_eq!(cleared.items.len(), 1);

        let details = events_open_details(milk_id.clone());
        assert_eq!(details.open_event_id.as_deref(), Some(milk_id.as_str()));
        let missing = events_open_details("nope".to_string());
        assert_eq!(missing.open_event_id, None);
        assert!(missing.message.unwrap().contains("not found"));

        assert!(events_add_new().show_add_event);

        assert!(events_delete(milk_id).ok);
        let after_delete = events_stats();
        assert_eq!((after_delete.active, after_delete.completed), (0, 0));

        events_close();
    }
}
