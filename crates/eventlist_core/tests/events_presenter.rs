use eventlist_core::db::open_db_in_memory;
use eventlist_core::{
    EditResult, Event, EventsDao, EventsDataSource, EventsPresenter, EventsRepository,
    EventsView, FilterType, GetEventCallback, InMemoryRemoteDataSource, LoadEventsCallback,
    LocalEventsDataSource, SqliteEventsDao, StubRemoteDataSource, Subscription,
};
use rusqlite::Connection;
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
enum ViewCall {
    Loading(bool),
    Events(Vec<String>),
    AddEvent,
    Details(String),
    MarkedComplete,
    MarkedActive,
    CompletedCleared,
    LoadingError,
    Saved,
    NoEvents,
    NoActive,
    NoCompleted,
    AllLabel,
    ActiveLabel,
    CompletedLabel,
}

#[derive(Default)]
struct RecordingView {
    calls: Vec<ViewCall>,
    subscription: Option<Subscription>,
}

impl RecordingView {
    fn take(&mut self) -> Vec<ViewCall> {
        std::mem::take(&mut self.calls)
    }

    fn tear_down(&self) {
        if let Some(subscription) = &self.subscription {
            subscription.cancel();
        }
    }
}

impl EventsView for RecordingView {
    fn bind(&mut self, subscription: Subscription) {
        self.subscription = Some(subscription);
    }

    fn set_loading_indicator(&mut self, active: bool) {
        self.calls.push(ViewCall::Loading(active));
    }

    fn show_events(&mut self, events: &[Event]) {
        self.calls.push(ViewCall::Events(
            events
                .iter()
                .map(|event| event.title_for_list().to_string())
                .collect(),
        ));
    }

    fn show_add_event(&mut self) {
        self.calls.push(ViewCall::AddEvent);
    }

    fn show_event_details(&mut self, event_id: &str) {
        self.calls.push(ViewCall::Details(event_id.to_string()));
    }

    fn show_event_marked_complete(&mut self) {
        self.calls.push(ViewCall::MarkedComplete);
    }

    fn show_event_marked_active(&mut self) {
        self.calls.push(ViewCall::MarkedActive);
    }

    fn show_completed_events_cleared(&mut self) {
        self.calls.push(ViewCall::CompletedCleared);
    }

    fn show_loading_events_error(&mut self) {
        self.calls.push(ViewCall::LoadingError);
    }

    fn show_successfully_saved_message(&mut self) {
        self.calls.push(ViewCall::Saved);
    }

    fn show_no_events(&mut self) {
        self.calls.push(ViewCall::NoEvents);
    }

    fn show_no_active_events(&mut self) {
        self.calls.push(ViewCall::NoActive);
    }

    fn show_no_completed_events(&mut self) {
        self.calls.push(ViewCall::NoCompleted);
    }

    fn show_all_filter_label(&mut self) {
        self.calls.push(ViewCall::AllLabel);
    }

    fn show_active_filter_label(&mut self) {
        self.calls.push(ViewCall::ActiveLabel);
    }

    fn show_completed_filter_label(&mut self) {
        self.calls.push(ViewCall::CompletedLabel);
    }
}

type SqliteRepo<'c, R> = EventsRepository<LocalEventsDataSource<SqliteEventsDao<&'c Connection>>, R>;

fn presenter_with<R: EventsDataSource>(
    conn: &Connection,
    remote: R,
) -> EventsPresenter<SqliteRepo<'_, R>, RecordingView> {
    let repo = EventsRepository::new(
        LocalEventsDataSource::new(SqliteEventsDao::new(conn)),
        remote,
    );
    EventsPresenter::new(repo, RecordingView::default())
}

fn event(id: &str, title: &str, completed: bool) -> Event {
    Event::completed_with_id(id, title, None, completed).unwrap()
}

fn titles(values: &[&str]) -> ViewCall {
    ViewCall::Events(values.iter().map(|value| value.to_string()).collect())
}

#[test]
fn remote_only_data_is_shown_and_persisted() {
    let conn = open_db_in_memory().unwrap();
    let remote = InMemoryRemoteDataSource::with_events(vec![event("1", "Buy milk", false)]);
    let mut presenter = presenter_with(&conn, remote);

    presenter.start();

    assert_eq!(
        presenter.view_mut().take(),
        vec![
            ViewCall::Loading(true),
            ViewCall::Loading(false),
            titles(&["Buy milk"]),
            ViewCall::AllLabel,
        ]
    );
    assert_eq!(
        presenter.repository().local().dao().get_events().unwrap(),
        vec![event("1", "Buy milk", false)]
    );
    assert_eq!(
        presenter.repository().cached_events(),
        vec![event("1", "Buy milk", false)]
    );

    presenter.set_filtering(FilterType::Completed);
    presenter.load_events(false);
    assert_eq!(
        presenter.view_mut().take(),
        vec![
            ViewCall::Loading(true),
            ViewCall::Loading(false),
            ViewCall::NoCompleted,
        ]
    );
}

#[test]
fn complete_event_flips_row_and_hides_it_from_active_filter() {
    let conn = open_db_in_memory().unwrap();
    let remote = InMemoryRemoteDataSource::with_events(vec![event("1", "Buy milk", false)]);
    let mut presenter = presenter_with(&conn, remote);
    presenter.start();
    presenter.view_mut().take();

    presenter.complete_event(&event("1", "Buy milk", false));

    // The follow-up reload runs without the loading indicator.
    assert_eq!(
        presenter.view_mut().take(),
        vec![
            ViewCall::MarkedComplete,
            titles(&["Buy milk"]),
            ViewCall::AllLabel,
        ]
    );
    let stored = SqliteEventsDao::new(&conn)
        .get_event_by_id("1")
        .unwrap()
        .unwrap();
    assert!(stored.completed);
    assert_eq!(
        presenter.repository().cached_events(),
        vec![event("1", "Buy milk", true)]
    );

    presenter.set_filtering(FilterType::Active);
    presenter.load_events(false);
    assert_eq!(
        presenter.view_mut().take(),
        vec![ViewCall::Loading(true), ViewCall::Loading(false), ViewCall::NoActive]
    );
}

#[test]
fn activate_and_clear_completed_reload_without_indicator() {
    let conn = open_db_in_memory().unwrap();
    let remote = InMemoryRemoteDataSource::with_events(vec![
        event("1", "Buy milk", true),
        event("2", "Walk dog", true),
    ]);
    let mut presenter = presenter_with(&conn, remote);
    presenter.set_filtering(FilterType::Active);
    presenter.start();
    assert_eq!(
        presenter.view_mut().take(),
        vec![ViewCall::Loading(true), ViewCall::Loading(false), ViewCall::NoActive]
    );

    presenter.activate_event(&event("1", "Buy milk", true));
    assert_eq!(
        presenter.view_mut().take(),
        vec![
            ViewCall::MarkedActive,
            titles(&["Buy milk"]),
            ViewCall::ActiveLabel,
        ]
    );

    presenter.set_filtering(FilterType::Completed);
    presenter.clear_completed_events();
    assert_eq!(
        presenter.view_mut().take(),
        vec![ViewCall::CompletedCleared, ViewCall::NoCompleted]
    );
    assert_eq!(
        SqliteEventsDao::new(&conn).get_events().unwrap(),
        vec![event("1", "Buy milk", false)]
    );
}

#[test]
fn forced_load_shows_local_then_remote_projection() {
    let conn = open_db_in_memory().unwrap();
    SqliteEventsDao::new(&conn)
        .insert_event(&event("1", "Buy milk", false))
        .unwrap();
    let remote = InMemoryRemoteDataSource::with_events(vec![
        event("1", "Buy milk", false),
        event("2", "Walk dog", false),
    ]);
    let mut presenter = presenter_with(&conn, remote);

    presenter.load_events(true);

    assert_eq!(
        presenter.view_mut().take(),
        vec![
            ViewCall::Loading(true),
            ViewCall::Loading(false),
            titles(&["Buy milk"]),
            ViewCall::AllLabel,
            ViewCall::Loading(false),
            titles(&["Buy milk", "Walk dog"]),
            ViewCall::AllLabel,
        ]
    );
}

#[test]
fn repeated_delivery_of_same_events_renders_identically() {
    let conn = open_db_in_memory().unwrap();
    let events = vec![event("1", "Buy milk", false), event("2", "Walk dog", true)];
    let dao = SqliteEventsDao::new(&conn);
    for item in &events {
        dao.insert_event(item).unwrap();
    }
    let mut presenter = presenter_with(&conn, InMemoryRemoteDataSource::with_events(events));
    presenter.set_filtering(FilterType::Active);

    presenter.start();

    let calls = presenter.view_mut().take();
    let rendered: Vec<_> = calls
        .iter()
        .filter(|call| matches!(call, ViewCall::Events(_)))
        .collect();
    assert_eq!(rendered.len(), 2);
    assert_eq!(rendered[0], rendered[1]);
    assert_eq!(rendered[0], &titles(&["Buy milk"]));
}

#[test]
fn first_load_is_forced_only_once() {
    let conn = open_db_in_memory().unwrap();
    SqliteEventsDao::new(&conn)
        .insert_event(&event("1", "Buy milk", false))
        .unwrap();
    let mut presenter = presenter_with(&conn, StubRemoteDataSource::new());

    presenter.start();
    assert!(!presenter.repository().is_cache_dirty());
    presenter.view_mut().take();

    // Rows written behind the repository's back stay hidden until a forced load.
    SqliteEventsDao::new(&conn)
        .insert_event(&event("2", "Walk dog", false))
        .unwrap();
    presenter.start();
    assert_eq!(
        presenter.view_mut().take(),
        vec![
            ViewCall::Loading(true),
            ViewCall::Loading(false),
            titles(&["Buy milk"]),
            ViewCall::AllLabel,
        ]
    );

    presenter.load_events(true);
    assert!(presenter
        .view()
        .calls
        .contains(&titles(&["Buy milk", "Walk dog"])));
}

#[test]
fn unavailable_data_shows_loading_error() {
    let conn = open_db_in_memory().unwrap();
    let mut presenter = presenter_with(&conn, StubRemoteDataSource::new());

    presenter.start();

    assert_eq!(
        presenter.view_mut().take(),
        vec![ViewCall::Loading(true), ViewCall::LoadingError]
    );
}

#[test]
fn cancelled_subscription_discards_results() {
    let conn = open_db_in_memory().unwrap();
    let remote = InMemoryRemoteDataSource::with_events(vec![event("1", "Buy milk", false)]);
    let mut presenter = presenter_with(&conn, remote);

    presenter.view().tear_down();
    assert!(presenter.subscription().is_cancelled());
    presenter.start();

    assert_eq!(presenter.view_mut().take(), vec![ViewCall::Loading(true)]);
    // The request itself still ran to completion.
    assert_eq!(presenter.repository().cached_events().len(), 1);
}

/// Remote that tears the view down while its request is in flight.
struct TearDownOnLoad {
    inner: StubRemoteDataSource,
    subscription: Rc<RefCell<Option<Subscription>>>,
}

impl EventsDataSource for TearDownOnLoad {
    fn get_events(&mut self, callback: &mut dyn LoadEventsCallback) {
        if let Some(subscription) = self.subscription.borrow().as_ref() {
            subscription.cancel();
        }
        self.inner.get_events(callback);
    }

    fn get_event(&mut self, id: &str, callback: &mut dyn GetEventCallback) {
        self.inner.get_event(id, callback);
    }

    fn save_event(&mut self, event: &Event) {
        self.inner.save_event(event);
    }

    fn complete_event(&mut self, event: &Event) {
        self.inner.complete_event(event);
    }

    fn activate_event(&mut self, event: &Event) {
        self.inner.activate_event(event);
    }

    fn clear_completed_events(&mut self) {
        self.inner.clear_completed_events();
    }

    fn refresh_events(&mut self) {
        self.inner.refresh_events();
    }

    fn delete_all_events(&mut self) {
        self.inner.delete_all_events();
    }

    fn delete_event(&mut self, id: &str) {
        self.inner.delete_event(id);
    }
}

#[test]
fn teardown_during_request_suppresses_error() {
    let conn = open_db_in_memory().unwrap();
    let slot = Rc::new(RefCell::new(None));
    let remote = TearDownOnLoad {
        inner: StubRemoteDataSource::new(),
        subscription: Rc::clone(&slot),
    };
    let mut presenter = presenter_with(&conn, remote);
    *slot.borrow_mut() = Some(presenter.subscription().clone());

    presenter.start();

    assert_eq!(presenter.view_mut().take(), vec![ViewCall::Loading(true)]);
}

#[test]
fn navigation_and_result_messages() {
    let conn = open_db_in_memory().unwrap();
    let mut presenter = presenter_with(&conn, StubRemoteDataSource::new());

    presenter.add_new_event();
    presenter.open_event_details(&event("42", "Buy milk", false));
    presenter.result(EditResult::Cancelled);
    presenter.result(EditResult::Saved);

    assert_eq!(
        presenter.view_mut().take(),
        vec![
            ViewCall::AddEvent,
            ViewCall::Details("42".to_string()),
            ViewCall::Saved,
        ]
    );
    assert_eq!(presenter.filtering(), FilterType::All);
}

#[test]
fn empty_state_matches_filter() {
    let conn = open_db_in_memory().unwrap();
    SqliteEventsDao::new(&conn)
        .insert_event(&event("1", "Buy milk", true))
        .unwrap();
    let mut presenter = presenter_with(&conn, StubRemoteDataSource::new());
    presenter.start();
    presenter.view_mut().take();

    for (filter, expected) in [
        (FilterType::Active, ViewCall::NoActive),
        (FilterType::Completed, ViewCall::CompletedLabel),
        (FilterType::All, ViewCall::AllLabel),
    ] {
        presenter.set_filtering(filter);
        presenter.load_events(false);
        assert_eq!(presenter.view_mut().take().last(), Some(&expected));
    }
}
