//! Presenter for the event list screen.
//!
//! # Responsibility
//! - Translate view actions into repository calls.
//! - Filter loaded events and push the projection to the view.
//!
//! # Invariants
//! - The first `load_events` of a presenter always forces a refresh.
//! - Results for a cancelled subscription are dropped without touching the
//!   view.
//! - Re-delivering the same events yields the same view updates.

pub mod subscription;
pub mod view;

use crate::model::event::Event;
use crate::model::filter::FilterType;
use crate::source::callback::LoadEventsCallback;
use crate::source::EventsDataSource;
use log::debug;
use subscription::Subscription;
use view::EventsView;

/// Outcome reported back by the add/edit screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditResult {
    Saved,
    Cancelled,
}

pub struct EventsPresenter<S: EventsDataSource, V: EventsView> {
    repository: S,
    view: V,
    filtering: FilterType,
    first_load: bool,
    subscription: Subscription,
}

impl<S: EventsDataSource, V: EventsView> EventsPresenter<S, V> {
    /// Creates a presenter and binds a fresh subscription to `view`.
    pub fn new(repository: S, mut view: V) -> Self {
        let subscription = Subscription::new();
        view.bind(subscription.clone());
        Self {
            repository,
            view,
            filtering: FilterType::All,
            first_load: true,
            subscription,
        }
    }

    pub fn start(&mut self) {
        self.load_events(false);
    }

    /// Handles the add/edit screen's result.
    pub fn result(&mut self, result: EditResult) {
        if result == EditResult::Saved {
            self.view.show_successfully_saved_message();
        }
    }

    /// Loads events with the loading indicator shown.
    ///
    /// The first call on a presenter is always treated as forced.
    pub fn load_events(&mut self, force_update: bool) {
        let force = force_update || self.first_load;
        self.first_load = false;
        self.load(force, true);
    }

    pub fn add_new_event(&mut self) {
        self.view.show_add_event();
    }

    pub fn open_event_details(&mut self, event: &Event) {
        self.view.show_event_details(event.id());
    }

    pub fn complete_event(&mut self, event: &Event) {
        self.repository.complete_event(event);
        self.view.show_event_marked_complete();
        self.load(false, false);
    }

    pub fn activate_event(&mut self, event: &Event) {
        self.repository.activate_event(event);
        self.view.show_event_marked_active();
        self.load(false, false);
    }

    pub fn clear_completed_events(&mut self) {
        self.repository.clear_completed_events();
        self.view.show_completed_events_cleared();
        self.load(false, false);
    }

    /// Sets the filter used by the next load.
    pub fn set_filtering(&mut self, filtering: FilterType) {
        self.filtering = filtering;
    }

    pub fn filtering(&self) -> FilterType {
        self.filtering
    }

    pub fn subscription(&self) -> &Subscription {
        &self.subscription
    }

    pub fn repository(&self) -> &S {
        &self.repository
    }

    pub fn repository_mut(&mut self) -> &mut S {
        &mut self.repository
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    fn load(&mut self, force_update: bool, show_loading_ui: bool) {
        if show_loading_ui {
            self.view.set_loading_indicator(true);
        }
        if force_update {
            self.repository.refresh_events();
        }

        debug!(
            "event=load_events module=presenter status=start force={force_update} filter={}",
            self.filtering
        );
        let mut callback = LoadCallback {
            view: &mut self.view,
            filtering: self.filtering,
            show_loading_ui,
            token: self.subscription.clone(),
        };
        self.repository.get_events(&mut callback);
    }
}

/// Per-request callback; `token` is captured when the request starts.
struct LoadCallback<'v, V: EventsView> {
    view: &'v mut V,
    filtering: FilterType,
    show_loading_ui: bool,
    token: Subscription,
}

impl<V: EventsView> LoadCallback<'_, V> {
    fn show_filter_label(&mut self) {
        match self.filtering {
            FilterType::All => self.view.show_all_filter_label(),
            FilterType::Active => self.view.show_active_filter_label(),
            FilterType::Completed => self.view.show_completed_filter_label(),
        }
    }

    fn show_empty(&mut self) {
        match self.filtering {
            FilterType::All => self.view.show_no_events(),
            FilterType::Active => self.view.show_no_active_events(),
            FilterType::Completed => self.view.show_no_completed_events(),
        }
    }
}

impl<V: EventsView> LoadEventsCallback for LoadCallback<'_, V> {
    fn on_events_loaded(&mut self, events: &[Event]) {
        let events_to_show = self.filtering.apply(events);

        if self.token.is_cancelled() {
            debug!("event=load_events module=presenter status=discarded reason=view_inactive");
            return;
        }
        if self.show_loading_ui {
            self.view.set_loading_indicator(false);
        }

        if events_to_show.is_empty() {
            self.show_empty();
        } else {
            self.view.show_events(&events_to_show);
            self.show_filter_label();
        }
    }

    fn on_data_not_available(&mut self) {
        if self.token.is_cancelled() {
            debug!("event=load_events module=presenter status=discarded reason=view_inactive");
            return;
        }
        self.view.show_loading_events_error();
    }
}
