//! View implementation that records what the presenter pushed.
//!
//! Dart renders from the returned envelope instead of receiving calls.

use crate::api::{EventItem, EventsScreenState};
use eventlist_core::{Event, EventsView, FilterType, Subscription};

const MSG_MARKED_COMPLETE: &str = "Event marked complete";
const MSG_MARKED_ACTIVE: &str = "Event marked active";
const MSG_COMPLETED_CLEARED: &str = "Completed events cleared";
const MSG_SAVED: &str = "Event saved";
const MSG_LOADING_ERROR: &str = "Error while loading events";

#[derive(Default)]
pub(crate) struct SnapshotView {
    state: EventsScreenState,
    /// Shown by the next call; set by pushes that arrive outside a screen call.
    pending_message: Option<String>,
    subscription: Option<Subscription>,
}

impl SnapshotView {
    /// Clears one-shot fields before a new FFI call, then surfaces any
    /// pending message.
    pub(crate) fn begin_call(&mut self, filter: FilterType) {
        self.state.filter = filter.as_str().to_string();
        self.state.message = self.pending_message.take();
        self.state.open_event_id = None;
        self.state.show_add_event = false;
        self.state.load_error = false;
    }

    pub(crate) fn snapshot(&self) -> EventsScreenState {
        self.state.clone()
    }

    pub(crate) fn set_message(&mut self, message: impl Into<String>) {
        self.state.message = Some(message.into());
    }

    pub(crate) fn detach(&self) {
        if let Some(subscription) = &self.subscription {
            subscription.cancel();
        }
    }

    fn show_empty(&mut self, filter: FilterType) {
        self.state.items.clear();
        self.state.filter_label = None;
        self.state.empty_message = Some(filter.empty_message().to_string());
    }

    fn show_label(&mut self, filter: FilterType) {
        self.state.filter_label = Some(filter.label().to_string());
    }
}

impl EventsView for SnapshotView {
    fn bind(&mut self, subscription: Subscription) {
        self.subscription = Some(subscription);
    }

    fn set_loading_indicator(&mut self, active: bool) {
        self.state.loading = active;
    }

    fn show_events(&mut self, events: &[Event]) {
        self.state.items = events.iter().map(EventItem::from).collect();
        self.state.empty_message = None;
    }

    fn show_add_event(&mut self) {
        self.state.show_add_event = true;
    }

    fn show_event_details(&mut self, event_id: &str) {
        self.state.open_event_id = Some(event_id.to_string());
    }

    fn show_event_marked_complete(&mut self) {
        self.set_message(MSG_MARKED_COMPLETE);
    }

    fn show_event_marked_active(&mut self) {
        self.set_message(MSG_MARKED_ACTIVE);
    }

    fn show_completed_events_cleared(&mut self) {
        self.set_message(MSG_COMPLETED_CLEARED);
    }

    fn show_loading_events_error(&mut self) {
        self.state.load_error = true;
        self.set_message(MSG_LOADING_ERROR);
    }

    fn show_successfully_saved_message(&mut self) {
        // Saves return an action response, so the list screen shows this next.
        self.pending_message = Some(MSG_SAVED.to_string());
    }

    fn show_no_events(&mut self) {
        self.show_empty(FilterType::All);
    }

    fn show_no_active_events(&mut self) {
        self.show_empty(FilterType::Active);
    }

    fn show_no_completed_events(&mut self) {
        self.show_empty(FilterType::Completed);
    }

    fn show_all_filter_label(&mut self) {
        self.show_label(FilterType::All);
    }

    fn show_active_filter_label(&mut self) {
        self.show_label(FilterType::Active);
    }

    fn show_completed_filter_label(&mut self) {
        self.show_label(FilterType::Completed);
    }
}
