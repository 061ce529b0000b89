//! View contract driven by `EventsPresenter`.

use crate::model::event::Event;
use crate::presenter::subscription::Subscription;

/// UI surface for the event list screen.
///
/// Rendering is out of scope for core. Implementations translate each call
/// into widget updates, or into a state snapshot for FFI callers.
pub trait EventsView {
    /// Receives the handle the view cancels when it is torn down.
    fn bind(&mut self, subscription: Subscription);

    fn set_loading_indicator(&mut self, active: bool);
    fn show_events(&mut self, events: &[Event]);

    fn show_add_event(&mut self);
    fn show_event_details(&mut self, event_id: &str);

    fn show_event_marked_complete(&mut self);
    fn show_event_marked_active(&mut self);
    fn show_completed_events_cleared(&mut self);
    fn show_loading_events_error(&mut self);
    fn show_successfully_saved_message(&mut self);

    fn show_no_events(&mut self);
    fn show_no_active_events(&mut self);
    fn show_no_completed_events(&mut self);

    fn show_all_filter_label(&mut self);
    fn show_active_filter_label(&mut self);
    fn show_completed_filter_label(&mut self);
}
