//! Active/completed counters for the statistics projection.

use crate::model::event::Event;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventStats {
    pub active: usize,
    pub completed: usize,
}

impl EventStats {
    pub fn from_events(events: &[Event]) -> Self {
        events.iter().fold(Self::default(), |mut stats, event| {
            if event.is_completed() {
                stats.completed += 1;
            } else {
                stats.active += 1;
            }
            stats
        })
    }

    pub fn total(&self) -> usize {
        self.active + self.completed
    }
}
