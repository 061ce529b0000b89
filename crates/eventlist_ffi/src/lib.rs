//! Flutter-facing bindings for the event list core.

pub mod api;
mod snapshot;
