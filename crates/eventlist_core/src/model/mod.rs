//! Domain model for the event list feature.
//!
//! # Responsibility
//! - Define the canonical event record shared by store, sources and presenter.
//! - Define the list filters and derived statistics used by views.
//!
//! # Invariants
//! - Every event is identified by a stable, non-empty `EventId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod event;
pub mod filter;
pub mod stats;
