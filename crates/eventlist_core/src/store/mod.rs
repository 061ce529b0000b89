//! Local persistent store for events.
//!
//! # Responsibility
//! - Provide keyed row access over the `events` table.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - The store never filters by completion state; filtering happens above it.
//! - A missing row is `None` or a zero count, never an error.

pub mod events_dao;
