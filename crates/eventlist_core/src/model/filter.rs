//! List filtering applied by the presenter.
//!
//! # Invariants
//! - `apply` returns a subset of its input in the original order.
//! - Every returned event satisfies `matches`.

use crate::model::event::Event;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Which events a list view displays.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FilterType {
    #[default]
    All,
    Active,
    Completed,
}

impl FilterType {
    /// Returns whether `event` passes this filter.
    pub fn matches(self, event: &Event) -> bool {
        match self {
            Self::All => true,
            Self::Active => event.is_active(),
            Self::Completed => event.is_completed(),
        }
    }

    /// Linear, order-preserving filter pass.
    pub fn apply(self, events: &[Event]) -> Vec<Event> {
        events
            .iter()
            .filter(|event| self.matches(event))
            .cloned()
            .collect()
    }

    /// Label shown above a non-empty list.
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All events",
            Self::Active => "Active events",
            Self::Completed => "Completed events",
        }
    }

    /// Message shown when nothing passes this filter.
    pub fn empty_message(self) -> &'static str {
        match self {
            Self::All => "You have no events!",
            Self::Active => "You have no active events!",
            Self::Completed => "You have no completed events!",
        }
    }

    /// Stable wire name (`all|active|completed`).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl Display for FilterType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejected filter name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownFilter(pub String);

impl Display for UnknownFilter {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported filter `{}`; expected all|active|completed",
            self.0
        )
    }
}

impl std::error::Error for UnknownFilter {}

impl FromStr for FilterType {
    type Err = UnknownFilter;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(UnknownFilter(other.to_string())),
        }
    }
}
