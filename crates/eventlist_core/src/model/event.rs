//! Event domain model.
//!
//! # Responsibility
//! - Define the to-do/event record persisted by the local store.
//! - Provide completion helpers used by repository mutations.
//!
//! # Invariants
//! - `id` is non-empty and never reassigned after creation.
//! - Lookup equality is by `id`; update detection compares every field.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for an event.
///
/// Kept as a string so ids produced by remote services (e.g. `"1"`) are
/// accepted as-is; locally created events use UUID v4 text.
pub type EventId = String;

/// Validation failures for event invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventValidationError {
    /// `id` is empty or whitespace only.
    EmptyId,
}

impl Display for EventValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "event id must not be empty"),
        }
    }
}

impl Error for EventValidationError {}

/// Canonical to-do/event record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "EventWire")]
pub struct Event {
    /// Stable global ID, persisted as `entryid`; read through `id()`.
    id: EventId,
    /// Short title; may be empty.
    pub title: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Completion flag; new events start active.
    pub completed: bool,
}

#[derive(Deserialize)]
struct EventWire {
    id: EventId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    completed: bool,
}

impl TryFrom<EventWire> for Event {
    type Error = EventValidationError;

    fn try_from(value: EventWire) -> Result<Self, Self::Error> {
        Self::completed_with_id(value.id, value.title, value.description, value.completed)
    }
}

impl Event {
    /// Creates a new active event with a generated UUID v4 id.
    pub fn new(title: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: title.into(),
            description,
            completed: false,
        }
    }

    /// Creates an active event with a caller-provided id.
    ///
    /// Used by edit and import paths where identity already exists.
    ///
    /// # Errors
    /// - Returns `EmptyId` when `id` is blank.
    pub fn with_id(
        id: impl Into<EventId>,
        title: impl Into<String>,
        description: Option<String>,
    ) -> Result<Self, EventValidationError> {
        Self::completed_with_id(id, title, description, false)
    }

    /// Creates an event with caller-provided id and completion state.
    ///
    /// # Errors
    /// - Returns `EmptyId` when `id` is blank.
    pub fn completed_with_id(
        id: impl Into<EventId>,
        title: impl Into<String>,
        description: Option<String>,
        completed: bool,
    ) -> Result<Self, EventValidationError> {
        let event = Self {
            id: id.into(),
            title: title.into(),
            description,
            completed,
        };
        event.validate()?;
        Ok(event)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Validates identity invariants before persistence.
    pub fn validate(&self) -> Result<(), EventValidationError> {
        if self.id.trim().is_empty() {
            return Err(EventValidationError::EmptyId);
        }
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        !self.completed
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Returns whether both title and description are blank.
    pub fn is_empty(&self) -> bool {
        self.title.trim().is_empty()
            && self
                .description
                .as_deref()
                .map_or(true, |value| value.trim().is_empty())
    }

    /// Returns the text a list row should display.
    ///
    /// Falls back to the description when the title is blank.
    pub fn title_for_list(&self) -> &str {
        if self.title.trim().is_empty() {
            self.description.as_deref().unwrap_or_default()
        } else {
            self.title.as_str()
        }
    }

    /// Returns a copy of this event marked completed.
    pub fn to_completed(&self) -> Self {
        Self {
            completed: true,
            ..self.clone()
        }
    }

    /// Returns a copy of this event marked active.
    pub fn to_active(&self) -> Self {
        Self {
            completed: false,
            ..self.clone()
        }
    }
}
