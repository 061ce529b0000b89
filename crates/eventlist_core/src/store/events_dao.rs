//! Events DAO contract and SQLite implementation.
//!
//! # Invariants
//! - `insert_event` has REPLACE conflict semantics (full row overwrite).
//! - Events are valid by construction, so write paths bind them as-is.
//! - Read paths reject invalid persisted rows instead of masking them.

use crate::db::DbError;
use crate::model::event::Event;
use rusqlite::{params, Connection, Row};
use std::borrow::Borrow;
use std::error::Error;
use std::fmt::{Display, Formatter};

const EVENT_SELECT_SQL: &str = "SELECT
    entryid,
    title,
    description,
    completed
FROM events";

pub type StoreResult<T> = Result<T, StoreError>;

/// Transport and integrity failures raised by the store.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    InvalidData(String),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted event data: {message}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Data access contract for the `events` table.
pub trait EventsDao {
    /// Returns every row in natural (insertion) order.
    fn get_events(&self) -> StoreResult<Vec<Event>>;
    /// Returns `None` when no row has `id`.
    fn get_event_by_id(&self, id: &str) -> StoreResult<Option<Event>>;
    /// Inserts `event`, replacing any row with the same id.
    fn insert_event(&self, event: &Event) -> StoreResult<()>;
    /// Overwrites an existing row; returns affected row count (0 or 1).
    fn update_event(&self, event: &Event) -> StoreResult<usize>;
    /// Returns removed row count (0 or 1).
    fn delete_event_by_id(&self, id: &str) -> StoreResult<usize>;
    /// Removes every row.
    fn delete_events(&self) -> StoreResult<()>;
}

/// SQLite-backed events DAO.
///
/// Accepts either `&Connection` or an owned `Connection`.
pub struct SqliteEventsDao<C: Borrow<Connection> = Connection> {
    conn: C,
}

impl<C: Borrow<Connection>> SqliteEventsDao<C> {
    pub fn new(conn: C) -> Self {
        Self { conn }
    }

    pub fn connection(&self) -> &Connection {
        self.conn.borrow()
    }
}

impl<C: Borrow<Connection>> EventsDao for SqliteEventsDao<C> {
    fn get_events(&self) -> StoreResult<Vec<Event>> {
        let mut stmt = self
            .connection()
            .prepare(&format!("{EVENT_SELECT_SQL} ORDER BY rowid ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut events = Vec::new();

        while let Some(row) = rows.next()? {
            events.push(parse_event_row(row)?);
        }

        Ok(events)
    }

    fn get_event_by_id(&self, id: &str) -> StoreResult<Option<Event>> {
        let mut stmt = self
            .connection()
            .prepare(&format!("{EVENT_SELECT_SQL} WHERE entryid = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_event_row(row)?));
        }

        Ok(None)
    }

    fn insert_event(&self, event: &Event) -> StoreResult<()> {
        self.connection().execute(
            "INSERT OR REPLACE INTO events (
                entryid,
                title,
                description,
                completed
            ) VALUES (?1, ?2, ?3, ?4);",
            params![
                event.id(),
                event.title.as_str(),
                event.description.as_deref(),
                bool_to_int(event.completed),
            ],
        )?;

        Ok(())
    }

    fn update_event(&self, event: &Event) -> StoreResult<usize> {
        let changed = self.connection().execute(
            "UPDATE events
             SET
                title = ?1,
                description = ?2,
                completed = ?3
             WHERE entryid = ?4;",
            params![
                event.title.as_str(),
                event.description.as_deref(),
                bool_to_int(event.completed),
                event.id(),
            ],
        )?;

        Ok(changed)
    }

    fn delete_event_by_id(&self, id: &str) -> StoreResult<usize> {
        let changed = self
            .connection()
            .execute("DELETE FROM events WHERE entryid = ?1;", [id])?;
        Ok(changed)
    }

    fn delete_events(&self) -> StoreResult<()> {
        self.connection().execute("DELETE FROM events;", [])?;
        Ok(())
    }
}

/// Returns the number of stored rows; used by diagnostics and tests.
pub fn count_events(conn: &Connection) -> StoreResult<usize> {
    let count = conn.query_row("SELECT COUNT(*) FROM events;", [], |row| row.get::<_, i64>(0))?;
    usize::try_from(count)
        .map_err(|_| StoreError::InvalidData(format!("negative row count `{count}`")))
}

fn parse_event_row(row: &Row<'_>) -> StoreResult<Event> {
    let completed = match row.get::<_, i64>("completed")? {
        0 => false,
        1 => true,
        other => {
            return Err(StoreError::InvalidData(format!(
                "invalid completed value `{other}` in events.completed"
            )));
        }
    };

    Event::completed_with_id(
        row.get::<_, String>("entryid")?,
        row.get::<_, String>("title")?,
        row.get("description")?,
        completed,
    )
    .map_err(|err| StoreError::InvalidData(format!("{err} in events.entryid")))
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
