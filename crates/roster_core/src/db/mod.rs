//! SQLite storage bootstrap and session lifetime.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the roster core.
//! - Ensure the `students` table exists before any data access.
//! - Own the connection through an explicit `Session` value.
//!
//! # Invariants
//! - Core code must not read/write student data before bootstrap succeeds.
//! - A session is released exactly once, explicitly or on drop.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod open;
pub mod schema;
mod session;

pub use open::{open_db, open_db_in_memory, ConnectOptions};
pub use session::{Session, SessionState};

pub type DbResult<T> = Result<T, DbError>;

#[derive(Debug)]
pub enum DbError {
    Sqlite(rusqlite::Error),
    Io(std::io::Error),
    /// Data access was attempted after the session was closed.
    Disconnected,
}

impl Display for DbError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::Io(err) => write!(f, "{err}"),
            Self::Disconnected => write!(f, "database session is disconnected"),
        }
    }
}

impl Error for DbError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::Disconnected => None,
        }
    }
}

impl From<rusqlite::Error> for DbError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

impl From<std::io::Error> for DbError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}
