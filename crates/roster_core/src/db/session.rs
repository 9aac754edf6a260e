//! Explicit database session.
//!
//! # Responsibility
//! - Hold the single live connection for the process lifetime.
//! - Release it exactly once on every exit path.
//!
//! # Invariants
//! - State moves `Connected -> Disconnected` and never back.
//! - `disconnect` is idempotent and also runs on drop.

use super::open::{open_db, open_db_in_memory, ConnectOptions};
use super::{DbError, DbResult};
use log::{info, warn};
use rusqlite::Connection;

/// Observable lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connected,
    Disconnected,
}

/// Exclusively owned connection to the student store.
pub struct Session {
    conn: Option<Connection>,
}

impl Session {
    /// Opens a session against the configured database file.
    ///
    /// # Errors
    /// - Returns `DbError` when the file cannot be opened or bootstrapped.
    ///   Callers must not attempt data operations in that case.
    pub fn connect(options: &ConnectOptions) -> DbResult<Self> {
        let conn = open_db(options)?;
        info!("event=session_connect module=db status=ok mode=file");
        Ok(Self { conn: Some(conn) })
    }

    /// Opens a session against a fresh in-memory database.
    pub fn connect_in_memory() -> DbResult<Self> {
        let conn = open_db_in_memory()?;
        info!("event=session_connect module=db status=ok mode=memory");
        Ok(Self { conn: Some(conn) })
    }

    pub fn state(&self) -> SessionState {
        if self.conn.is_some() {
            SessionState::Connected
        } else {
            SessionState::Disconnected
        }
    }

    /// Borrows the live connection for repository use.
    ///
    /// # Errors
    /// - Returns `DbError::Disconnected` after `disconnect`.
    pub fn connection_mut(&mut self) -> DbResult<&mut Connection> {
        self.conn.as_mut().ok_or(DbError::Disconnected)
    }

    /// Closes the connection. No-op when already disconnected.
    ///
    /// Returns `true` when this call released the connection.
    pub fn disconnect(&mut self) -> bool {
        let Some(conn) = self.conn.take() else {
            return false;
        };

        match conn.close() {
            Ok(()) => info!("event=session_disconnect module=db status=ok"),
            // The handle is dropped either way; sqlite finalizes on drop.
            Err((_conn, err)) => warn!(
                "event=session_disconnect module=db status=error error_code=db_close_failed error={}",
                err
            ),
        }
        true
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        self.disconnect();
    }
}
