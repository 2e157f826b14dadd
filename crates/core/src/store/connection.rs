//! Database connection management with pragma configuration.
//!
//! This module handles opening the SQLite database, applying pragmas,
//! and running migrations.

use super::migrations;
use crate::Error;
use rusqlite::Connection;
use std::path::Path;

/// Relational mirror handle.
///
/// Wraps a rusqlite Connection. All operations are synchronous and block the
/// caller; the design assumes a single active process.
#[derive(Debug)]
pub struct Store {
    pub(crate) conn: Connection,
}

impl Store {
    /// Open a database at the specified path.
    ///
    /// Creates the file if it doesn't exist, applies pragmas, and runs any
    /// pending migrations. The businesses→locations relationship is declared
    /// in the schema but not enforced (foreign_keys stays off); insertion
    /// order is the caller's responsibility.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, Error> {
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// Open an in-memory database for testing.
    ///
    /// Creates a temporary in-memory SQLite database with the same
    /// pragma configuration as file-based databases.
    pub fn open_in_memory() -> Result<Self, Error> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self, Error> {
        conn.execute_batch(
            "PRAGMA journal_mode=WAL;
             PRAGMA synchronous=NORMAL;
             PRAGMA temp_store=MEMORY;
             PRAGMA foreign_keys=OFF;",
        )?;

        migrations::run(&conn)?;

        Ok(Self { conn })
    }
}
