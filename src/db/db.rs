use super::migrations::init_with_migrations;
use crate::libs::error::Result;
use rusqlite::Connection;
use std::path::Path;

/// Owner of the single SQLite connection used by one unit of work.
///
/// Repositories borrow it (`Tasks::new(&db)`), so the connection is passed
/// explicitly to every operation instead of living in global state.
pub struct Db {
    pub conn: Connection,
}

impl Db {
    /// Opens (creating if needed) the database at `path` and migrates it.
    pub fn open(path: impl AsRef<Path>) -> Result<Db> {
        let conn = Connection::open(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "opened database");
        Self::prepare(conn)
    }

    pub fn open_in_memory() -> Result<Db> {
        Self::prepare(Connection::open_in_memory()?)
    }

    /// Opens a connection without applying migrations.
    pub fn open_without_migrations(path: impl AsRef<Path>) -> Result<Connection> {
        let conn = Connection::open(path.as_ref())?;
        conn.pragma_update(None, "foreign_keys", true)?;
        Ok(conn)
    }

    fn prepare(mut conn: Connection) -> Result<Db> {
        conn.pragma_update(None, "foreign_keys", true)?;
        init_with_migrations(&mut conn)?;
        Ok(Db { conn })
    }
}
