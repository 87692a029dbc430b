//! User records.
//!
//! Users are referenced by tasks but do not own them: deleting a user
//! leaves its tasks in place, and reports show those tasks without an
//! owner name.

use super::db::Db;
use crate::libs::error::{Result, TaskflowError};
use crate::libs::user::{User, UserInput};
use rusqlite::{params, Connection, OptionalExtension, Row};

const INSERT_USER: &str = "INSERT INTO users (name, email) VALUES (?1, ?2)";
const SELECT_USERS: &str = "SELECT id, name, email, created_at FROM users ORDER BY name, id";
const SELECT_USER_BY_ID: &str = "SELECT id, name, email, created_at FROM users WHERE id = ?1";
const SELECT_USER_NAME: &str = "SELECT name FROM users WHERE id = ?1";
const DELETE_USER: &str = "DELETE FROM users WHERE id = ?1";

pub struct Users<'a> {
    conn: &'a Connection,
}

impl<'a> Users<'a> {
    pub fn new(db: &'a Db) -> Self {
        Users { conn: &db.conn }
    }

    pub fn create(&self, input: &UserInput) -> Result<i64> {
        input.validate()?;
        self.conn.execute(INSERT_USER, params![input.name.trim(), input.email])?;
        let id = self.conn.last_insert_rowid();
        tracing::debug!(user_id = id, "created user");
        Ok(id)
    }

    pub fn list(&self) -> Result<Vec<User>> {
        let mut stmt = self.conn.prepare(SELECT_USERS)?;
        let users = stmt.query_map([], map_user)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(users)
    }

    pub fn get(&self, id: i64) -> Result<Option<User>> {
        Ok(self.conn.query_row(SELECT_USER_BY_ID, params![id], map_user).optional()?)
    }

    pub fn name(&self, id: i64) -> Result<Option<String>> {
        Ok(self.conn.query_row(SELECT_USER_NAME, params![id], |row| row.get(0)).optional()?)
    }

    /// Removes the user only; tasks that reference it are kept.
    pub fn delete(&self, id: i64) -> Result<()> {
        if self.conn.execute(DELETE_USER, params![id])? == 0 {
            return Err(TaskflowError::not_found(format!("user {}", id)));
        }
        Ok(())
    }
}

fn map_user(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        created_at: row.get(3)?,
    })
}
