//! Task records and task-number assignment.
//!
//! ## Numbering
//!
//! Every task gets a human-facing number next to its storage id. The next
//! number is one above the larger of the highest existing number and the
//! recorded high-water mark, so a deleted number is never handed out again
//! and gaps are expected. Reading the maximum, inserting the task and
//! advancing the mark happen in one `IMMEDIATE` transaction: the write lock
//! is taken before the maximum is read, and concurrent creators queue
//! instead of computing the same number. `task_number` is also `UNIQUE` in
//! the schema.
//!
//! ## Ownership
//!
//! A task owns its annotations and time entries. Deleting it removes both
//! in the same transaction.

use super::db::Db;
use crate::libs::error::{Result, TaskflowError};
use crate::libs::task::{Task, TaskFilter, TaskInput, TaskOrder, TaskStatus};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

const SELECT_TASKS: &str = "SELECT t.id, t.task_number, t.name, t.description, t.user_id, u.name, t.max_time_minutes, t.due_date, t.status, t.created_at
    FROM tasks t
    LEFT JOIN users u ON t.user_id = u.id";
const NEXT_TASK_NUMBER: &str = "SELECT MAX(
        COALESCE((SELECT last_number FROM task_sequence WHERE id = 1), 0),
        COALESCE((SELECT MAX(task_number) FROM tasks), 0)
    ) + 1";
const INSERT_TASK: &str = "INSERT INTO tasks (task_number, name, description, user_id, max_time_minutes, due_date, status)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)";
const ADVANCE_SEQUENCE: &str = "INSERT INTO task_sequence (id, last_number) VALUES (1, ?1)
    ON CONFLICT(id) DO UPDATE SET last_number = excluded.last_number";
const UPDATE_TASK: &str = "UPDATE tasks
    SET name = ?2, description = ?3, user_id = ?4, max_time_minutes = ?5, due_date = ?6, status = COALESCE(?7, status)
    WHERE id = ?1";
const UPDATE_STATUS: &str = "UPDATE tasks SET status = ?2 WHERE id = ?1";
const DELETE_TASK_ANNOTATIONS: &str = "DELETE FROM annotations WHERE task_id = ?1";
const DELETE_TASK_TIME_ENTRIES: &str = "DELETE FROM time_entries WHERE task_id = ?1";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?1";

/// Identifiers handed back after a task is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreatedTask {
    pub id: i64,
    pub task_number: i64,
}

pub struct Tasks<'a> {
    conn: &'a Connection,
}

impl<'a> Tasks<'a> {
    pub fn new(db: &'a Db) -> Self {
        Tasks { conn: &db.conn }
    }

    /// Inserts a task under the next free number. `default_status` applies
    /// when the input carries none.
    pub fn create(&self, input: &TaskInput, default_status: &str) -> Result<CreatedTask> {
        input.validate()?;
        let status = input.status.as_deref().unwrap_or(default_status).trim().to_string();

        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let task_number: i64 = tx.query_row(NEXT_TASK_NUMBER, [], |row| row.get(0))?;
        tx.execute(
            INSERT_TASK,
            params![
                task_number,
                input.name.trim(),
                input.description,
                input.user_id,
                input.max_time_minutes,
                input.due_date,
                status
            ],
        )?;
        let id = tx.last_insert_rowid();
        tx.execute(ADVANCE_SEQUENCE, params![task_number])?;
        tx.commit()?;

        tracing::debug!(task_id = id, task_number, "created task");
        Ok(CreatedTask { id, task_number })
    }

    pub fn get(&self, id: i64) -> Result<Option<Task>> {
        let sql = format!("{} WHERE t.id = ?1", SELECT_TASKS);
        Ok(self.conn.query_row(&sql, params![id], map_task).optional()?)
    }

    pub fn get_by_number(&self, task_number: i64) -> Result<Option<Task>> {
        let sql = format!("{} WHERE t.task_number = ?1", SELECT_TASKS);
        Ok(self.conn.query_row(&sql, params![task_number], map_task).optional()?)
    }

    /// Tasks matching every populated field of `filter`.
    pub fn list(&self, filter: &TaskFilter) -> Result<Vec<Task>> {
        let mut clauses: Vec<String> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some((from, to)) = filter.numbers {
            clauses.push("t.task_number BETWEEN ? AND ?".to_string());
            values.push(Value::Integer(from));
            values.push(Value::Integer(to));
        }
        if let Some((from, to)) = filter.created {
            clauses.push("DATE(t.created_at) BETWEEN ? AND ?".to_string());
            values.push(Value::Text(from.format("%Y-%m-%d").to_string()));
            values.push(Value::Text(to.format("%Y-%m-%d").to_string()));
        }
        if let Some(done) = &filter.status_not {
            clauses.push("t.status != ?".to_string());
            values.push(Value::Text(done.clone()));
        }
        if let Some(user_id) = filter.user_id {
            clauses.push("t.user_id = ?".to_string());
            values.push(Value::Integer(user_id));
        }
        if let Some(status) = &filter.status {
            clauses.push("t.status = ?".to_string());
            values.push(Value::Text(status.clone()));
        }
        if let Some(ids) = &filter.ids {
            if ids.is_empty() {
                return Ok(Vec::new());
            }
            clauses.push(format!("t.id IN ({})", vec!["?"; ids.len()].join(", ")));
            values.extend(ids.iter().map(|id| Value::Integer(*id)));
        }

        let mut sql = SELECT_TASKS.to_string();
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(match filter.order {
            TaskOrder::Number => " ORDER BY t.task_number",
            TaskOrder::Created => " ORDER BY t.created_at, t.task_number",
        });

        let mut stmt = self.conn.prepare(&sql)?;
        let tasks = stmt.query_map(params_from_iter(values.iter()), map_task)?.collect::<rusqlite::Result<Vec<_>>>()?;

        tracing::debug!(count = tasks.len(), "listed tasks");
        Ok(tasks)
    }

    /// Replaces the editable fields. A missing status keeps the stored one.
    pub fn update(&self, id: i64, input: &TaskInput) -> Result<()> {
        input.validate()?;
        let changed = self.conn.execute(
            UPDATE_TASK,
            params![
                id,
                input.name.trim(),
                input.description,
                input.user_id,
                input.max_time_minutes,
                input.due_date,
                input.status.as_deref().map(str::trim)
            ],
        )?;
        if changed == 0 {
            return Err(TaskflowError::not_found(format!("task {}", id)));
        }
        Ok(())
    }

    pub fn set_status(&self, id: i64, status: &str) -> Result<()> {
        if status.trim().is_empty() {
            return Err(TaskflowError::validation("status must not be empty"));
        }
        if self.conn.execute(UPDATE_STATUS, params![id, status.trim()])? == 0 {
            return Err(TaskflowError::not_found(format!("task {}", id)));
        }
        Ok(())
    }

    /// Deletes the task with its annotations and time entries.
    pub fn delete(&self, id: i64) -> Result<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let annotations = tx.execute(DELETE_TASK_ANNOTATIONS, params![id])?;
        let entries = tx.execute(DELETE_TASK_TIME_ENTRIES, params![id])?;
        if tx.execute(DELETE_TASK, params![id])? == 0 {
            // Dropping the transaction rolls back.
            return Err(TaskflowError::not_found(format!("task {}", id)));
        }
        tx.commit()?;

        tracing::debug!(task_id = id, annotations, entries, "deleted task");
        Ok(())
    }
}

fn map_task(row: &Row) -> rusqlite::Result<Task> {
    Ok(Task {
        id: row.get(0)?,
        task_number: row.get(1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        user_id: row.get(4)?,
        user_name: row.get(5)?,
        max_time_minutes: row.get(6)?,
        due_date: row.get(7)?,
        status: TaskStatus::new(row.get::<_, String>(8)?),
        created_at: row.get(9)?,
    })
}
