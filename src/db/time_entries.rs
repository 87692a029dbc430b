//! Time entry records.
//!
//! Every write goes through [`NewTimeEntry`], so the row's end instant and
//! duration are always written together and the duration is recomputed
//! from the instants on each change. The schema's CHECK constraint rejects
//! any row where only one of the two is set.

use super::db::Db;
use crate::libs::duration::{checked_duration, format_stored, parse_instant, Instant};
use crate::libs::error::{Result, TaskflowError};
use crate::libs::time_entry::{NewTimeEntry, TimeEntry, TimeEntryFilter, TimeEntryInput, TimeEntryPatch};
use rusqlite::types::{Type, Value};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row, Transaction, TransactionBehavior};

const SELECT_TIME_ENTRIES: &str = "SELECT id, task_id, start_time, end_time, duration_minutes, comment, created_at FROM time_entries";
const TASK_EXISTS: &str = "SELECT 1 FROM tasks WHERE id = ?1";
const INSERT_TIME_ENTRY: &str = "INSERT INTO time_entries (task_id, start_time, end_time, duration_minutes, comment)
    VALUES (?1, ?2, ?3, ?4, ?5)";
const UPDATE_TIME_ENTRY: &str = "UPDATE time_entries
    SET start_time = ?2, end_time = ?3, duration_minutes = ?4, comment = ?5
    WHERE id = ?1";
const CLOSE_TIME_ENTRY: &str = "UPDATE time_entries SET end_time = ?2, duration_minutes = ?3 WHERE id = ?1";
const DELETE_TIME_ENTRY: &str = "DELETE FROM time_entries WHERE id = ?1";

pub struct TimeEntries<'a> {
    conn: &'a Connection,
}

impl<'a> TimeEntries<'a> {
    pub fn new(db: &'a Db) -> Self {
        TimeEntries { conn: &db.conn }
    }

    /// Validates the input, computes its duration and inserts it under
    /// `task_id`. Nothing is written when the range is inverted.
    pub fn create(&self, task_id: i64, input: &TimeEntryInput) -> Result<i64> {
        let entry = input.validate()?;
        if self.conn.query_row(TASK_EXISTS, params![task_id], |_| Ok(())).optional()?.is_none() {
            return Err(TaskflowError::not_found(format!("task {}", task_id)));
        }

        self.conn.execute(
            INSERT_TIME_ENTRY,
            params![
                task_id,
                format_stored(&entry.start_time),
                entry.end_time.as_ref().map(format_stored),
                entry.duration_minutes,
                entry.comment
            ],
        )?;
        let id = self.conn.last_insert_rowid();

        tracing::debug!(task_id, entry_id = id, duration = ?entry.duration_minutes, "created time entry");
        Ok(id)
    }

    pub fn get(&self, id: i64) -> Result<Option<TimeEntry>> {
        let sql = format!("{} WHERE id = ?1", SELECT_TIME_ENTRIES);
        Ok(self.conn.query_row(&sql, params![id], map_time_entry).optional()?)
    }

    /// Entries of one task, newest start first.
    pub fn list_for_task(&self, task_id: i64) -> Result<Vec<TimeEntry>> {
        let mut entries = self.list(&TimeEntryFilter {
            task_ids: Some(vec![task_id]),
            ..TimeEntryFilter::default()
        })?;
        entries.reverse();
        Ok(entries)
    }

    /// Entries matching every populated field of `filter`, oldest start
    /// first. Instants with different offsets are compared as instants.
    pub fn list(&self, filter: &TimeEntryFilter) -> Result<Vec<TimeEntry>> {
        let mut clauses: Vec<String> = Vec::new();
        let mut values: Vec<Value> = Vec::new();

        if let Some(task_ids) = &filter.task_ids {
            if task_ids.is_empty() {
                return Ok(Vec::new());
            }
            clauses.push(format!("task_id IN ({})", vec!["?"; task_ids.len()].join(", ")));
            values.extend(task_ids.iter().map(|id| Value::Integer(*id)));
        }
        if let Some((from, to)) = filter.started {
            // The stored text starts with the local calendar date.
            clauses.push("substr(start_time, 1, 10) BETWEEN ? AND ?".to_string());
            values.push(Value::Text(from.format("%Y-%m-%d").to_string()));
            values.push(Value::Text(to.format("%Y-%m-%d").to_string()));
        }
        match filter.has_end {
            Some(true) => clauses.push("end_time IS NOT NULL".to_string()),
            Some(false) => clauses.push("end_time IS NULL".to_string()),
            None => {}
        }

        let mut sql = SELECT_TIME_ENTRIES.to_string();
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY start_time, id");

        let mut stmt = self.conn.prepare(&sql)?;
        let mut entries = stmt.query_map(params_from_iter(values.iter()), map_time_entry)?.collect::<rusqlite::Result<Vec<_>>>()?;
        entries.sort_by(|a, b| a.start_time.cmp(&b.start_time).then(a.id.cmp(&b.id)));

        tracing::debug!(count = entries.len(), "listed time entries");
        Ok(entries)
    }

    /// Merges `patch` over the stored entry and writes the recomputed row.
    pub fn update(&self, id: i64, patch: &TimeEntryPatch) -> Result<()> {
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let sql = format!("{} WHERE id = ?1", SELECT_TIME_ENTRIES);
        let current = tx
            .query_row(&sql, params![id], map_time_entry)
            .optional()?
            .ok_or_else(|| TaskflowError::not_found(format!("time entry {}", id)))?;

        let merged = patch.apply(&current)?;
        write_entry(&tx, id, &merged)?;
        tx.commit()?;

        tracing::debug!(entry_id = id, duration = ?merged.duration_minutes, "updated time entry");
        Ok(())
    }

    /// Closes an open entry at `end`.
    pub fn stop(&self, id: i64, end: &str) -> Result<i64> {
        let end = parse_instant(end)?;
        let tx = Transaction::new_unchecked(self.conn, TransactionBehavior::Immediate)?;
        let sql = format!("{} WHERE id = ?1", SELECT_TIME_ENTRIES);
        let current = tx
            .query_row(&sql, params![id], map_time_entry)
            .optional()?
            .ok_or_else(|| TaskflowError::not_found(format!("time entry {}", id)))?;
        if !current.is_open() {
            return Err(TaskflowError::validation(format!("time entry {} is already closed", id)));
        }

        let minutes = checked_duration(&current.start_time, Some(&end))?.unwrap_or(0);
        tx.execute(CLOSE_TIME_ENTRY, params![id, format_stored(&end), minutes])?;
        tx.commit()?;

        tracing::debug!(entry_id = id, minutes, "stopped time entry");
        Ok(minutes)
    }

    pub fn delete(&self, id: i64) -> Result<()> {
        if self.conn.execute(DELETE_TIME_ENTRY, params![id])? == 0 {
            return Err(TaskflowError::not_found(format!("time entry {}", id)));
        }
        Ok(())
    }
}

fn write_entry(conn: &Connection, id: i64, entry: &NewTimeEntry) -> Result<()> {
    conn.execute(
        UPDATE_TIME_ENTRY,
        params![
            id,
            format_stored(&entry.start_time),
            entry.end_time.as_ref().map(format_stored),
            entry.duration_minutes,
            entry.comment
        ],
    )?;
    Ok(())
}

fn instant_column(row: &Row, idx: usize) -> rusqlite::Result<Option<Instant>> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|raw| parse_instant(&raw).map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))))
        .transpose()
}

fn map_time_entry(row: &Row) -> rusqlite::Result<TimeEntry> {
    let start_time = instant_column(row, 2)?.ok_or(rusqlite::Error::InvalidColumnType(2, "start_time".to_string(), Type::Null))?;

    Ok(TimeEntry {
        id: row.get(0)?,
        task_id: row.get(1)?,
        start_time,
        end_time: instant_column(row, 3)?,
        duration_minutes: row.get(4)?,
        comment: row.get(5)?,
        created_at: row.get(6)?,
    })
}
