//! Task domain types and the validated input shapes used to write them.

use crate::libs::error::{Result, TaskflowError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Open-ended task status.
///
/// Statuses are free strings compared by exact equality. The only value
/// with behaviour attached is the configured "done" sentinel, which the
/// pending selection excludes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskStatus(pub String);

impl TaskStatus {
    pub fn new(status: impl Into<String>) -> Self {
        TaskStatus(status.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_done(&self, done_status: &str) -> bool {
        self.0 == done_status
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A stored task joined with its owner's display name.
#[derive(Debug, Clone, Serialize)]
pub struct Task {
    pub id: i64,
    /// Human-facing sequence number, distinct from the storage id.
    pub task_number: i64,
    pub name: String,
    pub description: Option<String>,
    pub user_id: i64,
    /// Owner name; `None` once the owning user has been deleted.
    pub user_name: Option<String>,
    pub max_time_minutes: Option<i64>,
    pub due_date: Option<NaiveDate>,
    pub status: TaskStatus,
    pub created_at: String,
}

/// Fields accepted when creating or fully replacing a task.
///
/// `status` falls back to the configured default when absent.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskInput {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub user_id: i64,
    #[serde(default)]
    pub max_time_minutes: Option<i64>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<String>,
}

impl TaskInput {
    pub fn new(name: &str, user_id: i64) -> Self {
        TaskInput {
            name: name.to_string(),
            description: None,
            user_id,
            max_time_minutes: None,
            due_date: None,
            status: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(TaskflowError::validation("task name must not be empty"));
        }
        if matches!(self.max_time_minutes, Some(minutes) if minutes < 0) {
            return Err(TaskflowError::validation("maximum time must not be negative"));
        }
        if matches!(&self.status, Some(status) if status.trim().is_empty()) {
            return Err(TaskflowError::validation("status must not be empty"));
        }
        Ok(())
    }
}

/// Task-level predicates. Every populated field narrows the result (AND).
#[derive(Debug, Clone, Default)]
pub struct TaskFilter {
    /// Inclusive task-number range.
    pub numbers: Option<(i64, i64)>,
    /// Inclusive calendar-date range on the creation date.
    pub created: Option<(NaiveDate, NaiveDate)>,
    /// Exclude tasks whose status equals this value.
    pub status_not: Option<String>,
    pub user_id: Option<i64>,
    pub status: Option<String>,
    pub ids: Option<Vec<i64>>,
    pub order: TaskOrder,
}

/// Orders the task listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TaskOrder {
    #[default]
    Number,
    Created,
}
