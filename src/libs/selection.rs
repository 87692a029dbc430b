//! Report selections.
//!
//! A selection is one scope (task-number range, creation-date range, entry
//! start-date range, or pending) narrowed by any combination of owner,
//! exact status and open/closed state. All predicates combine with AND.

use crate::libs::error::{Result, TaskflowError};
use crate::libs::task::{TaskFilter, TaskOrder};
use crate::libs::time_entry::TimeEntryFilter;
use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scope {
    /// Inclusive task-number range.
    TaskNumbers { from: i64, to: i64 },
    /// Tasks created on a calendar date within the inclusive range.
    CreatedBetween { from: NaiveDate, to: NaiveDate },
    /// Entries started on a calendar date within the inclusive range.
    EntriesBetween { from: NaiveDate, to: NaiveDate },
    /// Tasks whose status is not the done sentinel.
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub scope: Scope,
    pub user_id: Option<i64>,
    pub status: Option<String>,
    /// `Some(true)` keeps closed entries only, `Some(false)` open ones only.
    pub has_end: Option<bool>,
}

impl Selection {
    pub fn new(scope: Scope) -> Self {
        Selection {
            scope,
            user_id: None,
            status: None,
            has_end: None,
        }
    }

    pub fn task_numbers(from: i64, to: i64) -> Self {
        Self::new(Scope::TaskNumbers { from, to })
    }

    pub fn created_between(from: NaiveDate, to: NaiveDate) -> Self {
        Self::new(Scope::CreatedBetween { from, to })
    }

    pub fn entries_between(from: NaiveDate, to: NaiveDate) -> Self {
        Self::new(Scope::EntriesBetween { from, to })
    }

    pub fn pending() -> Self {
        Self::new(Scope::Pending)
    }

    pub fn with_user(mut self, user_id: Option<i64>) -> Self {
        self.user_id = user_id;
        self
    }

    pub fn with_status(mut self, status: Option<String>) -> Self {
        self.status = status.filter(|s| !s.trim().is_empty());
        self
    }

    pub fn with_has_end(mut self, has_end: Option<bool>) -> Self {
        self.has_end = has_end;
        self
    }

    pub fn validate(&self) -> Result<()> {
        match &self.scope {
            Scope::TaskNumbers { from, to } if from > to => Err(TaskflowError::validation(format!("task range {}-{} is inverted", from, to))),
            Scope::CreatedBetween { from, to } | Scope::EntriesBetween { from, to } if from > to => {
                Err(TaskflowError::validation(format!("date range {} to {} is inverted", from, to)))
            }
            _ => Ok(()),
        }
    }

    /// True when the selection filters individual entries, not only tasks.
    pub fn filters_entries(&self) -> bool {
        matches!(self.scope, Scope::EntriesBetween { .. }) || self.has_end.is_some()
    }

    /// Task-level part of the selection.
    pub fn task_filter(&self, done_status: &str) -> TaskFilter {
        let mut filter = TaskFilter {
            user_id: self.user_id,
            status: self.status.clone(),
            ..TaskFilter::default()
        };
        match &self.scope {
            Scope::TaskNumbers { from, to } => filter.numbers = Some((*from, *to)),
            Scope::CreatedBetween { from, to } => {
                filter.created = Some((*from, *to));
                filter.order = TaskOrder::Created;
            }
            Scope::EntriesBetween { .. } => {}
            Scope::Pending => filter.status_not = Some(done_status.to_string()),
        }
        filter
    }

    /// Entry-level part of the selection, restricted to `task_ids`.
    pub fn entry_filter(&self, task_ids: Vec<i64>) -> TimeEntryFilter {
        let started = match &self.scope {
            Scope::EntriesBetween { from, to } => Some((*from, *to)),
            _ => None,
        };
        TimeEntryFilter {
            task_ids: Some(task_ids),
            started,
            has_end: self.has_end,
        }
    }

    /// File stem describing the active filters, e.g. `report_tasks_1-10_user3`.
    pub fn file_stem(&self) -> String {
        let mut stem = match &self.scope {
            Scope::TaskNumbers { from, to } => format!("report_tasks_{}-{}", from, to),
            Scope::CreatedBetween { from, to } => format!("report_dates_{}_{}", from, to),
            Scope::EntriesBetween { from, to } => format!("entries_{}_to_{}", from, to),
            Scope::Pending => "report_pending".to_string(),
        };
        if let Some(user_id) = self.user_id {
            stem.push_str(&format!("_user{}", user_id));
        }
        match self.has_end {
            Some(true) => stem.push_str("_closed"),
            Some(false) => stem.push_str("_open"),
            None => {}
        }
        if let Some(status) = &self.status {
            let status: String = status.chars().filter(|c| c.is_alphanumeric()).collect();
            stem.push_str(&format!("_status{}", status));
        }
        stem
    }

    /// Human-readable title for rendered reports.
    pub fn title(&self) -> String {
        let mut title = match &self.scope {
            Scope::TaskNumbers { from, to } => format!("Tasks #{} to #{}", from, to),
            Scope::CreatedBetween { from, to } => format!("Tasks created {} to {}", from, to),
            Scope::EntriesBetween { from, to } => format!("Time entries {} to {}", from, to),
            Scope::Pending => "Pending tasks".to_string(),
        };
        if let Some(user_id) = self.user_id {
            title.push_str(&format!(", user {}", user_id));
        }
        if let Some(status) = &self.status {
            title.push_str(&format!(", status '{}'", status));
        }
        match self.has_end {
            Some(true) => title.push_str(", closed entries"),
            Some(false) => title.push_str(", open entries"),
            None => {}
        }
        title
    }
}
