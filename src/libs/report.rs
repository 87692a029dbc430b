//! Report aggregation over tasks and their time entries.
//!
//! A report is a one-shot transformation of one queried row set: the
//! selection picks tasks, then the entries of those tasks, and every entry
//! is resolved once through the [`OpenIntervalPolicy`]. Both groupings are
//! built from that same resolved set, so the flat grand total always equals
//! the sum of the per-task totals for the same selection.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use taskflow::db::db::Db;
//! use taskflow::libs::report::{generate_task_report, GroupBy, ReportOptions};
//! use taskflow::libs::selection::Selection;
//!
//! let db = Db::open("taskflow.db")?;
//! let report = generate_task_report(&db, &Selection::task_numbers(1, 10), GroupBy::PerTask, &ReportOptions::default())?;
//! println!("{} minutes", report.grand_total_minutes);
//! # Ok::<(), taskflow::libs::error::TaskflowError>(())
//! ```

use crate::libs::duration::Instant;
use crate::libs::error::{Result, TaskflowError};
use crate::libs::interval::OpenIntervalPolicy;
use crate::libs::selection::Selection;
use crate::libs::task::{Task, TaskFilter, TaskStatus};
use crate::libs::time_entry::{TimeEntry, TimeEntryFilter};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// Read access the aggregator needs from storage.
pub trait ReportSource {
    fn list_tasks(&self, filter: &TaskFilter) -> Result<Vec<Task>>;

    /// Entries matching `filter`, oldest start first.
    fn list_time_entries(&self, filter: &TimeEntryFilter) -> Result<Vec<TimeEntry>>;

    fn user_name(&self, user_id: i64) -> Result<Option<String>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupBy {
    /// One section per task, entries ascending by start.
    PerTask,
    /// One row per entry across all tasks.
    Flat(SortOrder),
}

/// Settings that shape report output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub policy: OpenIntervalPolicy,
    /// Status the pending selection excludes.
    pub done_status: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            policy: OpenIntervalPolicy::default(),
            done_status: "Done".to_string(),
        }
    }
}

/// One resolved time entry with its parent task's labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportRow {
    pub entry_id: i64,
    pub task_id: i64,
    pub task_number: i64,
    pub task_name: String,
    pub task_status: TaskStatus,
    pub user_name: Option<String>,
    pub start: Instant,
    /// Recorded end, or the policy's substitute when `inferred`.
    pub end: Instant,
    pub minutes: i64,
    pub inferred: bool,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskSection {
    pub task_id: i64,
    pub task_number: i64,
    pub name: String,
    pub status: TaskStatus,
    pub user_name: Option<String>,
    pub max_time_minutes: Option<i64>,
    pub due_date: Option<NaiveDate>,
    pub description: Option<String>,
    pub rows: Vec<ReportRow>,
    pub total_minutes: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "items", rename_all = "snake_case")]
pub enum ReportBody {
    PerTask(Vec<TaskSection>),
    Flat(Vec<ReportRow>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportModel {
    pub title: String,
    pub file_stem: String,
    pub selection: Selection,
    pub body: ReportBody,
    pub grand_total_minutes: i64,
}

impl ReportModel {
    /// Every row of the report in display order.
    pub fn rows(&self) -> Vec<&ReportRow> {
        match &self.body {
            ReportBody::PerTask(sections) => sections.iter().flat_map(|s| s.rows.iter()).collect(),
            ReportBody::Flat(rows) => rows.iter().collect(),
        }
    }

    pub fn inferred_count(&self) -> usize {
        self.rows().iter().filter(|r| r.inferred).count()
    }
}

/// Builds a report for `selection`.
///
/// Fails with [`TaskflowError::NoRows`] when nothing matches: no task
/// section for per-task grouping, no entry row for flat grouping.
pub fn generate_task_report<S: ReportSource + ?Sized>(source: &S, selection: &Selection, group_by: GroupBy, options: &ReportOptions) -> Result<ReportModel> {
    selection.validate()?;

    let tasks = source.list_tasks(&selection.task_filter(&options.done_status))?;
    let rows = resolve_rows(source, selection, &tasks, &options.policy)?;

    let body = match group_by {
        GroupBy::PerTask => {
            let sections = group_by_task(&tasks, rows, selection.filters_entries());
            if sections.is_empty() {
                return Err(TaskflowError::NoRows);
            }
            ReportBody::PerTask(sections)
        }
        GroupBy::Flat(order) => {
            if rows.is_empty() {
                return Err(TaskflowError::NoRows);
            }
            ReportBody::Flat(sort_rows(rows, order))
        }
    };

    let grand_total_minutes = match &body {
        ReportBody::PerTask(sections) => sections.iter().map(|s| s.total_minutes).sum(),
        ReportBody::Flat(rows) => rows.iter().map(|r| r.minutes).sum(),
    };

    tracing::debug!(tasks = tasks.len(), total = grand_total_minutes, "generated report");

    Ok(ReportModel {
        title: selection.title(),
        file_stem: selection.file_stem(),
        selection: selection.clone(),
        body,
        grand_total_minutes,
    })
}

/// Raw entry listing: flat rows newest first. An empty result is not an error.
pub fn list_entries<S: ReportSource + ?Sized>(source: &S, selection: &Selection, options: &ReportOptions) -> Result<Vec<ReportRow>> {
    selection.validate()?;

    let tasks = source.list_tasks(&selection.task_filter(&options.done_status))?;
    let rows = resolve_rows(source, selection, &tasks, &options.policy)?;
    Ok(sort_rows(rows, SortOrder::Descending))
}

/// Entry export: flat rows newest first. Unlike [`list_entries`], an empty
/// selection fails with [`TaskflowError::NoRows`].
pub fn export_entries<S: ReportSource + ?Sized>(source: &S, selection: &Selection, options: &ReportOptions) -> Result<ReportModel> {
    generate_task_report(source, selection, GroupBy::Flat(SortOrder::Descending), options)
}

/// Resolves every entry of `tasks` matched by `selection`, oldest first.
fn resolve_rows<S: ReportSource + ?Sized>(source: &S, selection: &Selection, tasks: &[Task], policy: &OpenIntervalPolicy) -> Result<Vec<ReportRow>> {
    if tasks.is_empty() {
        return Ok(Vec::new());
    }

    let by_id: HashMap<i64, &Task> = tasks.iter().map(|t| (t.id, t)).collect();
    let entries = source.list_time_entries(&selection.entry_filter(tasks.iter().map(|t| t.id).collect()))?;

    let mut names: HashMap<i64, Option<String>> = HashMap::new();
    let mut rows = Vec::with_capacity(entries.len());

    for entry in entries {
        let Some(task) = by_id.get(&entry.task_id) else {
            continue;
        };
        let user_name = match names.get(&task.user_id) {
            Some(name) => name.clone(),
            None => {
                let name = source.user_name(task.user_id)?;
                names.insert(task.user_id, name.clone());
                name
            }
        };
        let resolved = policy.resolve(&entry);

        rows.push(ReportRow {
            entry_id: entry.id,
            task_id: task.id,
            task_number: task.task_number,
            task_name: task.name.clone(),
            task_status: task.status.clone(),
            user_name,
            start: entry.start_time,
            end: resolved.end,
            minutes: resolved.minutes,
            inferred: resolved.inferred,
            comment: entry.comment,
        });
    }

    tracing::debug!(entries = rows.len(), "resolved report rows");
    Ok(rows)
}

fn group_by_task(tasks: &[Task], rows: Vec<ReportRow>, drop_empty: bool) -> Vec<TaskSection> {
    let mut by_task: HashMap<i64, Vec<ReportRow>> = HashMap::new();
    for row in rows {
        by_task.entry(row.task_id).or_default().push(row);
    }

    tasks
        .iter()
        .filter_map(|task| {
            let rows = sort_rows(by_task.remove(&task.id).unwrap_or_default(), SortOrder::Ascending);
            if drop_empty && rows.is_empty() {
                return None;
            }
            Some(TaskSection {
                task_id: task.id,
                task_number: task.task_number,
                name: task.name.clone(),
                status: task.status.clone(),
                user_name: rows.first().and_then(|r| r.user_name.clone()).or_else(|| task.user_name.clone()),
                max_time_minutes: task.max_time_minutes,
                due_date: task.due_date,
                description: task.description.clone(),
                total_minutes: rows.iter().map(|r| r.minutes).sum(),
                rows,
            })
        })
        .collect()
}

fn sort_rows(mut rows: Vec<ReportRow>, order: SortOrder) -> Vec<ReportRow> {
    rows.sort_by(|a, b| a.start.cmp(&b.start).then(a.entry_id.cmp(&b.entry_id)));
    if order == SortOrder::Descending {
        rows.reverse();
    }
    rows
}
