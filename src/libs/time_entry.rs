//! Time entry domain types.
//!
//! A time entry is a start instant with an optional end. The stored
//! duration is derived from the pair at write time and is `None` exactly
//! when the end is `None`. The input shapes below are the only way to
//! produce a row, which keeps that invariant in one place.

use crate::libs::duration::{checked_duration, parse_instant, Instant};
use crate::libs::error::Result;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct TimeEntry {
    pub id: i64,
    pub task_id: i64,
    pub start_time: Instant,
    pub end_time: Option<Instant>,
    pub duration_minutes: Option<i64>,
    pub comment: Option<String>,
    pub created_at: String,
}

impl TimeEntry {
    /// Open intervals have a start but no recorded end.
    pub fn is_open(&self) -> bool {
        self.end_time.is_none()
    }
}

/// Entry-level predicates. Every populated field narrows the result (AND).
#[derive(Debug, Clone, Default)]
pub struct TimeEntryFilter {
    /// Restrict to these parent tasks; an empty list matches nothing.
    pub task_ids: Option<Vec<i64>>,
    /// Inclusive calendar-date range on the start instant, read in the
    /// offset the start was recorded with.
    pub started: Option<(NaiveDate, NaiveDate)>,
    pub has_end: Option<bool>,
}

/// Raw create payload, instants still as text.
#[derive(Debug, Clone, Deserialize)]
pub struct TimeEntryInput {
    pub start_time: String,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub comment: Option<String>,
}

/// A create payload after parsing and range validation.
#[derive(Debug, Clone)]
pub struct NewTimeEntry {
    pub start_time: Instant,
    pub end_time: Option<Instant>,
    pub duration_minutes: Option<i64>,
    pub comment: Option<String>,
}

impl TimeEntryInput {
    pub fn new(start_time: &str, end_time: Option<&str>, comment: Option<&str>) -> Self {
        TimeEntryInput {
            start_time: start_time.to_string(),
            end_time: end_time.map(str::to_string),
            comment: comment.map(str::to_string),
        }
    }

    /// Parses both instants and computes the duration, failing with
    /// `InvalidRange` before anything can be written.
    pub fn validate(&self) -> Result<NewTimeEntry> {
        let start_time = parse_instant(&self.start_time)?;
        let end_time = self.end_time.as_deref().filter(|s| !s.trim().is_empty()).map(parse_instant).transpose()?;
        let duration_minutes = checked_duration(&start_time, end_time.as_ref())?;

        Ok(NewTimeEntry {
            start_time,
            end_time,
            duration_minutes,
            comment: normalize_comment(self.comment.clone()),
        })
    }
}

/// Partial update. `None` keeps the stored value; `Some(None)` clears an
/// optional field.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TimeEntryPatch {
    #[serde(default)]
    pub start_time: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub end_time: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub comment: Option<Option<String>>,
}

impl TimeEntryPatch {
    /// Merges the patch over `current` and recomputes the duration from the
    /// resulting pair. The stored duration is never carried over.
    pub fn apply(&self, current: &TimeEntry) -> Result<NewTimeEntry> {
        let start_time = match &self.start_time {
            Some(raw) => parse_instant(raw)?,
            None => current.start_time,
        };
        let end_time = match &self.end_time {
            Some(Some(raw)) if !raw.trim().is_empty() => Some(parse_instant(raw)?),
            Some(_) => None,
            None => current.end_time,
        };
        let comment = match &self.comment {
            Some(comment) => normalize_comment(comment.clone()),
            None => current.comment.clone(),
        };
        let duration_minutes = checked_duration(&start_time, end_time.as_ref())?;

        Ok(NewTimeEntry {
            start_time,
            end_time,
            duration_minutes,
            comment,
        })
    }
}

fn normalize_comment(comment: Option<String>) -> Option<String> {
    comment.filter(|c| !c.trim().is_empty())
}

fn double_option<'de, D>(deserializer: D) -> std::result::Result<Option<Option<String>>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}
