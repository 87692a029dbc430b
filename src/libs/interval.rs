//! Report-time resolution of open intervals.
//!
//! An entry without an end is shown and totalled as if it ended at the
//! cutoff (20:00 by default) on the calendar day of its start, in the UTC
//! offset the start was recorded with. The substituted end is flagged as
//! inferred and is never written back to storage.
//!
//! A start at or after the cutoff resolves to a zero or negative duration.
//! That value is reported as is unless `clamp_negative` is enabled.

use crate::libs::duration::{compute_duration, Instant};
use crate::libs::time_entry::TimeEntry;
use chrono::{DateTime, NaiveTime, TimeDelta};
use serde::Serialize;

/// How open intervals are resolved for reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenIntervalPolicy {
    pub cutoff: NaiveTime,
    pub clamp_negative: bool,
}

impl Default for OpenIntervalPolicy {
    fn default() -> Self {
        OpenIntervalPolicy {
            cutoff: NaiveTime::from_hms_opt(20, 0, 0).unwrap_or(NaiveTime::MIN),
            clamp_negative: false,
        }
    }
}

/// End and minutes used when displaying or totalling one entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedInterval {
    pub end: Instant,
    pub minutes: i64,
    /// True when `end` was substituted by the policy.
    pub inferred: bool,
}

impl OpenIntervalPolicy {
    /// The cutoff instant on the same calendar day as `start`.
    pub fn cutoff_for(&self, start: &Instant) -> Instant {
        let offset = *start.offset();
        let local_cutoff = start.date_naive().and_time(self.cutoff);
        let utc_cutoff = local_cutoff - TimeDelta::seconds(i64::from(offset.local_minus_utc()));
        DateTime::from_naive_utc_and_offset(utc_cutoff, offset)
    }

    /// Closed entries keep their stored end and duration; open entries get
    /// the inferred cutoff end.
    pub fn resolve(&self, entry: &TimeEntry) -> ResolvedInterval {
        match entry.end_time {
            Some(end) => ResolvedInterval {
                end,
                minutes: entry
                    .duration_minutes
                    .or_else(|| compute_duration(&entry.start_time, Some(&end)))
                    .unwrap_or(0),
                inferred: false,
            },
            None => {
                let end = self.cutoff_for(&entry.start_time);
                let minutes = compute_duration(&entry.start_time, Some(&end)).unwrap_or(0);
                ResolvedInterval {
                    end,
                    minutes: if self.clamp_negative { minutes.max(0) } else { minutes },
                    inferred: true,
                }
            }
        }
    }
}

/// Resolves `entry` with the default 20:00 policy.
pub fn resolve_for_report(entry: &TimeEntry) -> ResolvedInterval {
    OpenIntervalPolicy::default().resolve(entry)
}
