//! Elapsed-minute arithmetic for time entries.
//!
//! Every stored duration is produced here from a pair of instants, so
//! recomputing from the same stored pair always yields the same value.
//!
//! ## Rules
//!
//! - No end instant: the duration is `None`, never zero.
//! - Otherwise: whole seconds between the instants divided by 60, truncated
//!   toward zero. Seconds are never rounded up to a minute.
//! - [`compute_duration`] accepts inverted ranges and returns the negative
//!   value. The write path uses [`checked_duration`], which compares the
//!   untruncated instants and rejects any end strictly before the start.
//!
//! ## Usage
//!
//! ```rust
//! use taskflow::libs::duration::{checked_duration, parse_instant};
//!
//! let start = parse_instant("2024-01-01T10:00:00Z")?;
//! let end = parse_instant("2024-01-01T11:30:59Z")?;
//! assert_eq!(checked_duration(&start, Some(&end))?, Some(90));
//! # Ok::<(), taskflow::libs::error::TaskflowError>(())
//! ```

use crate::libs::error::{Result, TaskflowError};
use chrono::{DateTime, FixedOffset, NaiveDateTime, SecondsFormat};

/// A point in time with the UTC offset it was recorded in.
pub type Instant = DateTime<FixedOffset>;

/// Naive layouts accepted in addition to RFC 3339. Naive values are taken
/// as offset `+00:00`.
const NAIVE_FORMATS: [&str; 4] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"];

/// Parses an instant from user or storage input.
///
/// Accepts RFC 3339 with a numeric offset or a trailing `Z`, and the naive
/// layouts produced by HTML `datetime-local` inputs.
pub fn parse_instant(input: &str) -> Result<Instant> {
    let trimmed = input.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant);
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .map(|naive| naive.and_utc().fixed_offset())
        .ok_or_else(|| TaskflowError::validation(format!("'{}' is not a valid date and time", input)))
}

/// Formats an instant the way it is written to storage.
pub fn format_stored(instant: &Instant) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, false)
}

/// Whole minutes between `start` and `end`, truncated toward zero.
///
/// Returns `None` when `end` is absent. Inverted ranges produce a negative
/// count; callers that persist must use [`checked_duration`] instead.
pub fn compute_duration(start: &Instant, end: Option<&Instant>) -> Option<i64> {
    end.map(|end| (*end - *start).num_seconds() / 60)
}

/// Same as [`compute_duration`] but rejects an end strictly before the start.
///
/// The comparison is made on the instants themselves, so an interval a few
/// seconds negative is refused even though it would truncate to zero.
pub fn checked_duration(start: &Instant, end: Option<&Instant>) -> Result<Option<i64>> {
    if let Some(end) = end {
        if end < start {
            return Err(TaskflowError::InvalidRange {
                start: format_stored(start),
                end: format_stored(end),
            });
        }
    }

    Ok(compute_duration(start, end))
}
