//! Display formatting for durations and instants.
//!
//! Durations are whole minutes shown as `HH:MM`. Negative values only occur
//! for inferred open-interval durations and keep their sign, so a report
//! never hides them.
//!
//! ```rust
//! use taskflow::libs::formatter::{format_hours, format_minutes};
//!
//! assert_eq!(format_minutes(90), "01:30");
//! assert_eq!(format_minutes(-15), "-00:15");
//! assert_eq!(format_hours(90), "1.50");
//! ```

use crate::libs::duration::Instant;

/// `HH:MM`, hours unbounded, sign kept.
pub fn format_minutes(minutes: i64) -> String {
    let sign = if minutes < 0 { "-" } else { "" };
    let minutes = minutes.unsigned_abs();
    format!("{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
}

/// Decimal hours with two places.
pub fn format_hours(minutes: i64) -> String {
    format!("{:.2}", minutes as f64 / 60.0)
}

/// Empty for a missing value.
pub fn format_optional_minutes(minutes: Option<i64>) -> String {
    minutes.map(format_minutes).unwrap_or_default()
}

/// `dd/mm/YYYY HH:MM` in the instant's own offset.
pub fn format_instant(instant: &Instant) -> String {
    instant.format("%d/%m/%Y %H:%M").to_string()
}

/// Same as [`format_instant`] with a `*` suffix for inferred values.
pub fn format_resolved_end(end: &Instant, inferred: bool) -> String {
    if inferred {
        format!("{} *", format_instant(end))
    } else {
        format_instant(end)
    }
}
