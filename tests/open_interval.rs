#[cfg(test)]
mod tests {
    use chrono::NaiveTime;
    use taskflow::libs::config::ReportConfig;
    use taskflow::libs::duration::parse_instant;
    use taskflow::libs::interval::{resolve_for_report, OpenIntervalPolicy};
    use taskflow::libs::time_entry::TimeEntry;

    fn entry(start: &str, end: Option<&str>, duration: Option<i64>) -> TimeEntry {
        TimeEntry {
            id: 1,
            task_id: 1,
            start_time: parse_instant(start).unwrap(),
            end_time: end.map(|e| parse_instant(e).unwrap()),
            duration_minutes: duration,
            comment: None,
            created_at: "2024-01-01 00:00:00".to_string(),
        }
    }

    #[test]
    fn test_open_entry_resolves_to_cutoff_same_day() {
        let resolved = resolve_for_report(&entry("2024-01-01T10:00:00Z", None, None));

        assert_eq!(resolved.end, parse_instant("2024-01-01T20:00:00Z").unwrap());
        assert_eq!(resolved.minutes, 600);
        assert!(resolved.inferred);
    }

    #[test]
    fn test_cutoff_uses_the_start_offset() {
        let resolved = resolve_for_report(&entry("2024-01-01T18:30:00-05:00", None, None));

        assert_eq!(resolved.end, parse_instant("2024-01-01T20:00:00-05:00").unwrap());
        assert_eq!(resolved.end.offset().local_minus_utc(), -5 * 3600);
        assert_eq!(resolved.minutes, 90);
    }

    #[test]
    fn test_closed_entry_keeps_stored_duration() {
        let resolved = resolve_for_report(&entry("2024-01-01T10:00:00Z", Some("2024-01-01T11:00:00Z"), Some(60)));

        assert_eq!(resolved.end, parse_instant("2024-01-01T11:00:00Z").unwrap());
        assert_eq!(resolved.minutes, 60);
        assert!(!resolved.inferred);
    }

    #[test]
    fn test_start_after_cutoff_is_reported_raw() {
        let resolved = resolve_for_report(&entry("2024-01-01T21:00:00Z", None, None));

        assert_eq!(resolved.minutes, -60);
        assert!(resolved.inferred);
    }

    #[test]
    fn test_clamping_is_opt_in() {
        let policy = OpenIntervalPolicy {
            clamp_negative: true,
            ..OpenIntervalPolicy::default()
        };
        let resolved = policy.resolve(&entry("2024-01-01T21:00:00Z", None, None));

        assert_eq!(resolved.minutes, 0);
        assert_eq!(resolved.end, parse_instant("2024-01-01T20:00:00Z").unwrap());
    }

    #[test]
    fn test_configured_cutoff() {
        let config = ReportConfig {
            cutoff: "18:30".to_string(),
            ..ReportConfig::default()
        };
        let policy = config.open_interval_policy().unwrap();
        assert_eq!(policy.cutoff, NaiveTime::from_hms_opt(18, 30, 0).unwrap());

        let resolved = policy.resolve(&entry("2024-01-01T18:00:00Z", None, None));
        assert_eq!(resolved.minutes, 30);
    }

    #[test]
    fn test_invalid_cutoff_is_rejected() {
        let config = ReportConfig {
            cutoff: "8pm".to_string(),
            ..ReportConfig::default()
        };
        assert!(config.open_interval_policy().is_err());
    }

    #[test]
    fn test_resolution_does_not_touch_the_entry() {
        let open = entry("2024-01-01T10:00:00Z", None, None);
        resolve_for_report(&open);

        assert!(open.is_open());
        assert_eq!(open.duration_minutes, None);
    }
}
