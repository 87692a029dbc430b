#[cfg(test)]
mod tests {
    use chrono::{NaiveDate, Utc};
    use taskflow::db::db::Db;
    use taskflow::db::tasks::Tasks;
    use taskflow::db::time_entries::TimeEntries;
    use taskflow::db::users::Users;
    use taskflow::libs::error::TaskflowError;
    use taskflow::libs::report::{export_entries, generate_task_report, list_entries, GroupBy, ReportBody, ReportOptions, SortOrder};
    use taskflow::libs::selection::Selection;
    use taskflow::libs::task::TaskInput;
    use taskflow::libs::time_entry::TimeEntryInput;
    use taskflow::libs::user::UserInput;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    /// Two users, three tasks:
    /// #1 Ana, Pending: 10:00-11:30 and an open entry from 19:00
    /// #2 Ana, Done:    08:00-08:45
    /// #3 Bruno, Pending: no entries
    struct ReportTestContext {
        _temp_dir: TempDir,
        db: Db,
        ana: i64,
        bruno: i64,
        options: ReportOptions,
    }

    impl TestContext for ReportTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("taskflow.db")).unwrap();
            let users = Users::new(&db);
            let ana = users.create(&UserInput::new("Ana", None)).unwrap();
            let bruno = users.create(&UserInput::new("Bruno", None)).unwrap();

            let tasks = Tasks::new(&db);
            let first = tasks.create(&TaskInput::new("Design", ana), "Pending").unwrap().id;
            let second = tasks.create(&TaskInput::new("Review", ana), "Pending").unwrap().id;
            tasks.create(&TaskInput::new("Idle", bruno), "Pending").unwrap();
            tasks.set_status(second, "Done").unwrap();

            let entries = TimeEntries::new(&db);
            entries
                .create(first, &TimeEntryInput::new("2024-01-02T10:00:00Z", Some("2024-01-02T11:30:00Z"), Some("draft")))
                .unwrap();
            entries.create(first, &TimeEntryInput::new("2024-01-03T19:00:00Z", None, None)).unwrap();
            entries
                .create(second, &TimeEntryInput::new("2024-01-01T08:00:00Z", Some("2024-01-01T08:45:00Z"), None))
                .unwrap();

            ReportTestContext {
                _temp_dir: temp_dir,
                db,
                ana,
                bruno,
                options: ReportOptions::default(),
            }
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_per_task_and_flat_totals_agree(ctx: &mut ReportTestContext) {
        let selection = Selection::task_numbers(1, 3);
        let per_task = generate_task_report(&ctx.db, &selection, GroupBy::PerTask, &ctx.options).unwrap();
        let flat = generate_task_report(&ctx.db, &selection, GroupBy::Flat(SortOrder::Ascending), &ctx.options).unwrap();

        // 90 + 60 inferred up to 20:00 + 45
        assert_eq!(per_task.grand_total_minutes, 195);
        assert_eq!(flat.grand_total_minutes, per_task.grand_total_minutes);
        assert_eq!(per_task.inferred_count(), 1);
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_per_task_keeps_tasks_without_entries(ctx: &mut ReportTestContext) {
        let report = generate_task_report(&ctx.db, &Selection::task_numbers(1, 3), GroupBy::PerTask, &ctx.options).unwrap();

        let ReportBody::PerTask(sections) = &report.body else {
            panic!("expected per-task body");
        };
        let numbers: Vec<i64> = sections.iter().map(|s| s.task_number).collect();
        assert_eq!(numbers, vec![1, 2, 3]);
        assert_eq!(sections[0].total_minutes, 150);
        assert_eq!(sections[0].user_name.as_deref(), Some("Ana"));
        assert!(sections[2].rows.is_empty());
        assert_eq!(sections[2].total_minutes, 0);
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_per_task_rows_are_ascending(ctx: &mut ReportTestContext) {
        let report = generate_task_report(&ctx.db, &Selection::task_numbers(1, 1), GroupBy::PerTask, &ctx.options).unwrap();

        let rows = report.rows();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].start < rows[1].start);
        assert!(!rows[0].inferred);
        assert!(rows[1].inferred);
        assert_eq!(rows[1].minutes, 60);
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_pending_excludes_done(ctx: &mut ReportTestContext) {
        let report = generate_task_report(&ctx.db, &Selection::pending(), GroupBy::PerTask, &ctx.options).unwrap();

        let ReportBody::PerTask(sections) = &report.body else {
            panic!("expected per-task body");
        };
        assert!(sections.iter().all(|s| s.status.as_str() != "Done"));
        assert_eq!(sections.len(), 2);
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_pending_honours_configured_done_status(ctx: &mut ReportTestContext) {
        let options = ReportOptions {
            done_status: "Pending".to_string(),
            ..ReportOptions::default()
        };
        let report = generate_task_report(&ctx.db, &Selection::pending(), GroupBy::PerTask, &options).unwrap();

        let ReportBody::PerTask(sections) = &report.body else {
            panic!("expected per-task body");
        };
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].name, "Review");
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_filters_combine_with_and(ctx: &mut ReportTestContext) {
        let selection = Selection::task_numbers(1, 3).with_user(Some(ctx.ana)).with_has_end(Some(true));
        let report = generate_task_report(&ctx.db, &selection, GroupBy::Flat(SortOrder::Ascending), &ctx.options).unwrap();

        let rows = report.rows();
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.user_name.as_deref() == Some("Ana") && !r.inferred));
        assert_eq!(report.grand_total_minutes, 135);
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_entry_filter_drops_empty_sections(ctx: &mut ReportTestContext) {
        let selection = Selection::task_numbers(1, 3).with_has_end(Some(false));
        let report = generate_task_report(&ctx.db, &selection, GroupBy::PerTask, &ctx.options).unwrap();

        let ReportBody::PerTask(sections) = &report.body else {
            panic!("expected per-task body");
        };
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].task_number, 1);
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_no_match_is_no_rows(ctx: &mut ReportTestContext) {
        let selection = Selection::task_numbers(50, 60);
        let err = generate_task_report(&ctx.db, &selection, GroupBy::PerTask, &ctx.options).unwrap_err();
        assert!(matches!(err, TaskflowError::NoRows));

        // Bruno's task exists but has no entries to flatten
        let selection = Selection::task_numbers(1, 3).with_user(Some(ctx.bruno));
        let err = generate_task_report(&ctx.db, &selection, GroupBy::Flat(SortOrder::Ascending), &ctx.options).unwrap_err();
        assert!(matches!(err, TaskflowError::NoRows));
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_inverted_selection_is_rejected(ctx: &mut ReportTestContext) {
        let err = generate_task_report(&ctx.db, &Selection::task_numbers(3, 1), GroupBy::PerTask, &ctx.options).unwrap_err();
        assert!(err.is_validation());
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_created_between_today(ctx: &mut ReportTestContext) {
        let today = Utc::now().date_naive();
        let report = generate_task_report(&ctx.db, &Selection::created_between(today, today), GroupBy::PerTask, &ctx.options).unwrap();
        assert_eq!(report.grand_total_minutes, 195);

        let past = Selection::created_between(date(2000, 1, 1), date(2000, 12, 31));
        assert!(generate_task_report(&ctx.db, &past, GroupBy::PerTask, &ctx.options).is_err());
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_list_entries_is_newest_first(ctx: &mut ReportTestContext) {
        let selection = Selection::entries_between(date(2024, 1, 1), date(2024, 1, 31));
        let rows = list_entries(&ctx.db, &selection, &ctx.options).unwrap();

        let starts: Vec<_> = rows.iter().map(|r| r.start).collect();
        assert_eq!(rows.len(), 3);
        assert!(starts.windows(2).all(|w| w[0] >= w[1]));
        assert_eq!(rows[0].task_name, "Design");
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_list_entries_empty_is_not_an_error(ctx: &mut ReportTestContext) {
        let selection = Selection::entries_between(date(2023, 1, 1), date(2023, 1, 31));
        assert!(list_entries(&ctx.db, &selection, &ctx.options).unwrap().is_empty());
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_list_entries_by_date_window(ctx: &mut ReportTestContext) {
        let selection = Selection::entries_between(date(2024, 1, 2), date(2024, 1, 2));
        let rows = list_entries(&ctx.db, &selection, &ctx.options).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].comment.as_deref(), Some("draft"));
        assert_eq!(rows[0].minutes, 90);
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_date_user_and_status_combine_with_and(ctx: &mut ReportTestContext) {
        let tasks = Tasks::new(&ctx.db);
        let entries = TimeEntries::new(&ctx.db);
        let design = tasks.get_by_number(1).unwrap().unwrap();
        let idle = tasks.get_by_number(3).unwrap().unwrap();

        // Right user and status, outside the window
        let late = entries
            .create(design.id, &TimeEntryInput::new("2024-02-10T09:00:00Z", Some("2024-02-10T10:00:00Z"), None))
            .unwrap();
        // Right window and status, wrong user
        let other_user = entries
            .create(idle.id, &TimeEntryInput::new("2024-01-02T09:00:00Z", Some("2024-01-02T09:30:00Z"), None))
            .unwrap();

        // Task #2 is Ana's and inside the window but Done
        let selection = Selection::entries_between(date(2024, 1, 1), date(2024, 1, 31))
            .with_user(Some(ctx.ana))
            .with_status(Some("Pending".to_string()));
        let report = generate_task_report(&ctx.db, &selection, GroupBy::Flat(SortOrder::Ascending), &ctx.options).unwrap();

        let expected: Vec<i64> = entries.list_for_task(design.id).unwrap().into_iter().rev().map(|e| e.id).filter(|id| *id != late).collect();
        let ids: Vec<i64> = report.rows().iter().map(|r| r.entry_id).collect();
        assert_eq!(ids, expected);
        assert!(!ids.contains(&other_user));
        assert!(report.rows().iter().all(|r| r.task_number == 1 && r.task_status.as_str() == "Pending"));
        assert_eq!(report.grand_total_minutes, 150);
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_export_entries_is_newest_first(ctx: &mut ReportTestContext) {
        let selection = Selection::entries_between(date(2024, 1, 1), date(2024, 1, 31));
        let report = export_entries(&ctx.db, &selection, &ctx.options).unwrap();

        let rows = report.rows();
        assert_eq!(rows.len(), 3);
        assert!(rows.windows(2).all(|w| w[0].start >= w[1].start));
        assert_eq!(report.file_stem, "entries_2024-01-01_to_2024-01-31");
        assert_eq!(report.grand_total_minutes, 195);
    }

    #[test_context(ReportTestContext)]
    #[test]
    fn test_export_entries_empty_window_is_no_rows(ctx: &mut ReportTestContext) {
        let selection = Selection::entries_between(date(2023, 1, 1), date(2023, 1, 31));

        let err = export_entries(&ctx.db, &selection, &ctx.options).unwrap_err();
        assert!(matches!(err, TaskflowError::NoRows));
        assert!(list_entries(&ctx.db, &selection, &ctx.options).unwrap().is_empty());
    }
}
