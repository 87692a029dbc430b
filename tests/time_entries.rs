#[cfg(test)]
mod tests {
    use taskflow::db::annotations::Annotations;
    use taskflow::db::db::Db;
    use taskflow::db::tasks::Tasks;
    use taskflow::db::time_entries::TimeEntries;
    use taskflow::db::users::Users;
    use taskflow::libs::annotation::AnnotationInput;
    use taskflow::libs::duration::{compute_duration, parse_instant};
    use taskflow::libs::error::TaskflowError;
    use taskflow::libs::task::TaskInput;
    use taskflow::libs::time_entry::{TimeEntryFilter, TimeEntryInput, TimeEntryPatch};
    use taskflow::libs::user::UserInput;
    use rusqlite::Connection;
    use std::time::Duration;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct EntryTestContext {
        temp_dir: TempDir,
        db: Db,
        task_id: i64,
    }

    impl TestContext for EntryTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let db = Db::open(temp_dir.path().join("taskflow.db")).unwrap();
            let user_id = Users::new(&db).create(&UserInput::new("Ana", None)).unwrap();
            let task_id = Tasks::new(&db).create(&TaskInput::new("Tracked", user_id), "Pending").unwrap().id;
            EntryTestContext {
                temp_dir,
                db,
                task_id,
            }
        }
    }

    #[test_context(EntryTestContext)]
    #[test]
    fn test_create_stores_truncated_duration(ctx: &mut EntryTestContext) {
        let entries = TimeEntries::new(&ctx.db);
        let id = entries
            .create(ctx.task_id, &TimeEntryInput::new("2024-01-01T10:00:00Z", Some("2024-01-01T11:30:59Z"), Some("review")))
            .unwrap();

        let entry = entries.get(id).unwrap().unwrap();
        assert_eq!(entry.duration_minutes, Some(90));
        assert_eq!(entry.comment.as_deref(), Some("review"));
        assert_eq!(compute_duration(&entry.start_time, entry.end_time.as_ref()), entry.duration_minutes);
    }

    #[test_context(EntryTestContext)]
    #[test]
    fn test_open_entry_has_no_duration(ctx: &mut EntryTestContext) {
        let entries = TimeEntries::new(&ctx.db);
        let id = entries.create(ctx.task_id, &TimeEntryInput::new("2024-01-01T10:00:00Z", Some("  "), None)).unwrap();

        let entry = entries.get(id).unwrap().unwrap();
        assert!(entry.is_open());
        assert_eq!(entry.duration_minutes, None);
    }

    #[test_context(EntryTestContext)]
    #[test]
    fn test_inverted_range_writes_nothing(ctx: &mut EntryTestContext) {
        let entries = TimeEntries::new(&ctx.db);
        let err = entries
            .create(ctx.task_id, &TimeEntryInput::new("2024-01-01T10:00:30Z", Some("2024-01-01T10:00:00Z"), None))
            .unwrap_err();

        assert!(matches!(err, TaskflowError::InvalidRange { .. }));
        assert!(entries.list_for_task(ctx.task_id).unwrap().is_empty());
    }

    #[test_context(EntryTestContext)]
    #[test]
    fn test_offset_is_preserved(ctx: &mut EntryTestContext) {
        let entries = TimeEntries::new(&ctx.db);
        let id = entries.create(ctx.task_id, &TimeEntryInput::new("2024-03-01T09:00:00+02:00", None, None)).unwrap();

        let entry = entries.get(id).unwrap().unwrap();
        assert_eq!(entry.start_time.offset().local_minus_utc(), 7200);
        assert_eq!(entry.start_time, parse_instant("2024-03-01T07:00:00Z").unwrap());
    }

    #[test_context(EntryTestContext)]
    #[test]
    fn test_missing_task_is_not_found(ctx: &mut EntryTestContext) {
        let err = TimeEntries::new(&ctx.db).create(999, &TimeEntryInput::new("2024-01-01T10:00:00Z", None, None)).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test_context(EntryTestContext)]
    #[test]
    fn test_list_for_task_is_newest_first(ctx: &mut EntryTestContext) {
        let entries = TimeEntries::new(&ctx.db);
        let early = entries.create(ctx.task_id, &TimeEntryInput::new("2024-01-01T08:00:00Z", None, None)).unwrap();
        let late = entries.create(ctx.task_id, &TimeEntryInput::new("2024-01-02T08:00:00Z", None, None)).unwrap();
        // 07:00 UTC, earlier than `early` despite sorting later as text
        let offset = entries.create(ctx.task_id, &TimeEntryInput::new("2024-01-01T09:00:00+02:00", None, None)).unwrap();

        let ids: Vec<i64> = entries.list_for_task(ctx.task_id).unwrap().into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![late, early, offset]);
    }

    #[test_context(EntryTestContext)]
    #[test]
    fn test_list_filters_by_start_date_and_end(ctx: &mut EntryTestContext) {
        let entries = TimeEntries::new(&ctx.db);
        entries
            .create(ctx.task_id, &TimeEntryInput::new("2024-01-01T08:00:00Z", Some("2024-01-01T09:00:00Z"), None))
            .unwrap();
        let open = entries.create(ctx.task_id, &TimeEntryInput::new("2024-01-02T08:00:00Z", None, None)).unwrap();
        entries.create(ctx.task_id, &TimeEntryInput::new("2024-01-05T08:00:00Z", None, None)).unwrap();

        let filter = TimeEntryFilter {
            task_ids: Some(vec![ctx.task_id]),
            started: Some((
                chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            )),
            has_end: Some(false),
        };
        let found = entries.list(&filter).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, open);

        let nothing = TimeEntryFilter {
            task_ids: Some(Vec::new()),
            ..TimeEntryFilter::default()
        };
        assert!(entries.list(&nothing).unwrap().is_empty());
    }

    #[test_context(EntryTestContext)]
    #[test]
    fn test_update_recomputes_duration(ctx: &mut EntryTestContext) {
        let entries = TimeEntries::new(&ctx.db);
        let id = entries
            .create(ctx.task_id, &TimeEntryInput::new("2024-01-01T10:00:00Z", Some("2024-01-01T11:00:00Z"), Some("first")))
            .unwrap();

        let patch = TimeEntryPatch {
            start_time: Some("2024-01-01T09:15:00Z".to_string()),
            ..TimeEntryPatch::default()
        };
        entries.update(id, &patch).unwrap();
        let entry = entries.get(id).unwrap().unwrap();
        assert_eq!(entry.duration_minutes, Some(105));
        assert_eq!(entry.comment.as_deref(), Some("first"));

        let reopen = TimeEntryPatch {
            end_time: Some(None),
            comment: Some(None),
            ..TimeEntryPatch::default()
        };
        entries.update(id, &reopen).unwrap();
        let entry = entries.get(id).unwrap().unwrap();
        assert!(entry.is_open());
        assert_eq!(entry.duration_minutes, None);
        assert_eq!(entry.comment, None);
    }

    #[test_context(EntryTestContext)]
    #[test]
    fn test_update_rejects_inverted_range_and_keeps_row(ctx: &mut EntryTestContext) {
        let entries = TimeEntries::new(&ctx.db);
        let id = entries
            .create(ctx.task_id, &TimeEntryInput::new("2024-01-01T10:00:00Z", Some("2024-01-01T11:00:00Z"), None))
            .unwrap();

        let patch = TimeEntryPatch {
            end_time: Some(Some("2024-01-01T09:00:00Z".to_string())),
            ..TimeEntryPatch::default()
        };
        assert!(entries.update(id, &patch).unwrap_err().is_validation());

        let entry = entries.get(id).unwrap().unwrap();
        assert_eq!(entry.duration_minutes, Some(60));
        assert!(entries.update(999, &patch).unwrap_err().is_not_found());
    }

    #[test_context(EntryTestContext)]
    #[test]
    fn test_patch_deserializes_explicit_null(ctx: &mut EntryTestContext) {
        let entries = TimeEntries::new(&ctx.db);
        let id = entries
            .create(ctx.task_id, &TimeEntryInput::new("2024-01-01T10:00:00Z", Some("2024-01-01T11:00:00Z"), Some("x")))
            .unwrap();

        let patch: TimeEntryPatch = serde_json::from_str(r#"{"end_time": null}"#).unwrap();
        assert_eq!(patch.end_time, Some(None));
        assert_eq!(patch.comment, None);
        entries.update(id, &patch).unwrap();

        let entry = entries.get(id).unwrap().unwrap();
        assert!(entry.is_open());
        assert_eq!(entry.comment.as_deref(), Some("x"));
    }

    #[test_context(EntryTestContext)]
    #[test]
    fn test_stop_closes_open_entry_once(ctx: &mut EntryTestContext) {
        let entries = TimeEntries::new(&ctx.db);
        let id = entries.create(ctx.task_id, &TimeEntryInput::new("2024-01-01T10:00:00Z", None, None)).unwrap();

        assert_eq!(entries.stop(id, "2024-01-01T12:45:10Z").unwrap(), 165);
        assert_eq!(entries.get(id).unwrap().unwrap().duration_minutes, Some(165));
        assert!(entries.stop(id, "2024-01-01T13:00:00Z").unwrap_err().is_validation());
        assert!(entries.stop(999, "2024-01-01T13:00:00Z").unwrap_err().is_not_found());
    }

    #[test_context(EntryTestContext)]
    #[test]
    fn test_stop_before_start_is_rejected(ctx: &mut EntryTestContext) {
        let entries = TimeEntries::new(&ctx.db);
        let id = entries.create(ctx.task_id, &TimeEntryInput::new("2024-01-01T10:00:00Z", None, None)).unwrap();

        assert!(entries.stop(id, "2024-01-01T09:59:00Z").is_err());
        assert!(entries.get(id).unwrap().unwrap().is_open());
    }

    #[test_context(EntryTestContext)]
    #[test]
    fn test_delete_entry(ctx: &mut EntryTestContext) {
        let entries = TimeEntries::new(&ctx.db);
        let id = entries.create(ctx.task_id, &TimeEntryInput::new("2024-01-01T10:00:00Z", None, None)).unwrap();

        entries.delete(id).unwrap();
        assert!(entries.get(id).unwrap().is_none());
        assert!(entries.delete(id).unwrap_err().is_not_found());
    }

    #[test_context(EntryTestContext)]
    #[test]
    fn test_annotations_lifecycle(ctx: &mut EntryTestContext) {
        let notes = Annotations::new(&ctx.db);
        let first = notes.create(ctx.task_id, &AnnotationInput::new("first")).unwrap();
        let second = notes.create(ctx.task_id, &AnnotationInput::new("second")).unwrap();

        let ids: Vec<i64> = notes.list_for_task(ctx.task_id).unwrap().into_iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![second, first]);

        notes.update(first, &AnnotationInput::new("edited")).unwrap();
        assert_eq!(notes.get(first).unwrap().unwrap().text, "edited");

        notes.delete(second).unwrap();
        assert_eq!(notes.list_for_task(ctx.task_id).unwrap().len(), 1);

        assert!(notes.create(ctx.task_id, &AnnotationInput::new(" ")).unwrap_err().is_validation());
        assert!(notes.create(999, &AnnotationInput::new("x")).unwrap_err().is_not_found());
        assert!(notes.update(999, &AnnotationInput::new("x")).unwrap_err().is_not_found());
        assert!(notes.delete(999).unwrap_err().is_not_found());
    }

    #[test_context(EntryTestContext)]
    #[test]
    fn test_stop_checks_open_state_under_write_lock(ctx: &mut EntryTestContext) {
        let entries = TimeEntries::new(&ctx.db);
        let id = entries
            .create(ctx.task_id, &TimeEntryInput::new("2024-01-01T10:00:00Z", Some("2024-01-01T11:00:00Z"), None))
            .unwrap();

        let writer = Connection::open(ctx.temp_dir.path().join("taskflow.db")).unwrap();
        writer.execute_batch("BEGIN IMMEDIATE").unwrap();
        ctx.db.conn.busy_timeout(Duration::ZERO).unwrap();

        // Fails on the lock before the already-closed check can run
        let err = TimeEntries::new(&ctx.db).stop(id, "2024-01-01T12:00:00Z").unwrap_err();
        assert!(matches!(err, TaskflowError::Storage(_)));

        writer.execute_batch("ROLLBACK").unwrap();
        let err = TimeEntries::new(&ctx.db).stop(id, "2024-01-01T12:00:00Z").unwrap_err();
        assert!(err.is_validation());
        assert_eq!(TimeEntries::new(&ctx.db).get(id).unwrap().unwrap().duration_minutes, Some(60));
    }
}
