#[cfg(test)]
mod tests {
    use chrono::NaiveTime;
    use taskflow::libs::config::{Config, ReportConfig, CONFIG_FILE_NAME};
    use taskflow::libs::data_storage::DataStorage;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ConfigTestContext {
        temp_dir: TempDir,
        storage: DataStorage,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let storage = DataStorage::at(temp_dir.path().join("taskflow"));
            ConfigTestContext { temp_dir, storage }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_missing_file_gives_defaults(ctx: &mut ConfigTestContext) {
        let config = Config::read_from(&ctx.storage).unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.report.cutoff, "20:00");
        assert_eq!(config.report.done_status, "Done");
        assert_eq!(config.report.default_status, "Pending");
        assert!(!config.report.clamp_negative);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_and_read_round_trip(ctx: &mut ConfigTestContext) {
        let config = Config {
            database: Some(ctx.temp_dir.path().join("work.db")),
            report: ReportConfig {
                cutoff: "18:30".to_string(),
                clamp_negative: true,
                done_status: "Closed".to_string(),
                default_status: "Open".to_string(),
            },
        };

        let path = config.save_to(&ctx.storage).unwrap();
        assert!(path.ends_with(CONFIG_FILE_NAME));
        assert_eq!(Config::read_from(&ctx.storage).unwrap(), config);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_partial_file_fills_defaults(ctx: &mut ConfigTestContext) {
        let path = ctx.storage.get_path(CONFIG_FILE_NAME).unwrap();
        std::fs::write(&path, r#"{"report": {"cutoff": "17:00"}}"#).unwrap();

        let config = Config::read_from(&ctx.storage).unwrap();
        assert_eq!(config.database, None);
        assert_eq!(config.report.cutoff, "17:00");
        assert_eq!(config.report.done_status, "Done");
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_malformed_file_is_an_error(ctx: &mut ConfigTestContext) {
        let path = ctx.storage.get_path(CONFIG_FILE_NAME).unwrap();
        std::fs::write(&path, "{ not json").unwrap();
        assert!(Config::read_from(&ctx.storage).is_err());
    }

    #[test]
    fn test_report_options_follow_config() {
        let report = ReportConfig {
            cutoff: "18:30".to_string(),
            clamp_negative: true,
            done_status: "Closed".to_string(),
            ..ReportConfig::default()
        };

        let options = report.report_options().unwrap();
        assert_eq!(options.policy.cutoff, NaiveTime::from_hms_opt(18, 30, 0).unwrap());
        assert!(options.policy.clamp_negative);
        assert_eq!(options.done_status, "Closed");
    }

    #[test]
    fn test_invalid_cutoff_is_rejected() {
        let report = ReportConfig {
            cutoff: "25:99".to_string(),
            ..ReportConfig::default()
        };
        assert!(report.open_interval_policy().is_err());
    }
}
