#[cfg(test)]
mod tests {
    use pomo::libs::config::{BreakConfig, Config, MonitorConfig, TimerConfig, CONFIG_FILE_NAME};
    use pomo::libs::data_storage::DataStorage;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct ConfigTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for ConfigTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            ConfigTestContext { _temp_dir: temp_dir }
        }
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_missing_file_yields_defaults(_ctx: &mut ConfigTestContext) {
        let config = Config::read().unwrap();
        assert!(config.timer.is_none());

        let timer = config.timer_config();
        assert_eq!(timer.focus_duration, 25);
        assert_eq!(timer.short_break_interval, 15);
        assert_eq!(timer.short_break_duration, 30);
        assert_eq!(timer.long_break_duration, 5);

        let monitor = config.monitor_config();
        assert!(monitor.enabled);
        assert_eq!(monitor.poll_interval, 10);
        assert_eq!(monitor.pointer_threshold, 3);
        assert_eq!(monitor.idle_warn, 240);
        assert_eq!(monitor.idle_threshold, 300);
        assert_eq!(monitor.warn_cooldown, 20);

        assert!(!config.breaks_config().full_screen);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_save_read_round_trip(_ctx: &mut ConfigTestContext) {
        let config = Config {
            timer: Some(TimerConfig {
                focus_duration: 50,
                short_break_interval: 20,
                short_break_duration: 60,
                long_break_duration: 10,
            }),
            monitor: Some(MonitorConfig {
                enabled: false,
                ..MonitorConfig::default()
            }),
            breaks: Some(BreakConfig { full_screen: true }),
        };
        config.save().unwrap();

        let loaded = Config::read().unwrap();
        assert_eq!(loaded.timer_config().focus_duration, 50);
        assert!(!loaded.monitor_config().enabled);
        assert!(loaded.breaks_config().full_screen);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_malformed_file_falls_back_to_defaults(_ctx: &mut ConfigTestContext) {
        let path = DataStorage::new().get_path(CONFIG_FILE_NAME).unwrap();
        std::fs::write(&path, "{not json at all").unwrap();

        // A corrupted settings file never fails the read.
        let config = Config::read().unwrap();
        assert_eq!(config.timer_config().focus_duration, 25);
    }

    #[test_context(ConfigTestContext)]
    #[test]
    fn test_unconfigured_sections_stay_out_of_the_file(_ctx: &mut ConfigTestContext) {
        let config = Config {
            timer: Some(TimerConfig::default()),
            monitor: None,
            breaks: None,
        };
        config.save().unwrap();

        let path = DataStorage::new().get_path(CONFIG_FILE_NAME).unwrap();
        let raw = std::fs::read_to_string(path).unwrap();
        assert!(raw.contains("timer"));
        assert!(!raw.contains("monitor"));
        assert!(!raw.contains("breaks"));
    }
}
