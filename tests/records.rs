#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pomo::db;
    use pomo::db::records::Records;
    use pomo::db::tasks::Tasks;
    use pomo::libs::record::FocusRecord;
    use pomo::libs::task::Task;
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct RecordsTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for RecordsTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            RecordsTestContext { _temp_dir: temp_dir }
        }
    }

    fn record(date: NaiveDate, start: &str, end: &str, minutes: i64) -> FocusRecord {
        FocusRecord {
            date,
            task_id: None,
            task_name: "Write report".to_string(),
            start: start.to_string(),
            end: end.to_string(),
            minutes,
        }
    }

    #[test_context(RecordsTestContext)]
    #[test]
    fn test_append_then_day_record_round_trip(_ctx: &mut RecordsTestContext) {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let mut records = Records::new().unwrap();

        let before = records.total_minutes(date).unwrap();
        let r = record(date, "09:00", "09:25", 25);
        records.append(&r).unwrap();

        let day = db::day_record(date).unwrap();
        assert!(day.history.contains(&r));
        assert_eq!(day.total_focus_minutes, before + 25);

        // Appending once increases the total exactly once.
        records.append(&record(date, "10:00", "10:15", 15)).unwrap();
        assert_eq!(records.total_minutes(date).unwrap(), before + 40);
    }

    #[test_context(RecordsTestContext)]
    #[test]
    fn test_fetch_date_is_ordered_and_scoped(_ctx: &mut RecordsTestContext) {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let other = NaiveDate::from_ymd_opt(2026, 3, 3).unwrap();
        let mut records = Records::new().unwrap();

        records.append(&record(date, "14:00", "14:25", 25)).unwrap();
        records.append(&record(date, "09:00", "09:25", 25)).unwrap();
        records.append(&record(other, "09:00", "09:25", 25)).unwrap();

        let day = records.fetch_date(date).unwrap();
        assert_eq!(day.len(), 2);
        assert_eq!(day[0].start, "09:00");
        assert_eq!(day[1].start, "14:00");
    }

    #[test_context(RecordsTestContext)]
    #[test]
    fn test_empty_day_total_is_zero(_ctx: &mut RecordsTestContext) {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let mut records = Records::new().unwrap();
        assert_eq!(records.total_minutes(date).unwrap(), 0);
        assert!(records.fetch_date(date).unwrap().is_empty());
    }

    #[test_context(RecordsTestContext)]
    #[test]
    fn test_month_queries(_ctx: &mut RecordsTestContext) {
        let mut records = Records::new().unwrap();
        let first = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let second = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        let outside = NaiveDate::from_ymd_opt(2026, 4, 1).unwrap();

        records.append(&record(first, "09:00", "09:25", 25)).unwrap();
        records.append(&record(first, "10:00", "10:25", 25)).unwrap();
        records.append(&record(second, "09:00", "09:10", 10)).unwrap();
        records.append(&record(outside, "09:00", "09:25", 25)).unwrap();

        assert_eq!(records.dates_with_records(2026, 3).unwrap(), vec![first, second]);
        assert_eq!(records.month_totals(2026, 3).unwrap(), vec![(first, 50), (second, 10)]);
    }

    #[test_context(RecordsTestContext)]
    #[test]
    fn test_day_record_includes_tasks(_ctx: &mut RecordsTestContext) {
        let date = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let mut tasks = Tasks::new().unwrap();
        let id = tasks.upsert(&Task::new(date, "Write report", 50)).unwrap();

        let mut records = Records::new().unwrap();
        let mut r = record(date, "09:00", "09:25", 25);
        r.task_id = Some(id);
        records.append(&r).unwrap();
        tasks.add_completed_minutes(id, r.minutes).unwrap();

        let day = db::day_record(date).unwrap();
        assert_eq!(day.tasks.len(), 1);
        assert_eq!(day.tasks[0].completed_minutes, 25);
        assert_eq!(day.history.len(), 1);
    }
}
