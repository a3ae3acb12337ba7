pub mod db;
pub mod records;
pub mod tasks;

use crate::libs::record::FocusRecord;
use crate::libs::task::{Task, TaskFilter};
use anyhow::Result;
use chrono::NaiveDate;

/// Everything persisted about one calendar date.
pub struct DayRecord {
    pub tasks: Vec<Task>,
    pub total_focus_minutes: i64,
    pub history: Vec<FocusRecord>,
}

/// Assembles the day view from both stores.
pub fn day_record(date: NaiveDate) -> Result<DayRecord> {
    let mut tasks = tasks::Tasks::new()?;
    let mut records = records::Records::new()?;
    Ok(DayRecord {
        tasks: tasks.fetch(TaskFilter::Date(date))?,
        total_focus_minutes: records.total_minutes(date)?,
        history: records.fetch_date(date)?,
    })
}
