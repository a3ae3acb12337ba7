use super::record::FocusRecord;
use super::task::Task;
use anyhow::Result;
use chrono::NaiveDate;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn tasks(tasks: &[Task]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "NAME", "PLANNED", "DONE", "COMPLETED"]);
        for task in tasks {
            table.add_row(row![
                task.id.unwrap_or(0),
                task.name,
                format!("{} min", task.total_minutes),
                format!("{} min", task.completed_minutes),
                if task.completed { "yes" } else { "no" }
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn history(records: &[FocusRecord], total_minutes: i64) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["START", "END", "TASK", "MINUTES"]);
        for record in records {
            table.add_row(row![record.start, record.end, record.task_name, record.minutes]);
        }
        table.add_row(row!["", "", "TOTAL", total_minutes]);
        table.printstd();

        Ok(())
    }

    pub fn month(totals: &[(NaiveDate, i64)]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["DATE", "FOCUS MINUTES"]);
        let mut sum = 0;
        for (date, minutes) in totals {
            table.add_row(row![date.format("%d.%m.%Y"), minutes]);
            sum += minutes;
        }
        table.add_row(row!["TOTAL", sum]);
        table.printstd();

        Ok(())
    }
}
