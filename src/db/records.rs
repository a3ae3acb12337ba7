//! Focus record store.
//!
//! Append-mostly daily history of completed and cut-short focus runs.
//! Records are written once and never mutated; totals and month summaries
//! are derived queries.

use super::db::Db;
use crate::libs::record::FocusRecord;
use anyhow::Result;
use chrono::NaiveDate;
use rusqlite::{params, Connection};

const SCHEMA_RECORDS: &str = "CREATE TABLE IF NOT EXISTS focus_records (
    id INTEGER NOT NULL PRIMARY KEY,
    date DATE NOT NULL,
    task_id INTEGER,
    task_name TEXT NOT NULL,
    start TEXT NOT NULL,
    end TEXT NOT NULL,
    duration INTEGER NOT NULL
);";
const INSERT_RECORD: &str = "INSERT INTO focus_records (date, task_id, task_name, start, end, duration) VALUES (?, ?, ?, ?, ?, ?)";
const SELECT_DATE: &str = "SELECT date, task_id, task_name, start, end, duration FROM focus_records WHERE date = ? ORDER BY start";
const SUM_DATE: &str = "SELECT SUM(duration) FROM focus_records WHERE date = ?";
const SELECT_MONTH_DATES: &str = "SELECT DISTINCT date FROM focus_records WHERE strftime('%Y', date) = ? AND strftime('%m', date) = ? ORDER BY date";
const SUM_MONTH_BY_DATE: &str = "SELECT date, SUM(duration) FROM focus_records WHERE strftime('%Y', date) = ? AND strftime('%m', date) = ? GROUP BY date ORDER BY date";

pub struct Records {
    pub conn: Connection,
}

impl Records {
    pub fn new() -> Result<Records> {
        let db = Db::new()?;
        db.conn.execute(SCHEMA_RECORDS, [])?;

        Ok(Records { conn: db.conn })
    }

    /// Appends one focus record.
    pub fn append(&mut self, record: &FocusRecord) -> Result<()> {
        self.conn.execute(
            INSERT_RECORD,
            params![record.date, record.task_id, record.task_name, record.start, record.end, record.minutes],
        )?;
        Ok(())
    }

    /// All records for one calendar date, in start order.
    pub fn fetch_date(&mut self, date: NaiveDate) -> Result<Vec<FocusRecord>> {
        let mut stmt = self.conn.prepare(SELECT_DATE)?;
        let record_iter = stmt.query_map(params![date], |row| {
            Ok(FocusRecord {
                date: row.get(0)?,
                task_id: row.get(1)?,
                task_name: row.get(2)?,
                start: row.get(3)?,
                end: row.get(4)?,
                minutes: row.get(5)?,
            })
        })?;
        let mut records = Vec::new();
        for record in record_iter {
            records.push(record?);
        }
        Ok(records)
    }

    /// Total focus minutes recorded on one date.
    pub fn total_minutes(&mut self, date: NaiveDate) -> Result<i64> {
        // SUM over an empty day yields one row holding NULL.
        let total: Option<i64> = self.conn.query_row(SUM_DATE, params![date], |row| row.get(0))?;
        Ok(total.unwrap_or(0))
    }

    /// Dates in the given month that have at least one record.
    pub fn dates_with_records(&mut self, year: i32, month: u32) -> Result<Vec<NaiveDate>> {
        let mut stmt = self.conn.prepare(SELECT_MONTH_DATES)?;
        let date_iter = stmt.query_map(params![format!("{:04}", year), format!("{:02}", month)], |row| row.get(0))?;
        let mut dates = Vec::new();
        for date in date_iter {
            dates.push(date?);
        }
        Ok(dates)
    }

    /// Per-date focus totals for one month.
    pub fn month_totals(&mut self, year: i32, month: u32) -> Result<Vec<(NaiveDate, i64)>> {
        let mut stmt = self.conn.prepare(SUM_MONTH_BY_DATE)?;
        let row_iter = stmt.query_map(params![format!("{:04}", year), format!("{:02}", month)], |row| Ok((row.get(0)?, row.get(1)?)))?;
        let mut totals = Vec::new();
        for row in row_iter {
            totals.push(row?);
        }
        Ok(totals)
    }
}
