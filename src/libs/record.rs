//! Focus interval and record value objects.

use chrono::{NaiveDate, NaiveDateTime};

/// One uninterrupted span of counted work time, mutated once per tick
/// while the timer is focusing.
#[derive(Debug, Clone)]
pub struct FocusInterval {
    /// The timestamp when the focus run started.
    pub start: NaiveDateTime,
    /// Configured run length in seconds.
    pub configured_secs: u64,
    /// Seconds counted so far.
    pub elapsed_secs: u64,
    /// Cadence of short breaks in seconds.
    pub short_break_interval_secs: u64,
    /// Elapsed seconds at the moment the last short break was triggered.
    pub last_short_break_elapsed_secs: u64,
}

impl FocusInterval {
    pub fn new(start: NaiveDateTime, configured_secs: u64, short_break_interval_secs: u64) -> Self {
        Self {
            start,
            configured_secs,
            elapsed_secs: 0,
            short_break_interval_secs,
            last_short_break_elapsed_secs: 0,
        }
    }

    pub fn remaining_secs(&self) -> u64 {
        self.configured_secs.saturating_sub(self.elapsed_secs)
    }
}

/// A persisted focus fact. Immutable once created; attributed to the
/// calendar date of its end timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusRecord {
    pub date: NaiveDate,
    pub task_id: Option<i64>,
    pub task_name: String,
    /// Wall clock of the run start, "HH:MM".
    pub start: String,
    /// Wall clock of the run end, "HH:MM".
    pub end: String,
    pub minutes: i64,
}

impl FocusRecord {
    /// Builds a record from an interval and its end timestamp. The date is
    /// captured explicitly from the end timestamp rather than inferred from
    /// clock wrap-around.
    pub fn from_interval(interval: &FocusInterval, task_id: Option<i64>, task_name: &str, end: NaiveDateTime) -> Self {
        let minutes = end.signed_duration_since(interval.start).num_minutes();
        Self {
            date: end.date(),
            task_id,
            task_name: task_name.to_string(),
            start: interval.start.format("%H:%M").to_string(),
            end: end.format("%H:%M").to_string(),
            minutes,
        }
    }
}

/// The tray/status payload emitted once per tick while focusing.
#[derive(Debug, Clone, PartialEq)]
pub struct StatusUpdate {
    pub remaining_minutes: u64,
    pub task_name: String,
    /// `None` renders as the "—" sentinel: the next short break would land
    /// past the end of the run.
    pub minutes_until_short_break: Option<u64>,
}
