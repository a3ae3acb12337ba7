use chrono::NaiveDate;

#[derive(Debug, Clone)]
pub struct Task {
    pub id: Option<i64>,
    pub date: NaiveDate,
    pub name: String,
    /// Planned minutes for the task.
    pub total_minutes: i64,
    /// Focus minutes recorded against the task so far.
    pub completed_minutes: i64,
    pub completed: bool,
}

impl Task {
    pub fn new(date: NaiveDate, name: &str, total_minutes: i64) -> Self {
        Task {
            id: None,
            date,
            name: name.to_string(),
            total_minutes,
            completed_minutes: 0,
            completed: false,
        }
    }

    pub fn remaining_minutes(&self) -> i64 {
        self.total_minutes - self.completed_minutes
    }
}

#[derive(Debug, Clone)]
pub enum TaskFilter {
    Date(NaiveDate),
    ById(i64),
}
