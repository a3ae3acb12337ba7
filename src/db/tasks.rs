//! Task store.
//!
//! Tasks are per-date: the same name may recur on different days but is
//! unique within one. Focus minutes are credited back into
//! `completed_minutes` as records land.

use super::db::Db;
use crate::libs::task::{Task, TaskFilter};
use anyhow::Result;
use rusqlite::{params, Connection, OptionalExtension};

const SCHEMA_TASKS: &str = "CREATE TABLE IF NOT EXISTS tasks (
    id INTEGER NOT NULL PRIMARY KEY,
    date DATE NOT NULL,
    name TEXT NOT NULL,
    total_minutes INTEGER NOT NULL,
    completed_minutes INTEGER NOT NULL DEFAULT 0,
    completed INTEGER NOT NULL DEFAULT 0,
    UNIQUE(date, name)
);";
const INSERT_TASK: &str = "INSERT INTO tasks (date, name, total_minutes, completed_minutes, completed) VALUES (?, ?, ?, ?, ?)";
const UPDATE_TASK: &str = "UPDATE tasks SET name = ?, total_minutes = ?, completed_minutes = ?, completed = ? WHERE id = ?";
const SELECT_TASKS: &str = "SELECT id, date, name, total_minutes, completed_minutes, completed FROM tasks";
const WHERE_DATE: &str = "WHERE date = ? ORDER BY id";
const WHERE_ID: &str = "WHERE id = ?";
const DELETE_TASK: &str = "DELETE FROM tasks WHERE id = ?";
const ADD_MINUTES: &str = "UPDATE tasks SET completed_minutes = completed_minutes + ? WHERE id = ?";
const EXISTS_NAME: &str = "SELECT id FROM tasks WHERE date = ? AND name = ?";

pub struct Tasks {
    pub conn: Connection,
}

impl Tasks {
    pub fn new() -> Result<Tasks> {
        let db = Db::new()?;
        db.conn.execute(SCHEMA_TASKS, [])?;

        Ok(Tasks { conn: db.conn })
    }

    /// Inserts a new task or updates the one carrying the given id.
    ///
    /// Inserting a second task with the same (date, name) fails; the id of
    /// the clashing task is returned in the error path via `find_by_name`
    /// checks done by callers.
    pub fn upsert(&mut self, task: &Task) -> Result<i64> {
        match task.id {
            Some(id) => {
                self.conn.execute(
                    UPDATE_TASK,
                    params![task.name, task.total_minutes, task.completed_minutes, task.completed as i64, id],
                )?;
                Ok(id)
            }
            None => {
                self.conn.execute(
                    INSERT_TASK,
                    params![task.date, task.name, task.total_minutes, task.completed_minutes, task.completed as i64],
                )?;
                Ok(self.conn.last_insert_rowid())
            }
        }
    }

    /// Id of the task with this name on this date, if any.
    pub fn find_by_name(&mut self, date: chrono::NaiveDate, name: &str) -> Result<Option<i64>> {
        let id = self.conn.query_row(EXISTS_NAME, params![date, name], |row| row.get(0)).optional()?;
        Ok(id)
    }

    pub fn delete(&mut self, id: i64) -> Result<bool> {
        let deleted = self.conn.execute(DELETE_TASK, params![id])?;
        Ok(deleted > 0)
    }

    /// Credits focus minutes against a task.
    pub fn add_completed_minutes(&mut self, id: i64, minutes: i64) -> Result<()> {
        self.conn.execute(ADD_MINUTES, params![minutes, id])?;
        Ok(())
    }

    pub fn fetch(&mut self, filter: TaskFilter) -> Result<Vec<Task>> {
        let (sql, param): (String, rusqlite::types::Value) = match filter {
            TaskFilter::Date(date) => (format!("{} {}", SELECT_TASKS, WHERE_DATE), rusqlite::types::Value::from(date.to_string())),
            TaskFilter::ById(id) => (format!("{} {}", SELECT_TASKS, WHERE_ID), rusqlite::types::Value::from(id)),
        };

        let mut stmt = self.conn.prepare(&sql)?;
        let task_iter = stmt.query_map(params![param], |row| {
            Ok(Task {
                id: row.get(0)?,
                date: row.get(1)?,
                name: row.get(2)?,
                total_minutes: row.get(3)?,
                completed_minutes: row.get(4)?,
                completed: row.get::<_, i64>(5)? != 0,
            })
        })?;
        let mut tasks = Vec::new();
        for task in task_iter {
            tasks.push(task?);
        }
        Ok(tasks)
    }

    pub fn get(&mut self, id: i64) -> Result<Option<Task>> {
        Ok(self.fetch(TaskFilter::ById(id))?.into_iter().next())
    }
}
