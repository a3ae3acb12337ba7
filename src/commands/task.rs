//! Task management command: create, list, complete, and delete tasks for
//! a given date.

use crate::db::tasks::Tasks;
use crate::libs::messages::Message;
use crate::libs::task::{Task, TaskFilter};
use crate::libs::view::View;
use crate::{msg_error, msg_info, msg_print, msg_success};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;

#[derive(Debug, Args)]
pub struct TaskArgs {
    /// Task name to create
    name: Option<String>,

    /// Planned focus minutes for the new task
    #[arg(short, long, default_value_t = 25)]
    minutes: i64,

    /// Date the task belongs to (defaults to today)
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// List tasks for the date instead of creating one
    #[arg(short, long)]
    list: bool,

    /// Mark a task as completed by id
    #[arg(short, long, value_name = "ID")]
    complete: Option<i64>,

    /// Delete a task by id
    #[arg(long, value_name = "ID")]
    delete: Option<i64>,
}

pub async fn cmd(task_args: TaskArgs) -> Result<()> {
    let date = task_args.date.unwrap_or_else(|| Local::now().date_naive());
    let mut tasks = Tasks::new()?;

    if let Some(id) = task_args.delete {
        if tasks.delete(id)? {
            msg_success!(Message::TaskDeleted(id));
        } else {
            msg_error!(Message::TaskNotFound(id));
        }
        return Ok(());
    }

    if let Some(id) = task_args.complete {
        match tasks.get(id)? {
            Some(mut task) => {
                task.completed = true;
                tasks.upsert(&task)?;
                msg_success!(Message::TaskCompleted(id));
            }
            None => msg_error!(Message::TaskNotFound(id)),
        }
        return Ok(());
    }

    if task_args.list || task_args.name.is_none() {
        let list = tasks.fetch(TaskFilter::Date(date))?;
        if list.is_empty() {
            msg_info!(Message::NoTasksForDate(date.format("%d.%m.%Y").to_string()));
        } else {
            msg_print!(Message::TasksHeader(date.format("%d.%m.%Y").to_string()));
            View::tasks(&list)?;
        }
        return Ok(());
    }

    let name = task_args.name.unwrap_or_default();
    if tasks.find_by_name(date, &name)?.is_some() {
        msg_error!(Message::TaskDuplicateName(name));
        return Ok(());
    }
    let task = Task::new(date, &name, task_args.minutes);
    tasks.upsert(&task)?;
    msg_success!(Message::TaskCreated(name));

    Ok(())
}
