//! History command: the focus records and task list for one date.

use crate::db;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_info, msg_print};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;

#[derive(Debug, Args)]
pub struct HistoryArgs {
    /// Date to show (defaults to today)
    #[arg(short, long)]
    date: Option<NaiveDate>,
}

pub async fn cmd(history_args: HistoryArgs) -> Result<()> {
    let date = history_args.date.unwrap_or_else(|| Local::now().date_naive());
    let day = db::day_record(date)?;

    if day.history.is_empty() && day.tasks.is_empty() {
        msg_info!(Message::NoRecordsForDate(date.format("%d.%m.%Y").to_string()));
        return Ok(());
    }

    msg_print!(Message::HistoryTitle(date.format("%d.%m.%Y").to_string()), true);
    if !day.tasks.is_empty() {
        View::tasks(&day.tasks)?;
    }
    if !day.history.is_empty() {
        View::history(&day.history, day.total_focus_minutes)?;
    }

    Ok(())
}
