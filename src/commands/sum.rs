//! Sum command: per-date focus totals for one month.

use crate::db::records::Records;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::{msg_info, msg_print};
use anyhow::Result;
use chrono::{Datelike, Local};
use clap::Args;

#[derive(Debug, Args)]
pub struct SumArgs {
    /// Year of the month to summarize (defaults to the current year)
    #[arg(short, long)]
    year: Option<i32>,

    /// Month to summarize, 1-12 (defaults to the current month)
    #[arg(short, long)]
    month: Option<u32>,
}

pub async fn cmd(sum_args: SumArgs) -> Result<()> {
    let now = Local::now();
    let year = sum_args.year.unwrap_or_else(|| now.year());
    let month = sum_args.month.unwrap_or_else(|| now.month());

    let totals = Records::new()?.month_totals(year, month)?;
    if totals.is_empty() {
        msg_info!(Message::NoRecordsForDate(format!("{:02}.{}", month, year)));
        return Ok(());
    }

    msg_print!(Message::MonthlySummaryTitle(format!("{:02}.{}", month, year)), true);
    View::month(&totals)?;

    Ok(())
}
