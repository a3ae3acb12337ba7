//! Watch command: starts a focus run and the presence/break machinery.
//!
//! By default the watch detaches into a background process; `--foreground`
//! keeps it attached (the detached child re-runs this command with the
//! flag set). `--stop` terminates a running watch.

use crate::libs::daemon;
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Task to focus on (created for today when missing)
    #[arg(short, long)]
    task: Option<String>,

    /// Run attached to the terminal instead of detaching
    #[arg(long, hide = true)]
    foreground: bool,

    /// Stop the running watch
    #[arg(long)]
    stop: bool,
}

pub async fn cmd(watch_args: WatchArgs) -> Result<()> {
    if watch_args.stop {
        return daemon::stop();
    }

    if watch_args.foreground {
        daemon::run_with_signal_handling(watch_args.task).await
    } else {
        daemon::spawn(watch_args.task)
    }
}
