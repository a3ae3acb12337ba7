pub mod history;
pub mod init;
pub mod sum;
pub mod task;
pub mod watch;

use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Manage tasks")]
    Task(task::TaskArgs),
    #[command(about = "Start a focus run and watch user presence")]
    Watch(watch::WatchArgs),
    #[command(about = "Display focus history for a date")]
    History(history::HistoryArgs),
    #[command(about = "Get monthly focus summary")]
    Sum(sum::SumArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> anyhow::Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Task(args) => task::cmd(args).await,
            Commands::Watch(args) => watch::cmd(args).await,
            Commands::History(args) => history::cmd(args).await,
            Commands::Sum(args) => sum::cmd(args).await,
        }
    }
}
