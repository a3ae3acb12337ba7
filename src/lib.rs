//! # Pomo - Focus Timer with Presence Detection
//!
//! A command-line pomodoro daemon that runs named tasks against a
//! focus/short-break/long-break cycle, detects when the user has stopped
//! interacting with the machine, and guarantees that scheduled breaks are
//! actually taken across screen lock and suspend transitions.
//!
//! ## Features
//!
//! - **Focus Timer**: Countdown state machine with short-break cadence and
//!   idle-triggered rollback
//! - **Activity Monitoring**: Keyboard and pointer presence detection
//! - **Break Enforcement**: Per-display blocking overlays with a settle
//!   margin and forced teardown
//! - **Task Management**: Per-date tasks credited with recorded focus
//!   minutes
//! - **History**: Daily focus records and monthly summaries
//!
//! ## Usage
//!
//! ```rust,no_run
//! use pomo::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
