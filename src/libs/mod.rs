//! Core library modules for the pomo application.
//!
//! The focus pipeline runs leaves-first: the activity monitor and the
//! power observer decide presence, the focus timer turns presence and
//! ticks into records and break triggers, and the break scheduler makes
//! triggered breaks unskippable. The session module wires them together
//! on one event loop.

pub mod breaks;
pub mod config;
pub mod daemon;
pub mod data_storage;
pub mod display;
pub mod error;
pub mod messages;
pub mod monitor;
pub mod notifier;
pub mod power;
pub mod presence;
pub mod record;
pub mod session;
pub mod task;
pub mod timer;
pub mod view;
