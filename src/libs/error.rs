//! Error taxonomy for the focus-timer subsystem.
//!
//! None of these errors may terminate the daemon. The worst acceptable
//! outcome is a missed or truncated record, never a stuck break overlay
//! or a frozen timer.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FocusError {
    /// A pointer or keyboard query failed inside a sampling tick.
    /// Logged; sampling continues.
    #[error("input sensor failure: {0}")]
    TransientSensor(String),

    /// A write to the daily-record store failed. The in-memory record is
    /// retried once, then dropped with a logged warning.
    #[error("persistence failure: {0}")]
    Persistence(#[from] rusqlite::Error),

    /// A display failed to produce an overlay. The break proceeds on the
    /// remaining displays.
    #[error("overlay creation failed on display {display}: {reason}")]
    OverlayCreation { display: u32, reason: String },

    /// A malformed settings value. Callers fall back to the last-known-good
    /// value instead of crashing.
    #[error("invalid configuration value for {field}: {value}")]
    Configuration { field: &'static str, value: String },
}
