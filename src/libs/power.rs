//! Power and session-state observer.
//!
//! Normalizes OS session signals (screen lock/unlock, suspend/resume)
//! into the presence vocabulary and drives the activity monitor
//! lifecycle. The observer itself is a pure handler: it maps a signal to
//! a list of actions and the session loop executes them, which keeps the
//! lock/unlock/suspend/resume rules testable without a desktop session.

use crate::libs::presence::PresenceReason;

/// Settle delay after unlock before the forced idle notification; the
/// desktop needs a moment before presence is trustworthy again.
pub const UNLOCK_SETTLE_SECS: u64 = 2;

/// Settle delay after resume. Longer than unlock: suspend gaps are
/// typically larger and trust in recent activity lower.
pub const RESUME_SETTLE_SECS: u64 = 3;

/// A normalized OS session signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerSignal {
    Locked,
    Unlocked,
    Suspended,
    Resumed,
}

/// What the session loop must do in response to a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerAction {
    /// Force presence to idle right now, bypassing the timeout.
    ForceIdle(PresenceReason),
    /// Stop the activity monitor's sampling.
    StopMonitor,
    /// Restart the activity monitor from a clean slate.
    RestartMonitor,
    /// Emit a forced idle notification after a settle delay. The user is
    /// assumed to have been away for the entire locked or suspended span.
    ForceIdleAfterSettle { delay_secs: u64, reason: PresenceReason },
}

/// Session observer state. Tracks whether the session is locked so the
/// monitor can refuse to start while it is.
#[derive(Debug, Default)]
pub struct PowerObserver {
    locked: bool,
}

impl PowerObserver {
    pub fn new() -> Self {
        PowerObserver { locked: false }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Maps one signal to the actions it requires.
    ///
    /// Unlock skips the forced idle while a break session is open; the
    /// break enforcement already owns the foreground and its expiry timer
    /// must not be disturbed. Resume always forces idle.
    pub fn handle(&mut self, signal: PowerSignal, break_session_open: bool) -> Vec<PowerAction> {
        match signal {
            PowerSignal::Locked => {
                self.locked = true;
                vec![PowerAction::ForceIdle(PresenceReason::ScreenLock), PowerAction::StopMonitor]
            }
            PowerSignal::Unlocked => {
                self.locked = false;
                let mut actions = vec![PowerAction::RestartMonitor];
                if !break_session_open {
                    actions.push(PowerAction::ForceIdleAfterSettle {
                        delay_secs: UNLOCK_SETTLE_SECS,
                        reason: PresenceReason::ScreenUnlock,
                    });
                }
                actions
            }
            PowerSignal::Suspended => {
                self.locked = true;
                vec![PowerAction::ForceIdle(PresenceReason::Suspend), PowerAction::StopMonitor]
            }
            PowerSignal::Resumed => {
                self.locked = false;
                vec![
                    PowerAction::RestartMonitor,
                    PowerAction::ForceIdleAfterSettle {
                        delay_secs: RESUME_SETTLE_SECS,
                        reason: PresenceReason::Resume,
                    },
                ]
            }
        }
    }
}
