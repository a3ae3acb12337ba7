//! Process-wide presence state.
//!
//! `PresenceCell` is the single authoritative value for whether a human is
//! operating the machine. Only the activity monitor and the session
//! observer may write it; every other component reads it.

use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceState {
    Active,
    Idle,
}

impl fmt::Display for PresenceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresenceState::Active => write!(f, "active"),
            PresenceState::Idle => write!(f, "idle"),
        }
    }
}

/// The context tag attached to a presence transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenceReason {
    Keyboard,
    Pointer,
    Timeout,
    ScreenLock,
    ScreenUnlock,
    Suspend,
    Resume,
}

impl fmt::Display for PresenceReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresenceReason::Keyboard => write!(f, "keyboard"),
            PresenceReason::Pointer => write!(f, "pointer"),
            PresenceReason::Timeout => write!(f, "timeout"),
            PresenceReason::ScreenLock => write!(f, "screen-lock"),
            PresenceReason::ScreenUnlock => write!(f, "screen-unlock"),
            PresenceReason::Suspend => write!(f, "suspend"),
            PresenceReason::Resume => write!(f, "resume"),
        }
    }
}

/// A presence transition delivered to the focus timer.
#[derive(Debug, Clone, Copy)]
pub struct PresenceEvent {
    pub state: PresenceState,
    pub reason: PresenceReason,
}

/// Shared cell holding the authoritative `PresenceState`.
///
/// Mutation is crate-private so only the monitor and the session observer
/// can flip it; all other components treat the cell as read-only.
#[derive(Clone)]
pub struct PresenceCell {
    inner: Arc<Mutex<PresenceState>>,
}

impl PresenceCell {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(PresenceState::Active)),
        }
    }

    pub fn get(&self) -> PresenceState {
        *self.inner.lock()
    }

    pub(crate) fn set(&self, state: PresenceState) {
        *self.inner.lock() = state;
    }
}

impl Default for PresenceCell {
    fn default() -> Self {
        Self::new()
    }
}
