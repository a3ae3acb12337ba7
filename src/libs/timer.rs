//! Focus/break timer state machine.
//!
//! A single-timeline state machine that counts a focus interval, decides
//! when a short break is due, and produces completed-interval records. It
//! is deliberately pure: every method takes the current timestamp as a
//! parameter and no method sleeps, spawns, or touches the database. The
//! session loop owns the tick cadence and the persistence of emitted
//! records.

use crate::libs::config::TimerConfig;
use crate::libs::presence::{PresenceEvent, PresenceState};
use crate::libs::record::{FocusInterval, FocusRecord, StatusUpdate};
use crate::libs::task::Task;
use chrono::NaiveDateTime;
use std::fmt;

/// Records shorter than this are noise and get discarded.
pub const MIN_RECORD_MINUTES: i64 = 5;

/// A short record is still kept when the owning task needs no more than
/// this many minutes, so a task can be topped off.
pub const TOP_OFF_THRESHOLD_MINUTES: i64 = 4;

/// The kind of mandatory pause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakKind {
    Short,
    Long,
}

impl fmt::Display for BreakKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BreakKind::Short => write!(f, "Short"),
            BreakKind::Long => write!(f, "Long"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerState {
    Stopped,
    Focusing,
    /// A short break was signalled but the scheduler has not yet confirmed
    /// its overlays. The countdown is already paused.
    ShortBreakPending,
    ShortBreak,
    LongBreak,
}

impl fmt::Display for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerState::Stopped => write!(f, "stopped"),
            TimerState::Focusing => write!(f, "focusing"),
            TimerState::ShortBreakPending => write!(f, "short-break-pending"),
            TimerState::ShortBreak => write!(f, "short-break"),
            TimerState::LongBreak => write!(f, "long-break"),
        }
    }
}

/// Everything the timer can tell the outside world.
#[derive(Debug, Clone, PartialEq)]
pub enum TimerEvent {
    /// Per-tick tray/status payload.
    Status(StatusUpdate),
    /// A short break is due; the scheduler should open overlays.
    ShortBreakDue { duration_secs: u64 },
    /// The focus run reached its configured length.
    Completed(FocusRecord),
    /// The long break that follows a completed run.
    LongBreakDue { duration_secs: u64 },
    /// Presence went idle; the open interval was rolled back. `None` when
    /// nothing worth keeping survived the backdate.
    RolledBack(Option<FocusRecord>),
    /// Explicit user stop. Same record policy as rollback.
    Stopped(Option<FocusRecord>),
}

/// The focus/break state machine.
///
/// Exactly one `FocusInterval` may be open at a time and starting a new
/// one is only legal from `Stopped`. Configuration updates are applied
/// only while stopped so a running interval keeps the durations it
/// started with.
pub struct FocusTimer {
    config: TimerConfig,
    /// Seconds subtracted from "now" when an idle rollback closes the
    /// interval: the user actually stopped acting this long before idle
    /// was detected.
    idle_backdate_secs: u64,
    state: TimerState,
    interval: Option<FocusInterval>,
    task: Option<Task>,
    paused: bool,
}

impl FocusTimer {
    pub fn new(config: TimerConfig, idle_backdate_secs: u64) -> Self {
        FocusTimer {
            config,
            idle_backdate_secs,
            state: TimerState::Stopped,
            interval: None,
            task: None,
            paused: false,
        }
    }

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn task(&self) -> Option<&Task> {
        self.task.as_ref()
    }

    /// Begins a focus run. Returns false if the timer is not stopped.
    pub fn start(&mut self, task: Task, now: NaiveDateTime) -> bool {
        if self.state != TimerState::Stopped {
            return false;
        }
        self.interval = Some(FocusInterval::new(
            now,
            self.config.focus_duration * 60,
            self.config.short_break_interval * 60,
        ));
        self.task = Some(task);
        self.paused = false;
        self.state = TimerState::Focusing;
        true
    }

    /// Freezes the countdown without closing the interval.
    pub fn pause(&mut self) {
        if self.state == TimerState::Focusing {
            self.paused = true;
        }
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Explicit user stop. Closes the interval at `now` and applies the
    /// degenerate-duration policy.
    pub fn stop(&mut self, now: NaiveDateTime) -> TimerEvent {
        let record = self.close_interval(now);
        self.state = TimerState::Stopped;
        TimerEvent::Stopped(record)
    }

    /// Applies new durations. Ignored unless the timer is stopped.
    pub fn update_config(&mut self, config: TimerConfig) {
        if self.state == TimerState::Stopped {
            self.config = config;
        }
    }

    /// Advances the countdown by one second.
    ///
    /// Emits, in order: a completion (with the long break that follows it),
    /// or a short-break trigger, and finally the per-tick status payload
    /// while an interval remains open.
    pub fn tick(&mut self, now: NaiveDateTime) -> Vec<TimerEvent> {
        let mut events = Vec::new();
        if self.state != TimerState::Focusing || self.paused {
            return events;
        }
        let Some(interval) = self.interval.as_mut() else {
            return events;
        };

        interval.elapsed_secs += 1;

        if interval.elapsed_secs >= interval.configured_secs {
            let task_id = self.task.as_ref().and_then(|t| t.id);
            let task_name = self.task.as_ref().map(|t| t.name.clone()).unwrap_or_default();
            let record = FocusRecord::from_interval(interval, task_id, &task_name, now);
            self.interval = None;
            self.state = TimerState::LongBreak;
            events.push(TimerEvent::Completed(record));
            events.push(TimerEvent::LongBreakDue {
                duration_secs: self.config.long_break_duration * 60,
            });
            return events;
        }

        // A short break never fires when the run is nearly over; the run
        // just finishes instead.
        let since_last_break = interval.elapsed_secs - interval.last_short_break_elapsed_secs;
        let min_remaining = interval.short_break_interval_secs * 6 / 10;
        if since_last_break >= interval.short_break_interval_secs && interval.remaining_secs() >= min_remaining {
            interval.last_short_break_elapsed_secs = interval.elapsed_secs;
            self.state = TimerState::ShortBreakPending;
            events.push(TimerEvent::ShortBreakDue {
                duration_secs: self.config.short_break_duration,
            });
        }

        events.push(TimerEvent::Status(self.status_update()));
        events
    }

    /// Reacts to a presence transition.
    ///
    /// Idle rolls back the open interval with a backdated end and forces
    /// the timer to stopped, whatever state it was in. Active never
    /// auto-resumes; restarting focus is always an explicit command.
    pub fn handle_presence(&mut self, event: PresenceEvent, now: NaiveDateTime) -> Option<TimerEvent> {
        match event.state {
            PresenceState::Idle => {
                if self.state == TimerState::Stopped {
                    return None;
                }
                let end = now - chrono::Duration::seconds(self.idle_backdate_secs as i64);
                let record = self.close_interval(end);
                self.state = TimerState::Stopped;
                Some(TimerEvent::RolledBack(record))
            }
            PresenceState::Active => None,
        }
    }

    /// Scheduler confirmation that overlays are up.
    pub fn break_started(&mut self, kind: BreakKind) {
        match kind {
            BreakKind::Short => {
                if self.state == TimerState::ShortBreakPending {
                    self.state = TimerState::ShortBreak;
                }
            }
            BreakKind::Long => {
                self.state = TimerState::LongBreak;
            }
        }
    }

    /// Scheduler notification that the break expired.
    ///
    /// A short break resumes the paused countdown; the long break after a
    /// completed run settles back to stopped.
    pub fn break_ended(&mut self, kind: BreakKind) {
        match (kind, self.state) {
            (BreakKind::Short, TimerState::ShortBreak) | (BreakKind::Short, TimerState::ShortBreakPending) => {
                self.state = TimerState::Focusing;
            }
            (BreakKind::Long, TimerState::LongBreak) => {
                self.state = TimerState::Stopped;
            }
            _ => {}
        }
    }

    /// The tray/status payload for the current tick.
    pub fn status_update(&self) -> StatusUpdate {
        let task_name = self.task.as_ref().map(|t| t.name.clone()).unwrap_or_default();
        let Some(interval) = self.interval.as_ref() else {
            return StatusUpdate {
                remaining_minutes: 0,
                task_name,
                minutes_until_short_break: None,
            };
        };
        let remaining_minutes = interval.remaining_secs() / 60;
        let interval_minutes = interval.short_break_interval_secs / 60;
        let minutes_until_short_break = if interval_minutes == 0 {
            None
        } else {
            let elapsed_minutes = interval.elapsed_secs / 60;
            let until = interval_minutes - (elapsed_minutes % interval_minutes);
            // Past the end of the run the slot renders as the dash
            // sentinel instead of a time that will never arrive.
            if until > remaining_minutes {
                None
            } else {
                Some(until)
            }
        };
        StatusUpdate {
            remaining_minutes,
            task_name,
            minutes_until_short_break,
        }
    }

    /// Converts the open interval into a record ending at `end`.
    ///
    /// Returns `None` when no interval was open, when the backdated end
    /// precedes the start, or when the degenerate-duration policy rejects
    /// the record.
    fn close_interval(&mut self, end: NaiveDateTime) -> Option<FocusRecord> {
        let interval = self.interval.take()?;
        self.paused = false;
        if end <= interval.start {
            return None;
        }
        let task_id = self.task.as_ref().and_then(|t| t.id);
        let task_name = self.task.as_ref().map(|t| t.name.clone()).unwrap_or_default();
        let record = FocusRecord::from_interval(&interval, task_id, &task_name, end);
        if record.minutes < MIN_RECORD_MINUTES {
            let topping_off = self
                .task
                .as_ref()
                .map(|t| t.remaining_minutes() <= TOP_OFF_THRESHOLD_MINUTES)
                .unwrap_or(false);
            if !topping_off {
                return None;
            }
        }
        Some(record)
    }
}
