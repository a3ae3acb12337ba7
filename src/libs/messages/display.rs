//! Display implementation for pomo application messages.
//!
//! Converts structured `Message` data into the human-readable text used by
//! the `msg_*` macros. All user-facing wording is defined here so it stays
//! consistent across commands, the daemon, and tests.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // === TASK MESSAGES ===
            Message::TaskCreated(name) => format!("Task '{}' created", name),
            Message::TaskDeleted(id) => format!("Task {} deleted", id),
            Message::TaskCompleted(id) => format!("Task {} marked as completed", id),
            Message::TaskNotFound(id) => format!("Task {} not found", id),
            Message::TaskDuplicateName(name) => format!("A task named '{}' already exists for today", name),
            Message::TasksHeader(date) => format!("📋 Tasks for {}", date),
            Message::NoTasksForDate(date) => format!("No tasks recorded for {}", date),

            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigParseFallback(e) => format!("Configuration file is malformed ({}), falling back to defaults", e),
            Message::ConfigModuleTimer => "Timer configuration".to_string(),
            Message::ConfigModuleMonitor => "Activity monitor configuration".to_string(),
            Message::ConfigModuleBreaks => "Break enforcement configuration".to_string(),
            Message::PromptSelectModules => "Select modules to configure".to_string(),
            Message::PromptFocusDuration => "Focus duration (minutes)".to_string(),
            Message::PromptShortBreakInterval => "Short break interval (minutes)".to_string(),
            Message::PromptShortBreakDuration => "Short break duration (seconds)".to_string(),
            Message::PromptLongBreakDuration => "Long break duration (minutes)".to_string(),
            Message::PromptMonitoringEnabled => "Enable activity monitoring".to_string(),
            Message::PromptPollInterval => "Pointer sample interval (seconds)".to_string(),
            Message::PromptIdleThreshold => "Idle threshold (seconds)".to_string(),
            Message::PromptFullScreenBreaks => "Use full-screen break overlays".to_string(),

            // === FOCUS RECORD MESSAGES ===
            Message::HistoryTitle(date) => format!("🍅 Focus history for {}", date),
            Message::NoRecordsForDate(date) => format!("No focus records for {}", date),
            Message::RecordSaved(task, minutes) => format!("Recorded {} focus minutes for '{}'", minutes, task),
            Message::RecordDiscardedShort => "Discarded focus record below the minimum duration".to_string(),
            Message::RecordPersistRetry(e) => format!("Failed to persist focus record ({}), retrying once", e),
            Message::RecordPersistFailed(e) => format!("Dropping focus record after retry failed: {}", e),
            Message::MonthlySummaryTitle(month) => format!("📅 Focus minutes for {}", month),

            // === MONITOR MESSAGES ===
            Message::MonitorStarted { poll_interval, idle_threshold } => {
                format!("Activity monitor started (sample every {}s, idle after {}s)", poll_interval, idle_threshold)
            }
            Message::MonitorStopped => "Activity monitor stopped".to_string(),
            Message::MonitorDisabled => "Activity monitoring is disabled in configuration".to_string(),
            Message::MonitorBlockedWhileLocked => "Activity monitor not started: session is locked".to_string(),
            Message::MonitorTickFailed(e) => format!("Sampling tick failed ({}), monitoring continues", e),
            Message::MonitorListenerFailed(e) => format!("Input listener failed: {}. Retrying in 1 second...", e),
            Message::PresenceChanged(state, reason) => format!("Presence changed to {} ({})", state, reason),
            Message::IdleImminent(secs) => format!("No activity for {} seconds, going idle soon", secs),

            // === POWER / SESSION MESSAGES ===
            Message::SessionLocked => "Screen locked, presence forced to idle".to_string(),
            Message::SessionUnlocked => "Screen unlocked, restarting activity monitor".to_string(),
            Message::SystemSuspended => "System suspended, presence forced to idle".to_string(),
            Message::SystemResumed => "System resumed, restarting activity monitor".to_string(),

            // === BREAK MESSAGES ===
            Message::BreakTriggered(kind, secs) => format!("{} break started for {} seconds", kind, secs),
            Message::BreakRejectedOverlap => "Break trigger ignored: a break session is already open".to_string(),
            Message::BreakOverlayFailed(e) => format!("Overlay creation failed ({}), break proceeds on remaining displays", e),
            Message::BreakOverlayForceDestroyed(display) => format!("Overlay on display {} refused to close, force-destroyed", display),
            Message::BreakEnded(kind) => format!("{} break ended", kind),
            Message::BreakSessionShutdown => "Break session torn down on shutdown".to_string(),

            // === TIMER MESSAGES ===
            Message::FocusStarted(task) => format!("Focus started on '{}'", task),
            Message::FocusCompleted(task, minutes) => format!("Focus interval on '{}' completed ({} minutes)", task, minutes),
            Message::FocusRolledBack(task) => format!("Focus on '{}' rolled back after idle", task),

            // === WATCHER / DAEMON MESSAGES ===
            Message::WatcherStarted(pid) => format!("Watcher started with PID: {}", pid),
            Message::WatcherStopped(pid) => format!("Watcher with PID {} stopped", pid),
            Message::WatcherNotRunning => "Watcher is not running".to_string(),
            Message::WatcherNotRunningPidNotFound => "Watcher is not running (PID file not found)".to_string(),
            Message::WatcherStoppingExisting(pid) => format!("Stopping existing watcher (PID: {})", pid),
            Message::WatcherFailedToStopExisting(e) => format!("Failed to stop existing watcher: {}", e),
            Message::WatcherFailedToStop(pid) => format!("Failed to stop watcher with PID {}", pid),
            Message::InvalidPidFileContent => "PID file contains invalid data".to_string(),
            Message::WatcherReceivedSigterm => "Received SIGTERM, shutting down gracefully...".to_string(),
            Message::WatcherReceivedSigint => "Received SIGINT, shutting down gracefully...".to_string(),
            Message::WatcherReceivedCtrlC => "Received Ctrl+C, shutting down gracefully...".to_string(),
            Message::WatcherCtrlCListenFailed(e) => format!("Failed to listen for Ctrl+C: {}", e),
            Message::WatcherSignalHandlingNotSupported => "Signal handling not supported on this platform".to_string(),
            Message::SessionExitedNormally => "Focus session exited normally".to_string(),
            Message::SessionError(e) => format!("Focus session error: {}", e),
            Message::SessionTaskPanicked(e) => format!("Focus session task panicked: {}", e),
            Message::SessionShuttingDown => "Shutting down focus session...".to_string(),

            // === SYSTEM / ERROR MESSAGES ===
            Message::FailedToCreateSigtermHandler => "Failed to create SIGTERM handler".to_string(),
            Message::FailedToCreateSigintHandler => "Failed to create SIGINT handler".to_string(),
            Message::FailedToGetCurrentExecutable => "Failed to get current executable path".to_string(),
            Message::DaemonModeNotSupported => "Daemon mode is not supported on this platform".to_string(),
            Message::ProcessTerminationNotSupported => "Process termination is not supported on this platform".to_string(),
            Message::FailedToOpenProcess(code) => format!("Failed to open process (error code: {})", code),
            Message::FailedToTerminateProcess(code) => format!("Failed to terminate process (error code: {})", code),
        };
        write!(f, "{}", text)
    }
}
