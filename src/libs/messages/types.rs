//! Message type definitions for the pomo application.
//!
//! Every user-facing string lives here as a `Message` variant so the text
//! is defined in one place and parameterized messages stay type-safe.

#[derive(Debug, Clone)]
pub enum Message {
    // === TASK MESSAGES ===
    TaskCreated(String),
    TaskDeleted(i64),
    TaskCompleted(i64),
    TaskNotFound(i64),
    TaskDuplicateName(String),
    TasksHeader(String),
    NoTasksForDate(String),

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigParseFallback(String),
    ConfigModuleTimer,
    ConfigModuleMonitor,
    ConfigModuleBreaks,
    PromptSelectModules,
    PromptFocusDuration,
    PromptShortBreakInterval,
    PromptShortBreakDuration,
    PromptLongBreakDuration,
    PromptMonitoringEnabled,
    PromptPollInterval,
    PromptIdleThreshold,
    PromptFullScreenBreaks,

    // === FOCUS RECORD MESSAGES ===
    HistoryTitle(String),
    NoRecordsForDate(String),
    RecordSaved(String, i64),
    RecordDiscardedShort,
    RecordPersistRetry(String),
    RecordPersistFailed(String),
    MonthlySummaryTitle(String),

    // === MONITOR MESSAGES ===
    MonitorStarted {
        poll_interval: u64,
        idle_threshold: u64,
    },
    MonitorStopped,
    MonitorDisabled,
    MonitorBlockedWhileLocked,
    MonitorTickFailed(String),
    MonitorListenerFailed(String),
    PresenceChanged(String, String),
    IdleImminent(u64),

    // === POWER / SESSION MESSAGES ===
    SessionLocked,
    SessionUnlocked,
    SystemSuspended,
    SystemResumed,

    // === BREAK MESSAGES ===
    BreakTriggered(String, u64),
    BreakRejectedOverlap,
    BreakOverlayFailed(String),
    BreakOverlayForceDestroyed(u32),
    BreakEnded(String),
    BreakSessionShutdown,

    // === TIMER MESSAGES ===
    FocusStarted(String),
    FocusCompleted(String, i64),
    FocusRolledBack(String),

    // === WATCHER / DAEMON MESSAGES ===
    WatcherStarted(u32),
    WatcherStopped(u32),
    WatcherNotRunning,
    WatcherNotRunningPidNotFound,
    WatcherStoppingExisting(String),
    WatcherFailedToStopExisting(String),
    WatcherFailedToStop(u32),
    InvalidPidFileContent,
    WatcherReceivedSigterm,
    WatcherReceivedSigint,
    WatcherReceivedCtrlC,
    WatcherCtrlCListenFailed(String),
    WatcherSignalHandlingNotSupported,
    SessionExitedNormally,
    SessionError(String),
    SessionTaskPanicked(String),
    SessionShuttingDown,

    // === SYSTEM / ERROR MESSAGES ===
    FailedToCreateSigtermHandler,
    FailedToCreateSigintHandler,
    FailedToGetCurrentExecutable,
    DaemonModeNotSupported,
    ProcessTerminationNotSupported,
    FailedToOpenProcess(u32),
    FailedToTerminateProcess(u32),
}
