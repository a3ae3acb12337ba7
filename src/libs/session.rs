//! Focus session coordinator.
//!
//! One `FocusSession` owns the timer, the activity monitor, the break
//! scheduler, and the power observer for the lifetime of the daemon, and
//! runs them on a single select loop. Timer ticks and presence
//! notifications share that loop, so a tick and a presence change can
//! never interleave mid-transition, and every notification is processed
//! to completion (including persistence) before the next one.

use crate::db::records::Records;
use crate::db::tasks::Tasks;
use crate::libs::breaks::BreakScheduler;
use crate::libs::config::Config;
use crate::libs::display::{DisplayEnumerator, LoggingOverlayFactory, OverlayFactory, SingleDisplay};
use crate::libs::messages::Message;
use crate::libs::monitor::Monitor;
use crate::libs::notifier::{LogNotifier, NotificationSink};
use crate::libs::power::{PowerAction, PowerObserver, PowerSignal};
use crate::libs::presence::{PresenceCell, PresenceEvent, PresenceState};
use crate::libs::record::FocusRecord;
use crate::libs::task::Task;
use crate::libs::timer::{BreakKind, FocusTimer, TimerEvent};
use crate::{msg_info, msg_print, msg_warning};
use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, Duration};

/// Name used when focus is started without an explicit task.
const DEFAULT_TASK_NAME: &str = "Focus";

/// The running focus session.
pub struct FocusSession {
    timer: FocusTimer,
    scheduler: BreakScheduler,
    observer: PowerObserver,
    cell: PresenceCell,
    monitor: Arc<Monitor>,
    monitor_task: Option<JoinHandle<()>>,
    presence_tx: mpsc::Sender<PresenceEvent>,
    records: Records,
    tasks: Tasks,
    /// Default planned minutes for a task created on the fly.
    focus_minutes: u64,
}

impl FocusSession {
    /// Builds a session with the headless display backend.
    pub fn new(config: &Config, break_ended_tx: mpsc::Sender<BreakKind>, presence_tx: mpsc::Sender<PresenceEvent>) -> Result<Self> {
        Self::with_backend(config, break_ended_tx, presence_tx, Arc::new(SingleDisplay), Arc::new(LoggingOverlayFactory), Arc::new(LogNotifier))
    }

    /// Builds a session against explicit display/overlay/notification
    /// backends.
    pub fn with_backend(
        config: &Config,
        break_ended_tx: mpsc::Sender<BreakKind>,
        presence_tx: mpsc::Sender<PresenceEvent>,
        displays: Arc<dyn DisplayEnumerator>,
        overlays: Arc<dyn OverlayFactory>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Result<Self> {
        let monitor_config = config.monitor_config();
        let timer_config = config.timer_config();
        let focus_minutes = timer_config.focus_duration;
        let cell = PresenceCell::new();
        let monitor = Arc::new(Monitor::new(monitor_config.clone(), cell.clone(), presence_tx.clone(), notifier));
        let scheduler = BreakScheduler::new(displays, overlays, config.breaks_config(), break_ended_tx);
        let timer = FocusTimer::new(timer_config, monitor_config.idle_threshold);

        Ok(FocusSession {
            timer,
            scheduler,
            observer: PowerObserver::new(),
            cell,
            monitor,
            monitor_task: None,
            presence_tx,
            records: Records::new()?,
            tasks: Tasks::new()?,
            focus_minutes,
        })
    }

    /// Resolves the task to focus on, creating it for today if needed.
    fn resolve_task(&mut self, name: Option<String>, focus_minutes: u64) -> Result<Task> {
        let name = name.unwrap_or_else(|| DEFAULT_TASK_NAME.to_string());
        let today = Local::now().date_naive();
        if let Some(id) = self.tasks.find_by_name(today, &name)? {
            if let Some(task) = self.tasks.get(id)? {
                return Ok(task);
            }
        }
        let mut task = Task::new(today, &name, focus_minutes as i64);
        let id = self.tasks.upsert(&task)?;
        task.id = Some(id);
        msg_info!(Message::TaskCreated(task.name.clone()));
        Ok(task)
    }

    /// Runs the session until shutdown.
    ///
    /// Starts a focus run on the named task, then drives the one-second
    /// tick, presence notifications, break-ended confirmations, and power
    /// signals from a single loop.
    pub async fn run(
        mut self,
        task_name: Option<String>,
        mut presence_rx: mpsc::Receiver<PresenceEvent>,
        mut break_ended_rx: mpsc::Receiver<BreakKind>,
        mut power_rx: mpsc::Receiver<PowerSignal>,
        mut shutdown: oneshot::Receiver<()>,
    ) -> Result<()> {
        let task = self.resolve_task(task_name, self.focus_minutes)?;
        let now = Local::now().naive_local();
        if self.timer.start(task.clone(), now) {
            msg_print!(Message::FocusStarted(task.name.clone()));
        }

        self.start_monitor();

        let mut ticker = time::interval(Duration::from_secs(1));
        ticker.set_missed_tick_behavior(time::MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let now = Local::now().naive_local();
                    for event in self.timer.tick(now) {
                        self.apply_timer_event(event)?;
                    }
                }
                Some(event) = presence_rx.recv() => {
                    // Settle-delayed forced idles arrive here too; keep the
                    // shared cell in step with whatever was delivered.
                    self.cell.set(event.state);
                    let now = Local::now().naive_local();
                    if let Some(timer_event) = self.timer.handle_presence(event, now) {
                        self.apply_timer_event(timer_event)?;
                    }
                }
                Some(kind) = break_ended_rx.recv() => {
                    self.timer.break_ended(kind);
                }
                Some(signal) = power_rx.recv() => {
                    self.apply_power_signal(signal)?;
                }
                _ = &mut shutdown => {
                    msg_info!(Message::SessionShuttingDown);
                    break;
                }
            }
        }

        // Shutdown: close the open interval like an explicit stop, then
        // tear down whatever break session is still up.
        let now = Local::now().naive_local();
        if let TimerEvent::Stopped(record) = self.timer.stop(now) {
            if let Some(record) = record {
                self.persist_record(record);
            }
        }
        self.scheduler.shutdown();
        self.stop_monitor();
        Ok(())
    }

    fn apply_timer_event(&mut self, event: TimerEvent) -> Result<()> {
        match event {
            TimerEvent::Status(update) => {
                let until_break = update.minutes_until_short_break.map(|m| m.to_string()).unwrap_or_else(|| "—".to_string());
                tracing::debug!(
                    target: "pomo::status",
                    remaining_minutes = update.remaining_minutes,
                    task = %update.task_name,
                    until_short_break = %until_break,
                );
            }
            TimerEvent::ShortBreakDue { duration_secs } => {
                if self.scheduler.trigger(BreakKind::Short, duration_secs) {
                    self.timer.break_started(BreakKind::Short);
                } else {
                    // Overlapping trigger was rejected; keep counting.
                    self.timer.break_ended(BreakKind::Short);
                }
            }
            TimerEvent::Completed(record) => {
                msg_print!(Message::FocusCompleted(record.task_name.clone(), record.minutes));
                self.persist_record(record);
            }
            TimerEvent::LongBreakDue { duration_secs } => {
                if self.scheduler.trigger(BreakKind::Long, duration_secs) {
                    self.timer.break_started(BreakKind::Long);
                } else {
                    self.timer.break_ended(BreakKind::Long);
                }
            }
            TimerEvent::RolledBack(record) => match record {
                Some(record) => {
                    msg_info!(Message::FocusRolledBack(record.task_name.clone()));
                    self.persist_record(record);
                }
                None => msg_info!(Message::RecordDiscardedShort),
            },
            TimerEvent::Stopped(record) => {
                if let Some(record) = record {
                    self.persist_record(record);
                }
            }
        }
        Ok(())
    }

    fn apply_power_signal(&mut self, signal: PowerSignal) -> Result<()> {
        match signal {
            PowerSignal::Locked => msg_info!(Message::SessionLocked),
            PowerSignal::Unlocked => msg_info!(Message::SessionUnlocked),
            PowerSignal::Suspended => msg_info!(Message::SystemSuspended),
            PowerSignal::Resumed => msg_info!(Message::SystemResumed),
        }
        let actions = self.observer.handle(signal, self.scheduler.session_active());
        for action in actions {
            match action {
                PowerAction::ForceIdle(reason) => {
                    let now = Local::now().naive_local();
                    self.force_idle(reason, now)?;
                }
                PowerAction::StopMonitor => self.stop_monitor(),
                PowerAction::RestartMonitor => self.start_monitor(),
                PowerAction::ForceIdleAfterSettle { delay_secs, reason } => {
                    // Delivered through the presence channel so it shares
                    // the same ordered queue as monitor notifications.
                    let tx = self.presence_tx.clone();
                    tokio::spawn(async move {
                        time::sleep(Duration::from_secs(delay_secs)).await;
                        let _ = tx
                            .send(PresenceEvent {
                                state: PresenceState::Idle,
                                reason,
                            })
                            .await;
                    });
                }
            }
        }
        Ok(())
    }

    fn force_idle(&mut self, reason: crate::libs::presence::PresenceReason, now: NaiveDateTime) -> Result<()> {
        self.cell.set(PresenceState::Idle);
        let event = PresenceEvent {
            state: PresenceState::Idle,
            reason,
        };
        if let Some(timer_event) = self.timer.handle_presence(event, now) {
            self.apply_timer_event(timer_event)?;
        }
        Ok(())
    }

    fn start_monitor(&mut self) {
        if self.observer.is_locked() {
            msg_warning!(Message::MonitorBlockedWhileLocked);
            return;
        }
        if let Some(task) = self.monitor_task.take() {
            task.abort();
        }
        let monitor = self.monitor.clone();
        self.monitor_task = Some(tokio::spawn(async move {
            monitor.run().await;
        }));
    }

    fn stop_monitor(&mut self) {
        if let Some(task) = self.monitor_task.take() {
            task.abort();
            msg_info!(Message::MonitorStopped);
        }
    }

    /// Writes a record, retrying once before dropping it with a warning.
    /// A lost record is preferred over a wedged session.
    fn persist_record(&mut self, record: FocusRecord) {
        match self.append_record(&record) {
            Ok(()) => msg_info!(Message::RecordSaved(record.task_name.clone(), record.minutes)),
            Err(first) => {
                msg_warning!(Message::RecordPersistRetry(first.to_string()));
                match self.append_record(&record) {
                    Ok(()) => msg_info!(Message::RecordSaved(record.task_name.clone(), record.minutes)),
                    Err(second) => msg_warning!(Message::RecordPersistFailed(second.to_string())),
                }
            }
        }
    }

    fn append_record(&mut self, record: &FocusRecord) -> Result<()> {
        self.records.append(record)?;
        if let Some(task_id) = record.task_id {
            self.tasks.add_completed_minutes(task_id, record.minutes)?;
        }
        Ok(())
    }
}
