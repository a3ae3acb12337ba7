//! User activity monitoring.
//!
//! Watches keyboard and pointer input to decide whether a human is
//! present. Input events are captured on a dedicated listener thread
//! (rdev's `listen` is blocking); the async sampling loop folds them into
//! a `PresenceDetector`, flips the shared presence cell, and forwards
//! transitions to the session loop.
//!
//! The detector itself is a pure state machine driven by explicit
//! instants, so the idle/warn/wake rules are testable without real input
//! devices or real time.

use crate::libs::config::MonitorConfig;
use crate::libs::messages::Message;
use crate::libs::notifier::NotificationSink;
use crate::libs::presence::{PresenceCell, PresenceEvent, PresenceReason, PresenceState};
use crate::{msg_debug, msg_info, msg_print, msg_warning};
use parking_lot::Mutex;
use rdev::{listen, Event, EventType};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{self, Duration, Instant};

/// A transition produced by the detector for one batch of observations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorEvent {
    /// Presence flipped idle -> active on the given kind of input.
    BecameActive(PresenceReason),
    /// The idle threshold elapsed with no qualifying input.
    BecameIdle,
    /// Advisory: the warn threshold elapsed; idle is coming unless input
    /// arrives. Rate-limited by the warn cooldown.
    IdleImminent { idle_secs: u64 },
}

/// Pure idle/active state machine.
///
/// All methods take the current instant as a parameter. Qualifying input
/// resets the inactivity clock; pointer motion qualifies only when it
/// exceeds the configured pixel threshold, so sensor jitter on an
/// untouched mouse does not keep the user "present" forever.
pub struct PresenceDetector {
    config: MonitorConfig,
    state: PresenceState,
    last_activity: Instant,
    last_pointer: Option<(f64, f64)>,
    last_warn: Option<Instant>,
}

impl PresenceDetector {
    pub fn new(config: MonitorConfig, now: Instant) -> Self {
        PresenceDetector {
            config,
            state: PresenceState::Active,
            last_activity: now,
            last_pointer: None,
            last_warn: None,
        }
    }

    pub fn state(&self) -> PresenceState {
        self.state
    }

    /// Registers a qualifying input event (key press, button, wheel).
    ///
    /// Any such event resets the inactivity clock and, if the detector was
    /// idle, wakes it immediately.
    pub fn observe_input(&mut self, reason: PresenceReason, now: Instant) -> Option<DetectorEvent> {
        self.last_activity = now;
        self.last_warn = None;
        if self.state == PresenceState::Idle {
            self.state = PresenceState::Active;
            Some(DetectorEvent::BecameActive(reason))
        } else {
            None
        }
    }

    /// Registers a pointer position sample.
    ///
    /// Motion below the pixel threshold is ignored. The first sample only
    /// establishes the reference position and never counts as activity.
    pub fn observe_pointer(&mut self, x: f64, y: f64, now: Instant) -> Option<DetectorEvent> {
        let moved = match self.last_pointer {
            Some((px, py)) => {
                let threshold = self.config.pointer_threshold as f64;
                (x - px).abs() > threshold || (y - py).abs() > threshold
            }
            None => false,
        };
        self.last_pointer = Some((x, y));
        if moved {
            self.observe_input(PresenceReason::Pointer, now)
        } else {
            None
        }
    }

    /// Evaluates the inactivity clock against the warn and idle thresholds.
    ///
    /// Called once per sampling tick after observations are applied.
    pub fn evaluate(&mut self, now: Instant) -> Option<DetectorEvent> {
        if self.state == PresenceState::Idle {
            return None;
        }
        let idle_secs = now.duration_since(self.last_activity).as_secs();
        if idle_secs >= self.config.idle_threshold {
            self.state = PresenceState::Idle;
            return Some(DetectorEvent::BecameIdle);
        }
        if idle_secs >= self.config.idle_warn {
            let cooled_down = match self.last_warn {
                Some(warned) => now.duration_since(warned).as_secs() >= self.config.warn_cooldown,
                None => true,
            };
            if cooled_down {
                self.last_warn = Some(now);
                return Some(DetectorEvent::IdleImminent { idle_secs });
            }
        }
        None
    }
}

/// Raw input state shared between the listener thread and the sampler.
#[derive(Debug, Default)]
struct ListenerState {
    /// A key, button, or wheel event arrived since the last tick.
    input_seen: bool,
    /// The kind of the most recent qualifying input.
    input_reason: Option<PresenceReason>,
    /// Latest known pointer position, if any move event arrived.
    pointer: Option<(f64, f64)>,
}

/// The activity monitor.
///
/// One instance lives for the whole daemon. `run` can be aborted and
/// called again (the session loop does this around lock and suspend); the
/// listener thread is spawned once and survives restarts.
pub struct Monitor {
    config: MonitorConfig,
    cell: PresenceCell,
    events: mpsc::Sender<PresenceEvent>,
    notifier: Arc<dyn NotificationSink>,
    listener: Arc<Mutex<ListenerState>>,
    listener_started: AtomicBool,
}

impl Monitor {
    pub fn new(config: MonitorConfig, cell: PresenceCell, events: mpsc::Sender<PresenceEvent>, notifier: Arc<dyn NotificationSink>) -> Self {
        Monitor {
            config,
            cell,
            events,
            notifier,
            listener: Arc::new(Mutex::new(ListenerState::default())),
            listener_started: AtomicBool::new(false),
        }
    }

    /// Runs the sampling loop until the task is aborted.
    ///
    /// Each tick drains the listener state into the detector, evaluates the
    /// inactivity clock, and publishes any transition. A fresh call starts
    /// from a fresh detector, so restarting after unlock or resume counts
    /// as activity "now" and cannot trip an instant idle.
    pub async fn run(&self) {
        if !self.config.enabled {
            msg_info!(Message::MonitorDisabled);
            return;
        }

        self.start_listener();
        msg_print!(Message::MonitorStarted {
            poll_interval: self.config.poll_interval,
            idle_threshold: self.config.idle_threshold,
        });

        let mut detector = PresenceDetector::new(self.config.clone(), Instant::now());
        self.cell.set(PresenceState::Active);

        loop {
            time::sleep(Duration::from_secs(self.config.poll_interval)).await;
            let now = Instant::now();

            let (input, pointer) = {
                let mut state = self.listener.lock();
                let input = if state.input_seen { state.input_reason } else { None };
                state.input_seen = false;
                state.input_reason = None;
                (input, state.pointer)
            };

            if let Some(reason) = input {
                if let Some(event) = detector.observe_input(reason, now) {
                    self.publish(&detector, event).await;
                }
            }
            if let Some((x, y)) = pointer {
                if let Some(event) = detector.observe_pointer(x, y, now) {
                    self.publish(&detector, event).await;
                }
            }
            if let Some(event) = detector.evaluate(now) {
                self.publish(&detector, event).await;
            }
        }
    }

    async fn publish(&self, detector: &PresenceDetector, event: DetectorEvent) {
        match event {
            DetectorEvent::BecameActive(reason) => {
                self.cell.set(PresenceState::Active);
                msg_debug!(Message::PresenceChanged(detector.state().to_string(), reason.to_string()));
                let _ = self
                    .events
                    .send(PresenceEvent {
                        state: PresenceState::Active,
                        reason,
                    })
                    .await;
            }
            DetectorEvent::BecameIdle => {
                self.cell.set(PresenceState::Idle);
                msg_debug!(Message::PresenceChanged(detector.state().to_string(), PresenceReason::Timeout.to_string()));
                let _ = self
                    .events
                    .send(PresenceEvent {
                        state: PresenceState::Idle,
                        reason: PresenceReason::Timeout,
                    })
                    .await;
            }
            DetectorEvent::IdleImminent { idle_secs } => {
                msg_warning!(Message::IdleImminent(idle_secs));
                self.notifier.notify("Pomo", &Message::IdleImminent(idle_secs).to_string());
            }
        }
    }

    /// Spawns the blocking rdev listener exactly once.
    ///
    /// The listener only records raw observations; all policy lives in the
    /// detector. On listener failure it retries after a second, the same
    /// way the sampler tolerates transient sensor errors.
    fn start_listener(&self) {
        if self.listener_started.swap(true, Ordering::SeqCst) {
            return;
        }

        let shared = self.listener.clone();
        std::thread::spawn(move || loop {
            let state_for_listener = shared.clone();
            if let Err(e) = listen(move |event: Event| match event.event_type {
                EventType::KeyPress(_) => {
                    let mut state = state_for_listener.lock();
                    state.input_seen = true;
                    state.input_reason = Some(PresenceReason::Keyboard);
                }
                EventType::ButtonPress(_) | EventType::Wheel { .. } => {
                    let mut state = state_for_listener.lock();
                    state.input_seen = true;
                    state.input_reason = Some(PresenceReason::Pointer);
                }
                EventType::MouseMove { x, y } => {
                    state_for_listener.lock().pointer = Some((x, y));
                }
                _ => {}
            }) {
                msg_warning!(Message::MonitorListenerFailed(format!("{:?}", e)));
                std::thread::sleep(std::time::Duration::from_secs(1));
            } else {
                break;
            }
        });
    }
}
