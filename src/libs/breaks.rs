//! Break enforcement scheduler.
//!
//! Makes a triggered break unskippable: one blocking overlay per attached
//! display, held for the configured duration plus a settle margin, then
//! closed (force-destroyed if they refuse). The expiry timer is owned by
//! the scheduler alone. Lock and presence signals never touch it; only
//! its own firing or application shutdown tears a session down, so
//! locking the screen mid-break cannot dodge the break.

use crate::libs::config::BreakConfig;
use crate::libs::display::{DisplayEnumerator, Overlay, OverlayFactory, OverlayStyle};
use crate::libs::messages::Message;
use crate::libs::timer::BreakKind;
use crate::{msg_info, msg_print, msg_warning};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration};

/// Extra seconds an overlay outlives the displayed countdown, absorbing
/// creation and render latency.
pub const SETTLE_MARGIN_SECS: u64 = 2;

/// How long a closing overlay gets before it is force-destroyed.
pub const CLOSE_GRACE_MS: u64 = 500;

/// One break occurrence: its overlays and the task holding its expiry
/// timer.
struct BreakSession {
    kind: BreakKind,
    overlays: Vec<Box<dyn Overlay>>,
    expiry: Option<JoinHandle<()>>,
}

/// The scheduler. Re-entrant-safe: at most one `BreakSession` exists at a
/// time and a trigger arriving while one is open is rejected.
pub struct BreakScheduler {
    displays: Arc<dyn DisplayEnumerator>,
    factory: Arc<dyn OverlayFactory>,
    config: BreakConfig,
    session_active: Arc<AtomicBool>,
    current: Arc<Mutex<Option<BreakSession>>>,
    ended_tx: mpsc::Sender<BreakKind>,
}

impl BreakScheduler {
    pub fn new(displays: Arc<dyn DisplayEnumerator>, factory: Arc<dyn OverlayFactory>, config: BreakConfig, ended_tx: mpsc::Sender<BreakKind>) -> Self {
        BreakScheduler {
            displays,
            factory,
            config,
            session_active: Arc::new(AtomicBool::new(false)),
            current: Arc::new(Mutex::new(None)),
            ended_tx,
        }
    }

    /// Whether a break session is currently open. The power observer
    /// consults this so unlock during a break does not fight the overlays
    /// for the foreground.
    pub fn session_active(&self) -> bool {
        self.session_active.load(Ordering::SeqCst)
    }

    /// Handle for collaborators that only need the active-session flag.
    pub fn session_flag(&self) -> Arc<AtomicBool> {
        self.session_active.clone()
    }

    /// Opens a break session. Returns false when one is already open.
    ///
    /// Overlay creation failures are logged and skipped; the break
    /// proceeds on the remaining displays. The expiry fires after the
    /// duration plus the settle margin, closes every overlay, and reports
    /// break-ended exactly once.
    pub fn trigger(&self, kind: BreakKind, duration_secs: u64) -> bool {
        if self.session_active.swap(true, Ordering::SeqCst) {
            msg_warning!(Message::BreakRejectedOverlap);
            return false;
        }

        let style = if kind == BreakKind::Long || self.config.full_screen {
            OverlayStyle::Kiosk
        } else {
            OverlayStyle::Banner
        };

        let mut overlays: Vec<Box<dyn Overlay>> = Vec::new();
        for display in self.displays.list_displays() {
            match self.factory.create(&display, style) {
                Ok(mut overlay) => {
                    overlay.set_focus_guard(true);
                    overlays.push(overlay);
                }
                Err(e) => msg_warning!(Message::BreakOverlayFailed(e.to_string())),
            }
        }

        msg_print!(Message::BreakTriggered(kind.to_string(), duration_secs));

        let current = self.current.clone();
        let session_active = self.session_active.clone();
        let ended_tx = self.ended_tx.clone();
        let expiry = tokio::spawn(async move {
            time::sleep(Duration::from_secs(duration_secs + SETTLE_MARGIN_SECS)).await;
            let session = current.lock().take();
            if let Some(mut session) = session {
                session.expiry = None;
                close_overlays(&mut session.overlays);
                session_active.store(false, Ordering::SeqCst);
                msg_info!(Message::BreakEnded(session.kind.to_string()));
                let _ = ended_tx.send(session.kind).await;
            }
        });

        *self.current.lock() = Some(BreakSession {
            kind,
            overlays,
            expiry: Some(expiry),
        });
        true
    }

    /// Application-shutdown teardown. The only path other than expiry
    /// that may destroy a session.
    pub fn shutdown(&self) {
        let session = self.current.lock().take();
        if let Some(mut session) = session {
            if let Some(expiry) = session.expiry.take() {
                expiry.abort();
            }
            close_overlays(&mut session.overlays);
            self.session_active.store(false, Ordering::SeqCst);
            msg_info!(Message::BreakSessionShutdown);
        }
    }
}

/// Closes every overlay, force-destroying any that refuse.
fn close_overlays(overlays: &mut Vec<Box<dyn Overlay>>) {
    for overlay in overlays.iter_mut() {
        overlay.set_focus_guard(false);
        if !overlay.close() {
            msg_warning!(Message::BreakOverlayForceDestroyed(overlay.display_id()));
            overlay.force_destroy();
        }
    }
    overlays.clear();
}
