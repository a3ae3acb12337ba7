//! Notification sink seam.
//!
//! Advisory messages (idle imminent, break coming up) go through this
//! trait. The default sink writes to the log; a desktop backend can
//! replace it with real toasts without the monitor or timer knowing.

use tracing::info;

pub trait NotificationSink: Send + Sync {
    fn notify(&self, title: &str, body: &str);
}

/// Sink that routes notifications into the tracing log.
pub struct LogNotifier;

impl NotificationSink for LogNotifier {
    fn notify(&self, title: &str, body: &str) {
        info!(target: "pomo::notify", "{}: {}", title, body);
    }
}
