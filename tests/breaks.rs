#[cfg(test)]
mod tests {
    use parking_lot::Mutex;
    use pomo::libs::breaks::{BreakScheduler, SETTLE_MARGIN_SECS};
    use pomo::libs::config::BreakConfig;
    use pomo::libs::display::{Bounds, DisplayEnumerator, DisplayInfo, Overlay, OverlayFactory, OverlayStyle};
    use pomo::libs::error::FocusError;
    use pomo::libs::timer::BreakKind;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::mpsc;
    use tokio::time::{self, Duration};

    struct FakeDisplays {
        count: u32,
    }

    impl DisplayEnumerator for FakeDisplays {
        fn list_displays(&self) -> Vec<DisplayInfo> {
            (0..self.count)
                .map(|id| DisplayInfo {
                    id,
                    bounds: Bounds {
                        x: 1920 * id as i32,
                        y: 0,
                        width: 1920,
                        height: 1080,
                    },
                })
                .collect()
        }
    }

    /// Records every overlay lifecycle action for assertions.
    #[derive(Default)]
    struct OverlayLog {
        created: Vec<(u32, OverlayStyle)>,
        closed: Vec<u32>,
        forced: Vec<u32>,
    }

    struct FakeOverlay {
        display_id: u32,
        stubborn: bool,
        log: Arc<Mutex<OverlayLog>>,
    }

    impl Overlay for FakeOverlay {
        fn display_id(&self) -> u32 {
            self.display_id
        }

        fn set_focus_guard(&mut self, _enabled: bool) {}

        fn close(&mut self) -> bool {
            if self.stubborn {
                return false;
            }
            self.log.lock().closed.push(self.display_id);
            true
        }

        fn force_destroy(&mut self) {
            self.log.lock().forced.push(self.display_id);
        }
    }

    struct FakeFactory {
        log: Arc<Mutex<OverlayLog>>,
        /// Display ids whose creation fails.
        failing: Vec<u32>,
        /// Display ids whose overlays refuse to close.
        stubborn: Vec<u32>,
    }

    impl OverlayFactory for FakeFactory {
        fn create(&self, display: &DisplayInfo, style: OverlayStyle) -> Result<Box<dyn Overlay>, FocusError> {
            if self.failing.contains(&display.id) {
                return Err(FocusError::OverlayCreation {
                    display: display.id,
                    reason: "display detached".into(),
                });
            }
            self.log.lock().created.push((display.id, style));
            Ok(Box::new(FakeOverlay {
                display_id: display.id,
                stubborn: self.stubborn.contains(&display.id),
                log: self.log.clone(),
            }))
        }
    }

    fn scheduler(
        displays: u32,
        failing: Vec<u32>,
        stubborn: Vec<u32>,
        full_screen: bool,
    ) -> (BreakScheduler, Arc<Mutex<OverlayLog>>, mpsc::Receiver<BreakKind>) {
        let log = Arc::new(Mutex::new(OverlayLog::default()));
        let (ended_tx, ended_rx) = mpsc::channel(8);
        let scheduler = BreakScheduler::new(
            Arc::new(FakeDisplays { count: displays }),
            Arc::new(FakeFactory {
                log: log.clone(),
                failing,
                stubborn,
            }),
            BreakConfig { full_screen },
            ended_tx,
        );
        (scheduler, log, ended_rx)
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_overlay_per_display_and_single_ended_event() {
        let (scheduler, log, mut ended_rx) = scheduler(3, vec![], vec![], false);

        assert!(scheduler.trigger(BreakKind::Short, 30));
        assert_eq!(log.lock().created.len(), 3);
        assert!(scheduler.session_active());

        // Not yet expired just before duration + settle margin.
        time::sleep(Duration::from_secs(30 + SETTLE_MARGIN_SECS - 1)).await;
        assert!(scheduler.session_active());

        time::sleep(Duration::from_secs(2)).await;
        assert!(!scheduler.session_active());
        assert_eq!(log.lock().closed.len(), 3);

        assert_eq!(ended_rx.recv().await, Some(BreakKind::Short));
        assert!(ended_rx.try_recv().is_err(), "break-ended must fire exactly once");
    }

    #[tokio::test(start_paused = true)]
    async fn test_overlapping_trigger_rejected() {
        let (scheduler, log, _ended_rx) = scheduler(1, vec![], vec![], false);

        assert!(scheduler.trigger(BreakKind::Short, 30));
        assert!(!scheduler.trigger(BreakKind::Long, 300));
        assert_eq!(log.lock().created.len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_break_proceeds_when_one_display_fails() {
        let (scheduler, log, mut ended_rx) = scheduler(3, vec![1], vec![], false);

        assert!(scheduler.trigger(BreakKind::Short, 30));
        assert_eq!(log.lock().created.len(), 2);

        time::sleep(Duration::from_secs(30 + SETTLE_MARGIN_SECS + 1)).await;
        assert_eq!(log.lock().closed.len(), 2);
        assert_eq!(ended_rx.recv().await, Some(BreakKind::Short));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stubborn_overlay_is_force_destroyed() {
        let (scheduler, log, mut ended_rx) = scheduler(2, vec![], vec![1], false);

        scheduler.trigger(BreakKind::Short, 30);
        time::sleep(Duration::from_secs(30 + SETTLE_MARGIN_SECS + 1)).await;

        let log = log.lock();
        assert_eq!(log.closed, vec![0]);
        assert_eq!(log.forced, vec![1]);
        drop(log);
        assert_eq!(ended_rx.recv().await, Some(BreakKind::Short));
    }

    #[tokio::test(start_paused = true)]
    async fn test_long_break_uses_kiosk_style() {
        let (scheduler, log, _ended_rx) = scheduler(1, vec![], vec![], false);
        scheduler.trigger(BreakKind::Long, 300);
        assert_eq!(log.lock().created, vec![(0, OverlayStyle::Kiosk)]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_break_banner_unless_full_screen_configured() {
        let (scheduler, log, _ended_rx) = scheduler(1, vec![], vec![], false);
        scheduler.trigger(BreakKind::Short, 30);
        assert_eq!(log.lock().created, vec![(0, OverlayStyle::Banner)]);

        let (scheduler, log, _ended_rx) = scheduler_full_screen();
        scheduler.trigger(BreakKind::Short, 30);
        assert_eq!(log.lock().created, vec![(0, OverlayStyle::Kiosk)]);
    }

    fn scheduler_full_screen() -> (BreakScheduler, Arc<Mutex<OverlayLog>>, mpsc::Receiver<BreakKind>) {
        scheduler(1, vec![], vec![], true)
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_tears_session_down_without_ended_event() {
        let (scheduler, log, mut ended_rx) = scheduler(2, vec![], vec![], false);

        scheduler.trigger(BreakKind::Long, 300);
        scheduler.shutdown();

        assert!(!scheduler.session_active());
        assert_eq!(log.lock().closed.len(), 2);

        // The aborted expiry never reports break-ended.
        time::sleep(Duration::from_secs(600)).await;
        assert!(ended_rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_break_allowed_after_expiry() {
        let (scheduler, log, mut ended_rx) = scheduler(1, vec![], vec![], false);

        scheduler.trigger(BreakKind::Short, 30);
        time::sleep(Duration::from_secs(30 + SETTLE_MARGIN_SECS + 1)).await;
        assert_eq!(ended_rx.recv().await, Some(BreakKind::Short));

        assert!(scheduler.trigger(BreakKind::Short, 30));
        assert_eq!(log.lock().created.len(), 2);
    }
}
