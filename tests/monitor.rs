#[cfg(test)]
mod tests {
    use pomo::libs::config::MonitorConfig;
    use pomo::libs::monitor::{DetectorEvent, PresenceDetector};
    use pomo::libs::presence::{PresenceReason, PresenceState};
    use tokio::time::{Duration, Instant};

    fn config() -> MonitorConfig {
        MonitorConfig {
            enabled: true,
            poll_interval: 10,
            pointer_threshold: 3,
            idle_warn: 240,
            idle_threshold: 300,
            warn_cooldown: 20,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_idle_after_threshold() {
        let start = Instant::now();
        let mut detector = PresenceDetector::new(config(), start);

        // Sampled every 10 seconds with no input at all.
        let mut events = Vec::new();
        for i in 1..=30 {
            if let Some(event) = detector.evaluate(start + Duration::from_secs(i * 10)) {
                events.push((i * 10, event));
            }
        }

        assert!(events.iter().any(|(at, e)| *at == 300 && *e == DetectorEvent::BecameIdle));
        assert_eq!(detector.state(), PresenceState::Idle);
        // Idle fires once, not on every later sample.
        assert_eq!(events.iter().filter(|(_, e)| *e == DetectorEvent::BecameIdle).count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_warn_respects_cooldown() {
        let start = Instant::now();
        let mut detector = PresenceDetector::new(config(), start);

        // Checked every 10 seconds while idle time is in [240, 300).
        let mut warns = Vec::new();
        for i in 1..=29 {
            let at = i * 10;
            if let Some(DetectorEvent::IdleImminent { .. }) = detector.evaluate(start + Duration::from_secs(at)) {
                warns.push(at);
            }
        }

        assert_eq!(warns, vec![240, 260, 280]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_input_wakes_idle_detector() {
        let start = Instant::now();
        let mut detector = PresenceDetector::new(config(), start);
        detector.evaluate(start + Duration::from_secs(300));
        assert_eq!(detector.state(), PresenceState::Idle);

        let event = detector.observe_input(PresenceReason::Keyboard, start + Duration::from_secs(310));
        assert_eq!(event, Some(DetectorEvent::BecameActive(PresenceReason::Keyboard)));
        assert_eq!(detector.state(), PresenceState::Active);

        // The inactivity clock restarted at the wake.
        assert_eq!(detector.evaluate(start + Duration::from_secs(320)), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_pointer_sample_is_calibration_only() {
        let start = Instant::now();
        let mut detector = PresenceDetector::new(config(), start);
        detector.evaluate(start + Duration::from_secs(300));
        assert_eq!(detector.state(), PresenceState::Idle);

        // First sample after (re)start only records the position, however
        // far it is from anything seen before.
        let woke = detector.observe_pointer(500.0, 500.0, start + Duration::from_secs(310));
        assert_eq!(woke, None);
        assert_eq!(detector.state(), PresenceState::Idle);

        // Real movement on the next sample counts.
        let woke = detector.observe_pointer(510.0, 500.0, start + Duration::from_secs(320));
        assert_eq!(woke, Some(DetectorEvent::BecameActive(PresenceReason::Pointer)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pointer_jitter_below_threshold_is_not_activity() {
        let start = Instant::now();
        let mut detector = PresenceDetector::new(config(), start);

        detector.observe_pointer(100.0, 100.0, start);
        for i in 1..=30 {
            // 2px wiggle stays under the 3px threshold.
            let x = if i % 2 == 0 { 100.0 } else { 102.0 };
            assert_eq!(detector.observe_pointer(x, 100.0, start + Duration::from_secs(i * 10)), None);
        }
        let event = detector.evaluate(start + Duration::from_secs(300));
        assert_eq!(event, Some(DetectorEvent::BecameIdle));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pointer_motion_resets_inactivity_clock() {
        let start = Instant::now();
        let mut detector = PresenceDetector::new(config(), start);

        detector.observe_pointer(100.0, 100.0, start);
        // 4 minutes of silence, then a real move.
        detector.observe_pointer(200.0, 100.0, start + Duration::from_secs(240));

        // At what would have been the idle mark nothing fires.
        assert_eq!(detector.evaluate(start + Duration::from_secs(300)), None);
        assert_eq!(detector.state(), PresenceState::Active);
    }
}
