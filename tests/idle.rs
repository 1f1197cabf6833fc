mod common;

#[cfg(test)]
mod tests {
    use super::common::{at, MockNotifier};
    use chrono::Duration;
    use clockin::libs::config::IdleConfig;
    use clockin::libs::idle::{FocusOutcome, IdleChoice, IdleDetector};
    use std::time::Duration as StdDuration;

    fn detector(max_idle_time: u64) -> (IdleDetector<MockNotifier>, MockNotifier) {
        let notifier = MockNotifier::default();
        (IdleDetector::new(notifier.clone(), &IdleConfig { max_idle_time }), notifier)
    }

    async fn advance(secs: u64) {
        tokio::time::sleep(StdDuration::from_secs(secs)).await;
        tokio::task::yield_now().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_notifier_fires_after_max_idle_time() {
        let (mut detector, notifier) = detector(300);

        assert_eq!(detector.on_focus_change(false, true, at(9, 0)), FocusOutcome::Lost);
        assert!(detector.is_armed());

        advance(299).await;
        assert_eq!(notifier.count(), 0);

        advance(2).await;
        assert_eq!(notifier.count(), 1);
        assert!(!detector.is_armed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_focus_regain_cancels_notification() {
        let (mut detector, notifier) = detector(300);

        detector.on_focus_change(false, true, at(9, 0));
        advance(250).await;

        let outcome = detector.on_focus_change(true, true, at(9, 0) + Duration::seconds(250));
        let FocusOutcome::Idle(event) = outcome else {
            panic!("expected an idle interval, got {:?}", outcome);
        };
        assert_eq!(event.idle_start, at(9, 0));
        assert_eq!(event.duration, Duration::seconds(250));
        assert_eq!(event.describe(), "4 minutes 10 seconds");
        assert!(event.tracked_throughout);

        advance(600).await;
        assert_eq!(notifier.count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_timer_when_not_tracking() {
        let (mut detector, notifier) = detector(1);

        assert_eq!(detector.on_focus_change(false, false, at(9, 0)), FocusOutcome::Lost);
        assert!(!detector.is_armed());

        advance(10).await;
        assert_eq!(notifier.count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_tracking_must_span_the_whole_interval() {
        let (mut detector, _notifier) = detector(300);

        detector.on_focus_change(false, false, at(9, 0));
        let FocusOutcome::Idle(event) = detector.on_focus_change(true, true, at(9, 10)) else {
            panic!("expected an idle interval");
        };
        assert!(!event.tracked_throughout);

        detector.on_focus_change(false, true, at(10, 0));
        let FocusOutcome::Idle(event) = detector.on_focus_change(true, false, at(10, 10)) else {
            panic!("expected an idle interval");
        };
        assert!(!event.tracked_throughout);
    }

    #[tokio::test(start_paused = true)]
    async fn test_repeated_state_is_ignored() {
        let (mut detector, _notifier) = detector(300);

        assert_eq!(detector.on_focus_change(true, true, at(9, 0)), FocusOutcome::Unchanged);
        detector.on_focus_change(false, true, at(9, 0));
        assert_eq!(detector.on_focus_change(false, true, at(9, 5)), FocusOutcome::Unchanged);
        assert_eq!(detector.focus().time_when_focus_lost, Some(at(9, 0)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_gaps_are_noise() {
        let (mut detector, _notifier) = detector(300);

        detector.on_focus_change(false, true, at(9, 0));
        let outcome = detector.on_focus_change(true, true, at(9, 0) + Duration::milliseconds(2_000));
        assert_eq!(outcome, FocusOutcome::Noise(Duration::milliseconds(2_000)));

        detector.on_focus_change(false, true, at(9, 1));
        let outcome = detector.on_focus_change(true, true, at(9, 1) + Duration::milliseconds(2_001));
        assert!(matches!(outcome, FocusOutcome::Idle(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_noise_still_cancels_the_timer() {
        let (mut detector, notifier) = detector(5);

        detector.on_focus_change(false, true, at(9, 0));
        detector.on_focus_change(true, true, at(9, 0) + Duration::seconds(1));
        assert!(!detector.is_armed());

        advance(10).await;
        assert_eq!(notifier.count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearming_keeps_a_single_timer() {
        let (mut detector, notifier) = detector(60);

        detector.on_focus_change(false, true, at(9, 0));
        advance(30).await;
        detector.on_focus_change(true, true, at(9, 0) + Duration::seconds(1));
        detector.on_focus_change(false, true, at(9, 1));

        advance(45).await;
        assert_eq!(notifier.count(), 0);
        advance(20).await;
        assert_eq!(notifier.count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_pending_notification() {
        let (mut detector, notifier) = detector(5);
        detector.on_focus_change(false, true, at(9, 0));
        drop(detector);

        advance(10).await;
        assert_eq!(notifier.count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_reports_whether_pending() {
        let (mut detector, _notifier) = detector(5);
        assert!(!detector.cancel());
        detector.on_focus_change(false, true, at(9, 0));
        assert!(detector.cancel());
        assert!(!detector.cancel());
    }

    #[test]
    fn test_idle_choices() {
        assert_eq!(IdleChoice::labels(), vec!["Yes", "Yes, continue tracking", "No"]);
        assert_eq!(IdleChoice::from_index(Some(0)), IdleChoice::Discard);
        assert_eq!(IdleChoice::from_index(Some(1)), IdleChoice::DiscardAndResume);
        assert_eq!(IdleChoice::from_index(Some(2)), IdleChoice::Keep);
        assert_eq!(IdleChoice::from_index(Some(7)), IdleChoice::Keep);
        assert_eq!(IdleChoice::from_index(None), IdleChoice::Keep);
    }
}
