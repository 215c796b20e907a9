use equitrix::services::ScanThrottle;
use std::time::Duration;

#[tokio::test]
async fn pauses_only_at_batch_boundaries() {
    let mut throttle = ScanThrottle::new(2, Duration::ZERO);

    assert!(!throttle.should_pause());
    throttle.pace().await;
    assert!(!throttle.should_pause());
    throttle.pace().await;
    // Two calls made: the next one crosses a batch boundary.
    assert!(throttle.should_pause());
    throttle.pace().await;
    assert!(!throttle.should_pause());
    assert_eq!(throttle.calls(), 3);
}

#[tokio::test]
async fn zero_batch_size_disables_pausing() {
    let mut throttle = ScanThrottle::new(0, Duration::from_secs(61));
    for _ in 0..5 {
        assert!(!throttle.should_pause());
        throttle.pace().await;
    }
    assert_eq!(throttle.calls(), 5);
}

#[tokio::test]
async fn never_pauses_before_the_first_call() {
    let throttle = ScanThrottle::new(1, Duration::from_secs(61));
    assert!(!throttle.should_pause());
}
