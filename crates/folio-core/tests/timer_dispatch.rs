//! Integration tests for driving timers from a host loop.

use std::sync::Arc;
use std::time::Duration;

use folio_core::{Clock, ManualClock, Signal, TimerKind, TimerManager};
use parking_lot::Mutex;

#[test]
fn handler_restarting_timer_keeps_cadence() {
    let clock = ManualClock::new();
    let start = clock.now();
    let mut timers = TimerManager::new(Arc::new(clock.clone()));

    // A one-shot that, when handled, starts a repeating timer from its own
    // fire time rather than from the (later) poll time.
    let resume = timers.start_one_shot(Duration::from_millis(300));
    let mut repeating = None;
    let mut ticks = Vec::new();

    clock.advance(Duration::from_millis(1_000));
    while let Some(expired) = timers.pop_expired() {
        if expired.id == resume {
            repeating =
                Some(timers.start_repeating_from(expired.fire_time, Duration::from_millis(200)));
        } else if Some(expired.id) == repeating {
            ticks.push(expired.fire_time - start);
        }
    }

    assert_eq!(
        ticks,
        vec![
            Duration::from_millis(500),
            Duration::from_millis(700),
            Duration::from_millis(900)
        ]
    );
    let repeating = repeating.unwrap();
    assert_eq!(timers.kind(repeating), Some(TimerKind::Repeating));
}

#[test]
fn signal_reports_fired_timers() {
    let clock = ManualClock::new();
    let mut timers = TimerManager::new(Arc::new(clock.clone()));
    let fired = Signal::<usize>::new();
    let count = Arc::new(Mutex::new(0));

    let count_clone = count.clone();
    fired.connect(move |n| *count_clone.lock() += n);

    timers.start_one_shot(Duration::from_millis(10));
    timers.start_one_shot(Duration::from_millis(20));
    clock.advance(Duration::from_millis(25));
    fired.emit(timers.process_expired().len());

    assert_eq!(*count.lock(), 2);
    assert_eq!(timers.active_count(), 0);
}
