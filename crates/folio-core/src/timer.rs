//! Timer system for Folio.
//!
//! Provides one-shot and repeating timers driven by a pluggable [`Clock`].
//! The host calls [`TimerManager::pop_expired`] from its event loop and
//! dispatches each expired timer before popping the next one, so a handler
//! that stops or restarts timers is always seen by the following pop.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use slotmap::{new_key_type, SlotMap};

use crate::error::{Result, TimerError};
use crate::logging::targets;

new_key_type! {
    /// A unique identifier for a timer.
    pub struct TimerId;
}

/// Shortest interval a repeating timer may use.
///
/// A zero interval would make a repeating timer expire forever within a
/// single `pop_expired` loop.
const MIN_REPEAT_INTERVAL: Duration = Duration::from_millis(1);

/// A source of the current time.
pub trait Clock: Send + Sync + fmt::Debug {
    /// The current instant.
    fn now(&self) -> Instant;
}

/// The real monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// Clones share the same underlying instant, so a test can hand one clone to
/// a [`TimerManager`] and advance time through another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    now: Arc<Mutex<Instant>>,
}

impl ManualClock {
    /// Create a manual clock starting at the current real instant.
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Create a manual clock starting at `start`.
    pub fn starting_at(start: Instant) -> Self {
        Self {
            now: Arc::new(Mutex::new(start)),
        }
    }

    /// Move the clock forward by `delta`.
    pub fn advance(&self, delta: Duration) {
        *self.now.lock() += delta;
    }

    /// Time elapsed since `origin` according to this clock.
    pub fn elapsed_since(&self, origin: Instant) -> Duration {
        self.now().saturating_duration_since(origin)
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.now.lock()
    }
}

/// The type of timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    /// Fires once after the specified duration.
    OneShot,
    /// Fires repeatedly at the specified interval.
    Repeating,
}

/// A timer that reached its fire time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpiredTimer {
    /// The timer that fired.
    pub id: TimerId,
    /// The instant the timer was scheduled to fire at.
    ///
    /// This may be earlier than the clock's current time when the host polls
    /// late; handlers that schedule follow-up timers should start from here
    /// to keep cadence exact.
    pub fire_time: Instant,
}

#[derive(Debug)]
struct TimerData {
    next_fire: Instant,
    interval: Duration,
    kind: TimerKind,
}

/// An entry in the timer queue (min-heap by fire time, then by insertion).
#[derive(Debug, Clone, Copy)]
struct TimerQueueEntry {
    id: TimerId,
    fire_time: Instant,
    sequence: u64,
}

impl PartialEq for TimerQueueEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_time == other.fire_time && self.sequence == other.sequence
    }
}

impl Eq for TimerQueueEntry {}

impl PartialOrd for TimerQueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerQueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap (BinaryHeap is max-heap by default).
        other
            .fire_time
            .cmp(&self.fire_time)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Manages a set of timers against a clock.
pub struct TimerManager {
    clock: Arc<dyn Clock>,
    timers: SlotMap<TimerId, TimerData>,
    /// Pending fires. Entries for stopped timers are skipped lazily.
    queue: BinaryHeap<TimerQueueEntry>,
    sequence: u64,
}

impl TimerManager {
    /// Create a timer manager reading time from `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            timers: SlotMap::with_key(),
            queue: BinaryHeap::new(),
            sequence: 0,
        }
    }

    /// Create a timer manager on the real monotonic clock.
    pub fn with_system_clock() -> Self {
        Self::new(Arc::new(SystemClock))
    }

    /// The current instant according to this manager's clock.
    pub fn now(&self) -> Instant {
        self.clock.now()
    }

    /// Start a one-shot timer that fires after `duration`.
    ///
    /// Returns the timer ID that can be used to cancel the timer.
    pub fn start_one_shot(&mut self, duration: Duration) -> TimerId {
        let now = self.now();
        self.start_one_shot_from(now, duration)
    }

    /// Start a one-shot timer that fires `duration` after `origin`.
    pub fn start_one_shot_from(&mut self, origin: Instant, duration: Duration) -> TimerId {
        self.insert(origin + duration, duration, TimerKind::OneShot)
    }

    /// Start a repeating timer that fires every `interval`.
    ///
    /// The first fire occurs after one full `interval`.
    pub fn start_repeating(&mut self, interval: Duration) -> TimerId {
        let now = self.now();
        self.start_repeating_from(now, interval)
    }

    /// Start a repeating timer whose first fire is one `interval` after `origin`.
    pub fn start_repeating_from(&mut self, origin: Instant, interval: Duration) -> TimerId {
        let interval = interval.max(MIN_REPEAT_INTERVAL);
        self.insert(origin + interval, interval, TimerKind::Repeating)
    }

    fn insert(&mut self, next_fire: Instant, interval: Duration, kind: TimerKind) -> TimerId {
        let id = self.timers.insert(TimerData {
            next_fire,
            interval,
            kind,
        });
        self.enqueue(id, next_fire);
        tracing::trace!(target: targets::TIMER, ?id, ?kind, ?interval, "timer started");
        id
    }

    fn enqueue(&mut self, id: TimerId, fire_time: Instant) {
        self.sequence += 1;
        self.queue.push(TimerQueueEntry {
            id,
            fire_time,
            sequence: self.sequence,
        });
    }

    /// Stop and remove a timer.
    ///
    /// Returns `Ok(())` if the timer was found and removed, or an error if not found.
    pub fn stop(&mut self, id: TimerId) -> Result<()> {
        if self.timers.remove(id).is_some() {
            tracing::trace!(target: targets::TIMER, ?id, "timer stopped");
            Ok(())
        } else {
            Err(TimerError::InvalidTimerId.into())
        }
    }

    /// Stop every timer.
    pub fn clear(&mut self) {
        self.timers.clear();
        self.queue.clear();
    }

    /// Check if a timer is currently active.
    pub fn is_active(&self, id: TimerId) -> bool {
        self.timers.contains_key(id)
    }

    /// The kind of an active timer.
    pub fn kind(&self, id: TimerId) -> Option<TimerKind> {
        self.timers.get(id).map(|t| t.kind)
    }

    /// The next scheduled fire time of an active timer.
    pub fn next_fire(&self, id: TimerId) -> Option<Instant> {
        self.timers.get(id).map(|t| t.next_fire)
    }

    fn discard_stale(&mut self) {
        while let Some(entry) = self.queue.peek() {
            let live = self
                .timers
                .get(entry.id)
                .is_some_and(|t| t.next_fire == entry.fire_time);
            if live {
                break;
            }
            self.queue.pop();
        }
    }

    /// Get the duration until the next timer fires, if any.
    ///
    /// Returns `None` if there are no active timers.
    pub fn time_until_next(&mut self) -> Option<Duration> {
        self.discard_stale();
        let now = self.now();
        self.queue
            .peek()
            .map(|entry| entry.fire_time.saturating_duration_since(now))
    }

    /// Pop the earliest timer whose fire time has passed.
    ///
    /// One-shot timers are removed. Repeating timers are rescheduled one
    /// interval after their scheduled fire time, so a late poll fires them
    /// once per elapsed interval.
    pub fn pop_expired(&mut self) -> Option<ExpiredTimer> {
        self.discard_stale();
        let now = self.now();

        let entry = *self.queue.peek()?;
        if entry.fire_time > now {
            return None;
        }
        self.queue.pop();

        let id = entry.id;
        let timer = self.timers.get_mut(id)?;
        tracing::trace!(target: targets::TIMER, ?id, "timer fired");

        match timer.kind {
            TimerKind::OneShot => {
                self.timers.remove(id);
            }
            TimerKind::Repeating => {
                timer.next_fire = entry.fire_time + timer.interval;
                let next = timer.next_fire;
                self.enqueue(id, next);
            }
        }

        Some(ExpiredTimer {
            id,
            fire_time: entry.fire_time,
        })
    }

    /// Process all timers that should fire now.
    ///
    /// Returns the expired timers in fire order. Handlers that stop other
    /// timers should use [`pop_expired`](Self::pop_expired) instead.
    #[tracing::instrument(skip(self), target = "folio_core::timer", level = "trace")]
    pub fn process_expired(&mut self) -> Vec<ExpiredTimer> {
        std::iter::from_fn(|| self.pop_expired()).collect()
    }

    /// Get the number of active timers.
    pub fn active_count(&self) -> usize {
        self.timers.len()
    }
}

impl Default for TimerManager {
    fn default() -> Self {
        Self::with_system_clock()
    }
}

impl fmt::Debug for TimerManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerManager")
            .field("clock", &self.clock)
            .field("active", &self.timers.len())
            .finish()
    }
}

static_assertions::assert_impl_all!(TimerManager: Send, Sync);
static_assertions::assert_impl_all!(ManualClock: Send, Sync, Clone);

#[cfg(test)]
mod tests {
    use super::*;

    fn manual() -> (ManualClock, TimerManager) {
        let clock = ManualClock::new();
        let timers = TimerManager::new(Arc::new(clock.clone()));
        (clock, timers)
    }

    #[test]
    fn test_one_shot_fires_once() {
        let (clock, mut timers) = manual();
        let id = timers.start_one_shot(Duration::from_millis(50));

        clock.advance(Duration::from_millis(49));
        assert!(timers.pop_expired().is_none());

        clock.advance(Duration::from_millis(1));
        let fired = timers.pop_expired().unwrap();
        assert_eq!(fired.id, id);
        assert!(!timers.is_active(id));

        clock.advance(Duration::from_secs(1));
        assert!(timers.pop_expired().is_none());
    }

    #[test]
    fn test_repeating_catches_up_per_interval() {
        let (clock, mut timers) = manual();
        let start = clock.now();
        let id = timers.start_repeating(Duration::from_millis(100));

        clock.advance(Duration::from_millis(350));
        let fired = timers.process_expired();
        let times: Vec<_> = fired.iter().map(|t| t.fire_time - start).collect();
        assert_eq!(
            times,
            vec![
                Duration::from_millis(100),
                Duration::from_millis(200),
                Duration::from_millis(300)
            ]
        );
        assert_eq!(timers.next_fire(id), Some(start + Duration::from_millis(400)));
    }

    #[test]
    fn test_stop_prevents_fire() {
        let (clock, mut timers) = manual();
        let id = timers.start_one_shot(Duration::from_millis(10));
        assert!(timers.stop(id).is_ok());
        assert!(timers.stop(id).is_err());

        clock.advance(Duration::from_millis(20));
        assert!(timers.pop_expired().is_none());
        assert_eq!(timers.active_count(), 0);
    }

    #[test]
    fn test_fire_order_is_by_time_then_insertion() {
        let (clock, mut timers) = manual();
        let late = timers.start_one_shot(Duration::from_millis(30));
        let first = timers.start_one_shot(Duration::from_millis(10));
        let second = timers.start_one_shot(Duration::from_millis(10));

        clock.advance(Duration::from_millis(30));
        let ids: Vec<_> = timers.process_expired().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![first, second, late]);
    }

    #[test]
    fn test_time_until_next_skips_stopped() {
        let (_clock, mut timers) = manual();
        let soon = timers.start_one_shot(Duration::from_millis(10));
        timers.start_one_shot(Duration::from_millis(40));
        timers.stop(soon).unwrap();

        assert_eq!(timers.time_until_next(), Some(Duration::from_millis(40)));
        timers.clear();
        assert_eq!(timers.time_until_next(), None);
    }

    #[test]
    fn test_zero_interval_is_clamped() {
        let (clock, mut timers) = manual();
        timers.start_repeating(Duration::ZERO);
        clock.advance(Duration::from_millis(3));
        assert_eq!(timers.process_expired().len(), 3);
    }
}
