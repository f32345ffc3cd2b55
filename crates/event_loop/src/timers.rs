//! Timer queue (setTimeout, setInterval, clearTimeout).

use std::time::Duration;

/// Minimum period of a repeating timer.
const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Identifier handed out by [`TimerQueue::set_timeout`] and friends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u32);

/// A scheduled timer.
#[derive(Clone, Debug)]
pub struct Timer<T> {
    pub id: TimerId,
    /// Value handed back when the timer fires.
    pub payload: T,
    /// Clock reading when the timer was (re)armed.
    pub scheduled_at: Duration,
    pub delay: Duration,
    pub repeat: bool,
}

impl<T> Timer<T> {
    /// Clock reading at which the timer comes due.
    pub fn deadline(&self) -> Duration {
        self.scheduled_at + self.delay
    }
}

/// A timer that came due during [`TimerQueue::advance`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FiredTimer<T> {
    pub id: TimerId,
    pub payload: T,
    /// Clock reading at which it fired.
    pub at: Duration,
}

/// Timers on a virtual monotonic clock.
pub struct TimerQueue<T> {
    /// Pending timers.
    timers: Vec<Timer<T>>,
    /// Timer ID counter.
    timer_counter: u32,
    /// Current clock reading.
    now: Duration,
}

impl<T: Clone> TimerQueue<T> {
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            timer_counter: 0,
            now: Duration::ZERO,
        }
    }

    /// Current clock reading.
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `payload` to fire once after `delay`.
    pub fn set_timeout(&mut self, payload: T, delay: Duration) -> TimerId {
        self.add_timer(payload, delay, false)
    }

    /// Schedule `payload` to fire every `period`.
    pub fn set_interval(&mut self, payload: T, period: Duration) -> TimerId {
        self.add_timer(payload, period.max(MIN_INTERVAL), true)
    }

    fn add_timer(&mut self, payload: T, delay: Duration, repeat: bool) -> TimerId {
        self.timer_counter += 1;
        let id = TimerId(self.timer_counter);

        self.timers.push(Timer {
            id,
            payload,
            scheduled_at: self.now,
            delay,
            repeat,
        });
        tracing::trace!(timer = id.0, ?delay, repeat, "timer scheduled");

        id
    }

    /// Cancel a timer. Returns false if it already fired or was cancelled.
    pub fn clear(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        let removed = self.timers.len() != before;
        if removed {
            tracing::trace!(timer = id.0, "timer cancelled");
        }
        removed
    }

    /// Whether `id` is still waiting to fire.
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Number of pending timers.
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    /// Earliest deadline among pending timers.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.iter().map(|t| t.deadline()).min()
    }

    /// Move the clock forward by `by`, returning every timer that came due
    /// in deadline order (ties broken by scheduling order).
    pub fn advance(&mut self, by: Duration) -> Vec<FiredTimer<T>> {
        let target = self.now + by;
        let mut fired = Vec::new();

        while let Some(index) = self.next_due_index(target) {
            let deadline = self.timers[index].deadline();
            self.now = deadline;

            let timer = if self.timers[index].repeat {
                let timer = &mut self.timers[index];
                timer.scheduled_at = deadline;
                timer.clone()
            } else {
                self.timers.remove(index)
            };

            tracing::trace!(timer = timer.id.0, at = ?deadline, "timer fired");
            fired.push(FiredTimer {
                id: timer.id,
                payload: timer.payload,
                at: deadline,
            });
        }

        self.now = target;
        fired
    }

    fn next_due_index(&self, target: Duration) -> Option<usize> {
        self.timers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.deadline() <= target)
            .min_by_key(|(_, t)| (t.deadline(), t.id))
            .map(|(i, _)| i)
    }
}

impl<T: Clone> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_add_timer() {
        let mut queue = TimerQueue::new();
        let id = queue.set_timeout("reset", ms(500));
        assert_eq!(queue.pending(), 1);
        assert!(queue.is_pending(id));
        assert_eq!(queue.next_deadline(), Some(ms(500)));
    }

    #[test]
    fn test_fires_only_when_due() {
        let mut queue = TimerQueue::new();
        let id = queue.set_timeout("reset", ms(500));

        assert!(queue.advance(ms(499)).is_empty());
        let fired = queue.advance(ms(1));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].id, id);
        assert_eq!(fired[0].payload, "reset");
        assert_eq!(fired[0].at, ms(500));
        assert_eq!(queue.pending(), 0);
    }

    #[test]
    fn test_cancel_timer() {
        let mut queue = TimerQueue::new();
        let id = queue.set_timeout((), ms(10));
        assert!(queue.clear(id));
        assert!(!queue.clear(id));
        assert!(queue.advance(ms(100)).is_empty());
    }

    #[test]
    fn test_rescheduling_replaces_pending_reset() {
        let mut queue = TimerQueue::new();
        let first = queue.set_timeout(1, ms(500));
        queue.advance(ms(300));
        queue.clear(first);
        let second = queue.set_timeout(2, ms(500));

        assert!(queue.advance(ms(300)).is_empty());
        let fired = queue.advance(ms(200));
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].id, second);
        assert_eq!(fired[0].at, ms(800));
    }

    #[test]
    fn test_fire_order() {
        let mut queue = TimerQueue::new();
        queue.set_timeout("late", ms(30));
        queue.set_timeout("early", ms(10));
        queue.set_timeout("tie", ms(10));

        let fired: Vec<_> = queue.advance(ms(50)).into_iter().map(|f| f.payload).collect();
        assert_eq!(fired, vec!["early", "tie", "late"]);
        assert_eq!(queue.now(), ms(50));
    }

    #[test]
    fn test_interval_repeats() {
        let mut queue = TimerQueue::new();
        let id = queue.set_interval('x', ms(100));

        let fired = queue.advance(ms(350));
        assert_eq!(fired.len(), 3);
        assert_eq!(fired[2].at, ms(300));
        assert!(queue.is_pending(id));
        assert_eq!(queue.next_deadline(), Some(ms(400)));

        let zero = queue.set_interval('z', Duration::ZERO);
        assert_eq!(queue.advance(ms(2)).iter().filter(|f| f.id == zero).count(), 2);
    }
}
