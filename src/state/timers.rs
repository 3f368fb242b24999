// Deferred action queue.
// Single-threaded virtual clock with cancellable one-shot timers.

use std::time::Duration;

/// Handle to a scheduled timer, used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Timer<A> {
    id: TimerId,
    due: Duration,
    action: A,
}

/// One-shot timers over a virtual clock.
///
/// The clock only moves through `advance`. Due timers are released one at a
/// time by `pop_due` in deadline order, ties broken by scheduling order, so an
/// action that cancels another timer takes effect before that timer is popped.
#[derive(Debug)]
pub struct TimerQueue<A> {
    now: Duration,
    next_id: u64,
    pending: Vec<Timer<A>>,
}

impl<A> Default for TimerQueue<A> {
    fn default() -> Self {
        Self {
            now: Duration::ZERO,
            next_id: 0,
            pending: Vec::new(),
        }
    }
}

impl<A> TimerQueue<A> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time.
    #[cfg(test)]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `action` to become due after `delay`.
    pub fn schedule(&mut self, delay: Duration, action: A) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Timer {
            id,
            due: self.now + delay,
            action,
        });
        id
    }

    /// Cancel a pending timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|timer| timer.id != id);
        self.pending.len() != before
    }

    #[cfg(test)]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.iter().any(|timer| timer.id == id)
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Move the clock forward.
    pub fn advance(&mut self, elapsed: Duration) {
        self.now = self.now.saturating_add(elapsed);
    }

    /// Remove and return the earliest due action, if any.
    pub fn pop_due(&mut self) -> Option<A> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, timer)| timer.due <= self.now)
            .min_by_key(|(_, timer)| (timer.due, timer.id.0))
            .map(|(index, _)| index)?;
        Some(self.pending.remove(index).action)
    }
}
