use std::time::{
    Duration,
    Instant,
};

/// One-shot deferred advance to the next question, keyed by the engine
/// generation current when it was scheduled. A content switch bumps the
/// generation, so a stale advance is discarded instead of firing against a
/// replaced entry set. At most one advance is pending at a time.
#[derive(Debug, Default)]
pub struct AdvanceTimer {
    pending: Option<Pending>,
}

#[derive(Debug)]
struct Pending {
    due: Instant,
    generation: u64,
}

impl AdvanceTimer {
    pub fn new() -> Self {
        Self { pending: None }
    }

    /// Replaces any pending advance.
    pub fn schedule(&mut self, delay: Duration, generation: u64) {
        self.pending = Some(Pending { due: Instant::now() + delay, generation });
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// True exactly once, when the deadline has passed and the generation
    /// still matches. A mismatched generation clears the timer silently.
    pub fn poll(&mut self, current_generation: u64) -> bool {
        self.poll_at(current_generation, Instant::now())
    }

    fn poll_at(&mut self, current_generation: u64, now: Instant) -> bool {
        let Some(pending) = &self.pending else {
            return false;
        };

        if pending.generation != current_generation {
            self.pending = None;
            return false;
        }

        if now >= pending.due {
            self.pending = None;
            return true;
        }
        false
    }

    /// Time until the pending advance, for the host's repaint scheduling.
    pub fn remaining(&self) -> Option<Duration> {
        self.pending.as_ref().map(|pending| pending.due.saturating_duration_since(Instant::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_after_the_deadline() {
        let mut timer = AdvanceTimer::new();
        timer.schedule(Duration::ZERO, 1);

        let later = Instant::now() + Duration::from_millis(10);
        assert!(timer.poll_at(1, later));
        assert!(!timer.poll_at(1, later));
        assert!(!timer.is_pending());
    }

    #[test]
    fn does_not_fire_before_the_deadline() {
        let mut timer = AdvanceTimer::new();
        let now = Instant::now();
        timer.schedule(Duration::from_secs(60), 1);

        assert!(!timer.poll_at(1, now));
        assert!(timer.is_pending());
        assert!(timer.remaining().is_some());
    }

    #[test]
    fn stale_generation_is_discarded_without_firing() {
        let mut timer = AdvanceTimer::new();
        timer.schedule(Duration::ZERO, 1);

        let later = Instant::now() + Duration::from_millis(10);
        assert!(!timer.poll_at(2, later));
        assert!(!timer.is_pending());
        // Nothing left to fire even for the old generation.
        assert!(!timer.poll_at(1, later));
    }

    #[test]
    fn rescheduling_replaces_the_pending_advance() {
        let mut timer = AdvanceTimer::new();
        timer.schedule(Duration::ZERO, 1);
        timer.schedule(Duration::from_secs(60), 2);

        let later = Instant::now() + Duration::from_millis(10);
        assert!(!timer.poll_at(2, later));
        assert!(timer.is_pending());
    }

    #[test]
    fn cancel_clears_the_pending_advance() {
        let mut timer = AdvanceTimer::new();
        timer.schedule(Duration::ZERO, 1);
        timer.cancel();
        assert!(!timer.poll_at(1, Instant::now() + Duration::from_millis(10)));
    }
}
