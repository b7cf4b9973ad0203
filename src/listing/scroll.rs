use std::time::{Duration, Instant};

/// Quiet period after the last scroll event before the window refreshes.
pub const DEBOUNCE_SCROLL_MS: u64 = 50;

/// Coalesces bursts of scroll events into a single window refresh.
///
/// Each scroll event replaces the pending deadline; the refresh becomes due
/// once the deadline passes with no further events. Callers poll with
/// [`ScrollCoordinator::take_due`] from their tick loop.
#[derive(Debug, Clone)]
pub struct ScrollCoordinator {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Default for ScrollCoordinator {
    fn default() -> Self {
        Self::new(Duration::from_millis(DEBOUNCE_SCROLL_MS))
    }
}

impl ScrollCoordinator {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    /// Record a scroll event at `now`, cancelling any pending refresh.
    pub fn on_scroll(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    /// Whether a refresh is scheduled.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Consume the pending refresh if its deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop any pending refresh, e.g. after the window was rebuilt anyway.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_due_without_scroll() {
        let mut coord = ScrollCoordinator::default();
        assert!(!coord.is_pending());
        assert!(!coord.take_due(Instant::now()));
    }

    #[test]
    fn refresh_due_after_quiet_period() {
        let mut coord = ScrollCoordinator::default();
        let start = Instant::now();
        coord.on_scroll(start);
        assert!(!coord.take_due(start + Duration::from_millis(49)));
        assert!(coord.take_due(start + Duration::from_millis(50)));
        // Consumed: a second poll does nothing.
        assert!(!coord.take_due(start + Duration::from_millis(500)));
    }

    #[test]
    fn burst_of_events_yields_one_refresh() {
        let mut coord = ScrollCoordinator::default();
        let start = Instant::now();
        let mut refreshes = 0;
        for step in 0..20u64 {
            let now = start + Duration::from_millis(step * 10);
            coord.on_scroll(now);
            if coord.take_due(now) {
                refreshes += 1;
            }
        }
        let last_event = start + Duration::from_millis(190);
        assert!(!coord.take_due(last_event + Duration::from_millis(40)));
        if coord.take_due(last_event + Duration::from_millis(50)) {
            refreshes += 1;
        }
        assert_eq!(refreshes, 1);
    }

    #[test]
    fn cancel_drops_pending_refresh() {
        let mut coord = ScrollCoordinator::new(Duration::from_millis(10));
        let start = Instant::now();
        coord.on_scroll(start);
        coord.cancel();
        assert!(!coord.take_due(start + Duration::from_secs(1)));
    }
}
