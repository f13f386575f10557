use std::time::{Duration, Instant};

/// Periodic tick source driven by polling.
///
/// The event loop asks for [`deadline`](Self::deadline), sleeps until then and
/// calls [`poll`](Self::poll). Each poll at or past the deadline fires exactly
/// one tick. Missed periods are coalesced: after a stall the next deadline is
/// one period from `now`, not a burst of catch-up ticks.
///
/// The first tick fires one full period after [`start`](Self::start).
#[derive(Debug, Clone)]
pub struct Ticker {
    period: Duration,
    next: Option<Instant>,
}

impl Ticker {
    pub fn new(period: Duration) -> Self {
        debug_assert!(!period.is_zero(), "Ticker period must be non-zero");
        Self { period, next: None }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.next.is_some()
    }

    /// Next instant at which [`poll`](Self::poll) will fire, if running.
    #[inline]
    pub fn deadline(&self) -> Option<Instant> {
        self.next
    }

    /// Starts ticking. Has no effect if already running.
    pub fn start(&mut self, now: Instant) {
        if self.next.is_none() {
            self.next = Some(now + self.period);
        }
    }

    /// Stops ticking. Has no effect if already stopped.
    pub fn stop(&mut self) {
        self.next = None;
    }

    /// Returns `true` if a tick fired at `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next else { return false };
        if now < due {
            return false;
        }

        let mut next = due + self.period;
        if next <= now {
            next = now + self.period;
        }
        self.next = Some(next);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: Duration = Duration::from_millis(17);

    #[test]
    fn stopped_ticker_never_fires() {
        let mut t = Ticker::new(P);
        assert!(!t.poll(Instant::now() + P * 10));
        assert_eq!(t.deadline(), None);
    }

    #[test]
    fn first_tick_is_one_period_after_start() {
        let mut t = Ticker::new(P);
        let t0 = Instant::now();
        t.start(t0);
        assert!(!t.poll(t0 + P - Duration::from_millis(1)));
        assert!(t.poll(t0 + P));
        assert_eq!(t.deadline(), Some(t0 + P * 2));
    }

    #[test]
    fn late_poll_coalesces_missed_ticks() {
        let mut t = Ticker::new(P);
        let t0 = Instant::now();
        t.start(t0);
        let late = t0 + P * 5;
        assert!(t.poll(late));
        assert!(!t.poll(late));
        assert_eq!(t.deadline(), Some(late + P));
    }

    #[test]
    fn restart_while_running_keeps_schedule() {
        let mut t = Ticker::new(P);
        let t0 = Instant::now();
        t.start(t0);
        t.start(t0 + Duration::from_millis(10));
        assert_eq!(t.deadline(), Some(t0 + P));
    }

    #[test]
    fn stop_clears_deadline() {
        let mut t = Ticker::new(P);
        let t0 = Instant::now();
        t.start(t0);
        t.stop();
        assert!(!t.is_running());
        assert!(!t.poll(t0 + P));
    }
}
