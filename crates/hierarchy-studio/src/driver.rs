use std::time::{Duration, Instant};

use hierarchy_engine::time::Ticker;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum DriverState {
    Stopped,
    Running,
}

/// Owns the animation frame counter and the timer that advances it.
///
/// While running, every tick of the timer bumps the counter by one and asks
/// for exactly one redraw. Stopping keeps the counter where it is.
#[derive(Debug, Clone)]
pub struct FrameDriver {
    ticker: Ticker,
    frame: u64,
}

impl FrameDriver {
    pub fn new(period: Duration) -> Self {
        Self { ticker: Ticker::new(period), frame: 0 }
    }

    pub fn state(&self) -> DriverState {
        if self.ticker.is_running() { DriverState::Running } else { DriverState::Stopped }
    }

    /// Frames elapsed since the program started, counting running time only.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Starts or stops the timer. Returns `false` if already in the requested state.
    pub fn set_running(&mut self, running: bool, now: Instant) -> bool {
        match (self.state(), running) {
            (DriverState::Stopped, true) => {
                self.ticker.start(now);
                log::info!("animation started at frame {}", self.frame);
                true
            }
            (DriverState::Running, false) => {
                self.ticker.stop();
                log::info!("animation stopped at frame {}", self.frame);
                true
            }
            _ => false,
        }
    }

    /// Advances the counter if a tick is due. Returns `true` when a redraw is needed.
    pub fn poll(&mut self, now: Instant) -> bool {
        if !self.ticker.poll(now) {
            return false;
        }
        self.frame = self.frame.wrapping_add(1);
        log::trace!("tick: frame {}", self.frame);
        true
    }

    /// When the event loop must wake up next, if running.
    #[inline]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.ticker.deadline()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const P: Duration = Duration::from_millis(17);

    #[test]
    fn starts_stopped_at_frame_zero() {
        let d = FrameDriver::new(P);
        assert_eq!(d.state(), DriverState::Stopped);
        assert_eq!(d.frame(), 0);
        assert_eq!(d.next_deadline(), None);
    }

    #[test]
    fn toggle_within_one_period_keeps_counter() {
        let mut d = FrameDriver::new(P);
        let t0 = Instant::now();
        assert!(d.set_running(true, t0));
        assert!(!d.poll(t0 + Duration::from_millis(5)));
        assert!(d.set_running(false, t0 + Duration::from_millis(10)));
        assert!(!d.poll(t0 + P * 3));
        assert_eq!(d.frame(), 0);
        assert_eq!(d.state(), DriverState::Stopped);
    }

    #[test]
    fn sixty_ticks_advance_sixty_frames_one_redraw_each() {
        let mut d = FrameDriver::new(P);
        let t0 = Instant::now();
        d.set_running(true, t0);

        let mut redraws = 0;
        for k in 1..=60u32 {
            let due = t0 + P * k;
            assert_eq!(d.next_deadline(), Some(due));
            if d.poll(due) {
                redraws += 1;
            }
            // A second poll at the same instant is not a new tick.
            assert!(!d.poll(due));
        }
        assert_eq!(d.frame(), 60);
        assert_eq!(redraws, 60);
    }

    #[test]
    fn redundant_toggles_are_noops() {
        let mut d = FrameDriver::new(P);
        let t0 = Instant::now();
        assert!(!d.set_running(false, t0));
        assert!(d.set_running(true, t0));
        assert!(!d.set_running(true, t0 + Duration::from_millis(16)));
        // The schedule was not reset by the redundant start.
        assert_eq!(d.next_deadline(), Some(t0 + P));
    }

    #[test]
    fn restart_resumes_from_stopped_frame() {
        let mut d = FrameDriver::new(P);
        let t0 = Instant::now();
        d.set_running(true, t0);
        assert!(d.poll(t0 + P));
        assert!(d.poll(t0 + P * 2));
        d.set_running(false, t0 + P * 2);

        let t1 = t0 + P * 100;
        d.set_running(true, t1);
        assert!(!d.poll(t1));
        assert!(d.poll(t1 + P));
        assert_eq!(d.frame(), 3);
    }
}
