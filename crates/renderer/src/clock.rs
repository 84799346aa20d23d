use std::time::Instant;

/// Rate used to derive `iFrame` from elapsed time.
pub const NOMINAL_FRAME_RATE: f64 = 60.0;

/// Measures time since the active program was installed.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    start: Instant,
}

impl FrameClock {
    pub fn new(now: Instant) -> Self {
        Self { start: now }
    }

    pub fn reset(&mut self, now: Instant) {
        self.start = now;
    }

    pub fn start(&self) -> Instant {
        self.start
    }

    /// Seconds since the last reset; never negative.
    pub fn elapsed(&self, now: Instant) -> f64 {
        now.saturating_duration_since(self.start).as_secs_f64()
    }
}

/// `floor(elapsed * 60)`, saturating at `i32::MAX`.
pub fn nominal_frame_index(elapsed: f64) -> i32 {
    (elapsed * NOMINAL_FRAME_RATE).floor() as i32
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn frame_index_follows_nominal_rate() {
        assert_eq!(nominal_frame_index(0.0), 0);
        assert_eq!(nominal_frame_index(0.0166), 0);
        assert_eq!(nominal_frame_index(1.999), 119);
        assert_eq!(nominal_frame_index(2.0), 120);
    }

    #[test]
    fn frame_index_saturates() {
        assert_eq!(nominal_frame_index(f64::MAX), i32::MAX);
    }

    #[test]
    fn reset_restarts_elapsed_time() {
        let start = Instant::now();
        let mut clock = FrameClock::new(start);
        let later = start + Duration::from_millis(2_500);
        assert!((clock.elapsed(later) - 2.5).abs() < 1e-9);

        clock.reset(later);
        assert_eq!(clock.elapsed(later), 0.0);
        assert!((clock.elapsed(later + Duration::from_millis(500)) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn elapsed_before_start_is_zero() {
        let start = Instant::now() + Duration::from_secs(1);
        let clock = FrameClock::new(start);
        assert_eq!(clock.elapsed(Instant::now()), 0.0);
    }
}
