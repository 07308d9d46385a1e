//! Frame-rate independent tick pacing.
//!
//! The browser calls the draw callback at whatever rate it likes. `FrameClock`
//! accumulates the real time between frames and releases it as whole combat
//! ticks, carrying the remainder into the next frame.

/// Longest gap between two frames that is replayed. A tab that was in the
/// background for minutes resumes with at most one second of catch-up.
const MAX_FRAME_GAP_MS: f64 = 1_000.0;

pub struct FrameClock {
    tick_ms: f64,
    carry_ms: f64,
    last_frame_ms: Option<f64>,
}

impl FrameClock {
    pub fn new(tick_ms: u64) -> Self {
        Self {
            tick_ms: tick_ms as f64,
            carry_ms: 0.0,
            last_frame_ms: None,
        }
    }

    /// Feed the timestamp of the current frame; returns how many ticks are due.
    pub fn advance(&mut self, now_ms: f64) -> u32 {
        let gap = match self.last_frame_ms.replace(now_ms) {
            Some(prev) => (now_ms - prev).clamp(0.0, MAX_FRAME_GAP_MS),
            None => 0.0,
        };
        self.carry_ms += gap;
        let due = (self.carry_ms / self.tick_ms).floor();
        self.carry_ms -= due * self.tick_ms;
        due as u32
    }

    /// Forget accumulated time, e.g. after a restart.
    pub fn discard_pending(&mut self) {
        self.carry_ms = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_frame_is_free() {
        let mut clock = FrameClock::new(100);
        assert_eq!(clock.advance(5_000.0), 0);
    }

    #[test]
    fn whole_ticks_with_carry() {
        let mut clock = FrameClock::new(100);
        clock.advance(0.0);
        assert_eq!(clock.advance(250.0), 2);
        // 50ms carried + 60ms
        assert_eq!(clock.advance(310.0), 1);
        assert_eq!(clock.advance(390.0), 0);
    }

    #[test]
    fn sixty_fps_for_a_second() {
        let mut clock = FrameClock::new(100);
        clock.advance(0.0);
        let total: u32 = (1..=60).map(|i| clock.advance(i as f64 * 1000.0 / 60.0)).sum();
        assert!((9..=10).contains(&total), "got {}", total);
    }

    #[test]
    fn long_gap_is_clamped() {
        let mut clock = FrameClock::new(100);
        clock.advance(0.0);
        assert_eq!(clock.advance(60_000.0), 10);
    }

    #[test]
    fn backwards_time_is_ignored() {
        let mut clock = FrameClock::new(100);
        clock.advance(1_000.0);
        assert_eq!(clock.advance(500.0), 0);
        assert_eq!(clock.advance(600.0), 1);
    }

    #[test]
    fn discard_pending_drops_carry() {
        let mut clock = FrameClock::new(100);
        clock.advance(0.0);
        clock.advance(90.0);
        clock.discard_pending();
        assert_eq!(clock.advance(150.0), 0);
    }
}
