//! Wall-clock pacing for the running simulation.

use std::time::{Duration, Instant};

pub const MIN_TICK_MS: u64 = 1;
pub const MAX_TICK_MS: u64 = 10_000;

pub fn clamp_tick_ms(ms: u64) -> u64 {
    ms.clamp(MIN_TICK_MS, MAX_TICK_MS)
}

/// Decides when the next generation is due. The caller supplies the current
/// time, so the clock itself never sleeps or spawns anything.
#[derive(Debug, Clone)]
pub struct SimulationClock {
    period: Duration,
    /// `Some` while running.
    next_tick: Option<Instant>,
}

impl SimulationClock {
    pub fn new(period_ms: u64) -> Self {
        Self {
            period: Duration::from_millis(clamp_tick_ms(period_ms)),
            next_tick: None,
        }
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn is_running(&self) -> bool {
        self.next_tick.is_some()
    }

    pub fn start(&mut self, now: Instant) {
        if self.next_tick.is_none() {
            self.next_tick = Some(now + self.period);
            log::info!("Simulation started ({} ms per generation)", self.period.as_millis());
        }
    }

    /// After this returns no tick is pending.
    pub fn pause(&mut self) {
        if self.next_tick.take().is_some() {
            log::info!("Simulation paused");
        }
    }

    /// Changes the period. A running clock restarts its schedule from `now`.
    pub fn set_period(&mut self, period_ms: u64, now: Instant) {
        self.period = Duration::from_millis(clamp_tick_ms(period_ms));
        if self.next_tick.is_some() {
            self.next_tick = Some(now + self.period);
        }
        log::info!("Generation period set to {} ms", self.period.as_millis());
    }

    /// Returns true when a tick is due and schedules the next one a full period
    /// after `now`. Missed ticks are not replayed.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_tick {
            Some(due) if now >= due => {
                self.next_tick = Some(now + self.period);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn paused_clock_never_ticks() {
        let t0 = Instant::now();
        let mut clock = SimulationClock::new(100);
        assert!(!clock.is_running());
        assert!(!clock.poll(t0 + ms(1_000)));
    }

    #[test]
    fn ticks_once_per_period_without_catch_up() {
        let t0 = Instant::now();
        let mut clock = SimulationClock::new(100);
        clock.start(t0);
        assert!(!clock.poll(t0 + ms(99)));
        assert!(clock.poll(t0 + ms(100)));
        assert!(!clock.poll(t0 + ms(150)));
        // Long stall: one tick, then a fresh period.
        assert!(clock.poll(t0 + ms(1_000)));
        assert!(!clock.poll(t0 + ms(1_050)));
        assert!(clock.poll(t0 + ms(1_100)));
    }

    #[test]
    fn pause_cancels_the_pending_tick() {
        let t0 = Instant::now();
        let mut clock = SimulationClock::new(50);
        clock.start(t0);
        clock.pause();
        assert!(!clock.is_running());
        assert!(!clock.poll(t0 + ms(500)));
    }

    #[test]
    fn period_change_reschedules() {
        let t0 = Instant::now();
        let mut clock = SimulationClock::new(100);
        clock.start(t0);
        clock.set_period(300, t0 + ms(90));
        assert!(!clock.poll(t0 + ms(100)));
        assert!(clock.poll(t0 + ms(390)));
    }

    #[test]
    fn period_is_clamped() {
        assert_eq!(SimulationClock::new(0).period(), ms(MIN_TICK_MS));
        assert_eq!(SimulationClock::new(u64::MAX).period(), ms(MAX_TICK_MS));
    }
}
