use std::time::Duration;

/// Day/night state of the sky clock. The two flags are not required to be exclusive.
pub trait DayNightSignal: Send + Sync {
    fn is_day(&self) -> bool;
    fn is_night(&self) -> bool;
}

/// Recurring ticker that nudges a value up during the day and down at night.
///
/// The first tick fires one full period after start. Stopping discards any
/// partially elapsed period.
#[derive(Debug, Clone)]
pub struct DriftScheduler {
    period: Duration,
    step: f32,
    elapsed: Duration,
    running: bool,
}

impl DriftScheduler {
    pub fn new(period: Duration, step: f32) -> Self {
        assert!(!period.is_zero(), "drift period must be positive");
        Self {
            period,
            step,
            elapsed: Duration::ZERO,
            running: false,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
        self.elapsed = Duration::ZERO;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Advance the ticker by `delta`, applying one drift step per completed period.
    /// Returns how many ticks fired.
    pub fn advance(
        &mut self,
        delta: Duration,
        value: &mut f32,
        signal: &dyn DayNightSignal,
    ) -> u32 {
        if !self.running {
            return 0;
        }

        self.elapsed += delta;
        let mut fired = 0;
        while self.elapsed >= self.period {
            self.elapsed -= self.period;
            self.tick(value, signal);
            fired += 1;
        }
        fired
    }

    pub fn tick(&self, value: &mut f32, signal: &dyn DayNightSignal) {
        if signal.is_night() {
            *value -= self.step;
        }
        if signal.is_day() {
            *value += self.step;
        }
    }
}
