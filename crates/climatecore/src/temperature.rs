use crate::config::TemperatureConfig;
use crate::display::TextDisplay;
use crate::drift::{DayNightSignal, DriftScheduler};
use crate::tracking::{AcceptBound, TrackedValueSampler, TrackingProvider};
use std::time::Duration;

/// Marker-driven ambient temperature with day/night drift.
///
/// `target_temperature` only follows the marker. Whenever drift pulls
/// `temperature` away from it the panel is rewritten on every update until
/// the marker realigns the two.
pub struct TemperatureController {
    pub temperature: f32,
    pub target_temperature: f32,
    sampler: TrackedValueSampler,
    drift: DriftScheduler,
    tracking: Box<dyn TrackingProvider>,
    sky: Box<dyn DayNightSignal>,
    display: Box<dyn TextDisplay>,
}

impl TemperatureController {
    /// Build the controller and start its drift ticker
    pub fn new(
        config: &TemperatureConfig,
        tracking: Box<dyn TrackingProvider>,
        sky: Box<dyn DayNightSignal>,
        mut display: Box<dyn TextDisplay>,
    ) -> Self {
        display.update_panel_text(0.0);

        let mut drift = DriftScheduler::new(config.drift_period(), config.drift_step);
        drift.start();

        Self {
            temperature: 0.0,
            target_temperature: 0.0,
            sampler: TrackedValueSampler::new(
                config.target_name.clone(),
                config.mapping,
                AcceptBound::Exclusive,
            ),
            drift,
            tracking,
            sky,
            display,
        }
    }

    /// Per-frame update: read the marker, then resync the panel
    pub fn update(&mut self) {
        self.update_from_target();
        self.sync_panel();
    }

    /// Last temperature accepted from the marker
    pub fn last_from_target(&self) -> f32 {
        self.sampler.shadow()
    }

    pub fn drift(&self) -> &DriftScheduler {
        &self.drift
    }

    pub fn drift_mut(&mut self) -> &mut DriftScheduler {
        &mut self.drift
    }

    /// Advance the drift ticker by a frame's worth of time
    pub fn advance_drift(&mut self, delta: Duration) -> u32 {
        let fired = self
            .drift
            .advance(delta, &mut self.temperature, self.sky.as_ref());
        if fired > 0 {
            log::debug!("Temperature drifted to {:.2}", self.temperature);
        }
        fired
    }

    fn update_from_target(&mut self) {
        if let Some(mapped) = self.sampler.sample(self.tracking.as_ref()) {
            self.temperature = mapped;
            self.target_temperature = self.temperature;

            self.display.update_target_text(self.target_temperature);
            self.display.update_panel_text(self.temperature);
        }
    }

    fn sync_panel(&mut self) {
        if self.temperature != self.target_temperature {
            self.display.update_panel_text(self.temperature);
        }
    }
}
