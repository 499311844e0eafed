use crate::mapping::MappingRange;
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, OnceLock};
use std::time::Duration;

pub const CONFIG_FILE: &str = "climate_config.toml";

static CONFIG: OnceLock<Mutex<ClimateConfig>> = OnceLock::new();

/// Get a copy of the current configuration, loading from file if not already loaded.
/// Falls back to the built-in defaults when the file is missing, malformed, or
/// fails [`ClimateConfig::validate`].
pub fn get_config() -> ClimateConfig {
    let config_mutex = CONFIG.get_or_init(|| {
        let config = ClimateConfig::load_from_file(CONFIG_FILE).unwrap_or_else(|err| {
            log::warn!("Could not load {CONFIG_FILE} ({err}), using defaults");
            ClimateConfig::default()
        });
        Mutex::new(config)
    });
    config_mutex
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateConfig {
    pub temperature: TemperatureConfig,
    pub wind: WindConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemperatureConfig {
    pub target_name: String,
    pub mapping: MappingRange,
    pub drift_period_secs: f32,
    pub drift_step: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindConfig {
    pub target_name: String,
    pub mapping: MappingRange,
    /// Sway speed every tree starts with, also the lower edge of the damped sway curve
    pub initial_sway_speed: f32,
    /// Sway speed for a windless tree
    pub idle_sway_speed: f32,
    /// Forces above this (and above the initial speed) are damped
    pub sway_threshold: f32,
    pub sway_divisor: f32,
    /// Added to the damped force, independent of the threshold
    pub sway_offset: f32,
    pub rain_force_factor: f32,
    pub snow_force_factor: f32,
}

impl TemperatureConfig {
    pub fn drift_period(&self) -> Duration {
        Duration::from_secs_f32(self.drift_period_secs)
    }
}

impl Default for TemperatureConfig {
    fn default() -> Self {
        Self {
            target_name: "Temperature Target".to_string(),
            mapping: MappingRange::default(),
            drift_period_secs: 1.0,
            drift_step: 0.5,
        }
    }
}

impl Default for WindConfig {
    fn default() -> Self {
        Self {
            target_name: "Wind Target".to_string(),
            mapping: MappingRange::default(),
            initial_sway_speed: 3.0,
            idle_sway_speed: 0.8,
            sway_threshold: 3.0,
            sway_divisor: 10.0,
            sway_offset: 3.0,
            rain_force_factor: 0.5,
            snow_force_factor: 0.001,
        }
    }
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            temperature: TemperatureConfig::default(),
            wind: WindConfig::default(),
        }
    }
}

impl ClimateConfig {
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let config: ClimateConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that parse but would break the controllers at runtime
    pub fn validate(&self) -> Result<(), Box<dyn std::error::Error>> {
        let period = self.temperature.drift_period_secs;
        if !period.is_finite() || period <= 0.0 {
            return Err(
                format!("temperature.drift_period_secs must be positive, got {period}").into(),
            );
        }
        validate_mapping("temperature.mapping", &self.temperature.mapping)?;
        validate_mapping("wind.mapping", &self.wind.mapping)?;
        if self.wind.sway_divisor == 0.0 {
            return Err("wind.sway_divisor must not be zero".into());
        }
        Ok(())
    }
}

fn validate_mapping(section: &str, range: &MappingRange) -> Result<(), Box<dyn std::error::Error>> {
    let values = [range.input_low, range.input_high, range.output_low, range.output_high];
    if values.iter().any(|value| !value.is_finite()) {
        return Err(format!("{section} must only contain finite values").into());
    }
    if range.input_low == range.input_high {
        return Err(format!("{section} input range is degenerate ({})", range.input_low).into());
    }
    Ok(())
}
