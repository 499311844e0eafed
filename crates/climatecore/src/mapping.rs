use serde::{Deserialize, Serialize};

/// Linearly remap `value` from `[from_low, from_high]` onto `[to_low, to_high]`.
///
/// No clamping is applied: values outside the input range land outside the
/// output range. `from_high == from_low` yields NaN or infinity.
pub fn map(value: f32, from_low: f32, from_high: f32, to_low: f32, to_high: f32) -> f32 {
    (value - from_low) / (from_high - from_low) * (to_high - to_low) + to_low
}

/// A fixed input/output range pair used to turn marker yaw into a domain value
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MappingRange {
    pub input_low: f32,
    pub input_high: f32,
    pub output_low: f32,
    pub output_high: f32,
}

impl MappingRange {
    pub fn new(input_low: f32, input_high: f32, output_low: f32, output_high: f32) -> Self {
        debug_assert!(
            input_high != input_low,
            "mapping input range must not be degenerate"
        );
        Self {
            input_low,
            input_high,
            output_low,
            output_high,
        }
    }

    pub fn map(&self, value: f32) -> f32 {
        map(
            value,
            self.input_low,
            self.input_high,
            self.output_low,
            self.output_high,
        )
    }
}

impl Default for MappingRange {
    /// Marker yaw 0..280 degrees onto 0..50
    fn default() -> Self {
        Self::new(0.0, 280.0, 0.0, 50.0)
    }
}
