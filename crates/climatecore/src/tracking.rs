use crate::mapping::MappingRange;

/// Source of marker tracking status and pose
pub trait TrackingProvider: Send + Sync {
    fn is_tracked(&self, target_name: &str) -> bool;

    /// Heading of the marker around its up axis, in degrees
    fn yaw_degrees(&self, target_name: &str) -> f32;

    fn sample(&self, target_name: &str) -> TrackingSample {
        let is_tracked = self.is_tracked(target_name);
        let yaw_degrees = if is_tracked {
            self.yaw_degrees(target_name)
        } else {
            0.0
        };
        TrackingSample {
            is_tracked,
            yaw_degrees,
        }
    }
}

/// Tracking state of a single marker for one frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackingSample {
    pub is_tracked: bool,
    pub yaw_degrees: f32,
}

/// How the top of the input range is treated when validating a raw yaw
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcceptBound {
    /// yaw < input_high
    Exclusive,
    /// yaw <= input_high
    Inclusive,
}

impl AcceptBound {
    pub fn admits(self, yaw: f32, upper: f32) -> bool {
        match self {
            AcceptBound::Exclusive => yaw < upper,
            AcceptBound::Inclusive => yaw <= upper,
        }
    }
}

/// Turns a tracked marker's yaw into a domain value, emitting only real changes.
///
/// The shadow holds the last value accepted from the marker. Values written
/// to the domain by other paths (drift) never touch it.
#[derive(Debug, Clone)]
pub struct TrackedValueSampler {
    target_name: String,
    range: MappingRange,
    bound: AcceptBound,
    shadow: f32,
}

impl TrackedValueSampler {
    pub fn new(target_name: impl Into<String>, range: MappingRange, bound: AcceptBound) -> Self {
        Self {
            target_name: target_name.into(),
            range,
            bound,
            shadow: 0.0,
        }
    }

    /// Last value accepted from the marker
    pub fn shadow(&self) -> f32 {
        self.shadow
    }

    pub fn sample(&mut self, provider: &dyn TrackingProvider) -> Option<f32> {
        let sample = provider.sample(&self.target_name);
        self.accept(sample)
    }

    pub fn accept(&mut self, sample: TrackingSample) -> Option<f32> {
        if !sample.is_tracked {
            log::trace!("{} not tracked", self.target_name);
            return None;
        }

        let mapped = self.range.map(sample.yaw_degrees);

        if mapped != self.shadow && self.bound.admits(sample.yaw_degrees, self.range.input_high) {
            log::debug!(
                "{} yaw {:.2} accepted as {:.3}",
                self.target_name,
                sample.yaw_degrees,
                mapped
            );
            self.shadow = mapped;
            Some(mapped)
        } else {
            None
        }
    }
}
