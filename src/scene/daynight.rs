use crate::scene::components::Sun;
use bevy::prelude::*;
use std::f32::consts::TAU;

/// Sun position over a looping day. Angle 0 is sunrise, PI is sunset.
#[derive(Resource, Clone)]
pub struct DayNightCycle {
    pub sun_angle: f32,
    pub day_length_secs: f32,
}

impl Default for DayNightCycle {
    fn default() -> Self {
        Self {
            sun_angle: 0.0,
            day_length_secs: 120.0,
        }
    }
}

impl DayNightCycle {
    pub fn advance(&mut self, delta_secs: f32) {
        self.sun_angle = (self.sun_angle + delta_secs / self.day_length_secs * TAU).rem_euclid(TAU);
    }

    pub fn is_day(&self) -> bool {
        self.sun_angle.sin() > 0.0
    }

    pub fn is_night(&self) -> bool {
        !self.is_day()
    }
}

pub fn advance_day_night(time: Res<Time>, mut cycle: ResMut<DayNightCycle>) {
    let was_day = cycle.is_day();
    cycle.advance(time.delta_secs());
    if was_day != cycle.is_day() {
        info!("{}", if cycle.is_day() { "Sunrise" } else { "Sunset" });
    }
}

pub fn rotate_sun(cycle: Res<DayNightCycle>, mut sun_q: Query<&mut Transform, With<Sun>>) {
    for mut transform in sun_q.iter_mut() {
        transform.rotation = Quat::from_rotation_x(-cycle.sun_angle);
    }
}
