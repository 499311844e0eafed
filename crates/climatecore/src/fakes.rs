// Recording collaborators shared by the unit tests

use crate::display::TextDisplay;
use crate::drift::DayNightSignal;
use crate::tracking::TrackingProvider;
use crate::wind::{GrowthState, ParticleSink, TreeHandle};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct FakeTracker {
    markers: Arc<Mutex<HashMap<String, (bool, f32)>>>,
}

impl FakeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&self, name: &str, tracked: bool, yaw: f32) {
        self.markers
            .lock()
            .unwrap()
            .insert(name.to_string(), (tracked, yaw));
    }
}

impl TrackingProvider for FakeTracker {
    fn is_tracked(&self, target_name: &str) -> bool {
        self.markers
            .lock()
            .unwrap()
            .get(target_name)
            .is_some_and(|(tracked, _)| *tracked)
    }

    fn yaw_degrees(&self, target_name: &str) -> f32 {
        self.markers
            .lock()
            .unwrap()
            .get(target_name)
            .map_or(0.0, |(_, yaw)| *yaw)
    }
}

#[derive(Clone, Default)]
pub struct FakeSky {
    day: Arc<Mutex<(bool, bool)>>,
}

impl FakeSky {
    pub fn night() -> Self {
        let sky = Self::default();
        sky.set(false, true);
        sky
    }

    pub fn day() -> Self {
        let sky = Self::default();
        sky.set(true, false);
        sky
    }

    pub fn set(&self, is_day: bool, is_night: bool) {
        *self.day.lock().unwrap() = (is_day, is_night);
    }
}

impl DayNightSignal for FakeSky {
    fn is_day(&self) -> bool {
        self.day.lock().unwrap().0
    }

    fn is_night(&self) -> bool {
        self.day.lock().unwrap().1
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TextWrite {
    Panel(f32),
    Target(f32),
}

#[derive(Clone, Default)]
pub struct RecordingDisplay {
    writes: Arc<Mutex<Vec<TextWrite>>>,
}

impl RecordingDisplay {
    pub fn writes(&self) -> Vec<TextWrite> {
        self.writes.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.writes.lock().unwrap().clear();
    }

    pub fn panel_writes(&self) -> Vec<f32> {
        self.writes()
            .into_iter()
            .filter_map(|write| match write {
                TextWrite::Panel(value) => Some(value),
                TextWrite::Target(_) => None,
            })
            .collect()
    }
}

impl TextDisplay for RecordingDisplay {
    fn update_panel_text(&mut self, value: f32) {
        self.writes.lock().unwrap().push(TextWrite::Panel(value));
    }

    fn update_target_text(&mut self, value: f32) {
        self.writes.lock().unwrap().push(TextWrite::Target(value));
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TreeState {
    pub growth: GrowthState,
    pub active: bool,
    pub leaf_force_x: Option<f32>,
    pub sway_speed: Option<f32>,
}

#[derive(Clone)]
pub struct FakeTree {
    state: Arc<Mutex<TreeState>>,
}

impl FakeTree {
    pub fn new(growth: GrowthState, active: bool) -> Self {
        Self {
            state: Arc::new(Mutex::new(TreeState {
                growth,
                active,
                leaf_force_x: None,
                sway_speed: None,
            })),
        }
    }

    pub fn state(&self) -> TreeState {
        self.state.lock().unwrap().clone()
    }

    pub fn set_growth(&self, growth: GrowthState) {
        self.state.lock().unwrap().growth = growth;
    }
}

impl TreeHandle for FakeTree {
    fn growth_state(&self) -> GrowthState {
        self.state.lock().unwrap().growth
    }

    fn is_active(&self) -> bool {
        self.state.lock().unwrap().active
    }

    fn set_leaf_force_x(&mut self, force: f32) {
        self.state.lock().unwrap().leaf_force_x = Some(force);
    }

    fn set_sway_speed(&mut self, speed: f32) {
        self.state.lock().unwrap().sway_speed = Some(speed);
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleState {
    pub playing: bool,
    pub force_x: Option<f32>,
    pub force_z: Option<f32>,
}

#[derive(Clone)]
pub struct FakeParticles {
    state: Arc<Mutex<ParticleState>>,
}

impl FakeParticles {
    pub fn new(playing: bool) -> Self {
        Self {
            state: Arc::new(Mutex::new(ParticleState {
                playing,
                ..Default::default()
            })),
        }
    }

    pub fn state(&self) -> ParticleState {
        self.state.lock().unwrap().clone()
    }
}

impl ParticleSink for FakeParticles {
    fn is_playing(&self) -> bool {
        self.state.lock().unwrap().playing
    }

    fn set_force_x(&mut self, force: f32) {
        self.state.lock().unwrap().force_x = Some(force);
    }

    fn set_force_z(&mut self, force: f32) {
        self.state.lock().unwrap().force_z = Some(force);
    }
}
