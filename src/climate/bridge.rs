// Shared state between the ECS world and the climate controllers.
//
// Controllers own their collaborators for their whole lifetime, so each
// collaborator is a thin link into one `EffectBoard`. Scene systems publish
// marker poses, sky state, tree growth and emitter status into the board
// before the controllers run, and copy the resulting effects back onto
// components afterwards.

use bevy::math::{EulerRot, Vec3};
use bevy::prelude::{Entity, Resource, Transform};
use climatecore::display::TextDisplay;
use climatecore::drift::DayNightSignal;
use climatecore::tracking::{TrackingProvider, TrackingSample};
use climatecore::wind::{GrowthState, ParticleSink, TreeHandle};
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadoutKind {
    Temperature,
    Wind,
}

/// Latest values written to a domain's text panels
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ReadoutText {
    pub panel: Option<f32>,
    pub target: Option<f32>,
    pub revision: u64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeEffect {
    pub growth: GrowthState,
    pub active: bool,
    pub leaf_force_x: f32,
    pub sway_speed: f32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EmitterEffect {
    pub playing: bool,
    pub force: Vec3,
}

#[derive(Debug, Default)]
pub struct EffectState {
    pub markers: HashMap<String, TrackingSample>,
    pub is_day: bool,
    pub is_night: bool,
    pub readouts: HashMap<ReadoutKind, ReadoutText>,
    pub trees: HashMap<Entity, TreeEffect>,
    pub emitters: HashMap<Entity, EmitterEffect>,
}

#[derive(Resource, Clone, Default)]
pub struct EffectBoard {
    state: Arc<RwLock<EffectState>>,
}

impl EffectBoard {
    pub fn read(&self) -> RwLockReadGuard<'_, EffectState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn write(&self) -> RwLockWriteGuard<'_, EffectState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn tracking(&self) -> MarkerFeed {
        MarkerFeed(self.clone())
    }

    pub fn sky(&self) -> SkyFeed {
        SkyFeed(self.clone())
    }

    pub fn readout(&self, kind: ReadoutKind) -> ReadoutLink {
        ReadoutLink {
            board: self.clone(),
            kind,
        }
    }

    pub fn tree(&self, entity: Entity) -> TreeLink {
        TreeLink {
            board: self.clone(),
            entity,
        }
    }

    pub fn emitter(&self, entity: Entity) -> EmitterLink {
        EmitterLink {
            board: self.clone(),
            entity,
        }
    }
}

/// Heading about the Y axis in degrees, wrapped into [0, 360)
pub fn yaw_degrees(transform: &Transform) -> f32 {
    let (yaw, _, _) = transform.rotation.to_euler(EulerRot::YXZ);
    let degrees = yaw.to_degrees().rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if degrees >= 360.0 { 0.0 } else { degrees }
}

pub struct MarkerFeed(EffectBoard);

impl TrackingProvider for MarkerFeed {
    fn is_tracked(&self, target_name: &str) -> bool {
        self.0
            .read()
            .markers
            .get(target_name)
            .is_some_and(|sample| sample.is_tracked)
    }

    fn yaw_degrees(&self, target_name: &str) -> f32 {
        self.0
            .read()
            .markers
            .get(target_name)
            .map_or(0.0, |sample| sample.yaw_degrees)
    }
}

pub struct SkyFeed(EffectBoard);

impl DayNightSignal for SkyFeed {
    fn is_day(&self) -> bool {
        self.0.read().is_day
    }

    fn is_night(&self) -> bool {
        self.0.read().is_night
    }
}

pub struct ReadoutLink {
    board: EffectBoard,
    kind: ReadoutKind,
}

impl TextDisplay for ReadoutLink {
    fn update_panel_text(&mut self, value: f32) {
        let mut state = self.board.write();
        let readout = state.readouts.entry(self.kind).or_default();
        readout.panel = Some(value);
        readout.revision += 1;
    }

    fn update_target_text(&mut self, value: f32) {
        let mut state = self.board.write();
        let readout = state.readouts.entry(self.kind).or_default();
        readout.target = Some(value);
        readout.revision += 1;
    }
}

pub struct TreeLink {
    board: EffectBoard,
    entity: Entity,
}

impl TreeLink {
    fn with_tree(&self, apply: impl FnOnce(&mut TreeEffect)) {
        if let Some(tree) = self.board.write().trees.get_mut(&self.entity) {
            apply(tree);
        }
    }
}

impl TreeHandle for TreeLink {
    fn growth_state(&self) -> GrowthState {
        self.board
            .read()
            .trees
            .get(&self.entity)
            .map_or(GrowthState::Dead, |tree| tree.growth)
    }

    fn is_active(&self) -> bool {
        self.board
            .read()
            .trees
            .get(&self.entity)
            .is_some_and(|tree| tree.active)
    }

    fn set_leaf_force_x(&mut self, force: f32) {
        self.with_tree(|tree| tree.leaf_force_x = force);
    }

    fn set_sway_speed(&mut self, speed: f32) {
        self.with_tree(|tree| tree.sway_speed = speed);
    }
}

pub struct EmitterLink {
    board: EffectBoard,
    entity: Entity,
}

impl EmitterLink {
    fn with_emitter(&self, apply: impl FnOnce(&mut EmitterEffect)) {
        if let Some(emitter) = self.board.write().emitters.get_mut(&self.entity) {
            apply(emitter);
        }
    }
}

impl ParticleSink for EmitterLink {
    fn is_playing(&self) -> bool {
        self.board
            .read()
            .emitters
            .get(&self.entity)
            .is_some_and(|emitter| emitter.playing)
    }

    fn set_force_x(&mut self, force: f32) {
        self.with_emitter(|emitter| emitter.force.x = force);
    }

    fn set_force_z(&mut self, force: f32) {
        self.with_emitter(|emitter| emitter.force.z = force);
    }
}
