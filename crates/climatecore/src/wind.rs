use crate::config::WindConfig;
use crate::display::TextDisplay;
use crate::tracking::{AcceptBound, TrackedValueSampler, TrackingProvider};

/// Lifecycle stage of a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GrowthState {
    Seedling,
    Growing,
    Mature,
    Snag,
    Dead,
}

impl GrowthState {
    /// Only grown trees (living or standing dead) carry leaves and sway
    pub fn feels_wind(self) -> bool {
        matches!(self, GrowthState::Mature | GrowthState::Snag)
    }
}

/// A tree in the scene: falling-leaf particles plus a branch sway parameter
pub trait TreeHandle: Send + Sync {
    fn growth_state(&self) -> GrowthState;
    fn is_active(&self) -> bool;
    fn set_leaf_force_x(&mut self, force: f32);
    fn set_sway_speed(&mut self, speed: f32);
}

/// A particle emitter whose force-over-lifetime can be pushed around
pub trait ParticleSink: Send + Sync {
    fn is_playing(&self) -> bool;
    fn set_force_x(&mut self, force: f32);
    fn set_force_z(&mut self, force: f32);
}

/// Constants of the branch sway response to wind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwayCurve {
    pub initial_speed: f32,
    pub idle_speed: f32,
    pub threshold: f32,
    pub divisor: f32,
    pub offset: f32,
}

impl SwayCurve {
    pub fn from_config(config: &WindConfig) -> Self {
        Self {
            initial_speed: config.initial_sway_speed,
            idle_speed: config.idle_sway_speed,
            threshold: config.sway_threshold,
            divisor: config.sway_divisor,
            offset: config.sway_offset,
        }
    }

    /// Strong winds are damped above the threshold, calm air gets a gentle idle sway
    pub fn sway_speed(&self, force: f32) -> f32 {
        if force > self.initial_speed && force > self.threshold {
            force / self.divisor + self.offset
        } else if force == 0.0 {
            self.idle_speed
        } else {
            force
        }
    }
}

/// Effect sinks driven by wind, owned for the controller's lifetime
pub struct WindTargets {
    pub display: Box<dyn TextDisplay>,
    pub trees: Vec<Box<dyn TreeHandle>>,
    pub rain: Vec<Box<dyn ParticleSink>>,
    pub snow: Box<dyn ParticleSink>,
}

/// Marker-driven wind force fanned out to trees, rain and snow.
///
/// The sampler shadow gates text updates while `last_dispatched` gates the
/// particle and sway fan-out.
pub struct WindController {
    pub wind_force: f32,
    last_dispatched: f32,
    sampler: TrackedValueSampler,
    sway: SwayCurve,
    rain_force_factor: f32,
    snow_force_factor: f32,
    tracking: Box<dyn TrackingProvider>,
    targets: WindTargets,
}

impl WindController {
    pub fn new(
        config: &WindConfig,
        tracking: Box<dyn TrackingProvider>,
        mut targets: WindTargets,
    ) -> Self {
        targets.display.update_panel_text(0.0);

        for tree in targets.trees.iter_mut() {
            tree.set_sway_speed(config.initial_sway_speed);
        }

        Self {
            wind_force: 0.0,
            last_dispatched: 0.0,
            sampler: TrackedValueSampler::new(
                config.target_name.clone(),
                config.mapping,
                AcceptBound::Inclusive,
            ),
            sway: SwayCurve::from_config(config),
            rain_force_factor: config.rain_force_factor,
            snow_force_factor: config.snow_force_factor,
            tracking,
            targets,
        }
    }

    pub fn update(&mut self) {
        self.update_from_target();
        self.update_text_displays();

        if self.wind_force != self.last_dispatched {
            self.last_dispatched = self.wind_force;
            log::debug!("Dispatching wind force {:.3}", self.last_dispatched);

            self.update_trees();
            self.update_rain();
            self.update_snow();
        }
    }

    /// Push the current force to a tree that just became Mature or Snag
    pub fn on_tree_grown(&self, tree: &mut dyn TreeHandle) {
        if tree.growth_state().feels_wind() {
            self.apply_to_tree(tree);
        }
    }

    /// Force last pushed out to the effect sinks
    pub fn last_dispatched(&self) -> f32 {
        self.last_dispatched
    }

    fn update_from_target(&mut self) {
        if let Some(mapped) = self.sampler.sample(self.tracking.as_ref()) {
            self.wind_force = mapped;

            self.targets.display.update_panel_text(self.wind_force);
            self.targets.display.update_target_text(self.wind_force);
        }
    }

    fn update_text_displays(&mut self) {
        if self.wind_force != self.sampler.shadow() {
            self.targets.display.update_panel_text(self.wind_force);
            self.targets.display.update_target_text(self.wind_force);
        }
    }

    fn update_trees(&mut self) {
        let force = self.last_dispatched;
        let sway = self.sway;
        for tree in self.targets.trees.iter_mut() {
            apply_wind_to_tree(tree.as_mut(), force, sway);
        }
    }

    fn apply_to_tree(&self, tree: &mut dyn TreeHandle) {
        apply_wind_to_tree(tree, self.last_dispatched, self.sway);
    }

    fn update_rain(&mut self) {
        let force = self.wind_force * self.rain_force_factor;
        for rain in self.targets.rain.iter_mut().filter(|rain| rain.is_playing()) {
            rain.set_force_z(force);
        }
    }

    fn update_snow(&mut self) {
        if self.targets.snow.is_playing() {
            self.targets
                .snow
                .set_force_x(self.last_dispatched * self.snow_force_factor);
        }
    }
}

fn apply_wind_to_tree(tree: &mut dyn TreeHandle, wind_force: f32, sway: SwayCurve) {
    if !tree.is_active() || !tree.growth_state().feels_wind() {
        log::trace!("Skipping tree in state {:?}", tree.growth_state());
        return;
    }

    // Leaves only take whole force steps
    let force = wind_force.trunc();
    tree.set_leaf_force_x(force);
    tree.set_sway_speed(sway.sway_speed(force));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::{FakeParticles, FakeTracker, FakeTree, RecordingDisplay, TextWrite};
    use rstest::rstest;

    const TARGET: &str = "Wind Target";

    struct Rig {
        controller: WindController,
        tracker: FakeTracker,
        display: RecordingDisplay,
        trees: Vec<FakeTree>,
        rain: Vec<FakeParticles>,
        snow: FakeParticles,
    }

    fn rig(trees: Vec<FakeTree>, rain: Vec<FakeParticles>, snow: FakeParticles) -> Rig {
        let tracker = FakeTracker::new();
        let display = RecordingDisplay::default();
        let targets = WindTargets {
            display: Box::new(display.clone()),
            trees: trees
                .iter()
                .map(|tree| Box::new(tree.clone()) as Box<dyn TreeHandle>)
                .collect(),
            rain: rain
                .iter()
                .map(|rain| Box::new(rain.clone()) as Box<dyn ParticleSink>)
                .collect(),
            snow: Box::new(snow.clone()),
        };
        let controller =
            WindController::new(&WindConfig::default(), Box::new(tracker.clone()), targets);
        Rig {
            controller,
            tracker,
            display,
            trees,
            rain,
            snow,
        }
    }

    fn empty_rig() -> Rig {
        rig(Vec::new(), Vec::new(), FakeParticles::new(false))
    }

    #[rstest]
    #[case(0.0, 0.8)]
    #[case(2.0, 2.0)]
    #[case(3.0, 3.0)]
    #[case(5.0, 3.5)]
    #[case(50.0, 8.0)]
    fn test_sway_curve(#[case] force: f32, #[case] expected: f32) {
        let curve = SwayCurve::from_config(&WindConfig::default());
        assert!((curve.sway_speed(force) - expected).abs() < 1e-5);
    }

    #[test]
    fn test_sway_offset_is_independent_of_threshold() {
        let curve = SwayCurve {
            threshold: 10.0,
            offset: 1.0,
            ..SwayCurve::from_config(&WindConfig::default())
        };
        assert!((curve.sway_speed(20.0) - 3.0).abs() < 1e-5);
        assert_eq!(curve.sway_speed(8.0), 8.0);
    }

    #[test]
    fn test_construction_sets_initial_sway_on_every_tree() {
        let seedling = FakeTree::new(GrowthState::Seedling, true);
        let mature = FakeTree::new(GrowthState::Mature, false);
        let rig = rig(vec![seedling, mature], Vec::new(), FakeParticles::new(false));

        assert_eq!(rig.display.writes(), vec![TextWrite::Panel(0.0)]);
        for tree in &rig.trees {
            assert_eq!(tree.state().sway_speed, Some(3.0));
        }
    }

    #[test]
    fn test_upper_bound_is_inclusive() {
        let mut rig = empty_rig();
        rig.tracker.set(TARGET, true, 280.0);
        rig.controller.update();
        assert!((rig.controller.wind_force - 50.0).abs() < 1e-4);
    }

    #[test]
    fn test_unchanged_angle_dispatches_once() {
        let rain = FakeParticles::new(true);
        let mut rig = rig(Vec::new(), vec![rain], FakeParticles::new(false));
        rig.display.clear();
        rig.tracker.set(TARGET, true, 140.0);

        rig.controller.update();
        rig.controller.update();

        assert_eq!(
            rig.display.writes(),
            vec![TextWrite::Panel(25.0), TextWrite::Target(25.0)]
        );
        assert_eq!(rig.controller.last_dispatched(), 25.0);
    }

    #[test]
    fn test_fan_out_reaches_grown_active_trees_only() {
        let mature = FakeTree::new(GrowthState::Mature, true);
        let snag = FakeTree::new(GrowthState::Snag, true);
        let growing = FakeTree::new(GrowthState::Growing, true);
        let hidden = FakeTree::new(GrowthState::Mature, false);
        let mut rig = rig(
            vec![mature, snag, growing, hidden],
            Vec::new(),
            FakeParticles::new(false),
        );

        // 36 degrees maps to ~6.43, leaves see 6
        rig.tracker.set(TARGET, true, 36.0);
        rig.controller.update();

        for tree in &rig.trees[..2] {
            let state = tree.state();
            assert_eq!(state.leaf_force_x, Some(6.0));
            assert!((state.sway_speed.unwrap() - 3.6).abs() < 1e-5);
        }
        for tree in &rig.trees[2..] {
            let state = tree.state();
            assert_eq!(state.leaf_force_x, None);
            assert_eq!(state.sway_speed, Some(3.0));
        }
    }

    #[test]
    fn test_rain_and_snow_forces() {
        let playing = FakeParticles::new(true);
        let stopped = FakeParticles::new(false);
        let snow = FakeParticles::new(true);
        let mut rig = rig(Vec::new(), vec![playing, stopped], snow);

        rig.tracker.set(TARGET, true, 112.0);
        rig.controller.update();

        assert_eq!(rig.rain[0].state().force_z, Some(10.0));
        assert_eq!(rig.rain[1].state().force_z, None);
        assert!((rig.snow.state().force_x.unwrap() - 0.02).abs() < 1e-6);
    }

    #[test]
    fn test_idle_snow_is_left_alone() {
        let mut rig = empty_rig();
        rig.tracker.set(TARGET, true, 112.0);
        rig.controller.update();
        assert_eq!(rig.snow.state(), FakeParticles::new(false).state());
    }

    #[test]
    fn test_grown_tree_receives_current_force_immediately() {
        let mut rig = empty_rig();
        rig.tracker.set(TARGET, true, 56.0);
        rig.controller.update();
        assert_eq!(rig.controller.last_dispatched(), 10.0);

        let sapling = FakeTree::new(GrowthState::Growing, true);
        let mut handle = sapling.clone();
        rig.controller.on_tree_grown(&mut handle);
        assert_eq!(sapling.state().leaf_force_x, None);

        sapling.set_growth(GrowthState::Mature);
        rig.controller.on_tree_grown(&mut handle);
        let state = sapling.state();
        assert_eq!(state.leaf_force_x, Some(10.0));
        assert!((state.sway_speed.unwrap() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_grown_tree_in_calm_air_gets_idle_sway() {
        let rig = empty_rig();
        let tree = FakeTree::new(GrowthState::Snag, true);
        let mut handle = tree.clone();

        rig.controller.on_tree_grown(&mut handle);

        assert_eq!(tree.state().leaf_force_x, Some(0.0));
        assert_eq!(tree.state().sway_speed, Some(0.8));
    }

    #[test]
    fn test_untracked_marker_changes_nothing() {
        let mut rig = empty_rig();
        rig.display.clear();
        rig.tracker.set(TARGET, false, 100.0);
        rig.controller.update();
        assert_eq!(rig.controller.wind_force, 0.0);
        assert!(rig.display.writes().is_empty());
    }
}
