use crate::climate::events::TreeGrownMessage;
use crate::scene::components::*;
use bevy::prelude::*;
use climatecore::wind::GrowthState;
use rand::Rng;

const TREE_COUNT: usize = 8;
const MARKER_TURN_SPEED: f32 = 45.0; // degrees per second

pub fn spawn_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let config = climatecore::get_config();

    commands.spawn((
        Camera3d::default(),
        Transform::from_xyz(0.0, 9.0, 18.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::default(),
        Sun,
    ));

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(30.0, 30.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.35, 0.5, 0.3))),
    ));

    let marker_mesh = meshes.add(Cuboid::new(2.0, 0.1, 2.0));
    let pointer_mesh = meshes.add(Cuboid::new(0.2, 0.15, 0.9));
    let pointer_material = materials.add(Color::BLACK);
    let markers = [
        (
            config.temperature.target_name.clone(),
            Vec3::new(-4.0, 0.05, 7.0),
            Color::srgb(0.9, 0.4, 0.2),
            (KeyCode::KeyQ, KeyCode::KeyE, KeyCode::KeyT),
        ),
        (
            config.wind.target_name.clone(),
            Vec3::new(4.0, 0.05, 7.0),
            Color::srgb(0.3, 0.6, 0.9),
            (KeyCode::KeyA, KeyCode::KeyD, KeyCode::KeyY),
        ),
    ];
    for (name, position, color, (turn_left, turn_right, toggle_tracking)) in markers {
        commands
            .spawn((
                Mesh3d(marker_mesh.clone()),
                MeshMaterial3d(materials.add(color)),
                Transform::from_translation(position),
                ArMarker {
                    name,
                    tracked: true,
                    turn_left,
                    turn_right,
                    toggle_tracking,
                },
            ))
            .with_children(|parent| {
                parent.spawn((
                    Mesh3d(pointer_mesh.clone()),
                    MeshMaterial3d(pointer_material.clone()),
                    Transform::from_xyz(0.0, 0.05, -0.5),
                ));
            });
    }

    let trunk_mesh = meshes.add(Cylinder::new(0.2, 2.0));
    let crown_mesh = meshes.add(Sphere::new(1.0).mesh().ico(2).unwrap());
    let trunk_material = materials.add(Color::srgb(0.4, 0.25, 0.1));
    let crown_material = materials.add(Color::srgb(0.15, 0.45, 0.15));
    let mut rng = rand::rng();

    for _ in 0..TREE_COUNT {
        let (state, full_stage_secs) = SPAWN_STAGES[rng.random_range(0..SPAWN_STAGES.len())];
        let position = Vec3::new(rng.random_range(-10.0..10.0), 0.0, rng.random_range(-9.0..2.0));
        let stage_secs = full_stage_secs * rng.random_range(0.5..1.0);

        commands
            .spawn((
                Transform::from_translation(position).with_scale(Vec3::splat(growth_scale(state))),
                Visibility::Visible,
                TreeGrowth {
                    state,
                    timer: Timer::from_seconds(stage_secs, TimerMode::Once),
                },
                TreeSway {
                    speed: 0.0,
                    leaf_force_x: 0.0,
                    phase: rng.random_range(0.0..std::f32::consts::TAU),
                },
            ))
            .with_children(|parent| {
                parent.spawn((
                    Mesh3d(trunk_mesh.clone()),
                    MeshMaterial3d(trunk_material.clone()),
                    Transform::from_xyz(0.0, 1.0, 0.0),
                ));
                parent.spawn((
                    Mesh3d(crown_mesh.clone()),
                    MeshMaterial3d(crown_material.clone()),
                    Transform::from_xyz(0.0, 2.5, 0.0),
                ));
            });
    }

    let cloud_mesh = meshes.add(Sphere::new(1.5).mesh().ico(2).unwrap());
    let cloud_material = materials.add(Color::srgb(0.8, 0.8, 0.85));
    for x in [-6.0, 0.0, 6.0] {
        commands.spawn((
            Mesh3d(cloud_mesh.clone()),
            MeshMaterial3d(cloud_material.clone()),
            Transform::from_xyz(x, 7.0, -4.0),
            Emitter {
                playing: true,
                ..default()
            },
            RainEmitter,
        ));
    }

    commands.spawn((
        Transform::from_xyz(0.0, 9.0, 0.0),
        Emitter::default(),
        SnowEmitter,
    ));

    info!("Scene spawned with {} trees", TREE_COUNT);
}

pub fn marker_control(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    time: Res<Time>,
    mut markers: Query<(&mut ArMarker, &mut Transform)>,
) {
    let step = MARKER_TURN_SPEED.to_radians() * time.delta_secs();

    for (mut marker, mut transform) in markers.iter_mut() {
        if keyboard_input.just_pressed(marker.toggle_tracking) {
            marker.tracked = !marker.tracked;
            info!(
                "{} {}",
                marker.name,
                if marker.tracked { "found" } else { "lost" }
            );
        }
        if keyboard_input.pressed(marker.turn_left) {
            transform.rotate_y(step);
        }
        if keyboard_input.pressed(marker.turn_right) {
            transform.rotate_y(-step);
        }
    }
}

pub fn toggle_weather(
    keyboard_input: Res<ButtonInput<KeyCode>>,
    mut rain_q: Query<&mut Emitter, (With<RainEmitter>, Without<SnowEmitter>)>,
    mut snow_q: Query<&mut Emitter, (With<SnowEmitter>, Without<RainEmitter>)>,
) {
    if keyboard_input.just_pressed(KeyCode::KeyR) {
        for mut rain in rain_q.iter_mut() {
            rain.playing = !rain.playing;
        }
        info!("Rain toggled");
    }
    if keyboard_input.just_pressed(KeyCode::KeyF) {
        for mut snow in snow_q.iter_mut() {
            snow.playing = !snow.playing;
        }
        info!("Snow toggled");
    }
}

pub fn grow_trees(
    time: Res<Time>,
    mut trees: Query<(Entity, &mut TreeGrowth, &mut Transform, &mut Visibility)>,
    mut grown: MessageWriter<TreeGrownMessage>,
) {
    for (entity, mut growth, mut transform, mut visibility) in trees.iter_mut() {
        growth.timer.tick(time.delta());
        if !growth.timer.just_finished() {
            continue;
        }

        let Some(next) = next_growth_state(growth.state) else {
            continue;
        };
        growth.state = next;
        transform.scale = Vec3::splat(growth_scale(next));

        match stage_duration(next) {
            Some(secs) => growth.timer = Timer::from_seconds(secs, TimerMode::Once),
            None => *visibility = Visibility::Hidden,
        }

        if next.feels_wind() {
            grown.write(TreeGrownMessage { tree: entity });
        }
    }
}

pub fn animate_trees(time: Res<Time>, mut trees: Query<(&TreeSway, &mut Transform)>) {
    let elapsed = time.elapsed_secs();
    for (sway, mut transform) in trees.iter_mut() {
        let lean = sway.leaf_force_x * 0.004;
        transform.rotation =
            Quat::from_rotation_z((elapsed * sway.speed + sway.phase).sin() * 0.04 - lean);
    }
}

pub fn draw_emitter_forces(mut gizmos: Gizmos, emitters: Query<(&Emitter, &GlobalTransform)>) {
    for (emitter, transform) in emitters.iter() {
        if !emitter.playing || emitter.force == Vec3::ZERO {
            continue;
        }
        let start = transform.translation();
        gizmos.arrow(
            start,
            start + emitter.force.clamp_length_max(5.0),
            Color::srgb(0.6, 0.8, 1.0),
        );
    }
}

pub fn next_growth_state(state: GrowthState) -> Option<GrowthState> {
    match state {
        GrowthState::Seedling => Some(GrowthState::Growing),
        GrowthState::Growing => Some(GrowthState::Mature),
        GrowthState::Mature => Some(GrowthState::Snag),
        GrowthState::Snag => Some(GrowthState::Dead),
        GrowthState::Dead => None,
    }
}

const SEEDLING_SECS: f32 = 15.0;
const GROWING_SECS: f32 = 20.0;
const MATURE_SECS: f32 = 90.0;
const SNAG_SECS: f32 = 45.0;

/// Stages a tree can start the scene in, with their full duration
const SPAWN_STAGES: [(GrowthState, f32); 3] = [
    (GrowthState::Seedling, SEEDLING_SECS),
    (GrowthState::Growing, GROWING_SECS),
    (GrowthState::Mature, MATURE_SECS),
];

/// Seconds spent in a stage, `None` once the tree is gone
pub fn stage_duration(state: GrowthState) -> Option<f32> {
    match state {
        GrowthState::Seedling => Some(SEEDLING_SECS),
        GrowthState::Growing => Some(GROWING_SECS),
        GrowthState::Mature => Some(MATURE_SECS),
        GrowthState::Snag => Some(SNAG_SECS),
        GrowthState::Dead => None,
    }
}

fn growth_scale(state: GrowthState) -> f32 {
    match state {
        GrowthState::Seedling => 0.3,
        GrowthState::Growing => 0.6,
        GrowthState::Mature => 1.0,
        GrowthState::Snag | GrowthState::Dead => 0.9,
    }
}
