use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use vantage_simulation::net::ConnectionId;
use vantage_simulation::shooting::HitVolume;
use vantage_simulation::{GameplayConfig, PlayerLogin, PlayerSpawned, SceneQueryBackend, SimulationPlugin};

mod camera;
mod input;
mod logger;
mod rendering;
mod space;

use camera::{CameraPlugin, PlayerCamera};
use input::ClientInputPlugin;
use rendering::RenderingSyncPlugin;

/// Controller driven by this machine's keyboard and mouse
#[derive(Resource, Debug, Clone, Copy)]
pub struct LocalPlayer {
    pub controller: Entity,
}

fn main() {
    vantage_simulation::set_logger(Box::new(logger::BevyLogPrinter));

    let config = match std::env::var("VANTAGE_CONFIG") {
        Ok(path) => GameplayConfig::load_or_default(path),
        Err(_) => GameplayConfig::default(),
    };

    App::new()
        // Bevy defaults (rendering, input, time, etc.)
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Vantage".to_string(),
                resolution: (1280., 720.).into(),
                ..default()
            }),
            ..default()
        }))
        // Scene queries for hit-scan traces
        .add_plugins(RapierPhysicsPlugin::<NoUserData>::default())
        // Simulation (gameplay ECS logic)
        .add_plugins(SimulationPlugin {
            config,
            backend: SceneQueryBackend::Rapier,
        })
        // Keyboard/mouse → input actions
        .add_plugins(ClientInputPlugin)
        // Rendering sync (simulation → visuals)
        .add_plugins(RenderingSyncPlugin)
        // Camera follows the possessed pawn's view
        .add_plugins(CameraPlugin)
        .add_systems(Startup, (setup_scene, login_local_player))
        .add_systems(Update, track_local_player)
        .run();
}

/// Spawn ground, lights, camera and a ring of targets
fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Ground plane (40x40m, Z up)
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::new(Vec3::Z, Vec2::splat(2000.0)))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.5, 0.3))),
        Transform::from_xyz(0.0, 0.0, 0.0),
    ));
    commands.spawn((
        Collider::cuboid(2000.0, 2000.0, 10.0),
        Transform::from_xyz(0.0, 0.0, -10.0),
    ));

    // Directional light (sun)
    commands.spawn((
        DirectionalLight {
            illuminance: 10000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 1000.0).looking_at(Vec3::new(300.0, 200.0, 0.0), Vec3::Z),
    ));

    // Ambient light
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 0.3,
        affects_lightmapped_meshes: false,
    });

    // Camera (pose overwritten every frame once a pawn is possessed)
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            far: 20000.0,
            ..default()
        }),
        Transform::from_xyz(-600.0, 0.0, 300.0).looking_at(Vec3::ZERO, Vec3::Z),
        PlayerCamera,
    ));

    // Targets: simulation hit volume + rapier collider of the same size
    for i in 0..8 {
        let angle = i as f32 / 8.0 * std::f32::consts::TAU;
        let position = Vec3::new(angle.cos() * 1200.0, angle.sin() * 1200.0, 120.0);
        commands.spawn((
            Name::new(format!("Target {i}")),
            Transform::from_translation(position),
            HitVolume::sphere(60.0),
            Collider::ball(60.0),
        ));
    }
}

fn login_local_player(mut logins: EventWriter<PlayerLogin>) {
    logins.write(PlayerLogin {
        connection: ConnectionId::HOST,
    });
}

/// Remember which controller the local login produced
fn track_local_player(
    mut commands: Commands,
    mut spawned: EventReader<PlayerSpawned>,
    local: Option<Res<LocalPlayer>>,
) {
    for event in spawned.read() {
        if local.is_none() && event.connection == ConnectionId::HOST {
            commands.insert_resource(LocalPlayer {
                controller: event.controller,
            });
            info!("Local player controller: {:?}", event.controller);
        }
    }
}
