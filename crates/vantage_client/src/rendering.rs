use bevy::prelude::*;
use bevy_rapier3d::prelude::Collider;
use vantage_simulation::shooting::{HitShape, HitVolume};
use vantage_simulation::{Character, HitScanResult};

use crate::space::{to_render_point, to_render_transform};

pub struct RenderingSyncPlugin;

impl Plugin for RenderingSyncPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HitMarkers>().add_systems(
            Update,
            (
                spawn_character_visuals,
                spawn_target_visuals,
                sync_transforms,
                despawn_orphaned_visuals,
                record_hit_markers,
                draw_hit_markers,
            )
                .chain()
                .after(vantage_simulation::GameplaySet::Fire),
        );
    }
}

/// Capsule radius / half segment (world units, feet at the transform origin)
const CAPSULE_RADIUS: f32 = 34.0;
const CAPSULE_HALF_HEIGHT: f32 = 54.0;

/// Seconds a hit marker stays on screen
const HIT_MARKER_LIFETIME: f32 = 0.6;

/// Link: visual entity → simulation entity
#[derive(Component)]
pub struct VisualOf {
    pub owner: Entity,
    /// Local pose relative to the owner's transform, in render space
    pub local: Transform,
}

/// Link: simulation entity → visual entity
#[derive(Component)]
pub struct HasVisual(pub Entity);

/// Render-space marker locations with seconds left
#[derive(Resource, Default)]
pub struct HitMarkers(Vec<(Vec3, f32)>);

/// Capsule visual + rapier collider for newly spawned characters
fn spawn_character_visuals(
    mut commands: Commands,
    query: Query<(Entity, &Transform), Added<Character>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (sim_entity, sim_transform) in query.iter() {
        // Capsule3d stands along Y, the world stands along Z
        let local = Transform::from_translation(Vec3::Z * (CAPSULE_HALF_HEIGHT + CAPSULE_RADIUS))
            .with_rotation(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2));

        let visual_entity = commands
            .spawn((
                Mesh3d(meshes.add(Capsule3d::new(CAPSULE_RADIUS, CAPSULE_HALF_HEIGHT * 2.0))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::srgb(0.2, 0.4, 0.8),
                    ..default()
                })),
                to_render_transform(sim_transform).mul_transform(local),
                VisualOf {
                    owner: sim_entity,
                    local,
                },
            ))
            .id();

        commands.entity(sim_entity).insert((
            HasVisual(visual_entity),
            Collider::capsule_z(CAPSULE_HALF_HEIGHT, CAPSULE_RADIUS),
        ));
    }
}

/// Meshes for hit volumes (targets)
fn spawn_target_visuals(
    mut commands: Commands,
    query: Query<(Entity, &Transform, &HitVolume), Without<HasVisual>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (sim_entity, sim_transform, volume) in query.iter() {
        let mesh = match volume.0 {
            HitShape::Sphere { radius } => meshes.add(Sphere::new(radius)),
            HitShape::Box { half_extents } => meshes.add(Cuboid::from_size(half_extents * 2.0)),
        };

        let visual_entity = commands
            .spawn((
                Mesh3d(mesh),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: Color::srgb(0.8, 0.3, 0.2),
                    ..default()
                })),
                to_render_transform(sim_transform),
                VisualOf {
                    owner: sim_entity,
                    local: Transform::IDENTITY,
                },
            ))
            .id();

        commands.entity(sim_entity).insert(HasVisual(visual_entity));
    }
}

/// Sync simulation transforms → visual transforms
fn sync_transforms(
    sim_query: Query<(&Transform, &HasVisual), Changed<Transform>>,
    mut visual_query: Query<(&mut Transform, &VisualOf), Without<HasVisual>>,
) {
    for (sim_transform, has_visual) in sim_query.iter() {
        let Ok((mut visual_transform, link)) = visual_query.get_mut(has_visual.0) else {
            continue;
        };
        *visual_transform = to_render_transform(sim_transform).mul_transform(link.local);
    }
}

/// Despawn visuals whose simulation entity is gone
fn despawn_orphaned_visuals(
    mut commands: Commands,
    visuals: Query<(Entity, &VisualOf)>,
    owners: Query<(), With<HasVisual>>,
) {
    for (visual, link) in visuals.iter() {
        if owners.get(link.owner).is_err() {
            commands.entity(visual).despawn();
        }
    }
}

fn record_hit_markers(mut results: EventReader<HitScanResult>, mut markers: ResMut<HitMarkers>) {
    for result in results.read() {
        if let Some(hit) = result.hit {
            markers.0.push((to_render_point(hit.location), HIT_MARKER_LIFETIME));
        }
    }
}

fn draw_hit_markers(time: Res<Time>, mut markers: ResMut<HitMarkers>, mut gizmos: Gizmos) {
    let delta = time.delta_secs();
    markers.0.retain_mut(|(location, remaining)| {
        *remaining -= delta;
        if *remaining <= 0.0 {
            return false;
        }
        let fade = *remaining / HIT_MARKER_LIFETIME;
        gizmos.sphere(
            Isometry3d::from_translation(*location),
            8.0,
            Color::srgba(1.0, 0.9, 0.2, fade),
        );
        true
    });
}
