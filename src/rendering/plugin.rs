//! Rendering plugin - arena scene, fighter bodies and per-tick effects.

use bevy::prelude::*;

use super::draw::{draw_match, sync_fighter_bodies, FighterBody};
use super::pose::BODY_SIZE;
use super::visual_config::{point, rgb, ArenaVisuals};
use crate::combat::{Match, Side};
use crate::core::FighterConfig;

/// Rendering plugin - sets up the camera, light and ground, then draws
/// the match every frame.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        let visuals = app
            .world()
            .get_resource::<FighterConfig>()
            .map(|config| config.arena.clone())
            .unwrap_or_default();

        app
            .insert_resource(ClearColor(rgb(visuals.clear_color)))
            .insert_resource(visuals)
            .add_systems(Startup, spawn_arena)
            // Bodies need the match resource inserted by combat setup
            .add_systems(PostStartup, spawn_fighter_bodies)
            .add_systems(Update, (sync_fighter_bodies, draw_match).chain());
    }
}

/// Spawn camera, light, ground plane and the reference cube.
fn spawn_arena(
    mut commands: Commands,
    visuals: Res<ArenaVisuals>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: 45_f32.to_radians(),
            near: 0.1,
            far: 50.0,
            ..default()
        }),
        Transform::from_translation(point(visuals.camera_position))
            .looking_at(point(visuals.camera_target), Vec3::Y),
    ));

    commands.spawn((
        PointLight {
            intensity: visuals.light_intensity,
            range: 40.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(point(visuals.light_position)),
    ));

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(visuals.ground_size, visuals.ground_size))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: rgb(visuals.ground_color),
            perceptual_roughness: 0.9,
            ..default()
        })),
        Transform::from_xyz(0.0, visuals.ground_height, 0.0),
    ));

    if visuals.show_reference_cube {
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(1.0, 1.0, 1.0))),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: Color::srgb(1.0, 1.0, 0.0),
                ..default()
            })),
            Transform::default(),
        ));
    }
}

fn spawn_fighter_bodies(
    mut commands: Commands,
    fight: Option<Res<Match>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(fight) = fight else {
        warn!("No match to draw");
        return;
    };

    let mesh = meshes.add(Cuboid::new(BODY_SIZE.x, BODY_SIZE.y, BODY_SIZE.z));
    for side in Side::ALL {
        let fighter = fight.fighter(side);
        commands.spawn((
            FighterBody(side),
            Mesh3d(mesh.clone()),
            MeshMaterial3d(materials.add(StandardMaterial {
                base_color: fighter.color,
                ..default()
            })),
            Transform::from_translation(fighter.position),
            Visibility::default(),
        ));
    }
}
