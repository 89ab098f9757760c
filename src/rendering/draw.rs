//! Immediate-mode drawing of everything that changes every tick.

use bevy::prelude::*;

use super::pose::{fighter_pose, BODY_SIZE};
use super::visual_config::{rgb, ArenaVisuals};
use crate::combat::{Match, MatchSnapshot, Particle, ProjectileSnapshot, Side};

const MISSILE_SIZE: Vec3 = Vec3::new(0.8, 0.2, 0.2);
const MISSILE_TIP_RADIUS: f32 = 0.1;

/// Solid body mesh for one fighter, kept in sync with the match.
#[derive(Component, Debug, Clone, Copy)]
pub struct FighterBody(pub Side);

pub fn sync_fighter_bodies(
    fight: Option<Res<Match>>,
    mut bodies: Query<(&FighterBody, &mut Transform, &mut Visibility)>,
) {
    let Some(fight) = fight else {
        return;
    };
    for (body, mut transform, mut visibility) in bodies.iter_mut() {
        let fighter = fight.fighter(body.0);
        transform.translation = fighter.position;
        *visibility = if fighter.is_defeated() {
            Visibility::Hidden
        } else {
            Visibility::Inherited
        };
    }
}

pub fn draw_match(fight: Option<Res<Match>>, visuals: Res<ArenaVisuals>, mut gizmos: Gizmos) {
    let Some(fight) = fight else {
        return;
    };
    let snapshot = fight.snapshot();
    draw_fighters(&snapshot, &mut gizmos);
    for projectile in &snapshot.projectiles {
        draw_projectile(projectile, &visuals, &mut gizmos);
    }
}

fn draw_fighters(snapshot: &MatchSnapshot, gizmos: &mut Gizmos) {
    for fighter in &snapshot.fighters {
        if fighter.body_visible() {
            let pose = fighter_pose(fighter);
            let outline = pose.body.with_scale(BODY_SIZE);
            gizmos.cuboid(outline, Color::WHITE);
            gizmos.line(pose.arm.from, pose.arm.to, fighter.color);
            gizmos.line(pose.leg.from, pose.leg.to, fighter.color);
        }
        draw_particles(&fighter.flame_particles, gizmos);
        draw_particles(&fighter.explosion_particles, gizmos);
    }
}

fn draw_particles(particles: &[Particle], gizmos: &mut Gizmos) {
    for particle in particles {
        gizmos.sphere(
            Isometry3d::from_translation(particle.position),
            particle.size.max(0.01),
            particle.color,
        );
    }
}

fn draw_projectile(projectile: &ProjectileSnapshot, visuals: &ArenaVisuals, gizmos: &mut Gizmos) {
    let count = projectile.trail.len();
    if count > 1 {
        gizmos.linestrip_gradient(projectile.trail.iter().enumerate().map(|(i, point)| {
            let alpha = i as f32 / count as f32 * visuals.trail_fade;
            (*point, Color::srgb(1.0, alpha * 0.8, alpha * 0.2))
        }));
    }

    let heading = if projectile.direction.x < 0.0 { -1.0 } else { 1.0 };
    gizmos.cuboid(
        Transform::from_translation(projectile.position).with_scale(MISSILE_SIZE),
        rgb(visuals.missile_color),
    );
    gizmos.sphere(
        Isometry3d::from_translation(projectile.position + Vec3::X * heading * MISSILE_SIZE.x * 0.5),
        MISSILE_TIP_RADIUS,
        rgb(visuals.missile_tip_color),
    );
}
