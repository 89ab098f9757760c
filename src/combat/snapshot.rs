//! Read-only per-frame views handed to the presentation layer.

use bevy::prelude::*;

use super::character::{health_fraction, Character, MeleeKind, Particle, Side};
use super::projectile::Projectile;
use super::resolver::MatchOutcome;

/// What a renderer or HUD needs to know about one fighter.
#[derive(Debug, Clone)]
pub struct FighterSnapshot {
    pub name: String,
    pub side: Side,
    pub position: Vec3,
    pub facing: f32,
    pub color: Color,
    pub health: i32,
    pub max_health: i32,
    pub grounded: bool,
    pub melee: Option<(MeleeKind, u32)>,
    pub melee_frames: u32,
    pub breathing: bool,
    pub defeated: bool,
    pub exploding: bool,
    pub explosion_particles: Vec<Particle>,
    pub flame_particles: Vec<Particle>,
}

impl FighterSnapshot {
    pub fn of(character: &Character) -> Self {
        Self {
            name: character.name.clone(),
            side: character.side,
            position: character.position,
            facing: character.facing,
            color: character.color,
            health: character.health,
            max_health: character.tuning().max_health,
            grounded: character.grounded,
            melee: character.melee.map(|swing| (swing.kind, swing.frame)),
            melee_frames: character.tuning().melee_frames,
            breathing: character.breathing,
            defeated: character.is_defeated(),
            exploding: character.is_exploding(),
            explosion_particles: character.explosion_particles().to_vec(),
            flame_particles: character.flame_particles().to_vec(),
        }
    }

    /// Health as a fraction of the maximum, for bar widths.
    pub fn health_fraction(&self) -> f32 {
        health_fraction(self.health, self.max_health)
    }

    /// Whether the body should be drawn (not yet blown apart).
    pub fn body_visible(&self) -> bool {
        !self.defeated
    }
}

/// A missile in flight.
#[derive(Debug, Clone)]
pub struct ProjectileSnapshot {
    pub owner: Side,
    pub position: Vec3,
    pub direction: Vec3,
    pub trail: Vec<Vec3>,
}

impl ProjectileSnapshot {
    pub fn of(projectile: &Projectile) -> Self {
        Self {
            owner: projectile.owner,
            position: projectile.position,
            direction: projectile.direction,
            trail: projectile.trail().collect(),
        }
    }
}

/// The whole match as seen by presentation.
#[derive(Debug, Clone)]
pub struct MatchSnapshot {
    pub fighters: [FighterSnapshot; 2],
    pub projectiles: Vec<ProjectileSnapshot>,
    pub score: u32,
    pub outcome: Option<MatchOutcome>,
}

impl MatchSnapshot {
    pub fn fighter(&self, side: Side) -> &FighterSnapshot {
        &self.fighters[side.index()]
    }
}
