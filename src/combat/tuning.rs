//! Combat tuning values, loaded as part of the fighter config.
//!
//! All timings are in simulation ticks (60 per second) and all distances in
//! world units.

use serde::Deserialize;

/// Numbers driving movement, attacks, damage and the AI.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    // Movement
    pub move_speed: f32,
    pub arena_half_width: f32,
    pub gravity: f32,
    pub jump_impulse: f32,
    /// Impulse multiplier applied to the second (air) jump.
    pub double_jump_scale: f32,
    pub max_jumps: u8,

    // Health
    pub max_health: i32,

    // Melee
    pub melee_range: f32,
    pub punch_damage: i32,
    pub kick_damage: i32,
    pub punch_cooldown: u32,
    pub kick_cooldown: u32,
    /// Number of animation frames; the move reverts to idle when reached.
    pub melee_frames: u32,
    /// Frame at which a punch or kick deals damage.
    pub melee_connect_frame: u32,

    // Ranged
    pub shoot_cooldown: u32,
    pub projectile_speed: f32,
    pub projectile_damage: i32,
    pub projectile_hit_radius: f32,
    pub projectile_spawn_offset: f32,
    pub projectile_chest_height: f32,
    pub projectile_trail_length: usize,
    pub world_bound: f32,

    // Fire breath
    pub breath_duration: u32,
    pub breath_cooldown: u32,
    pub breath_range: f32,
    pub breath_damage: i32,

    // Knockout
    pub explosion_duration: u32,
    pub explosion_particles: usize,
    pub knockout_bonus: u32,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            move_speed: 0.1,
            arena_half_width: 9.0,
            gravity: 0.015,
            jump_impulse: 0.3,
            double_jump_scale: 0.8,
            max_jumps: 2,

            max_health: 100,

            melee_range: 1.5,
            punch_damage: 5,
            kick_damage: 8,
            punch_cooldown: 20,
            kick_cooldown: 30,
            melee_frames: 10,
            melee_connect_frame: 5,

            shoot_cooldown: 30,
            projectile_speed: 0.1,
            projectile_damage: 15,
            projectile_hit_radius: 0.8,
            projectile_spawn_offset: 1.0,
            projectile_chest_height: 0.5,
            projectile_trail_length: 15,
            world_bound: 10.0,

            breath_duration: 30,
            breath_cooldown: 120,
            breath_range: 4.0,
            breath_damage: 1,

            explosion_duration: 60,
            explosion_particles: 20,
            knockout_bonus: 50,
        }
    }
}

/// Parameters of the AI opponent's decision policy.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AiTuning {
    /// Re-evaluation interval while the opponent is near.
    pub near_interval: u32,
    /// Re-evaluation interval while the opponent is far.
    pub far_interval: u32,
    /// Distance below which `near_interval` applies.
    pub near_distance: f32,
    /// Distance below which the close-range weight table applies.
    pub close_range: f32,
    pub move_speed: f32,
    /// Chance per tick to back off instead of advancing inside melee range.
    pub retreat_chance: f64,
    pub close_shoot_chance: f64,
    pub far_shoot_chance: f64,
    pub melee_chance: f64,
    pub breath_chance: f64,
    pub dodge_step: f32,
}

impl Default for AiTuning {
    fn default() -> Self {
        Self {
            near_interval: 60,
            far_interval: 120,
            near_distance: 5.0,
            close_range: 4.0,
            move_speed: 0.05,
            retreat_chance: 0.3,
            close_shoot_chance: 0.08,
            far_shoot_chance: 0.03,
            melee_chance: 0.15,
            breath_chance: 0.01,
            dodge_step: 0.5,
        }
    }
}
