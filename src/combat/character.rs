//! Fighter state: movement, jumping, melee swings, shooting, fire breath,
//! and the knockout explosion.
//!
//! The sub-states are independent timers and flags rather than one enum,
//! because a fighter can be airborne, on shoot cooldown and mid-kick all at
//! once. Only the exploding state is exclusive: after lethal damage a
//! fighter stops reacting to anything but its explosion.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

use super::ai::{AiPlan, AiPolicy, AiView};
use super::projectile::Projectile;
use super::tuning::CombatTuning;
use crate::core::{AudioCue, CueSink};

/// Which end of the arena a fighter starts on.
///
/// Also tags the projectiles a fighter fires, so hits are resolved by owner
/// rather than by the direction a missile travels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Left, Side::Right];

    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Facing at spawn: toward the middle of the arena.
    pub fn initial_facing(self) -> f32 {
        match self {
            Side::Left => 1.0,
            Side::Right => -1.0,
        }
    }
}

/// The two melee moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeleeKind {
    Punch,
    Kick,
}

/// An in-progress punch or kick animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeleeSwing {
    pub kind: MeleeKind,
    pub frame: u32,
}

/// A decorative particle (explosion debris or flame).
#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec3,
    pub velocity: Vec3,
    pub color: Color,
    pub size: f32,
    /// Ticks left before a flame particle burns out.
    pub ttl: u32,
}

/// Result of damage that was actually applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageTaken {
    pub dealt: i32,
    pub lethal: bool,
}

const FLAME_TTL: u32 = 20;
const FLAMES_PER_TICK: usize = 2;
const PARTICLE_GRAVITY: f32 = 0.01;
const PARTICLE_SHRINK: f32 = 0.95;

pub(crate) fn health_fraction(health: i32, max_health: i32) -> f32 {
    if max_health <= 0 {
        return 0.0;
    }
    (health as f32 / max_health as f32).clamp(0.0, 1.0)
}

/// One combatant.
#[derive(Debug, Clone)]
pub struct Character {
    pub name: String,
    pub color: Color,
    pub side: Side,
    /// +1.0 when facing +X, -1.0 when facing -X.
    pub facing: f32,

    pub position: Vec3,
    pub vertical_velocity: f32,
    pub jumps_remaining: u8,
    pub grounded: bool,

    pub health: i32,
    /// Ranged capability; shooting needs at least one, and it is never spent.
    pub pistols: u32,

    pub shoot_cooldown: u32,
    pub melee_cooldown: u32,
    pub melee: Option<MeleeSwing>,

    pub breathing: bool,
    pub breath_remaining: u32,
    pub breath_cooldown: u32,

    exploding: bool,
    explosion_started: bool,
    explosion_timer: u32,

    explosion_particles: Vec<Particle>,
    flame_particles: Vec<Particle>,
    queued: Vec<Projectile>,
    ai: Option<AiPolicy>,
    tuning: CombatTuning,
}

impl Character {
    pub fn new(name: impl Into<String>, side: Side, position: Vec3, color: Color, tuning: CombatTuning) -> Self {
        Self {
            name: name.into(),
            color,
            side,
            facing: side.initial_facing(),
            position: Vec3::new(position.x, position.y.max(0.0), position.z),
            vertical_velocity: 0.0,
            jumps_remaining: tuning.max_jumps,
            grounded: position.y <= 0.0,
            health: tuning.max_health.max(0),
            pistols: 0,
            shoot_cooldown: 0,
            melee_cooldown: 0,
            melee: None,
            breathing: false,
            breath_remaining: 0,
            breath_cooldown: 0,
            exploding: false,
            explosion_started: false,
            explosion_timer: 0,
            explosion_particles: Vec::new(),
            flame_particles: Vec::new(),
            queued: Vec::new(),
            ai: None,
            tuning,
        }
    }

    pub fn with_pistols(mut self, pistols: u32) -> Self {
        self.pistols = pistols;
        self
    }

    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health.clamp(0, self.tuning.max_health);
        self
    }

    pub fn with_ai(mut self, policy: AiPolicy) -> Self {
        self.ai = Some(policy);
        self
    }

    pub fn is_ai(&self) -> bool {
        self.ai.is_some()
    }

    pub fn ai(&self) -> Option<&AiPolicy> {
        self.ai.as_ref()
    }

    pub fn tuning(&self) -> &CombatTuning {
        &self.tuning
    }

    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Health as a fraction of the maximum, for bar widths.
    pub fn health_fraction(&self) -> f32 {
        health_fraction(self.health, self.tuning.max_health)
    }

    pub fn is_exploding(&self) -> bool {
        self.exploding
    }

    /// True once a knocked-out fighter's explosion has run its full course.
    pub fn explosion_finished(&self) -> bool {
        self.explosion_started && !self.exploding
    }

    pub fn explosion_particles(&self) -> &[Particle] {
        &self.explosion_particles
    }

    pub fn flame_particles(&self) -> &[Particle] {
        &self.flame_particles
    }

    pub fn queued_projectiles(&self) -> &[Projectile] {
        &self.queued
    }

    /// Hand over the projectiles fired since the last drain.
    pub fn drain_queued(&mut self) -> std::vec::Drain<'_, Projectile> {
        self.queued.drain(..)
    }

    /// Melee move that lands on this exact frame, if any.
    pub fn connecting_move(&self) -> Option<MeleeKind> {
        if self.is_defeated() {
            return None;
        }
        self.melee
            .filter(|swing| swing.frame == self.tuning.melee_connect_frame)
            .map(|swing| swing.kind)
    }

    /// Step sideways by one tick of walking. `direction` is -1.0, 0.0 or 1.0.
    pub fn walk(&mut self, direction: f32) {
        if self.is_defeated() || direction == 0.0 {
            return;
        }
        self.facing = direction.signum();
        self.shift(direction.signum() * self.tuning.move_speed);
    }

    /// Move horizontally by `dx`, staying inside the arena.
    pub fn shift(&mut self, dx: f32) {
        if self.is_defeated() {
            return;
        }
        let bound = self.tuning.arena_half_width.abs();
        self.position.x = (self.position.x + dx).clamp(-bound, bound);
    }

    pub fn face_toward(&mut self, x: f32) {
        let dx = x - self.position.x;
        if dx != 0.0 {
            self.facing = dx.signum();
        }
    }

    pub fn jump(&mut self) -> bool {
        if self.is_defeated() || self.jumps_remaining == 0 {
            return false;
        }

        let impulse = if self.jumps_remaining >= self.tuning.max_jumps {
            self.tuning.jump_impulse
        } else {
            self.tuning.jump_impulse * self.tuning.double_jump_scale
        };

        self.vertical_velocity = impulse;
        self.jumps_remaining -= 1;
        self.grounded = false;
        true
    }

    pub fn punch(&mut self) -> bool {
        self.start_swing(MeleeKind::Punch, self.tuning.punch_cooldown)
    }

    pub fn kick(&mut self) -> bool {
        self.start_swing(MeleeKind::Kick, self.tuning.kick_cooldown)
    }

    fn start_swing(&mut self, kind: MeleeKind, cooldown: u32) -> bool {
        if self.is_defeated() || self.melee_cooldown > 0 || self.melee.is_some() {
            return false;
        }
        self.melee = Some(MeleeSwing { kind, frame: 0 });
        self.melee_cooldown = cooldown;
        true
    }

    /// Fire a missile toward `target_x`.
    ///
    /// When the fighters share the same X, the missile heads away from the
    /// arena center instead.
    pub fn shoot(&mut self, target_x: f32) -> bool {
        if self.is_defeated() || self.shoot_cooldown > 0 || self.pistols == 0 {
            return false;
        }

        let dx = target_x - self.position.x;
        let heading = if dx.abs() > f32::EPSILON {
            dx.signum()
        } else if self.position.x < 0.0 {
            1.0
        } else {
            -1.0
        };
        self.facing = heading;

        let start = self.position
            + Vec3::new(
                heading * self.tuning.projectile_spawn_offset,
                self.tuning.projectile_chest_height,
                0.0,
            );
        self.queued.push(Projectile::new(
            self.side,
            start,
            Vec3::new(heading, 0.0, 0.0),
            self.tuning.projectile_speed,
            self.tuning.projectile_trail_length,
            self.tuning.world_bound,
        ));
        self.shoot_cooldown = self.tuning.shoot_cooldown;
        true
    }

    pub fn breathe_fire(&mut self) -> bool {
        if self.is_defeated() || self.breathing || self.breath_cooldown > 0 {
            return false;
        }
        self.breathing = true;
        self.breath_remaining = self.tuning.breath_duration;
        self.breath_cooldown = self.tuning.breath_cooldown;
        true
    }

    /// Whether an active breath channel reaches a fighter standing at `target`.
    pub fn breath_reaches(&self, target: Vec3) -> bool {
        if !self.breathing || self.is_defeated() {
            return false;
        }
        let dx = target.x - self.position.x;
        self.position.distance(target) < self.tuning.breath_range && dx * self.facing >= 0.0
    }

    /// Subtract health, clamping at zero. Returns `None` once knocked out.
    pub fn take_damage(&mut self, amount: i32) -> Option<DamageTaken> {
        if self.is_defeated() || amount <= 0 {
            return None;
        }
        let dealt = amount.min(self.health);
        self.health -= dealt;
        Some(DamageTaken {
            dealt,
            lethal: self.health <= 0,
        })
    }

    /// Enter the terminal exploding state. Only the first call has any effect.
    pub fn start_explosion<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        if self.explosion_started {
            return;
        }
        self.explosion_started = true;
        self.exploding = true;
        self.explosion_timer = 0;
        self.melee = None;
        self.breathing = false;
        self.flame_particles.clear();

        let center = self.position + Vec3::Y;
        self.explosion_particles = (0..self.tuning.explosion_particles)
            .map(|_| {
                let angle = rng.gen_range(0.0..TAU);
                let speed = rng.gen_range(0.05..0.15);
                Particle {
                    position: center,
                    velocity: Vec3::new(angle.cos() * speed, angle.sin() * speed, 0.0),
                    color: Color::srgb(1.0, rng.gen_range(0.0..0.5), 0.0),
                    size: rng.gen_range(0.1..0.3),
                    ttl: self.tuning.explosion_duration,
                }
            })
            .collect();
    }

    /// Advance one tick.
    ///
    /// `opponent` is the other fighter's position, used by the AI policy.
    pub fn update<R, C>(&mut self, opponent: Vec3, rng: &mut R, cues: &mut C)
    where
        R: Rng + ?Sized,
        C: CueSink + ?Sized,
    {
        if self.is_defeated() {
            self.update_explosion();
            return;
        }

        self.shoot_cooldown = self.shoot_cooldown.saturating_sub(1);
        self.melee_cooldown = self.melee_cooldown.saturating_sub(1);
        self.breath_cooldown = self.breath_cooldown.saturating_sub(1);

        if let Some(swing) = self.melee.as_mut() {
            swing.frame += 1;
            if swing.frame >= self.tuning.melee_frames {
                self.melee = None;
            }
        }

        self.apply_gravity();

        if self.ai.is_some() {
            let view = AiView {
                position: self.position,
                grounded: self.grounded,
                opponent,
                melee_range: self.tuning.melee_range,
                breath_range: self.tuning.breath_range,
            };
            let plan = match self.ai.as_mut() {
                Some(policy) => policy.tick(&view, rng),
                None => AiPlan::default(),
            };
            self.follow_plan(plan, opponent, cues);
        }

        self.update_breath(rng);
    }

    fn apply_gravity(&mut self) {
        self.vertical_velocity -= self.tuning.gravity;
        self.position.y = (self.position.y + self.vertical_velocity).max(0.0);

        if self.position.y <= 0.0 && self.vertical_velocity <= 0.0 {
            self.vertical_velocity = 0.0;
            self.jumps_remaining = self.tuning.max_jumps;
            self.grounded = true;
        }
    }

    fn follow_plan<C: CueSink + ?Sized>(&mut self, plan: AiPlan, opponent: Vec3, cues: &mut C) {
        self.face_toward(opponent.x);
        if plan.step != 0.0 {
            self.shift(plan.step);
        }
        if plan.jump && self.jump() {
            cues.play(AudioCue::Jump);
        }
        if plan.punch && self.punch() {
            cues.play(AudioCue::Punch);
        }
        if plan.kick && self.kick() {
            cues.play(AudioCue::Kick);
        }
        if plan.shoot && self.shoot(opponent.x) {
            cues.play(AudioCue::Shoot);
        }
        if plan.breathe && self.breathe_fire() {
            cues.play(AudioCue::Fire);
        }
    }

    fn update_breath<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        for flame in &mut self.flame_particles {
            flame.position += flame.velocity;
            flame.size *= PARTICLE_SHRINK;
            flame.ttl = flame.ttl.saturating_sub(1);
        }
        self.flame_particles.retain(|flame| flame.ttl > 0);

        if !self.breathing {
            return;
        }
        if self.breath_remaining == 0 {
            self.breathing = false;
            return;
        }
        self.breath_remaining -= 1;

        let mouth = self.position + Vec3::new(self.facing * 0.6, 1.2, 0.0);
        for _ in 0..FLAMES_PER_TICK {
            self.flame_particles.push(Particle {
                position: mouth,
                velocity: Vec3::new(
                    self.facing * rng.gen_range(0.1..0.2),
                    rng.gen_range(-0.02..0.02),
                    rng.gen_range(-0.02..0.02),
                ),
                color: Color::srgb(1.0, rng.gen_range(0.3..0.8), 0.0),
                size: rng.gen_range(0.15..0.3),
                ttl: FLAME_TTL,
            });
        }
    }

    fn update_explosion(&mut self) {
        if !self.exploding {
            return;
        }

        self.explosion_timer += 1;
        if self.explosion_timer >= self.tuning.explosion_duration {
            self.exploding = false;
            self.explosion_particles.clear();
            return;
        }

        for particle in &mut self.explosion_particles {
            particle.position += particle.velocity;
            particle.velocity.y -= PARTICLE_GRAVITY;
            particle.size *= PARTICLE_SHRINK;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fighter(x: f32) -> Character {
        let side = if x < 0.0 { Side::Left } else { Side::Right };
        Character::new("Test", side, Vec3::new(x, 0.0, 0.0), Color::WHITE, CombatTuning::default())
            .with_pistols(2)
    }

    fn tick(character: &mut Character, rng: &mut StdRng) -> Vec<AudioCue> {
        let mut cues = Vec::new();
        character.update(Vec3::new(3.0, 0.0, 0.0), rng, &mut cues);
        cues
    }

    #[test]
    fn health_fraction_tracks_damage() {
        let mut c = fighter(-3.0);
        assert_eq!(c.health_fraction(), 1.0);
        c.take_damage(25);
        assert_eq!(c.health_fraction(), 0.75);
        c.take_damage(500);
        assert_eq!(c.health_fraction(), 0.0);
    }

    #[test]
    fn double_jump_then_exhausted() {
        let mut c = fighter(-3.0);
        assert!(c.jump());
        assert!((c.vertical_velocity - 0.3).abs() < 1e-6);
        assert!(c.jump());
        assert!((c.vertical_velocity - 0.24).abs() < 1e-6);
        assert!(!c.jump());
        assert_eq!(c.jumps_remaining, 0);
    }

    #[test]
    fn landing_restores_jumps_and_stops_fall() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut c = fighter(-3.0);
        c.jump();
        c.jump();
        let mut ticks = 0;
        loop {
            tick(&mut c, &mut rng);
            ticks += 1;
            assert!(c.position.y >= 0.0);
            if c.grounded {
                break;
            }
            assert!(ticks < 200);
        }
        assert_eq!(c.jumps_remaining, 2);
        assert_eq!(c.vertical_velocity, 0.0);
    }

    #[test]
    fn punch_respects_cooldown_and_animation() {
        let mut rng = StdRng::seed_from_u64(2);
        let mut c = fighter(-3.0);
        assert!(c.punch());
        assert!(!c.kick(), "cannot start a kick mid-punch");

        for _ in 0..10 {
            tick(&mut c, &mut rng);
        }
        assert!(c.melee.is_none(), "animation reverts to idle at the frame cap");
        assert!(!c.punch(), "cooldown still running");

        for _ in 0..10 {
            tick(&mut c, &mut rng);
        }
        assert!(c.kick());
        assert_eq!(c.melee_cooldown, 30);
    }

    #[test]
    fn connect_frame_is_reported_once_per_swing() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut c = fighter(-3.0);
        c.kick();
        let mut connects = 0;
        for _ in 0..40 {
            tick(&mut c, &mut rng);
            if c.connecting_move().is_some() {
                connects += 1;
            }
        }
        assert_eq!(connects, 1);
    }

    #[test]
    fn shooting_needs_pistols_and_cooldown() {
        let mut unarmed = fighter(-3.0).with_pistols(0);
        assert!(!unarmed.shoot(3.0));

        let mut c = fighter(-3.0);
        assert!(c.shoot(3.0));
        assert!(!c.shoot(3.0));
        assert_eq!(c.pistols, 2, "pistols are never spent");

        let missile = &c.queued_projectiles()[0];
        assert_eq!(missile.owner, Side::Left);
        assert!(missile.direction.x > 0.0);
        assert!((missile.position.x - -2.0).abs() < 1e-6);
        assert!((missile.position.y - 0.5).abs() < 1e-6);
    }

    #[test]
    fn shot_aims_at_the_opponent_even_after_crossing_over() {
        let mut c = fighter(2.0);
        assert!(c.shoot(5.0));
        assert!(c.queued_projectiles()[0].direction.x > 0.0);
    }

    #[test]
    fn breath_channel_runs_for_its_duration() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut c = fighter(-3.0);
        assert!(c.breathe_fire());
        assert!(!c.breathe_fire());
        for _ in 0..30 {
            tick(&mut c, &mut rng);
            assert!(c.breathing);
        }
        tick(&mut c, &mut rng);
        assert!(!c.breathing);
        assert!(!c.flame_particles().is_empty());
        assert!(!c.breathe_fire(), "still on cooldown");
    }

    #[test]
    fn breath_only_reaches_what_is_in_front() {
        let mut c = fighter(-3.0);
        c.breathe_fire();
        assert!(c.breath_reaches(Vec3::new(-1.0, 0.0, 0.0)));
        assert!(!c.breath_reaches(Vec3::new(-5.0, 0.0, 0.0)), "behind");
        assert!(!c.breath_reaches(Vec3::new(3.0, 0.0, 0.0)), "out of range");
    }

    #[test]
    fn lethal_damage_clamps_to_zero() {
        let mut c = fighter(3.0).with_health(5);
        let taken = c.take_damage(15).unwrap();
        assert_eq!(taken, DamageTaken { dealt: 5, lethal: true });
        assert_eq!(c.health, 0);
        assert!(c.take_damage(15).is_none());
        assert!(!c.jump());
        assert!(!c.shoot(-3.0));
    }

    #[test]
    fn explosion_lasts_its_duration_then_freezes() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut c = fighter(3.0).with_health(5);
        c.take_damage(15);
        c.start_explosion(&mut rng);
        assert!(c.is_exploding());
        assert_eq!(c.explosion_particles().len(), 20);

        for _ in 0..59 {
            tick(&mut c, &mut rng);
            assert!(c.is_exploding());
        }
        tick(&mut c, &mut rng);
        assert!(!c.is_exploding());
        assert!(c.explosion_finished());

        let position = c.position;
        for _ in 0..100 {
            tick(&mut c, &mut rng);
        }
        assert_eq!(c.position, position);
        assert_eq!(c.health, 0);
        assert!(!c.is_exploding());
    }

    #[test]
    fn walking_is_clamped_to_the_arena() {
        let mut c = fighter(-8.95);
        c.walk(-1.0);
        c.walk(-1.0);
        assert_eq!(c.position.x, -9.0);
        assert_eq!(c.facing, -1.0);
    }
}
