//! AI opponent policy.
//!
//! The policy picks a behavior from a weighted table at a fixed cadence and,
//! on every tick, turns the current behavior into a plan of actions for the
//! fighter it drives.

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use super::tuning::AiTuning;

/// High-level behavior of an AI-controlled fighter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AiBehavior {
    #[default]
    Idle,
    Move,
    Attack,
    Dodge,
}

/// Weights used when the opponent is within `close_range`.
pub const CLOSE_RANGE_WEIGHTS: [(AiBehavior, f32); 3] = [
    (AiBehavior::Attack, 0.6),
    (AiBehavior::Dodge, 0.3),
    (AiBehavior::Move, 0.1),
];

/// Weights used when the opponent is farther away.
pub const LONG_RANGE_WEIGHTS: [(AiBehavior, f32); 3] = [
    (AiBehavior::Move, 0.5),
    (AiBehavior::Attack, 0.4),
    (AiBehavior::Dodge, 0.1),
];

/// What the policy can see of the world on a given tick.
#[derive(Debug, Clone, Copy)]
pub struct AiView {
    pub position: Vec3,
    pub grounded: bool,
    pub opponent: Vec3,
    pub melee_range: f32,
    pub breath_range: f32,
}

impl AiView {
    pub fn distance(&self) -> f32 {
        (self.opponent.x - self.position.x).abs()
    }
}

/// Actions the fighter should attempt this tick. Each is still gated by the
/// fighter's own cooldowns.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AiPlan {
    pub step: f32,
    pub jump: bool,
    pub punch: bool,
    pub kick: bool,
    pub shoot: bool,
    pub breathe: bool,
}

/// Periodic stochastic behavior chooser.
#[derive(Debug, Clone)]
pub struct AiPolicy {
    pub behavior: AiBehavior,
    /// Ticks left until the next re-evaluation.
    countdown: u32,
    evaluations: u32,
    tuning: AiTuning,
}

impl AiPolicy {
    pub fn new(tuning: AiTuning) -> Self {
        Self {
            behavior: AiBehavior::Idle,
            countdown: 0,
            evaluations: 0,
            tuning,
        }
    }

    /// Number of times the behavior has been re-evaluated.
    pub fn evaluations(&self) -> u32 {
        self.evaluations
    }

    /// Re-evaluation cadence for the given distance to the opponent.
    pub fn interval_for(&self, distance: f32) -> u32 {
        let interval = if distance < self.tuning.near_distance {
            self.tuning.near_interval
        } else {
            self.tuning.far_interval
        };
        interval.max(1)
    }

    /// Weighted table for the given distance to the opponent.
    pub fn weights_for(&self, distance: f32) -> &'static [(AiBehavior, f32)] {
        if distance < self.tuning.close_range {
            &CLOSE_RANGE_WEIGHTS
        } else {
            &LONG_RANGE_WEIGHTS
        }
    }

    /// Advance one tick and produce this tick's plan.
    pub fn tick<R: Rng + ?Sized>(&mut self, view: &AiView, rng: &mut R) -> AiPlan {
        let distance = view.distance();

        if self.countdown == 0 {
            self.behavior = self.choose_behavior(distance, rng);
            self.countdown = self.interval_for(distance);
            self.evaluations += 1;
            debug!("AI switched to {:?} at distance {:.2}", self.behavior, distance);
        }
        self.countdown -= 1;

        match self.behavior {
            AiBehavior::Idle => AiPlan::default(),
            AiBehavior::Move => self.plan_move(view, rng),
            AiBehavior::Attack => self.plan_attack(view, rng),
            AiBehavior::Dodge => self.plan_dodge(view, rng),
        }
    }

    fn choose_behavior<R: Rng + ?Sized>(&self, distance: f32, rng: &mut R) -> AiBehavior {
        self.weights_for(distance)
            .choose_weighted(rng, |entry| entry.1)
            .map(|entry| entry.0)
            .unwrap_or_default()
    }

    fn plan_move<R: Rng + ?Sized>(&self, view: &AiView, rng: &mut R) -> AiPlan {
        let toward = (view.opponent.x - view.position.x).signum();
        let distance = view.distance();

        let step = if distance < view.melee_range && rng.gen_bool(probability(self.tuning.retreat_chance)) {
            -toward * self.tuning.move_speed
        } else if distance > self.tuning.move_speed {
            toward * self.tuning.move_speed
        } else {
            0.0
        };

        AiPlan { step, ..default() }
    }

    fn plan_attack<R: Rng + ?Sized>(&self, view: &AiView, rng: &mut R) -> AiPlan {
        let distance = view.distance();
        let shoot_chance = if distance < self.tuning.close_range {
            self.tuning.close_shoot_chance
        } else {
            self.tuning.far_shoot_chance
        };

        let mut plan = AiPlan {
            shoot: rng.gen_bool(probability(shoot_chance)),
            ..default()
        };

        if distance < view.melee_range && rng.gen_bool(probability(self.tuning.melee_chance)) {
            if rng.gen_bool(0.5) {
                plan.punch = true;
            } else {
                plan.kick = true;
            }
        }

        if distance < view.breath_range && rng.gen_bool(probability(self.tuning.breath_chance)) {
            plan.breathe = true;
        }

        plan
    }

    fn plan_dodge<R: Rng + ?Sized>(&self, view: &AiView, rng: &mut R) -> AiPlan {
        if !view.grounded {
            return AiPlan::default();
        }
        let reach = self.tuning.dodge_step.abs();
        let step = if reach > 0.0 { rng.gen_range(-reach..=reach) } else { 0.0 };
        AiPlan {
            jump: true,
            step,
            ..default()
        }
    }
}

fn probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}
