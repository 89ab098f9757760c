//! Pure geometry for drawing a fighter from its snapshot.

use std::f32::consts::PI;

use bevy::prelude::*;

use crate::combat::{FighterSnapshot, MeleeKind};

/// Body box size. Position is the box center.
pub const BODY_SIZE: Vec3 = Vec3::new(1.0, 2.0, 1.0);

const SHOULDER: Vec2 = Vec2::new(0.5, 0.5);
const HIP: Vec2 = Vec2::new(0.3, -0.8);
const ARM_REST: f32 = 0.3;
const LEG_REST: f32 = 0.2;
const REACH: f32 = 1.0;

/// One limb as a segment in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Limb {
    pub from: Vec3,
    pub to: Vec3,
}

/// Where to draw a fighter's body and limbs this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FighterPose {
    pub body: Transform,
    pub arm: Limb,
    pub leg: Limb,
}

/// How far a swing is extended, peaking halfway through the animation.
pub fn swing_extension(frame: u32, total: u32) -> f32 {
    if total == 0 {
        return 0.0;
    }
    let progress = (frame as f32 / total as f32).clamp(0.0, 1.0);
    (progress * PI).sin()
}

pub fn fighter_pose(fighter: &FighterSnapshot) -> FighterPose {
    let (arm_out, leg_out) = match fighter.melee {
        Some((MeleeKind::Punch, frame)) => (swing_extension(frame, fighter.melee_frames), 0.0),
        Some((MeleeKind::Kick, frame)) => (0.0, swing_extension(frame, fighter.melee_frames)),
        None => (0.0, 0.0),
    };

    let facing = if fighter.facing < 0.0 { -1.0 } else { 1.0 };
    let limb = |anchor: Vec2, rest: f32, out: f32| {
        let from = fighter.position + Vec3::new(anchor.x * facing, anchor.y, 0.0);
        let to = from + Vec3::X * facing * (rest + REACH * out);
        Limb { from, to }
    };

    FighterPose {
        body: Transform::from_translation(fighter.position),
        arm: limb(SHOULDER, ARM_REST, arm_out),
        leg: limb(HIP, LEG_REST, leg_out),
    }
}
