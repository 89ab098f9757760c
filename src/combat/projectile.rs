//! Missiles fired by the `shoot` action.

use std::collections::VecDeque;

use bevy::prelude::*;

use super::character::Side;

/// A kinematic missile with a fading trail.
#[derive(Debug, Clone)]
pub struct Projectile {
    pub position: Vec3,
    /// Only the sign of `x` matters for targeting.
    pub direction: Vec3,
    pub speed: f32,
    pub active: bool,
    /// Side of the character that fired it; it never hits its owner.
    pub owner: Side,
    trail: VecDeque<Vec3>,
    trail_capacity: usize,
    world_bound: f32,
}

impl Projectile {
    pub fn new(
        owner: Side,
        position: Vec3,
        direction: Vec3,
        speed: f32,
        trail_capacity: usize,
        world_bound: f32,
    ) -> Self {
        Self {
            position,
            direction,
            speed,
            active: true,
            owner,
            trail: VecDeque::with_capacity(trail_capacity + 1),
            trail_capacity,
            world_bound,
        }
    }

    /// Advance one tick: record the trail, move, and deactivate past the world bound.
    pub fn update(&mut self) {
        if !self.active {
            return;
        }

        self.trail.push_back(self.position);
        while self.trail.len() > self.trail_capacity {
            self.trail.pop_front();
        }

        self.position += self.direction * self.speed;

        if self.position.x.abs() > self.world_bound || self.position.y.abs() > self.world_bound {
            self.active = false;
        }
    }

    /// Past positions, oldest first.
    pub fn trail(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.trail.iter().copied()
    }

    pub fn trail_len(&self) -> usize {
        self.trail.len()
    }

    /// Whether `target` lies within `radius` of the missile (full 3D distance).
    pub fn hits(&self, target: Vec3, radius: f32) -> bool {
        self.active && self.position.distance(target) < radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn missile(x: f32, dir: f32) -> Projectile {
        Projectile::new(Side::Left, Vec3::new(x, 0.5, 0.0), Vec3::new(dir, 0.0, 0.0), 0.1, 15, 10.0)
    }

    #[test]
    fn moves_along_direction() {
        let mut p = missile(0.0, 1.0);
        p.update();
        assert!((p.position.x - 0.1).abs() < 1e-6);
        assert_eq!(p.trail_len(), 1);
    }

    #[test]
    fn trail_drops_oldest_positions() {
        let mut p = missile(0.0, 1.0);
        for _ in 0..40 {
            p.update();
        }
        assert_eq!(p.trail_len(), 15);
        let first = p.trail().next().unwrap();
        assert!(first.x > 2.0, "oldest kept point should be recent, got {}", first.x);
    }

    #[test]
    fn deactivates_past_world_bound() {
        let mut p = missile(9.95, 1.0);
        p.update();
        assert!(!p.active);
    }

    #[test]
    fn always_leaves_the_world_eventually() {
        let mut p = missile(-2.0, -1.0);
        let mut ticks = 0;
        while p.active {
            p.update();
            ticks += 1;
            assert!(ticks < 1_000);
        }
        assert!(ticks <= 81);
    }

    #[test]
    fn inactive_missiles_never_hit() {
        let mut p = missile(3.0, 1.0);
        assert!(p.hits(Vec3::new(3.0, 0.0, 0.0), 0.8));
        p.active = false;
        assert!(!p.hits(Vec3::new(3.0, 0.0, 0.0), 0.8));
    }
}
