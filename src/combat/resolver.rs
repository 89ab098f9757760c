//! Per-tick match resolution.
//!
//! `Match::tick` advances the whole fight by one fixed step: it applies the
//! players' intents, updates both fighters, resolves melee, missiles and
//! fire breath, and decides when the fight is over.

use bevy::prelude::*;
use rand::Rng;

use super::character::{Character, MeleeKind, Side};
use super::projectile::Projectile;
use super::snapshot::{FighterSnapshot, MatchSnapshot, ProjectileSnapshot};
use super::tuning::CombatTuning;
use crate::core::{AudioCue, CueSink};

/// Control signals for one fighter during one tick.
///
/// Movement and attack flags mirror held keys. `jump` is edge-triggered so
/// holding the key does not burn both jumps at once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerIntent {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub punch: bool,
    pub kick: bool,
    pub shoot: bool,
    pub breathe: bool,
}

impl PlayerIntent {
    /// -1.0, 0.0 or 1.0. Opposing keys cancel out.
    pub fn horizontal(&self) -> f32 {
        match (self.left, self.right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }
}

/// How a hit was delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitKind {
    Punch,
    Kick,
    Missile,
    Breath,
}

impl From<MeleeKind> for HitKind {
    fn from(kind: MeleeKind) -> Self {
        match kind {
            MeleeKind::Punch => HitKind::Punch,
            MeleeKind::Kick => HitKind::Kick,
        }
    }
}

/// A hit that changed a fighter's health.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitRecord {
    pub attacker: Side,
    pub defender: Side,
    pub kind: HitKind,
    pub damage: i32,
    pub lethal: bool,
}

/// Final result of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Winner(Side),
    /// Both fighters were knocked out before the match could end.
    Draw,
}

/// Everything that happened during one tick.
#[derive(Debug, Default)]
pub struct TickReport {
    pub cues: Vec<AudioCue>,
    pub hits: Vec<HitRecord>,
    pub outcome: Option<MatchOutcome>,
}

/// Authoritative fight state: both fighters, the missiles in flight and
/// the running score.
#[derive(Resource, Debug, Clone)]
pub struct Match {
    fighters: [Character; 2],
    projectiles: Vec<Projectile>,
    score: u32,
    melee_range: f32,
    running: bool,
    outcome: Option<MatchOutcome>,
    ticks: u64,
    tuning: CombatTuning,
}

impl Match {
    pub fn new(left: Character, right: Character, tuning: CombatTuning) -> Self {
        Self {
            fighters: [left, right],
            projectiles: Vec::new(),
            score: 0,
            melee_range: tuning.melee_range,
            running: true,
            outcome: None,
            ticks: 0,
            tuning,
        }
    }

    pub fn fighter(&self, side: Side) -> &Character {
        &self.fighters[side.index()]
    }

    pub fn fighter_mut(&mut self, side: Side) -> &mut Character {
        &mut self.fighters[side.index()]
    }

    pub fn projectiles(&self) -> &[Projectile] {
        &self.projectiles
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Headline for a decided outcome, using the fighters' names.
    pub fn describe(&self, outcome: MatchOutcome) -> String {
        match outcome {
            MatchOutcome::Winner(side) => format!("{} wins!", self.fighter(side).name),
            MatchOutcome::Draw => "Double knockout - it's a draw!".to_string(),
        }
    }

    /// Advance the match by one fixed timestep.
    pub fn tick<R: Rng + ?Sized>(&mut self, intents: &[PlayerIntent; 2], rng: &mut R) -> TickReport {
        let mut report = TickReport::default();
        if !self.running {
            return report;
        }
        self.ticks += 1;

        // A knockout ends the match once every explosion has played out.
        if self.fighters.iter().any(Character::is_defeated) {
            if self.fighters.iter().all(|fighter| !fighter.is_exploding()) {
                let outcome = self.decide_outcome();
                self.running = false;
                self.outcome = Some(outcome);
                report.outcome = Some(outcome);
                info!("Game over! {} (score {})", self.describe(outcome), self.score);
                return report;
            }
        }

        for side in Side::ALL {
            self.apply_intent(side, &intents[side.index()], &mut report.cues);
        }

        let positions = [self.fighters[0].position, self.fighters[1].position];
        for side in Side::ALL {
            let opponent = positions[side.opponent().index()];
            self.fighters[side.index()].update(opponent, rng, &mut report.cues);
        }

        self.resolve_melee(rng, &mut report);
        self.resolve_projectiles(rng, &mut report);

        for fighter in &mut self.fighters {
            self.projectiles.extend(fighter.drain_queued());
        }
        self.projectiles.retain(|projectile| projectile.active);

        self.resolve_breath(rng, &mut report);

        report
    }

    fn apply_intent<C: CueSink + ?Sized>(&mut self, side: Side, intent: &PlayerIntent, cues: &mut C) {
        let target_x = self.fighters[side.opponent().index()].position.x;
        let fighter = &mut self.fighters[side.index()];
        if fighter.is_ai() || fighter.is_defeated() {
            return;
        }

        fighter.walk(intent.horizontal());

        if intent.jump && fighter.jump() {
            cues.play(AudioCue::Jump);
        }
        if intent.punch && fighter.punch() {
            cues.play(AudioCue::Punch);
        }
        if intent.kick && fighter.kick() {
            cues.play(AudioCue::Kick);
        }
        if intent.shoot && fighter.shoot(target_x) {
            cues.play(AudioCue::Shoot);
        }
        if intent.breathe && fighter.breathe_fire() {
            cues.play(AudioCue::Fire);
        }
    }

    fn resolve_melee<R: Rng + ?Sized>(&mut self, rng: &mut R, report: &mut TickReport) {
        let distance = (self.fighters[0].position.x - self.fighters[1].position.x).abs();
        if distance >= self.melee_range {
            return;
        }

        // Both swings are read before either lands, so a trade is simultaneous.
        let swings: Vec<(Side, MeleeKind)> = Side::ALL
            .into_iter()
            .filter_map(|side| self.fighters[side.index()].connecting_move().map(|kind| (side, kind)))
            .collect();

        for (attacker, kind) in swings {
            let damage = match kind {
                MeleeKind::Punch => self.tuning.punch_damage,
                MeleeKind::Kick => self.tuning.kick_damage,
            };
            self.apply_hit(attacker, kind.into(), damage, rng, report);
        }
    }

    fn resolve_projectiles<R: Rng + ?Sized>(&mut self, rng: &mut R, report: &mut TickReport) {
        let radius = self.tuning.projectile_hit_radius;
        let mut landed = Vec::new();

        for projectile in &mut self.projectiles {
            projectile.update();

            let target = &self.fighters[projectile.owner.opponent().index()];
            if !target.is_defeated() && projectile.hits(target.position, radius) {
                projectile.active = false;
                landed.push(projectile.owner);
            }
        }

        for attacker in landed {
            self.apply_hit(attacker, HitKind::Missile, self.tuning.projectile_damage, rng, report);
        }
    }

    fn resolve_breath<R: Rng + ?Sized>(&mut self, rng: &mut R, report: &mut TickReport) {
        let burning: Vec<Side> = Side::ALL
            .into_iter()
            .filter(|side| {
                let target = self.fighters[side.opponent().index()].position;
                self.fighters[side.index()].breath_reaches(target)
            })
            .collect();

        for attacker in burning {
            self.apply_hit(attacker, HitKind::Breath, self.tuning.breath_damage, rng, report);
        }
    }

    /// Damage the attacker's opponent, then handle scoring, cues and knockouts.
    fn apply_hit<R: Rng + ?Sized>(
        &mut self,
        attacker: Side,
        kind: HitKind,
        damage: i32,
        rng: &mut R,
        report: &mut TickReport,
    ) {
        let defender = attacker.opponent();
        let target = &mut self.fighters[defender.index()];
        let Some(taken) = target.take_damage(damage) else {
            return;
        };

        self.score += damage.max(0) as u32;
        match kind {
            // Continuous damage; a cue per tick would drown everything else.
            HitKind::Breath => debug!("{} is burning ({} health left)", target.name, target.health),
            _ => {
                report.cues.play(AudioCue::Hit);
                info!("{} was hit by a {:?} ({} health left)", target.name, kind, target.health);
            }
        }

        if taken.lethal {
            target.start_explosion(rng);
            report.cues.play(AudioCue::Explosion);
            self.score += self.tuning.knockout_bonus;
            info!("{} has been defeated!", target.name);
        }

        report.hits.push(HitRecord {
            attacker,
            defender,
            kind,
            damage: taken.dealt,
            lethal: taken.lethal,
        });
    }

    fn decide_outcome(&self) -> MatchOutcome {
        match (self.fighters[0].is_defeated(), self.fighters[1].is_defeated()) {
            (false, true) => MatchOutcome::Winner(Side::Left),
            (true, false) => MatchOutcome::Winner(Side::Right),
            _ => MatchOutcome::Draw,
        }
    }

    /// Read-only view of the current state for presentation.
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            fighters: [
                FighterSnapshot::of(&self.fighters[0]),
                FighterSnapshot::of(&self.fighters[1]),
            ],
            projectiles: self.projectiles.iter().map(ProjectileSnapshot::of).collect(),
            score: self.score,
            outcome: self.outcome,
        }
    }
}
