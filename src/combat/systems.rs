//! Combat systems - match setup and the fixed-step tick.

use bevy::prelude::*;

use super::ai::AiPolicy;
use super::character::{Character, Side};
use super::resolver::{HitRecord, Match};
use crate::core::{CueEvent, FighterConfig, GameRng, GameState, MatchOverEvent};
use crate::player::LatchedIntents;

/// System set ordering for combat.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CombatSet {
    /// Advance the match one step.
    Simulate,
    /// Forward what happened to the rest of the app.
    Report,
}

/// Sent for every hit that landed this tick.
#[derive(Event, Debug, Clone, Copy)]
pub struct HitEvent(pub HitRecord);

/// Configure combat systems.
pub fn setup_combat_systems(app: &mut App) {
    app
        .add_event::<HitEvent>()

        .configure_sets(
            FixedUpdate,
            (CombatSet::Simulate, CombatSet::Report)
                .chain()
                .run_if(in_state(GameState::Fighting)),
        )

        .add_systems(Startup, setup_match)

        .add_systems(
            FixedUpdate,
            run_combat_tick.in_set(CombatSet::Simulate),
        )

        .add_systems(FixedUpdate, log_hits.in_set(CombatSet::Report));
}

/// Build both fighters and the match from config.
pub fn build_match(config: &FighterConfig) -> Match {
    let [left, right] = Side::ALL.map(|side| {
        let setup = config.player(side);
        let position = Vec3::new(setup.start_x, 0.0, 0.0);
        let fighter = Character::new(setup.name.clone(), side, position, setup.color(), config.combat.clone())
            .with_pistols(setup.pistols);
        if setup.ai_controlled {
            fighter.with_ai(AiPolicy::new(config.ai.clone()))
        } else {
            fighter
        }
    });
    Match::new(left, right, config.combat.clone())
}

fn setup_match(mut commands: Commands, config: Res<FighterConfig>) {
    let fight = build_match(&config);
    for side in Side::ALL {
        let fighter = fight.fighter(side);
        info!(
            "{} enters at x={:.1} ({})",
            fighter.name,
            fighter.position.x,
            if fighter.is_ai() { "AI" } else { "human" }
        );
    }
    commands.insert_resource(fight);
}

/// One fixed step of the fight.
fn run_combat_tick(
    mut fight: ResMut<Match>,
    mut intents: ResMut<LatchedIntents>,
    mut rng: ResMut<GameRng>,
    mut cue_events: EventWriter<CueEvent>,
    mut hit_events: EventWriter<HitEvent>,
    mut over_events: EventWriter<MatchOverEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let intents = intents.take();
    let report = fight.tick(&intents, rng.rng_mut());

    for cue in report.cues {
        cue_events.send(CueEvent(cue));
    }
    for hit in report.hits {
        hit_events.send(HitEvent(hit));
    }

    if let Some(outcome) = report.outcome {
        over_events.send(MatchOverEvent {
            headline: fight.describe(outcome),
            score: fight.score(),
        });
        next_state.set(GameState::GameOver);
    }
}

fn log_hits(mut hits: EventReader<HitEvent>) {
    for HitEvent(hit) in hits.read() {
        if hit.lethal {
            debug!("{:?} knocked out {:?} with {:?}", hit.attacker, hit.defender, hit.kind);
        }
    }
}
