//! End-to-end match scenarios driven through the public simulation API.

use rand::rngs::StdRng;
use rand::SeedableRng;

use retro_fighter::combat::{build_match, HitKind, Match, MatchOutcome, PlayerIntent, Side};
use retro_fighter::core::FighterConfig;

fn config(left_x: f32, right_x: f32, right_ai: bool) -> FighterConfig {
    let mut config = FighterConfig::default();
    config.player_mut(Side::Left).start_x = left_x;
    config.player_mut(Side::Right).start_x = right_x;
    config.player_mut(Side::Right).ai_controlled = right_ai;
    config
}

fn human_match(left_x: f32, right_x: f32) -> Match {
    build_match(&config(left_x, right_x, false))
}

fn idle() -> [PlayerIntent; 2] {
    [PlayerIntent::default(); 2]
}

fn left_does(intent: PlayerIntent) -> [PlayerIntent; 2] {
    [intent, PlayerIntent::default()]
}

#[test]
fn missile_crosses_the_arena_and_lands_once() {
    let mut rng = StdRng::seed_from_u64(1);
    let mut fight = human_match(-3.0, 3.0);

    let report = fight.tick(&left_does(PlayerIntent { shoot: true, ..Default::default() }), &mut rng);
    assert!(report.hits.is_empty());
    assert_eq!(fight.projectiles().len(), 1);

    let mut missile_hits = 0;
    for _ in 0..120 {
        let report = fight.tick(&idle(), &mut rng);
        missile_hits += report.hits.iter().filter(|hit| hit.kind == HitKind::Missile).count();
    }

    assert_eq!(missile_hits, 1);
    assert_eq!(fight.fighter(Side::Right).health, 85);
    assert_eq!(fight.fighter(Side::Left).health, 100);
    assert!(fight.projectiles().is_empty());
    assert_eq!(fight.score(), 15);
}

#[test]
fn punch_in_range_lands_once_on_the_connect_frame() {
    let mut rng = StdRng::seed_from_u64(2);
    let mut fight = human_match(0.0, 1.0);

    let mut landed_on = Vec::new();
    for tick in 1..=40u32 {
        let intents = if tick == 1 {
            left_does(PlayerIntent { punch: true, ..Default::default() })
        } else {
            idle()
        };
        let report = fight.tick(&intents, &mut rng);
        if !report.hits.is_empty() {
            landed_on.push(tick);
        }
    }

    assert_eq!(landed_on, vec![5]);
    assert_eq!(fight.fighter(Side::Right).health, 95);
}

#[test]
fn punch_out_of_range_misses() {
    let mut rng = StdRng::seed_from_u64(3);
    let mut fight = human_match(0.0, 2.0);

    fight.tick(&left_does(PlayerIntent { punch: true, ..Default::default() }), &mut rng);
    for _ in 0..20 {
        fight.tick(&idle(), &mut rng);
    }
    assert_eq!(fight.fighter(Side::Right).health, 100);
}

#[test]
fn knockout_explodes_for_the_full_duration_then_ends_the_match() {
    let mut rng = StdRng::seed_from_u64(4);
    let mut fight = human_match(-3.0, 3.0);
    *fight.fighter_mut(Side::Right) = fight.fighter(Side::Right).clone().with_health(5);
    let duration = fight.fighter(Side::Right).tuning().explosion_duration;

    fight.tick(&left_does(PlayerIntent { shoot: true, ..Default::default() }), &mut rng);

    let mut exploding_ticks = 0;
    let mut outcome = None;
    for _ in 0..400 {
        let report = fight.tick(&idle(), &mut rng);
        if fight.fighter(Side::Right).is_exploding() {
            exploding_ticks += 1;
        }
        if let Some(decided) = report.outcome {
            outcome = Some(decided);
            break;
        }
    }

    assert_eq!(fight.fighter(Side::Right).health, 0);
    assert_eq!(exploding_ticks, duration);
    assert_eq!(outcome, Some(MatchOutcome::Winner(Side::Left)));
    assert!(!fight.is_running());
    assert_eq!(fight.describe(MatchOutcome::Winner(Side::Left)), "Player 1 wins!");
    // Nominal missile damage plus the knockout bonus.
    assert_eq!(fight.score(), 15 + 50);
}

#[test]
fn missile_in_flight_from_a_fallen_fighter_forces_a_draw() {
    let mut rng = StdRng::seed_from_u64(9);
    let mut fight = human_match(-3.0, 3.0);
    for side in Side::ALL {
        *fight.fighter_mut(side) = fight.fighter(side).clone().with_health(15);
    }
    let shoot = PlayerIntent { shoot: true, ..Default::default() };

    // Right fires first, left fires nine ticks later.
    let mut knockouts = Vec::new();
    let mut outcome = None;
    for tick in 1..=400u32 {
        let intents = match tick {
            1 => [PlayerIntent::default(), shoot],
            10 => [shoot, PlayerIntent::default()],
            _ => idle(),
        };
        let report = fight.tick(&intents, &mut rng);
        for hit in report.hits.iter().filter(|hit| hit.lethal) {
            knockouts.push(hit.defender);
            if hit.defender == Side::Right {
                assert!(fight.fighter(Side::Left).is_exploding(), "left should still be exploding");
            }
        }
        if let Some(decided) = report.outcome {
            outcome = Some(decided);
            break;
        }
    }

    assert_eq!(knockouts, vec![Side::Left, Side::Right]);
    assert_eq!(outcome, Some(MatchOutcome::Draw));
    assert_eq!(fight.describe(MatchOutcome::Draw), "Double knockout - it's a draw!");
    assert_eq!(fight.score(), 2 * (15 + 50));
}

#[test]
fn finished_match_is_frozen() {
    let mut rng = StdRng::seed_from_u64(5);
    let mut fight = human_match(0.0, 1.0);
    *fight.fighter_mut(Side::Right) = fight.fighter(Side::Right).clone().with_health(1);

    fight.tick(&left_does(PlayerIntent { kick: true, ..Default::default() }), &mut rng);
    while fight.is_running() {
        fight.tick(&idle(), &mut rng);
    }

    let ticks = fight.ticks();
    let positions = Side::ALL.map(|side| fight.fighter(side).position);
    let healths = Side::ALL.map(|side| fight.fighter(side).health);
    let score = fight.score();

    for _ in 0..50 {
        let report = fight.tick(
            &[
                PlayerIntent { right: true, shoot: true, jump: true, ..Default::default() },
                PlayerIntent { left: true, punch: true, ..Default::default() },
            ],
            &mut rng,
        );
        assert!(report.cues.is_empty());
        assert!(report.outcome.is_none());
    }

    assert_eq!(fight.ticks(), ticks);
    assert_eq!(Side::ALL.map(|side| fight.fighter(side).position), positions);
    assert_eq!(Side::ALL.map(|side| fight.fighter(side).health), healths);
    assert_eq!(fight.score(), score);
}

#[test]
fn ai_reevaluates_only_on_interval_boundaries() {
    let mut rng = StdRng::seed_from_u64(6);
    let mut fight = build_match(&config(-3.0, 3.0, true));

    let mut evaluated_on = Vec::new();
    let mut last = 0;
    for tick in 1..=600u32 {
        if !fight.is_running() {
            break;
        }
        fight.tick(&idle(), &mut rng);
        let Some(policy) = fight.fighter(Side::Right).ai() else {
            panic!("right fighter should be AI-controlled");
        };
        if policy.evaluations() != last {
            last = policy.evaluations();
            evaluated_on.push(tick);
        }
    }

    assert_eq!(evaluated_on.first(), Some(&1));
    for pair in evaluated_on.windows(2) {
        let gap = pair[1] - pair[0];
        assert!(gap == 60 || gap == 120, "unexpected re-evaluation gap {}", gap);
    }
}

#[test]
fn landing_restores_jumps_and_stops_the_fall() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut fight = human_match(-3.0, 3.0);
    let jump = left_does(PlayerIntent { jump: true, ..Default::default() });

    fight.tick(&jump, &mut rng);
    fight.tick(&idle(), &mut rng);
    fight.tick(&jump, &mut rng);
    assert_eq!(fight.fighter(Side::Left).jumps_remaining, 0);

    let report = fight.tick(&jump, &mut rng);
    assert!(report.cues.is_empty(), "a third jump must not fire");

    for _ in 0..200 {
        fight.tick(&idle(), &mut rng);
    }

    let fighter = fight.fighter(Side::Left);
    assert!(fighter.grounded);
    assert_eq!(fighter.position.y, 0.0);
    assert_eq!(fighter.vertical_velocity, 0.0);
    assert_eq!(fighter.jumps_remaining, 2);
}

#[test]
fn ai_brawl_respects_health_jump_and_missile_bounds() {
    for seed in 0..8u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut config = config(-2.0, 2.0, true);
        config.player_mut(Side::Left).ai_controlled = true;
        let mut fight = build_match(&config);

        let mut previous = Side::ALL.map(|side| fight.fighter(side).health);
        for _ in 0..3000 {
            fight.tick(&idle(), &mut rng);
            for side in Side::ALL {
                let fighter = fight.fighter(side);
                assert!((0..=100).contains(&fighter.health));
                assert!(fighter.health <= previous[side.index()]);
                assert!(fighter.jumps_remaining <= 2);
                assert!(fighter.position.x.abs() <= 9.0);
                previous[side.index()] = fighter.health;
            }
            // Each missile lives at most 200 ticks and each side fires at
            // most once per 30 ticks.
            assert!(fight.projectiles().len() <= 16);
            if !fight.is_running() {
                break;
            }
        }
    }
}
