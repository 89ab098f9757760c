//! Core plugin that sets up game states, events, and fundamental systems.

use bevy::app::AppExit;
use bevy::prelude::*;

use super::config::{ConfigSource, FighterConfig};
use super::events::*;
use super::rng::GameRng;
use super::states::*;

/// Fixed simulation rate. All tick-denominated tuning assumes this.
pub const SIMULATION_HZ: f64 = 60.0;

/// Counts down the result banner before the app closes.
#[derive(Resource)]
pub struct ResultsTimer(pub Timer);

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - The fighter config and shared RNG resources
/// - Game states (Fighting, GameOver)
/// - Global events (CueEvent, MatchOverEvent)
/// - Quit handling and the post-match exit countdown
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        // main may have loaded the config already to size the window
        if !app.world().contains_resource::<FighterConfig>() {
            let (config, source) = FighterConfig::load();
            app.insert_resource(config).insert_resource(source);
        }
        // LogPlugin is built by now, so the load outcome reaches the log
        if let Some(source) = app.world_mut().remove_resource::<ConfigSource>() {
            source.report();
        }
        let seed = app.world().resource::<FighterConfig>().seed;
        if let Some(seed) = seed {
            info!("Using fixed random seed {}", seed);
        }

        app
            .insert_resource(GameRng::from_config(seed))
            .insert_resource(Time::<Fixed>::from_hz(SIMULATION_HZ))

            .init_state::<GameState>()

            .add_event::<CueEvent>()
            .add_event::<MatchOverEvent>()

            // Escape quits from anywhere
            .add_systems(Update, handle_quit_input)

            .add_systems(OnEnter(GameState::GameOver), start_results_timer)
            .add_systems(
                Update,
                tick_results_timer.run_if(in_state(GameState::GameOver)),
            );
    }
}

fn handle_quit_input(keyboard: Res<ButtonInput<KeyCode>>, mut exit: EventWriter<AppExit>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        info!("Quit requested");
        exit.send(AppExit::Success);
    }
}

fn start_results_timer(mut commands: Commands, config: Res<FighterConfig>) {
    let secs = config.results_display_secs.max(0.0);
    commands.insert_resource(ResultsTimer(Timer::from_seconds(secs, TimerMode::Once)));
}

fn tick_results_timer(
    time: Res<Time>,
    timer: Option<ResMut<ResultsTimer>>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(mut timer) = timer else {
        return;
    };
    if timer.0.tick(time.delta()).just_finished() {
        info!("Results shown, exiting");
        exit.send(AppExit::Success);
    }
}
