//! Retro Fighter - Entry Point
//!
//! Controls:
//! - Player 1: Arrows move/jump, M punch, N kick, B shoot, V fire breath
//! - Player 2: A/D/W move/jump, Q punch, E kick, R shoot, F fire breath
//! - C: Caption the current frame (needs GEMINI_API_KEY)
//! - Escape: Quit

use bevy::prelude::*;

use retro_fighter::core::FighterConfig;

fn main() {
    let (config, source) = FighterConfig::load();

    App::new()
        // Bevy default plugins, with kira handling audio instead
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: config.window.title.clone(),
                        resolution: (config.window.width, config.window.height).into(),
                        ..default()
                    }),
                    ..default()
                })
                .disable::<bevy::audio::AudioPlugin>(),
        )

        .insert_resource(config)
        .insert_resource(source)

        // Our game plugin
        .add_plugins(retro_fighter::FighterPlugin)

        .run();
}
