//! Retro Fighter - a two-player local 3D fighting game in Bevy.
//!
//! Two fighters trade missiles, punches, kicks and fire breath in a small
//! arena until one of them is blown apart.
//!
//! # Architecture
//!
//! The game is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Config, game states, global events, quit and exit flow
//! - **Player**: Keyboard bindings and per-tick intent latching
//! - **Combat**: Fighters, missiles, AI and the fixed-step match resolver
//! - **Audio**: Sound effects for gameplay cues
//! - **Rendering**: Arena scene and fighter drawing
//! - **UI**: Health bars, score, captions, result banner
//! - **Caption**: Optional frame commentary from a vision model

pub mod audio;
pub mod caption;
pub mod combat;
pub mod core;
pub mod player;
pub mod rendering;
pub mod ui;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct FighterPlugin;

impl Plugin for FighterPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Input
            .add_plugins(player::ControlsPlugin)

            // Fixed-step simulation
            .add_plugins(combat::CombatPlugin)

            // Presentation
            .add_plugins(audio::AudioCuePlugin)
            .add_plugins(rendering::RenderingPlugin)
            .add_plugins(ui::UiPlugin)

            // Optional remote commentary
            .add_plugins(caption::CaptionPlugin);
    }
}
