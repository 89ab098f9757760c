//! Audio cue plugin - loads the cue sounds and plays them on `CueEvent`.

use std::path::Path;

use bevy::prelude::*;
use bevy_kira_audio::{Audio, AudioControl};

use super::library::{CueLibrary, SOUNDS_DIR};
use crate::core::CueEvent;

/// Audio cue plugin - adds kira audio output and the cue player.
pub struct AudioCuePlugin;

impl Plugin for AudioCuePlugin {
    fn build(&self, app: &mut App) {
        app
            .add_plugins(bevy_kira_audio::AudioPlugin)
            .init_resource::<CueLibrary>()
            .add_systems(Startup, load_cue_library)
            .add_systems(Update, play_cues);
    }
}

fn load_cue_library(mut commands: Commands, asset_server: Res<AssetServer>) {
    let library = CueLibrary::load(&asset_server, Path::new(SOUNDS_DIR));
    commands.insert_resource(library);
}

fn play_cues(mut events: EventReader<CueEvent>, library: Res<CueLibrary>, audio: Res<Audio>) {
    for CueEvent(cue) in events.read() {
        if let Some(handle) = library.get(*cue) {
            audio.play(handle.clone());
        }
    }
}
