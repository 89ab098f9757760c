//! Cue-to-sound mapping.
//!
//! Sounds are optional. A cue whose file is missing is left unmapped and
//! playing it does nothing.

use std::collections::HashMap;
use std::path::Path;

use bevy::prelude::*;
use bevy_kira_audio::AudioSource;

use crate::core::AudioCue;

/// Sound directory on disk, relative to the working directory.
pub const SOUNDS_DIR: &str = "assets/sounds";

/// File name for a cue. Punch and kick reuse the hit sound.
pub fn cue_file(cue: AudioCue) -> &'static str {
    match cue {
        AudioCue::Jump => "jump.wav",
        AudioCue::Shoot => "shoot.wav",
        AudioCue::Punch | AudioCue::Kick | AudioCue::Hit => "hit.wav",
        AudioCue::Explosion => "explosion.wav",
        AudioCue::Fire => "fire.wav",
    }
}

/// Loaded sound handles, keyed by cue.
#[derive(Resource, Default)]
pub struct CueLibrary {
    sounds: HashMap<AudioCue, Handle<AudioSource>>,
}

impl CueLibrary {
    /// Queue every cue whose file exists under `sounds_dir`.
    pub fn load(asset_server: &AssetServer, sounds_dir: &Path) -> Self {
        let mut sounds = HashMap::new();
        for cue in AudioCue::ALL {
            let file = cue_file(cue);
            if sounds_dir.join(file).exists() {
                sounds.insert(cue, asset_server.load(format!("sounds/{}", file)));
            } else {
                warn!("Sound for '{}' not found ({}/{}), cue will be silent", cue.name(), SOUNDS_DIR, file);
            }
        }
        info!("Loaded {} of {} sound cues", sounds.len(), AudioCue::ALL.len());
        Self { sounds }
    }

    pub fn get(&self, cue: AudioCue) -> Option<&Handle<AudioSource>> {
        self.sounds.get(&cue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn melee_cues_share_the_hit_sound() {
        assert_eq!(cue_file(AudioCue::Punch), cue_file(AudioCue::Hit));
        assert_eq!(cue_file(AudioCue::Kick), cue_file(AudioCue::Hit));
        assert_ne!(cue_file(AudioCue::Shoot), cue_file(AudioCue::Jump));
    }

    #[test]
    fn missing_cues_are_absent() {
        let library = CueLibrary::default();
        assert!(AudioCue::ALL.iter().all(|&cue| library.get(cue).is_none()));
        assert!(library.get(AudioCue::Explosion).is_none());
    }
}
