//! Audio module - plays short sound effects for gameplay cues.

mod library;
mod plugin;

pub use library::{cue_file, CueLibrary, SOUNDS_DIR};
pub use plugin::AudioCuePlugin;
