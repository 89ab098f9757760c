//! Global events used for cross-system communication.
//!
//! The simulation never talks to the audio or UI layers directly. It reports
//! what happened during a tick, and the fixed-step system forwards those
//! reports as events for the presentation plugins to consume.

use bevy::prelude::*;

/// Named short audio triggers fired on discrete gameplay moments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioCue {
    Jump,
    Shoot,
    Punch,
    Kick,
    Hit,
    Explosion,
    Fire,
}

impl AudioCue {
    pub const ALL: [AudioCue; 7] = [
        AudioCue::Jump,
        AudioCue::Shoot,
        AudioCue::Punch,
        AudioCue::Kick,
        AudioCue::Hit,
        AudioCue::Explosion,
        AudioCue::Fire,
    ];

    pub fn name(self) -> &'static str {
        match self {
            AudioCue::Jump => "jump",
            AudioCue::Shoot => "shoot",
            AudioCue::Punch => "punch",
            AudioCue::Kick => "kick",
            AudioCue::Hit => "hit",
            AudioCue::Explosion => "explosion",
            AudioCue::Fire => "fire",
        }
    }
}

/// Fire-and-forget receiver of audio cues.
///
/// Nothing is ever read back from a sink, so the simulation behaves the
/// same whether a cue is played, queued, or dropped.
pub trait CueSink {
    fn play(&mut self, cue: AudioCue);
}

impl CueSink for Vec<AudioCue> {
    fn play(&mut self, cue: AudioCue) {
        self.push(cue);
    }
}

/// Sent for every cue the simulation produced this tick.
#[derive(Event, Debug, Clone, Copy)]
pub struct CueEvent(pub AudioCue);

/// Sent once, when the match outcome is decided.
#[derive(Event, Debug, Clone)]
pub struct MatchOverEvent {
    /// Human-readable result line, e.g. "Player 1 wins!".
    pub headline: String,
    pub score: u32,
}
