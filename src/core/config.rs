//! Game configuration loaded from an external RON file.
//!
//! Every field has a default, so a partial file only overrides what it
//! names and a missing file yields the stock match.

use std::fs;
use std::path::Path;

use bevy::prelude::*;
use serde::Deserialize;

use super::error::ConfigError;
use crate::caption::CaptionSettings;
use crate::combat::{AiTuning, CombatTuning, Side};
use crate::rendering::ArenaVisuals;

/// Where the config lives relative to the working directory.
pub const CONFIG_PATH: &str = "assets/data/fighter.ron";

/// Primary window settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: f32,
    pub height: f32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Retro Fighting Game".to_string(),
            width: 800.0,
            height: 600.0,
        }
    }
}

/// Who stands where, and whether a human drives them.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlayerSetup {
    pub name: String,
    pub color: (f32, f32, f32),
    pub start_x: f32,
    pub ai_controlled: bool,
    pub pistols: u32,
}

impl PlayerSetup {
    pub fn for_side(side: Side) -> Self {
        match side {
            Side::Left => Self {
                name: "Player 1".to_string(),
                color: (0.0, 0.0, 1.0),
                start_x: -3.0,
                ai_controlled: false,
                pistols: 2,
            },
            Side::Right => Self {
                name: "Player 2".to_string(),
                color: (1.0, 0.0, 0.0),
                start_x: 3.0,
                ai_controlled: true,
                pistols: 2,
            },
        }
    }

    pub fn color(&self) -> Color {
        Color::srgb(self.color.0, self.color.1, self.color.2)
    }
}

impl Default for PlayerSetup {
    fn default() -> Self {
        Self::for_side(Side::Left)
    }
}

/// Top-level configuration, loaded from [`CONFIG_PATH`].
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FighterConfig {
    pub window: WindowSettings,
    /// Left fighter, keyboard player 1 by default.
    pub player_one: PlayerSetup,
    /// Right fighter, AI-controlled by default.
    pub player_two: PlayerSetup,
    pub combat: CombatTuning,
    pub ai: AiTuning,
    pub arena: ArenaVisuals,
    pub caption: CaptionSettings,
    /// Fixes the random sequence when set.
    pub seed: Option<u64>,
    /// Seconds the result banner stays up before the app exits.
    pub results_display_secs: f32,
}

impl Default for FighterConfig {
    fn default() -> Self {
        Self {
            window: WindowSettings::default(),
            player_one: PlayerSetup::for_side(Side::Left),
            player_two: PlayerSetup::for_side(Side::Right),
            combat: CombatTuning::default(),
            ai: AiTuning::default(),
            arena: ArenaVisuals::default(),
            caption: CaptionSettings::default(),
            seed: None,
            results_display_secs: 3.0,
        }
    }
}

/// Where the active config came from.
///
/// Config is read before the window exists, which is before any log
/// subscriber is installed, so the outcome is held here and reported by
/// `CorePlugin` once logging is up.
#[derive(Resource, Debug)]
pub enum ConfigSource {
    File(String),
    Defaults(ConfigError),
}

impl ConfigSource {
    pub fn report(&self) {
        match self {
            ConfigSource::File(path) => info!("Loaded fighter config from {}", path),
            ConfigSource::Defaults(ConfigError::FileNotFound(path)) => {
                warn!("Config {} not found. Using defaults.", path)
            }
            ConfigSource::Defaults(e) => error!("{}. Using defaults.", e),
        }
    }
}

impl FighterConfig {
    /// Load from [`CONFIG_PATH`], falling back to defaults on any error.
    pub fn load() -> (Self, ConfigSource) {
        Self::load_or_default(CONFIG_PATH)
    }

    pub fn load_or_default(path: impl AsRef<Path>) -> (Self, ConfigSource) {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(config) => (config, ConfigSource::File(path.display().to_string())),
            Err(e) => (Self::default(), ConfigSource::Defaults(e)),
        }
    }

    pub fn try_load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(display));
        }

        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: display.clone(),
            details: e.to_string(),
        })?;

        Self::parse(&contents).map_err(|details| ConfigError::ParseError { path: display, details })
    }

    /// Parse RON text. Returns the parser's message on failure.
    pub fn parse(contents: &str) -> Result<Self, String> {
        ron::from_str(contents).map_err(|e| e.to_string())
    }

    pub fn player(&self, side: Side) -> &PlayerSetup {
        match side {
            Side::Left => &self.player_one,
            Side::Right => &self.player_two,
        }
    }

    pub fn player_mut(&mut self, side: Side) -> &mut PlayerSetup {
        match side {
            Side::Left => &mut self.player_one,
            Side::Right => &mut self.player_two,
        }
    }
}
