//! Arena visuals, loaded as part of the fighter config.
//!
//! Allows tweaking the camera, colors and ground without recompilation.

use bevy::prelude::*;
use serde::Deserialize;

/// Visual settings for the arena.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ArenaVisuals {
    // Camera
    pub camera_position: (f32, f32, f32),
    pub camera_target: (f32, f32, f32),
    // Lighting
    pub light_position: (f32, f32, f32),
    pub light_intensity: f32,
    // Scene
    pub clear_color: (f32, f32, f32),
    pub ground_color: (f32, f32, f32),
    pub ground_height: f32,
    pub ground_size: f32,
    pub show_reference_cube: bool,
    // Missiles
    pub missile_color: (f32, f32, f32),
    pub missile_tip_color: (f32, f32, f32),
    /// Fraction of full brightness reached at the newest trail point.
    pub trail_fade: f32,
}

impl Default for ArenaVisuals {
    fn default() -> Self {
        Self {
            camera_position: (0.0, 1.0, 15.0),
            camera_target: (0.0, 1.0, 0.0),
            light_position: (5.0, 5.0, 5.0),
            light_intensity: 2_000_000.0,
            clear_color: (0.1, 0.1, 0.2),
            ground_color: (0.2, 0.5, 0.2),
            ground_height: -2.0,
            ground_size: 20.0,
            show_reference_cube: true,
            missile_color: (0.8, 0.8, 0.8),
            missile_tip_color: (1.0, 0.0, 0.0),
            trail_fade: 0.8,
        }
    }
}

/// Convert an RGB triple from config into a color.
pub fn rgb(color: (f32, f32, f32)) -> Color {
    Color::srgb(color.0, color.1, color.2)
}

/// Convert a position triple from config into a vector.
pub fn point(position: (f32, f32, f32)) -> Vec3 {
    Vec3::new(position.0, position.1, position.2)
}
