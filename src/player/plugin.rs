//! Controls plugin - turns keyboard state into per-fighter intents.

use bevy::prelude::*;

use super::input;

/// Controls plugin - samples both players' keys every frame.
pub struct ControlsPlugin;

impl Plugin for ControlsPlugin {
    fn build(&self, app: &mut App) {
        input::setup_input_systems(app);
    }
}
