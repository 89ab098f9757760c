//! Combat plugin - sets up the match and drives it at a fixed rate.

use bevy::prelude::*;

use super::systems;

/// Combat plugin - owns the [`Match`](super::Match) resource.
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        systems::setup_combat_systems(app);
    }
}
