//! Game state definitions that control the overall flow of the game.
//!
//! States determine which systems run at any given time. The fixed-step
//! simulation only runs while `Fighting`; the results banner and the exit
//! countdown run in `GameOver`.

use bevy::prelude::*;

/// Main game states.
///
/// - Start in `Fighting` with both fighters at full health
/// - Move to `GameOver` once the match outcome is decided
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Active match, simulation ticking
    #[default]
    Fighting,
    /// Outcome decided, showing results before exit
    GameOver,
}
