//! Keyboard bindings for both fighters and the global keys.

use bevy::prelude::*;

use crate::combat::Side;

/// Keys driving one fighter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlMap {
    pub left: KeyCode,
    pub right: KeyCode,
    pub jump: KeyCode,
    pub punch: KeyCode,
    pub kick: KeyCode,
    pub shoot: KeyCode,
    pub breathe: KeyCode,
}

impl ControlMap {
    /// Player 1: arrows, M punch, N kick, B shoot, V breath.
    pub const PLAYER_ONE: ControlMap = ControlMap {
        left: KeyCode::ArrowLeft,
        right: KeyCode::ArrowRight,
        jump: KeyCode::ArrowUp,
        punch: KeyCode::KeyM,
        kick: KeyCode::KeyN,
        shoot: KeyCode::KeyB,
        breathe: KeyCode::KeyV,
    };

    /// Player 2: A/D/W, Q punch, E kick, R shoot, F breath.
    pub const PLAYER_TWO: ControlMap = ControlMap {
        left: KeyCode::KeyA,
        right: KeyCode::KeyD,
        jump: KeyCode::KeyW,
        punch: KeyCode::KeyQ,
        kick: KeyCode::KeyE,
        shoot: KeyCode::KeyR,
        breathe: KeyCode::KeyF,
    };

    pub fn for_side(side: Side) -> ControlMap {
        match side {
            Side::Left => Self::PLAYER_ONE,
            Side::Right => Self::PLAYER_TWO,
        }
    }
}

/// Bindings for both sides plus the app-wide keys.
#[derive(Resource, Debug, Clone)]
pub struct Controls {
    pub players: [ControlMap; 2],
    /// Request a caption of the current frame.
    pub caption: KeyCode,
}

impl Default for Controls {
    fn default() -> Self {
        Self {
            players: Side::ALL.map(ControlMap::for_side),
            caption: KeyCode::KeyC,
        }
    }
}

impl Controls {
    pub fn for_side(&self, side: Side) -> &ControlMap {
        &self.players[side.index()]
    }
}
