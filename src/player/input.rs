//! Keyboard sampling and intent latching.
//!
//! Keys are read every frame in `Update`, but the fight only advances in
//! `FixedUpdate`. Movement keys are simply overwritten each frame. Action
//! presses are latched until the next fixed tick consumes them, so a short
//! tap on a fast frame is never lost.

use bevy::prelude::*;

use super::controls::{ControlMap, Controls};
use crate::combat::{PlayerIntent, Side};
use crate::core::GameState;

/// System set for input sampling.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ControlSet {
    Latch,
}

/// Intents waiting for the next fixed tick.
#[derive(Resource, Debug, Default)]
pub struct LatchedIntents {
    intents: [PlayerIntent; 2],
}

impl LatchedIntents {
    /// Fold a freshly sampled intent into the latch.
    pub fn latch(&mut self, side: Side, sampled: PlayerIntent) {
        let slot = &mut self.intents[side.index()];
        *slot = PlayerIntent {
            left: sampled.left,
            right: sampled.right,
            jump: slot.jump || sampled.jump,
            punch: slot.punch || sampled.punch,
            kick: slot.kick || sampled.kick,
            shoot: slot.shoot || sampled.shoot,
            breathe: slot.breathe || sampled.breathe,
        };
    }

    /// Hand the intents to the simulation. Clears pending actions and keeps
    /// the held direction.
    pub fn take(&mut self) -> [PlayerIntent; 2] {
        let taken = self.intents;
        for intent in &mut self.intents {
            *intent = PlayerIntent {
                left: intent.left,
                right: intent.right,
                ..default()
            };
        }
        taken
    }
}

/// Sample one fighter's keys.
pub fn read_intent(keyboard: &ButtonInput<KeyCode>, map: &ControlMap) -> PlayerIntent {
    PlayerIntent {
        left: keyboard.pressed(map.left),
        right: keyboard.pressed(map.right),
        jump: keyboard.just_pressed(map.jump),
        punch: keyboard.pressed(map.punch),
        kick: keyboard.pressed(map.kick),
        shoot: keyboard.pressed(map.shoot),
        breathe: keyboard.pressed(map.breathe),
    }
}

/// Set up input systems.
pub fn setup_input_systems(app: &mut App) {
    app
        .init_resource::<Controls>()
        .init_resource::<LatchedIntents>()
        .add_systems(
            Update,
            latch_player_input
                .in_set(ControlSet::Latch)
                .run_if(in_state(GameState::Fighting)),
        );
}

fn latch_player_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    controls: Res<Controls>,
    mut latched: ResMut<LatchedIntents>,
) {
    for side in Side::ALL {
        let sampled = read_intent(&keyboard, controls.for_side(side));
        latched.latch(side, sampled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_held_keys_for_the_given_map() {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::ArrowLeft);
        keyboard.press(KeyCode::KeyM);
        keyboard.press(KeyCode::KeyQ);

        let one = read_intent(&keyboard, &ControlMap::PLAYER_ONE);
        assert!(one.left && one.punch);
        assert!(!one.right && !one.kick && !one.shoot && !one.breathe);

        let two = read_intent(&keyboard, &ControlMap::PLAYER_TWO);
        assert!(two.punch);
        assert!(!two.left);
    }

    #[test]
    fn jump_only_on_the_press_frame() {
        let mut keyboard = ButtonInput::<KeyCode>::default();
        keyboard.press(KeyCode::KeyW);
        assert!(read_intent(&keyboard, &ControlMap::PLAYER_TWO).jump);

        keyboard.clear();
        assert!(keyboard.pressed(KeyCode::KeyW));
        assert!(!read_intent(&keyboard, &ControlMap::PLAYER_TWO).jump);
    }

    #[test]
    fn jump_survives_until_taken_once() {
        let mut latched = LatchedIntents::default();
        latched.latch(Side::Left, PlayerIntent { jump: true, ..default() });
        latched.latch(Side::Left, PlayerIntent { right: true, ..default() });

        let first = latched.take();
        assert!(first[0].jump);
        assert!(first[0].right);

        let second = latched.take();
        assert!(!second[0].jump);
        assert!(second[0].right);
    }

    #[test]
    fn attack_tap_between_ticks_is_kept() {
        let mut latched = LatchedIntents::default();
        // Pressed and released within two render frames before a fixed tick.
        latched.latch(Side::Right, PlayerIntent { punch: true, breathe: true, ..default() });
        latched.latch(Side::Right, PlayerIntent::default());
        latched.latch(Side::Left, PlayerIntent { kick: true, shoot: true, ..default() });
        latched.latch(Side::Left, PlayerIntent { left: true, ..default() });

        let first = latched.take();
        assert!(first[1].punch && first[1].breathe);
        assert!(first[0].kick && first[0].shoot && first[0].left);

        let second = latched.take();
        assert!(!second[1].punch && !second[1].breathe);
        assert!(!second[0].kick && !second[0].shoot);
        assert!(second[0].left);
    }
}
