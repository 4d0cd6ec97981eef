//! Movement domain: input sampling for the previewed character.

use bevy::prelude::*;

use crate::movement::{MovementInput, TouchMovement};

pub(crate) fn read_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    touch: Res<TouchMovement>,
    mut input: ResMut<MovementInput>,
) {
    // Horizontal axis
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    // Vertical axis
    let mut y = 0.0;
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        y += 1.0;
    }

    input.axis = (Vec2::new(x, y) + touch.axis).clamp(Vec2::NEG_ONE, Vec2::ONE);
}
