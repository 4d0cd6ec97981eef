//! Movement domain: position and facing updates.
//!
//! Movement only touches the transform and facing. The walk cycle keeps
//! running from the scene's animation clock either way.

use bevy::prelude::*;

use crate::movement::{MovementInput, MovementState, MovementTuning, PreviewCharacter};
use crate::sprites::Direction;

/// Facing for an input axis. The dominant axis wins; no input keeps the
/// current facing.
pub(crate) fn facing_for_axis(axis: Vec2, current: Direction) -> Direction {
    if axis.length_squared() < 0.01 {
        return current;
    }

    if axis.x.abs() > axis.y.abs() {
        if axis.x > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if axis.y > 0.0 {
        Direction::Up
    } else {
        Direction::Down
    }
}

/// Next position after `dt` seconds of movement along `axis`.
pub(crate) fn step_position(position: Vec2, axis: Vec2, tuning: &MovementTuning, dt: f32) -> Vec2 {
    let velocity = axis.normalize_or_zero() * tuning.scaled_speed();
    tuning.clamp_position(position + velocity * dt)
}

pub(crate) fn apply_movement(
    time: Res<Time>,
    input: Res<MovementInput>,
    tuning: Res<MovementTuning>,
    mut query: Query<(&mut Transform, &mut MovementState), With<PreviewCharacter>>,
) {
    let dt = time.delta_secs();

    for (mut transform, mut state) in &mut query {
        let position = step_position(transform.translation.truncate(), input.axis, &tuning, dt);
        transform.translation.x = position.x;
        transform.translation.y = position.y;
        state.moving = input.axis != Vec2::ZERO;
    }
}

pub(crate) fn update_facing(
    input: Res<MovementInput>,
    mut query: Query<&mut MovementState, With<PreviewCharacter>>,
) {
    for mut state in &mut query {
        let facing = facing_for_axis(input.axis, state.facing);
        if state.facing != facing {
            state.facing = facing;
        }
    }
}
