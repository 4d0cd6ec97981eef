//! Movement domain: components for the previewed character.

use bevy::prelude::*;

use crate::sprites::Direction;

/// The single movable character of the single-character scene.
#[derive(Component, Debug)]
pub struct PreviewCharacter;

#[derive(Component, Debug, Default)]
pub struct MovementState {
    pub facing: Direction,
    pub moving: bool,
}
