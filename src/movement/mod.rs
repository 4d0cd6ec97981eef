//! Movement domain: free-roaming character of the single-character scene.

mod components;
mod resources;
mod systems;


pub use components::{MovementState, PreviewCharacter};
pub use resources::{MovementInput, MovementTuning, TouchMovement};

use bevy::prelude::*;

use crate::content::PreviewConfig;
use crate::core::PreviewMode;
use crate::movement::systems::{apply_movement, read_input, update_facing};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<MovementInput>()
            .init_resource::<TouchMovement>()
            .add_systems(Startup, apply_movement_config)
            .add_systems(
                Update,
                (read_input, update_facing, apply_movement)
                    .chain()
                    .run_if(in_state(PreviewMode::SingleCharacter)),
            );
    }
}

fn apply_movement_config(config: Res<PreviewConfig>, mut tuning: ResMut<MovementTuning>) {
    *tuning = MovementTuning::from_config(&config);
}
