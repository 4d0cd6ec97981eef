//! Core domain: preview mode state, shared resources and events.

mod events;
mod resources;
mod state;
mod systems;

pub use events::{LayerUpdateCompleted, LayerUpdateDropped};
pub use resources::PreviewLoading;
pub use state::PreviewMode;

use bevy::prelude::*;

use crate::core::systems::{log_mode_change, setup_camera, transition_to_preview};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<PreviewMode>()
            .init_resource::<PreviewLoading>()
            .add_message::<LayerUpdateCompleted>()
            .add_message::<LayerUpdateDropped>()
            .add_systems(Startup, (setup_camera, transition_to_preview))
            .add_systems(
                Update,
                log_mode_change.run_if(state_changed::<PreviewMode>),
            );
    }
}
