//! Debug domain: dev tools standing in for the host page.
//!
//! Features:
//! - Cycle a layer's style through the catalog
//! - Randomize all colors from a reproducible seed
//! - Switch between the single and four-direction scenes

mod state;
mod systems;
mod ui;

#[cfg(test)]
mod tests;

pub use state::DebugState;

use bevy::prelude::*;

use crate::debug::systems::{
    handle_debug_hotkeys, setup_debug_state, toggle_debug_ui, update_status_message,
};

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_debug_state).add_systems(
            Update,
            (toggle_debug_ui, handle_debug_hotkeys, update_status_message)
                .chain()
                .run_if(resource_exists::<DebugState>),
        );
    }
}
