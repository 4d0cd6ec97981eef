//! UI domain: loading overlay and touch controls.

mod loading;
mod touch_controls;

use bevy::prelude::*;

use crate::core::PreviewMode;
use crate::ui::loading::{spawn_loading_overlay, update_loading_overlay};
use crate::ui::touch_controls::{
    cleanup_touch_controls, spawn_touch_controls, update_touch_movement,
};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_loading_overlay)
            .add_systems(OnEnter(PreviewMode::SingleCharacter), spawn_touch_controls)
            .add_systems(OnExit(PreviewMode::SingleCharacter), cleanup_touch_controls)
            .add_systems(Update, update_loading_overlay)
            .add_systems(
                Update,
                update_touch_movement.run_if(in_state(PreviewMode::SingleCharacter)),
            );
    }
}
