//! Core domain: startup flow and camera.

use bevy::prelude::*;

use crate::core::state::PreviewMode;

pub(crate) fn transition_to_preview(mut mode: ResMut<NextState<PreviewMode>>) {
    mode.set(PreviewMode::SingleCharacter);
}

pub(crate) fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

pub(crate) fn log_mode_change(mode: Res<State<PreviewMode>>) {
    info!("Preview mode: {:?}", mode.get());
}
