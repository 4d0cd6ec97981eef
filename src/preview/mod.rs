//! Preview domain: the two character scenes and their layer updates.

mod animate;
mod scene;
mod update;


pub use scene::{DirectionAnchor, LayerSprite, PreviewRoot, PreviewScene, SceneBackground, SceneKind};

use bevy::prelude::*;

use crate::core::PreviewMode;
use crate::preview::animate::{animate_sprites, sync_facing_visibility};
use crate::preview::scene::{setup_four_way_scene, setup_single_scene, teardown_scene};
use crate::preview::update::{poll_layer_update, request_layer_update};
use crate::sprites::LayerSet;

pub struct PreviewPlugin;

impl Plugin for PreviewPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(PreviewMode::SingleCharacter), setup_single_scene)
            .add_systems(OnExit(PreviewMode::SingleCharacter), teardown_scene)
            .add_systems(OnEnter(PreviewMode::FourDirection), setup_four_way_scene)
            .add_systems(OnExit(PreviewMode::FourDirection), teardown_scene)
            .add_systems(
                Update,
                (
                    request_layer_update.run_if(resource_changed::<LayerSet>),
                    poll_layer_update,
                    animate_sprites,
                    sync_facing_visibility,
                )
                    .chain()
                    .run_if(resource_exists::<PreviewScene>),
            );
    }
}
