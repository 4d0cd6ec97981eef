//! Preview domain: walk-cycle playback and facing visibility.

use bevy::prelude::*;

use crate::movement::{MovementState, PreviewCharacter};
use crate::preview::scene::{DirectionAnchor, LayerSprite, PreviewScene};

/// Advance the scene clock and push the new frame to every affected sprite.
pub(crate) fn animate_sprites(
    time: Res<Time>,
    mut scene: ResMut<PreviewScene>,
    mut sprites: Query<&mut Sprite, With<LayerSprite>>,
) {
    let updates = scene.sync.tick(time.delta_secs());
    if updates.is_empty() {
        return;
    }

    for update in updates {
        let Some(&entity) = scene.entities.get(&update.sprite) else {
            continue;
        };
        let Ok(mut sprite) = sprites.get_mut(entity) else {
            continue;
        };
        if let Some(atlas) = &mut sprite.texture_atlas {
            atlas.index = update.frame;
        }
    }
}

/// Show only the anchor matching the character's facing.
pub(crate) fn sync_facing_visibility(
    character: Query<&MovementState, (With<PreviewCharacter>, Changed<MovementState>)>,
    mut anchors: Query<(&DirectionAnchor, &mut Visibility)>,
) {
    let Ok(state) = character.single() else {
        return;
    };

    for (anchor, mut visibility) in &mut anchors {
        let wanted = if anchor.0 == state.facing {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
        visibility.set_if_neq(wanted);
    }
}
