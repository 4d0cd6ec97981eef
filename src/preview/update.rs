//! Preview domain: applying layer-set changes to the active scene.
//!
//! An update runs in two phases. `request_layer_update` accepts the host's
//! new set (or drops it while another update is in flight) and starts
//! loading missing base sheets. `poll_layer_update` waits for those loads,
//! decodes them, then applies the whole set in one pass.

use bevy::asset::LoadState;
use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::core::{LayerUpdateCompleted, LayerUpdateDropped, PreviewLoading};
use crate::preview::scene::{LayerSprite, PreviewScene};
use crate::sprites::{
    LayerSet, PixelBuffer, PreviewError, SheetKey, SpriteOp, UpdateOutcome, layer_z_index,
};

pub(crate) fn request_layer_update(
    layers: Res<LayerSet>,
    asset_server: Res<AssetServer>,
    mut scene: ResMut<PreviewScene>,
    mut dropped: MessageWriter<LayerUpdateDropped>,
) {
    match scene.request_update(&layers, &asset_server) {
        UpdateOutcome::Started => {
            debug!("Layer update started ({} layers)", layers.len());
        }
        UpdateOutcome::Queued => {
            debug!("Layer update queued behind the one in flight");
        }
        UpdateOutcome::AlreadyInFlight => {
            debug!("Layer set unchanged from the update in flight");
        }
        UpdateOutcome::Dropped => {
            debug!("Layer update dropped, another update is in flight");
            dropped.write(LayerUpdateDropped);
        }
    }
}

/// Resolve finished loads. Returns `false` while any load is still running.
fn resolve_pending_sheets(
    scene: &mut PreviewScene,
    asset_server: &AssetServer,
    images: &Assets<Image>,
) -> bool {
    let still_loading = scene.pending.iter().any(|p| {
        !matches!(
            asset_server.get_load_state(&p.handle),
            Some(LoadState::Loaded) | Some(LoadState::Failed(_))
        )
    });
    if still_loading {
        return false;
    }

    for pending in std::mem::take(&mut scene.pending) {
        let result = match asset_server.get_load_state(&pending.handle) {
            Some(LoadState::Failed(err)) => Err(PreviewError::AssetLoad {
                path: pending.path.clone(),
                reason: err.to_string(),
            }),
            _ => match images.get(&pending.handle) {
                Some(image) => PixelBuffer::from_image(image, &pending.path),
                None => Err(PreviewError::AssetLoad {
                    path: pending.path.clone(),
                    reason: "asset reported loaded but is missing".to_string(),
                }),
            },
        };

        match result {
            Ok(buffer) => {
                scene.sheets.insert(pending.key, buffer);
            }
            Err(error) => {
                scene.failures.insert(pending.key, error);
            }
        }
    }

    true
}

#[allow(clippy::too_many_arguments)]
pub(crate) fn poll_layer_update(
    mut commands: Commands,
    mut scene: ResMut<PreviewScene>,
    asset_server: Res<AssetServer>,
    mut images: ResMut<Assets<Image>>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
    mut sprites: Query<&mut Sprite, With<LayerSprite>>,
    mut loading: ResMut<PreviewLoading>,
    mut completed: MessageWriter<LayerUpdateCompleted>,
) {
    let Some(set) = scene.guard.in_flight().cloned() else {
        return;
    };

    if !resolve_pending_sheets(&mut scene, &asset_server, &images) {
        return;
    }

    let scene = &mut *scene;
    let report = {
        let sheets = &scene.sheets;
        let failures = &scene.failures;
        let asset_root = &scene.asset_root;
        scene.model.apply_set(&set, &mut scene.sync, |key: &SheetKey| {
            if sheets.contains_key(key) {
                return Ok(());
            }
            Err(failures
                .get(key)
                .cloned()
                .unwrap_or_else(|| PreviewError::AssetLoad {
                    path: key.path(asset_root),
                    reason: "sheet was never requested".to_string(),
                }))
        })
    };

    for (layer, error) in &report.skipped {
        warn!("Skipping layer {}: {}", layer, error);
    }

    for op in &report.ops {
        apply_op(op, scene, &mut commands, &mut images, &mut layouts, &mut sprites);
    }

    scene.updates_completed += 1;
    info!(
        "Layer update applied: {} sprite ops, {} layers skipped, {} textures cached",
        report.ops.len(),
        report.skipped.len(),
        scene.cache.len()
    );
    completed.write(LayerUpdateCompleted {
        ops: report.ops.len(),
        skipped: report.skipped.iter().map(|(name, _)| name.clone()).collect(),
    });

    if loading.is_loading() {
        loading.finish();
    }

    if let Some(next) = scene.guard.finish() {
        // Queued sets already include the base body
        scene.guard.begin(next.clone());
        scene.request_sheets(&next, &asset_server);
    }
}

fn apply_op(
    op: &SpriteOp,
    scene: &mut PreviewScene,
    commands: &mut Commands,
    images: &mut Assets<Image>,
    layouts: &mut Assets<TextureAtlasLayout>,
    sprites: &mut Query<&mut Sprite, With<LayerSprite>>,
) {
    match op {
        SpriteOp::Spawn {
            id,
            layer,
            direction,
            key,
            frame,
        } => {
            let sheet_key = SheetKey::new(&key.layer, &key.style);
            let Some(sheet) = scene.sheets.get(&sheet_key) else {
                error!("No decoded sheet for {} while spawning", key);
                return;
            };
            let Some(&anchor) = scene.anchors.get(direction) else {
                error!("No anchor for direction {:?}", direction);
                return;
            };

            let image = scene.cache.get_or_create(key, sheet, images);
            let layout = scene.cache.atlas_layout(layouts);
            let z = layer_z_index(&scene.z_order, layer);

            let entity = commands
                .spawn((
                    LayerSprite {
                        id: *id,
                        layer: layer.clone(),
                        direction: *direction,
                    },
                    Sprite::from_atlas_image(
                        image,
                        TextureAtlas {
                            layout,
                            index: *frame,
                        },
                    ),
                    Transform::from_xyz(0.0, 0.0, z),
                ))
                .id();
            commands.entity(anchor).add_child(entity);
            scene.entities.insert(*id, entity);
        }
        SpriteOp::Despawn { id } => {
            if let Some(entity) = scene.entities.remove(id) {
                commands.entity(entity).despawn();
            }
        }
        SpriteOp::SwapTexture { id, key } => {
            let sheet_key = SheetKey::new(&key.layer, &key.style);
            let Some(sheet) = scene.sheets.get(&sheet_key) else {
                error!("No decoded sheet for {} while recoloring", key);
                return;
            };
            let image = scene.cache.get_or_create(key, sheet, images);

            let Some(&entity) = scene.entities.get(id) else {
                return;
            };
            if let Ok(mut sprite) = sprites.get_mut(entity) {
                sprite.image = image;
            }
        }
    }
}
