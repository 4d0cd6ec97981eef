//! Preview domain: scene resource, setup and teardown.

use bevy::prelude::*;
use std::collections::HashMap;

use crate::content::PreviewConfig;
use crate::core::PreviewLoading;
use crate::movement::{MovementState, PreviewCharacter};
use crate::sprites::{
    AnimationSynchronizer, Direction, Layer, LayerSet, PixelBuffer, PreviewError, SceneModel,
    SheetKey, SpriteId, TextureCache, UpdateGuard, UpdateOutcome,
};

/// Which variant a scene renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneKind {
    SingleCharacter,
    FourDirection,
}

/// Root entity of a preview scene; despawning it removes every sprite.
#[derive(Component, Debug)]
pub struct PreviewRoot;

/// Background image of a scene.
#[derive(Component, Debug)]
pub struct SceneBackground;

/// Parent of all sprites facing one direction.
#[derive(Component, Debug)]
pub struct DirectionAnchor(pub Direction);

/// A layer sprite, linked back to its scene instance.
#[derive(Component, Debug)]
pub struct LayerSprite {
    pub id: SpriteId,
    pub layer: String,
    pub direction: Direction,
}

/// Base sheet requested from the asset server for the in-flight update.
#[derive(Debug)]
pub(crate) struct PendingSheet {
    pub key: SheetKey,
    pub path: String,
    pub handle: Handle<Image>,
}

/// All state owned by the active preview scene.
///
/// Inserted when a scene is entered and removed on exit, so nothing is
/// shared between scenes and late asset loads find no scene to touch.
#[derive(Resource, Debug)]
pub struct PreviewScene {
    pub kind: SceneKind,
    pub model: SceneModel,
    pub cache: TextureCache,
    pub sync: AnimationSynchronizer,
    pub guard: UpdateGuard,
    /// Decoded base sheets, kept for recoloring without reloading.
    pub sheets: HashMap<SheetKey, PixelBuffer>,
    /// Sheets that failed during the current update.
    pub failures: HashMap<SheetKey, PreviewError>,
    pub(crate) pending: Vec<PendingSheet>,
    pub entities: HashMap<SpriteId, Entity>,
    pub anchors: HashMap<Direction, Entity>,
    pub root: Entity,
    pub background: Option<Entity>,
    pub base_body: Layer,
    pub asset_root: String,
    pub z_order: Vec<String>,
    pub updates_completed: u32,
}

impl PreviewScene {
    fn new(kind: SceneKind, config: &PreviewConfig, root: Entity) -> Self {
        Self {
            kind,
            model: SceneModel::new(),
            cache: TextureCache::new(config.sheet, config.shades.clone(), config.preserve_alpha),
            sync: AnimationSynchronizer::new(config.sheet, &config.animation),
            guard: UpdateGuard::new(config.update_policy),
            sheets: HashMap::new(),
            failures: HashMap::new(),
            pending: Vec::new(),
            entities: HashMap::new(),
            anchors: HashMap::new(),
            root,
            background: None,
            base_body: config.base_body.layer(),
            asset_root: config.asset_root.clone(),
            z_order: config.z_order.clone(),
            updates_completed: 0,
        }
    }

    /// Offer a new layer set to the scene. Starts loading any sheets it
    /// needs when the scene is idle.
    pub fn request_update(&mut self, layers: &LayerSet, asset_server: &AssetServer) -> UpdateOutcome {
        let full = layers.with_base(&self.base_body);
        let outcome = self.guard.begin(full.clone());
        if outcome == UpdateOutcome::Started {
            self.request_sheets(&full, asset_server);
        }
        outcome
    }

    /// Start loads for sheets the set needs and the scene has not decoded yet.
    pub(crate) fn request_sheets(&mut self, set: &LayerSet, asset_server: &AssetServer) {
        self.failures.clear();
        self.pending.clear();

        for key in self.model.required_sheets(set) {
            if self.sheets.contains_key(&key) {
                continue;
            }
            let path = key.path(&self.asset_root);
            debug!("Loading sheet {}", path);
            let handle = asset_server.load(path.clone());
            self.pending.push(PendingSheet { key, path, handle });
        }
    }
}

pub(crate) fn setup_single_scene(
    commands: Commands,
    config: Res<PreviewConfig>,
    layers: Res<LayerSet>,
    asset_server: Res<AssetServer>,
    loading: ResMut<PreviewLoading>,
) {
    spawn_scene(
        SceneKind::SingleCharacter,
        commands,
        &config,
        &layers,
        &asset_server,
        loading,
    );
}

pub(crate) fn setup_four_way_scene(
    commands: Commands,
    config: Res<PreviewConfig>,
    layers: Res<LayerSet>,
    asset_server: Res<AssetServer>,
    loading: ResMut<PreviewLoading>,
) {
    spawn_scene(
        SceneKind::FourDirection,
        commands,
        &config,
        &layers,
        &asset_server,
        loading,
    );
}

/// Horizontal anchor offsets, in sprite pixels, for each direction.
pub(crate) fn anchor_offset(kind: SceneKind, direction: Direction, spacing: f32) -> f32 {
    match kind {
        SceneKind::SingleCharacter => 0.0,
        SceneKind::FourDirection => {
            let slot = Direction::ALL
                .iter()
                .position(|d| *d == direction)
                .unwrap_or(0) as f32;
            (slot - 1.5) * spacing
        }
    }
}

fn spawn_scene(
    kind: SceneKind,
    mut commands: Commands,
    config: &PreviewConfig,
    layers: &LayerSet,
    asset_server: &AssetServer,
    mut loading: ResMut<PreviewLoading>,
) {
    let scale = Vec3::splat(config.display_scale);

    let root = match kind {
        SceneKind::SingleCharacter => commands
            .spawn((
                PreviewRoot,
                PreviewCharacter,
                MovementState::default(),
                Transform::from_scale(scale),
                Visibility::default(),
            ))
            .id(),
        SceneKind::FourDirection => commands
            .spawn((
                PreviewRoot,
                Transform::from_scale(scale),
                Visibility::default(),
            ))
            .id(),
    };

    let mut scene = PreviewScene::new(kind, config, root);

    for direction in Direction::ALL {
        let visibility = match kind {
            SceneKind::SingleCharacter if direction != Direction::default() => Visibility::Hidden,
            _ => Visibility::Inherited,
        };
        let anchor = commands
            .spawn((
                DirectionAnchor(direction),
                Transform::from_xyz(
                    anchor_offset(kind, direction, config.four_way_spacing),
                    0.0,
                    0.0,
                ),
                visibility,
            ))
            .id();
        commands.entity(root).add_child(anchor);
        scene.anchors.insert(direction, anchor);
    }

    if let Some(path) = &config.background.path {
        let background = commands
            .spawn((
                SceneBackground,
                Sprite {
                    image: asset_server.load(path.clone()),
                    custom_size: Some(Vec2::new(config.background.width, config.background.height)),
                    ..default()
                },
                Transform::from_xyz(0.0, 0.0, -1.0).with_scale(scale),
            ))
            .id();
        scene.background = Some(background);
    }

    loading.begin();
    scene.sync.start();
    scene.request_update(layers, asset_server);

    info!(
        "Spawned {:?} preview scene, {} sheets requested",
        kind,
        scene.pending.len()
    );
    commands.insert_resource(scene);
}

/// Despawn every sprite, then release the cached textures they used.
pub(crate) fn teardown_scene(
    mut commands: Commands,
    scene: Option<ResMut<PreviewScene>>,
    mut images: ResMut<Assets<Image>>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
    mut loading: ResMut<PreviewLoading>,
) {
    let Some(mut scene) = scene else {
        return;
    };
    let scene = &mut *scene;

    let ops = scene.model.clear(&mut scene.sync);
    scene.sync.stop();
    scene.sync.clear();
    scene.guard.reset();
    scene.pending.clear();

    commands.entity(scene.root).despawn();
    if let Some(background) = scene.background.take() {
        commands.entity(background).despawn();
    }
    scene.entities.clear();

    let released = scene.cache.release_all(&mut images, &mut layouts);
    info!(
        "Tore down {:?} preview scene: {} sprites removed, {} textures released",
        scene.kind,
        ops.len(),
        released
    );

    loading.begin();
    commands.remove_resource::<PreviewScene>();
}
