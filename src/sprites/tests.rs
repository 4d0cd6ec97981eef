//! Sprites domain: tests for colorization, caching, animation and scene updates.

use bevy::prelude::*;

use super::{
    AnimationSettings, AnimationSynchronizer, ColorizeOptions, Direction, DirectionAnimation,
    GreyShadeTable, Layer, LayerChange, LayerSet, PixelBuffer, PreviewError, Rgb, SceneModel,
    SheetKey, SheetLayout, SpriteOp, TextureCache, TextureKey, UpdateGuard, UpdateOutcome,
    UpdatePolicy, blend, colorize, layer_z_index,
};

const RED: Rgb = Rgb::new(255, 0, 0);
const GREEN: Rgb = Rgb::new(0, 255, 0);

fn synchronizer() -> AnimationSynchronizer {
    let mut sync = AnimationSynchronizer::new(SheetLayout::default(), &AnimationSettings::default());
    sync.start();
    sync
}

/// 2x2 sheet: darkest grey, mid grey, black outline, transparent.
fn mask_sheet() -> PixelBuffer {
    PixelBuffer::from_raw(
        2,
        2,
        vec![
            64, 64, 64, 255, //
            128, 128, 128, 255, //
            0, 0, 0, 255, //
            128, 128, 128, 0,
        ],
    )
    .unwrap()
}

fn all_sheets_ok(_: &SheetKey) -> Result<(), PreviewError> {
    Ok(())
}

// -----------------------------------------------------------------------------
// Color tests
// -----------------------------------------------------------------------------

#[test]
fn test_hex_parsing() {
    assert_eq!(Rgb::from_hex("#ff8000").unwrap(), Rgb::new(255, 128, 0));
    assert_eq!(Rgb::from_hex("00FF00").unwrap(), GREEN);
    assert_eq!(Rgb::from_hex("#F80").unwrap(), Rgb::new(255, 136, 0));
    assert_eq!(Rgb::new(171, 205, 239).to_hex(), "#ABCDEF");

    let err = Rgb::from_hex("#12345").unwrap_err();
    assert_eq!(
        err,
        PreviewError::InvalidColor {
            input: "#12345".to_string()
        }
    );
    assert!(Rgb::from_hex("#GG0000").is_err());
    assert!(Rgb::from_hex("#+F+F+F").is_err());
    assert!(Rgb::from_hex("##FF0000").is_err());
    assert!(Rgb::from_hex("#-1").is_err());
}

#[test]
fn test_grey_level_matches_within_tolerance() {
    let table = GreyShadeTable::default();
    assert_eq!(table.grey_level_of([64, 64, 64, 255]), Some(0));
    assert_eq!(table.grey_level_of([100, 100, 100, 255]), Some(1));
    assert_eq!(table.grey_level_of([224, 224, 224, 128]), Some(5));
}

#[test]
fn test_grey_level_rejects_outline_and_transparent() {
    let table = GreyShadeTable::default();
    assert_eq!(table.grey_level_of([0, 0, 0, 255]), None);
    assert_eq!(table.grey_level_of([255, 0, 0, 255]), None);
    assert_eq!(table.grey_level_of([128, 128, 128, 0]), None);
}

#[test]
fn test_grey_level_tie_keeps_darker_bucket() {
    let table = GreyShadeTable::new(vec![64, 96], 30.0, 0.4).unwrap();
    assert_eq!(table.grey_level_of([80, 80, 80, 255]), Some(0));
}

#[test]
fn test_shade_table_rejects_bad_levels() {
    assert!(GreyShadeTable::new(vec![], 24.0, 0.4).is_err());
    assert!(GreyShadeTable::new(vec![96, 64], 24.0, 0.4).is_err());
    assert!(GreyShadeTable::new(vec![64, 96], -1.0, 0.4).is_err());
    assert!(GreyShadeTable::new(vec![64, 96], 24.0, 1.5).is_err());
}

#[test]
fn test_blend_scales_toward_floor() {
    let base = Rgb::new(200, 100, 50);
    assert_eq!(blend(base, 1.0, 0.5), base);
    assert_eq!(blend(base, 0.0, 0.5), Rgb::new(100, 50, 25));
    // Out-of-range factors are clamped
    assert_eq!(blend(base, 3.0, 0.5), base);
}

// -----------------------------------------------------------------------------
// Colorize tests
// -----------------------------------------------------------------------------

#[test]
fn test_colorize_maps_buckets_to_shades() {
    let table = GreyShadeTable::default();
    let out = colorize(&mask_sheet(), RED, &table, &ColorizeOptions::default());

    // Darkest bucket gets the brightness floor: 255 * 0.4
    assert_eq!(out.pixel(0, 0), Some([102, 0, 0, 255]));
    // Bucket 2 of 6: 0.4 + 0.6 * 0.4 = 0.64
    assert_eq!(out.pixel(1, 0), Some([163, 0, 0, 255]));
}

#[test]
fn test_colorize_leaves_outline_and_transparent_pixels() {
    let source = mask_sheet();
    let out = colorize(&source, RED, &GreyShadeTable::default(), &ColorizeOptions::default());

    assert_eq!(out.pixel(0, 1), source.pixel(0, 1));
    assert_eq!(out.pixel(1, 1), Some([128, 128, 128, 0]));
}

#[test]
fn test_colorize_alpha_handling() {
    let source = PixelBuffer::from_raw(1, 1, vec![128, 128, 128, 100]).unwrap();
    let table = GreyShadeTable::default();

    let kept = colorize(&source, RED, &table, &ColorizeOptions::default());
    assert_eq!(kept.pixel(0, 0).map(|p| p[3]), Some(100));

    let options = ColorizeOptions {
        preserve_alpha: false,
        cache_key: None,
    };
    let opaque = colorize(&source, RED, &table, &options);
    assert_eq!(opaque.pixel(0, 0).map(|p| p[3]), Some(255));
}

#[test]
fn test_pixel_buffer_rejects_wrong_length() {
    assert!(PixelBuffer::from_raw(2, 2, vec![0; 15]).is_none());
}

// -----------------------------------------------------------------------------
// Cache tests
// -----------------------------------------------------------------------------

#[test]
fn test_cache_colorizes_each_key_once() {
    let mut images = Assets::<Image>::default();
    let mut cache = TextureCache::new(SheetLayout::default(), GreyShadeTable::default(), true);
    let sheet = mask_sheet();
    let key = TextureKey::new("Hair", "Spiky", RED);

    let first = cache.get_or_create(&key, &sheet, &mut images);
    let second = cache.get_or_create(&key, &sheet, &mut images);

    assert_eq!(first, second);
    assert!(cache.contains(&key));
    assert_eq!(cache.colorize_calls(), 1);
    assert_eq!(cache.len(), 1);
}

#[test]
fn test_recolor_does_not_drift() {
    let mut images = Assets::<Image>::default();
    let mut cache = TextureCache::new(SheetLayout::default(), GreyShadeTable::default(), true);
    let sheet = mask_sheet();

    cache.get_or_create(&TextureKey::new("Hair", "Spiky", RED), &sheet, &mut images);
    let via_red = cache.get_or_create(&TextureKey::new("Hair", "Spiky", GREEN), &sheet, &mut images);

    let direct = colorize(&sheet, GREEN, &GreyShadeTable::default(), &ColorizeOptions::default());
    let image = images.get(&via_red).unwrap();
    assert_eq!(image.data.as_deref(), Some(direct.data()));
    assert_eq!(cache.colorize_calls(), 2);
}

#[test]
fn test_cache_release_all() {
    let mut images = Assets::<Image>::default();
    let mut layouts = Assets::<TextureAtlasLayout>::default();
    let mut cache = TextureCache::new(SheetLayout::default(), GreyShadeTable::default(), true);
    let sheet = mask_sheet();

    cache.get_or_create(&TextureKey::new("Hair", "Spiky", RED), &sheet, &mut images);
    cache.get_or_create(&TextureKey::new("Hat", "Wizard", RED), &sheet, &mut images);
    let layout = cache.atlas_layout(&mut layouts);
    assert_eq!(cache.atlas_layout(&mut layouts), layout);

    assert_eq!(cache.release_all(&mut images, &mut layouts), 2);
    assert!(cache.is_empty());
    assert_eq!(images.len(), 0);
    assert_eq!(layouts.len(), 0);
}

#[test]
fn test_texture_key_display() {
    let key = TextureKey::new("Hair", "Spiky", Rgb::new(255, 0, 0));
    assert_eq!(key.to_string(), "Hair_Spiky_#FF0000");
}

// -----------------------------------------------------------------------------
// Animation tests
// -----------------------------------------------------------------------------

#[test]
fn test_frame_index_uses_row_order() {
    let sheet = SheetLayout::default();
    assert_eq!(sheet.frame_index(Direction::Down, 0), 0);
    assert_eq!(sheet.frame_index(Direction::Left, 2), 5);
    assert_eq!(sheet.frame_index(Direction::Up, 1), 10);
    assert_eq!(sheet.frame_count(), 12);
}

#[test]
fn test_advance_wraps_sequence() {
    let mut sync = synchronizer();
    for _ in 0..5 {
        sync.advance(Direction::Right);
    }
    assert_eq!(sync.current_index(Direction::Right), 5 % sync.sequence_len(Direction::Right));
    // Other directions are untouched
    assert_eq!(sync.current_index(Direction::Down), 0);
}

#[test]
fn test_tick_fires_per_direction_period() {
    let mut settings = AnimationSettings::default();
    settings.overrides.insert(
        Direction::Up,
        DirectionAnimation {
            sequence: vec![0, 1, 2, 1],
            frame_rate: 4.0,
        },
    );
    let mut sync = AnimationSynchronizer::new(SheetLayout::default(), &settings);
    sync.start();

    sync.tick(0.1);
    sync.tick(0.1);
    assert_eq!(sync.current_index(Direction::Up), 0);
    sync.tick(0.1);
    assert_eq!(sync.current_index(Direction::Up), 1);
}

#[test]
fn test_non_finite_frame_rate_uses_default() {
    let mut settings = AnimationSettings::default();
    settings.overrides.insert(
        Direction::Up,
        DirectionAnimation {
            sequence: vec![0, 1, 2, 1],
            frame_rate: f32::INFINITY,
        },
    );
    let mut sync = AnimationSynchronizer::new(SheetLayout::default(), &settings);
    sync.start();

    // Default 6 fps: one period fits in 0.2s
    sync.tick(0.2);
    assert_eq!(sync.current_index(Direction::Up), 1);
    sync.tick(0.2);
    assert_eq!(sync.current_index(Direction::Up), 2);
}

#[test]
fn test_stopped_clock_does_not_advance() {
    let mut sync = synchronizer();
    sync.stop();
    assert!(!sync.is_running());
    assert!(sync.tick(1.0).is_empty());
    assert_eq!(sync.current_index(Direction::Down), 0);
}

#[test]
fn test_late_registration_joins_in_phase() {
    let mut model = SceneModel::new();
    let mut sync = synchronizer();
    sync.advance(Direction::Left);
    sync.advance(Direction::Left);

    let ops = model.apply_layer(&Layer::new("Hair", "Spiky", RED), &mut sync);
    let left_frame = ops.iter().find_map(|op| match op {
        SpriteOp::Spawn {
            direction: Direction::Left,
            frame,
            ..
        } => Some(*frame),
        _ => None,
    });

    // Sequence index 2 is pose 2 on row 1
    assert_eq!(left_frame, Some(5));
    assert_eq!(model.instance("Hair", Direction::Left).map(|i| i.frame), Some(5));
    assert_eq!(sync.current_frame(Direction::Left), 5);
}

#[test]
fn test_fan_out_reaches_every_layer() {
    let mut model = SceneModel::new();
    let mut sync = synchronizer();
    model.apply_layer(&Layer::new("Body", "Base", RED), &mut sync);
    model.apply_layer(&Layer::new("Hair", "Spiky", RED), &mut sync);

    let updates = sync.advance(Direction::Down);
    assert_eq!(updates.len(), 2);
    assert!(updates.iter().all(|u| u.frame == 1));
}

// -----------------------------------------------------------------------------
// Scene model tests
// -----------------------------------------------------------------------------

#[test]
fn test_new_layer_spawns_one_sprite_per_direction() {
    let mut model = SceneModel::new();
    let mut sync = synchronizer();

    let ops = model.apply_layer(&Layer::new("Hair", "Spiky", RED), &mut sync);
    assert_eq!(ops.len(), 4);
    assert!(ops.iter().all(|op| matches!(op, SpriteOp::Spawn { .. })));
    assert_eq!(model.instance_count(), 4);
    for direction in Direction::ALL {
        let instance = model.instance("Hair", direction).unwrap();
        assert_eq!(instance.key.to_string(), "Hair_Spiky_#FF0000");
        assert_eq!(sync.registered(direction), vec![instance.id]);
    }
}

#[test]
fn test_recolor_swaps_textures_in_place() {
    let mut model = SceneModel::new();
    let mut sync = synchronizer();
    model.apply_layer(&Layer::new("Hair", "Spiky", RED), &mut sync);
    let ids: Vec<_> = model.instances_for_layer("Hair").map(|i| i.id).collect();

    let green = Layer::new("Hair", "Spiky", GREEN);
    assert_eq!(model.plan(&green), LayerChange::Recolor);
    let ops = model.apply_layer(&green, &mut sync);

    assert_eq!(ops.len(), 4);
    assert!(ops.iter().all(|op| matches!(op, SpriteOp::SwapTexture { .. })));
    let after: Vec<_> = model.instances_for_layer("Hair").map(|i| i.id).collect();
    assert_eq!(ids, after);
    assert!(model
        .instances_for_layer("Hair")
        .all(|i| i.key.to_string() == "Hair_Spiky_#00FF00"));
}

#[test]
fn test_restyle_recreates_sprites() {
    let mut model = SceneModel::new();
    let mut sync = synchronizer();
    model.apply_layer(&Layer::new("Hair", "Spiky", RED), &mut sync);

    let ops = model.apply_layer(&Layer::new("Hair", "Long", RED), &mut sync);
    let despawned = ops.iter().filter(|op| matches!(op, SpriteOp::Despawn { .. })).count();
    let spawned = ops.iter().filter(|op| matches!(op, SpriteOp::Spawn { .. })).count();

    assert_eq!((despawned, spawned), (4, 4));
    assert_eq!(model.instance_count(), 4);
    assert_eq!(model.active_layer("Hair").unwrap().style, "Long");
}

#[test]
fn test_none_style_removes_and_restores() {
    let mut model = SceneModel::new();
    let mut sync = synchronizer();
    model.apply_layer(&Layer::new("Hat", "Wizard", RED), &mut sync);

    let ops = model.apply_layer(&Layer::new("Hat", "None", RED), &mut sync);
    assert_eq!(ops.len(), 4);
    assert!(ops.iter().all(|op| matches!(op, SpriteOp::Despawn { .. })));
    assert_eq!(model.instance_count(), 0);
    assert!(model.active_layer("Hat").is_none());
    assert!(sync.registered(Direction::Down).is_empty());

    let ops = model.apply_layer(&Layer::new("Hat", "Wizard", RED), &mut sync);
    assert_eq!(ops.len(), 4);
    assert!(model.instances().all(|i| i.key.style == "Wizard"));
}

#[test]
fn test_none_on_absent_layer_is_noop() {
    let mut model = SceneModel::new();
    let mut sync = synchronizer();
    assert!(model.apply_layer(&Layer::new("Hat", "None", RED), &mut sync).is_empty());
}

#[test]
fn test_unchanged_layer_needs_nothing() {
    let mut model = SceneModel::new();
    let mut sync = synchronizer();
    let hair = Layer::new("Hair", "Spiky", RED);
    model.apply_layer(&hair, &mut sync);

    assert_eq!(model.plan(&hair), LayerChange::Unchanged);
    let set = LayerSet::new().with("Hair", "Spiky", RED);
    assert!(model.required_sheets(&set).is_empty());
}

#[test]
fn test_apply_set_removes_layers_missing_from_set() {
    let mut model = SceneModel::new();
    let mut sync = synchronizer();
    let first = LayerSet::new()
        .with("Body", "Base", RED)
        .with("Hair", "Spiky", RED);
    model.apply_set(&first, &mut sync, all_sheets_ok);

    let second = LayerSet::new().with("Body", "Base", RED);
    let report = model.apply_set(&second, &mut sync, all_sheets_ok);

    assert_eq!(report.ops.len(), 4);
    assert_eq!(model.instances_for_layer("Hair").count(), 0);
    assert_eq!(model.instance_count(), 4);
}

#[test]
fn test_failed_sheet_keeps_previous_sprites() {
    let mut model = SceneModel::new();
    let mut sync = synchronizer();
    model.apply_set(
        &LayerSet::new().with("Hair", "Spiky", RED).with("Hat", "Wizard", RED),
        &mut sync,
        all_sheets_ok,
    );
    let ids: Vec<_> = model.instances_for_layer("Hair").map(|i| i.id).collect();

    let next = LayerSet::new()
        .with("Hair", "Long", RED)
        .with("Hat", "Wizard", GREEN);
    let report = model.apply_set(&next, &mut sync, |key| {
        if key.style == "Long" {
            Err(PreviewError::AssetLoad {
                path: key.path("sprites"),
                reason: "not found".to_string(),
            })
        } else {
            Ok(())
        }
    });

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].0, "Hair");
    // Hair untouched, Hat recolored
    let after: Vec<_> = model.instances_for_layer("Hair").map(|i| i.id).collect();
    assert_eq!(ids, after);
    assert_eq!(model.active_layer("Hair").unwrap().style, "Spiky");
    assert_eq!(model.active_layer("Hat").unwrap().color, GREEN);
}

#[test]
fn test_required_sheets_deduplicates() {
    let model = SceneModel::new();
    let set = LayerSet::new()
        .with("Hair", "Spiky", RED)
        .with("Hat", "None", RED);
    assert_eq!(model.required_sheets(&set), vec![SheetKey::new("Hair", "Spiky")]);
}

// -----------------------------------------------------------------------------
// Update guard tests
// -----------------------------------------------------------------------------

#[test]
fn test_back_to_back_update_is_dropped() {
    let mut guard = UpdateGuard::new(UpdatePolicy::Drop);
    let mut model = SceneModel::new();
    let mut sync = synchronizer();
    let first = LayerSet::new().with("Hair", "Spiky", RED);
    let second = LayerSet::new().with("Hair", "Long", GREEN);

    assert_eq!(guard.begin(first.clone()), UpdateOutcome::Started);
    assert_eq!(guard.begin(second), UpdateOutcome::Dropped);

    let in_flight = guard.in_flight().cloned().unwrap();
    model.apply_set(&in_flight, &mut sync, all_sheets_ok);
    assert_eq!(guard.finish(), None);
    assert!(!guard.is_busy());

    assert_eq!(model.active_layer("Hair"), first.get("Hair").as_ref());
}

#[test]
fn test_keep_latest_queues_only_newest() {
    let mut guard = UpdateGuard::new(UpdatePolicy::KeepLatest);
    let a = LayerSet::new().with("Hair", "Spiky", RED);
    let b = LayerSet::new().with("Hair", "Long", RED);
    let c = LayerSet::new().with("Hair", "Long", GREEN);

    assert_eq!(guard.begin(a), UpdateOutcome::Started);
    assert_eq!(guard.begin(b), UpdateOutcome::Queued);
    assert_eq!(guard.begin(c.clone()), UpdateOutcome::Queued);
    assert!(guard.has_pending());

    assert_eq!(guard.finish(), Some(c));
    assert!(!guard.has_pending());
}

#[test]
fn test_repeating_in_flight_set_is_not_dropped() {
    let mut guard = UpdateGuard::new(UpdatePolicy::Drop);
    let a = LayerSet::new().with("Hair", "Spiky", RED);

    assert_eq!(guard.begin(a.clone()), UpdateOutcome::Started);
    assert_eq!(guard.begin(a.clone()), UpdateOutcome::AlreadyInFlight);
    assert_eq!(guard.in_flight(), Some(&a));
}

#[test]
fn test_returning_to_in_flight_set_clears_queue() {
    let mut guard = UpdateGuard::new(UpdatePolicy::KeepLatest);
    let a = LayerSet::new().with("Hair", "Spiky", RED);
    let b = LayerSet::new().with("Hair", "Long", RED);

    assert_eq!(guard.begin(a.clone()), UpdateOutcome::Started);
    assert_eq!(guard.begin(b), UpdateOutcome::Queued);
    assert_eq!(guard.begin(a), UpdateOutcome::AlreadyInFlight);
    assert!(!guard.has_pending());
    assert_eq!(guard.finish(), None);
}

// -----------------------------------------------------------------------------
// Layer set tests
// -----------------------------------------------------------------------------

#[test]
fn test_layer_set_json() {
    let set = LayerSet::from_json(r##"{"Hair": {"style": "Spiky", "color": "#ff0000"}}"##).unwrap();
    assert_eq!(set.get("Hair"), Some(Layer::new("Hair", "Spiky", RED)));

    let json = set.to_json().unwrap();
    assert!(json.contains("\"#FF0000\""));
}

#[test]
fn test_with_base_only_fills_missing_layer() {
    let base = Layer::new("Body", "Base", Rgb::new(224, 176, 144));

    let set = LayerSet::new().with("Hair", "Spiky", RED).with_base(&base);
    assert_eq!(set.get("Body"), Some(base.clone()));

    let custom = LayerSet::new().with("Body", "Muscular", RED).with_base(&base);
    assert_eq!(custom.get("Body").unwrap().style, "Muscular");
}

#[test]
fn test_sheet_path_convention() {
    let key = SheetKey::new("Hair", "Spiky");
    assert_eq!(key.path("sprites"), "sprites/Hair/Spiky.png");
    assert_eq!(key.path("sprites/"), "sprites/Hair/Spiky.png");
    assert_eq!(key.path(""), "Hair/Spiky.png");
}

#[test]
fn test_layer_z_index_follows_order() {
    let order = vec!["Body".to_string(), "Hair".to_string()];
    assert_eq!(layer_z_index(&order, "Body"), 0.0);
    assert_eq!(layer_z_index(&order, "Hair"), 0.01);
    assert_eq!(layer_z_index(&order, "Cape"), 0.02);
}
