//! Debug domain: hotkeys that edit the layer set the way a host page would.

use bevy::prelude::*;
use rand::Rng;
use rand::seq::IndexedRandom;

use crate::content::{PreviewConfig, StyleCatalog};
use crate::core::PreviewMode;
use crate::debug::state::DebugState;
use crate::debug::ui::{DebugStatusMessage, DebugUI, spawn_debug_ui};
use crate::sprites::{LayerSet, Rgb};

const LAYER_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

pub(crate) fn setup_debug_state(mut commands: Commands, config: Res<PreviewConfig>) {
    commands.insert_resource(DebugState::new(config.dev_seed));
}

/// Advance a layer to its next catalog style, adding it if absent.
/// Returns the new style.
pub(crate) fn cycle_layer_style(
    set: &mut LayerSet,
    catalog: &StyleCatalog,
    layer: &str,
) -> Option<String> {
    let current = set.get(layer).map(|l| l.style).unwrap_or_default();
    let next = catalog.next_style(layer, &current)?;

    if set.contains(layer) {
        set.set_style(layer, &next);
    } else {
        let color = catalog.palette(layer).first().copied().unwrap_or(Rgb::WHITE);
        set.set(layer, &next, color);
    }
    Some(next)
}

/// Give every layer of the set a new color, preferring the catalog palette.
pub(crate) fn randomize_colors<R: Rng>(set: &mut LayerSet, catalog: &StyleCatalog, rng: &mut R) {
    let names: Vec<String> = set.names().map(str::to_string).collect();
    for name in names {
        let color = match catalog.palette(&name).choose(rng) {
            Some(color) => *color,
            None => Rgb::new(rng.random(), rng.random(), rng.random()),
        };
        set.set_color(&name, color);
    }
}

/// Toggle debug panel with F1 or backtick key
pub(crate) fn toggle_debug_ui(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut debug_state: ResMut<DebugState>,
    existing_ui: Query<Entity, With<DebugUI>>,
) {
    let toggle = keyboard.just_pressed(KeyCode::F1) || keyboard.just_pressed(KeyCode::Backquote);

    if toggle {
        debug_state.ui_visible = !debug_state.ui_visible;

        if debug_state.ui_visible {
            spawn_debug_ui(&mut commands, &debug_state);
        } else {
            for entity in &existing_ui {
                commands.entity(entity).despawn();
            }
        }
    }
}

/// Handle keyboard shortcuts acting as the host page
pub(crate) fn handle_debug_hotkeys(
    keyboard: Res<ButtonInput<KeyCode>>,
    catalog: Res<StyleCatalog>,
    mode: Res<State<PreviewMode>>,
    mut next_mode: ResMut<NextState<PreviewMode>>,
    mut layers: ResMut<LayerSet>,
    mut debug_state: ResMut<DebugState>,
) {
    // Tab: switch between the two scene variants
    if keyboard.just_pressed(KeyCode::Tab) {
        let target = mode.get().toggled();
        next_mode.set(target);
        debug_state.set_message(format!("Scene: {:?}", target), 2.0);
        info!("[DEBUG] Switching to {:?}", target);
    }

    // 1-9: cycle the style of the nth catalog layer
    for (index, key) in LAYER_KEYS.iter().enumerate() {
        if !keyboard.just_pressed(*key) {
            continue;
        }
        let Some(layer) = catalog.order.get(index).cloned() else {
            continue;
        };
        if let Some(style) = cycle_layer_style(&mut layers, &catalog, &layer) {
            debug_state.set_message(format!("{}: {}", layer, style), 2.0);
            info!("[DEBUG] {} style -> {}", layer, style);
        }
    }

    // R: randomize every color
    if keyboard.just_pressed(KeyCode::KeyR) {
        let state = &mut *debug_state;
        randomize_colors(&mut layers, &catalog, &mut state.rng);
        state.set_message("Colors randomized", 2.0);
        info!("[DEBUG] Randomized colors (seed {})", state.seed);
    }
}

/// Update status message timer and fade out
pub(crate) fn update_status_message(
    time: Res<Time>,
    mut debug_state: ResMut<DebugState>,
    mut text_query: Query<&mut Text, With<DebugStatusMessage>>,
) {
    if let Some((_, ref mut duration)) = debug_state.status_message {
        *duration -= time.delta_secs();
        if *duration <= 0.0 {
            debug_state.status_message = None;
        }
    }

    let message = debug_state
        .status_message
        .as_ref()
        .map(|(message, _)| message.as_str())
        .unwrap_or("");
    for mut text in &mut text_query {
        if text.as_str() != message {
            **text = message.to_string();
        }
    }
}
