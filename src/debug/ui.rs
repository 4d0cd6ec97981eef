//! Debug domain: hotkey reference panel.

use bevy::prelude::*;

use crate::debug::state::DebugState;

/// Marker for the debug UI root
#[derive(Component, Debug)]
pub struct DebugUI;

/// Marker for status message text
#[derive(Component, Debug)]
pub struct DebugStatusMessage;

const HOTKEYS: [&str; 4] = [
    "Tab: switch scene",
    "1-9: cycle layer style",
    "R: randomize colors",
    "WASD / arrows: walk",
];

pub(crate) fn spawn_debug_ui(commands: &mut Commands, debug_state: &DebugState) {
    let title_color = Color::srgb(0.9, 0.7, 0.3);
    let text_color = Color::srgb(0.9, 0.9, 0.9);
    let muted_text = Color::srgb(0.6, 0.6, 0.7);

    commands
        .spawn((
            DebugUI,
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(20.0),
                top: Val::Px(20.0),
                width: Val::Px(240.0),
                flex_direction: FlexDirection::Column,
                padding: UiRect::all(Val::Px(12.0)),
                row_gap: Val::Px(4.0),
                border: UiRect::all(Val::Px(2.0)),
                ..default()
            },
            BackgroundColor(Color::srgba(0.1, 0.1, 0.15, 0.95)),
            BorderColor::all(Color::srgb(0.4, 0.35, 0.2)),
            ZIndex(500),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("DEV TOOLS"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(title_color),
            ));

            parent.spawn((
                Text::new(format!("F1 or ` to toggle | seed {}", debug_state.seed)),
                TextFont {
                    font_size: 11.0,
                    ..default()
                },
                TextColor(muted_text),
                Node {
                    margin: UiRect::bottom(Val::Px(8.0)),
                    ..default()
                },
            ));

            for line in HOTKEYS {
                parent.spawn((
                    Text::new(line),
                    TextFont {
                        font_size: 12.0,
                        ..default()
                    },
                    TextColor(text_color),
                ));
            }

            // Status message area
            parent.spawn((
                DebugStatusMessage,
                Text::new(""),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(Color::srgb(0.5, 0.9, 0.5)),
                Node {
                    min_height: Val::Px(16.0),
                    margin: UiRect::top(Val::Px(8.0)),
                    ..default()
                },
            ));
        });
}
