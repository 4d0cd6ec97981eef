//! UI domain: loading overlay shown while a scene waits for its sheets.

use bevy::prelude::*;

use crate::core::PreviewLoading;

/// Marker for the loading overlay
#[derive(Component)]
pub struct LoadingOverlay;

pub(crate) fn spawn_loading_overlay(mut commands: Commands) {
    commands
        .spawn((
            LoadingOverlay,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(0.0),
                right: Val::Px(0.0),
                top: Val::Px(0.0),
                bottom: Val::Px(0.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
            ZIndex(100),
        ))
        .with_child((
            Text::new("Loading..."),
            TextFont {
                font_size: 28.0,
                ..default()
            },
            TextColor(Color::srgb(0.9, 0.9, 0.9)),
        ));
}

pub(crate) fn update_loading_overlay(
    loading: Res<PreviewLoading>,
    mut query: Query<&mut Visibility, With<LoadingOverlay>>,
) {
    if !loading.is_changed() {
        return;
    }

    let wanted = if loading.is_loading() {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    };
    for mut visibility in &mut query {
        visibility.set_if_neq(wanted);
    }
}
