//! UI domain: on-screen direction pad for touch devices.

use bevy::prelude::*;

use crate::movement::TouchMovement;

/// Marker for the direction pad container
#[derive(Component)]
pub struct TouchControlsUI;

/// A pad button and the axis it pushes while held
#[derive(Component)]
pub struct TouchButton {
    pub axis: Vec2,
}

const BUTTON_SIZE: f32 = 48.0;
const PAD_PADDING: f32 = 16.0;

pub(crate) fn spawn_touch_controls(mut commands: Commands) {
    let buttons = [
        ("^", Vec2::Y, BUTTON_SIZE, 0.0),
        ("<", Vec2::NEG_X, 0.0, BUTTON_SIZE),
        (">", Vec2::X, BUTTON_SIZE * 2.0, BUTTON_SIZE),
        ("v", Vec2::NEG_Y, BUTTON_SIZE, BUTTON_SIZE * 2.0),
    ];

    commands
        .spawn((
            TouchControlsUI,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(PAD_PADDING),
                bottom: Val::Px(PAD_PADDING),
                width: Val::Px(BUTTON_SIZE * 3.0),
                height: Val::Px(BUTTON_SIZE * 3.0),
                ..default()
            },
        ))
        .with_children(|parent| {
            for (label, axis, left, top) in buttons {
                parent
                    .spawn((
                        TouchButton { axis },
                        Button,
                        Node {
                            position_type: PositionType::Absolute,
                            left: Val::Px(left),
                            top: Val::Px(top),
                            width: Val::Px(BUTTON_SIZE - 4.0),
                            height: Val::Px(BUTTON_SIZE - 4.0),
                            justify_content: JustifyContent::Center,
                            align_items: AlignItems::Center,
                            border: UiRect::all(Val::Px(2.0)),
                            ..default()
                        },
                        BackgroundColor(Color::srgba(0.2, 0.2, 0.25, 0.7)),
                        BorderColor::all(Color::srgb(0.5, 0.5, 0.6)),
                    ))
                    .with_child((
                        Text::new(label),
                        TextFont {
                            font_size: 22.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.9, 0.9, 0.9)),
                    ));
            }
        });
}

pub(crate) fn cleanup_touch_controls(
    mut commands: Commands,
    query: Query<Entity, With<TouchControlsUI>>,
    mut touch: ResMut<TouchMovement>,
) {
    for entity in &query {
        commands.entity(entity).despawn();
    }
    touch.axis = Vec2::ZERO;
}

/// Sum the axes of every held button.
pub(crate) fn update_touch_movement(
    buttons: Query<(&Interaction, &TouchButton)>,
    mut touch: ResMut<TouchMovement>,
) {
    let axis = buttons
        .iter()
        .filter(|(interaction, _)| **interaction == Interaction::Pressed)
        .fold(Vec2::ZERO, |acc, (_, button)| acc + button.axis);

    if touch.axis != axis {
        touch.axis = axis;
    }
}
