mod content;
mod core;
#[cfg(feature = "dev-tools")]
mod debug;
mod movement;
mod preview;
mod sprites;
mod ui;

use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::window::WindowResolution;

fn main() {
    let mut app = App::new();

    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Rune Realm Preview".to_string(),
                    resolution: WindowResolution::new(960, 576),
                    resizable: true,
                    ..default()
                }),
                ..default()
            })
            // Pixel art: no filtering when scaling sprites up
            .set(ImagePlugin::default_nearest())
            .set(LogPlugin {
                filter: "wgpu=error,naga=warn,rune_realm_preview=debug".to_string(),
                ..default()
            }),
    )
    .add_plugins((
        core::CorePlugin,
        content::ContentPlugin,
        movement::MovementPlugin,
        preview::PreviewPlugin,
        ui::UiPlugin,
    ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(debug::DebugPlugin);

    app.run();
}
