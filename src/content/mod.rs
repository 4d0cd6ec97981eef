//! Content domain: preview settings, style catalog and the initial layer set.

mod data;
mod loader;
mod registry;
mod validation;


pub use data::*;
pub use loader::*;
pub use registry::StyleCatalog;
pub use validation::{ValidationError, validate_config};

use bevy::prelude::*;
use std::path::Path;

use crate::sprites::LayerSet;

/// Directory holding the preview data files.
pub const DATA_DIR: &str = "assets/data";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PreviewConfig>()
            .init_resource::<StyleCatalog>()
            .init_resource::<LayerSet>()
            .add_systems(PreStartup, load_content);
    }
}

/// Read every data file, fall back to defaults on failure and log what was
/// loaded.
fn load_content(
    mut config: ResMut<PreviewConfig>,
    mut catalog: ResMut<StyleCatalog>,
    mut layers: ResMut<LayerSet>,
) {
    let (content, errors) = load_all_content(Path::new(DATA_DIR));

    for error in &errors {
        warn!("{}, using defaults", error);
    }

    let validation_errors = validate_config(&content.config, &content.catalog);
    for error in &validation_errors {
        error!("Config validation: {}", error);
    }

    info!("{}", content.catalog.summary());
    info!(
        "Preview config v{}: {}x{} frames, {} layers in z-order, initial set has {} layers",
        content.config.schema_version,
        content.config.sheet.frame_width,
        content.config.sheet.frame_height,
        content.config.z_order.len(),
        content.layers.len()
    );

    *config = content.config;
    *catalog = content.catalog;
    *layers = content.layers;
}
