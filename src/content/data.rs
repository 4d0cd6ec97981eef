//! Data definitions for preview configuration and the style catalog.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::sprites::{AnimationSettings, GreyShadeTable, Layer, Rgb, SheetLayout, UpdatePolicy};

/// Wrapper for list-style data files.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DataFile<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
}

// ============================================================================
// Preview settings (preview.ron)
// ============================================================================

/// Everything the preview scenes need to know about assets, animation and
/// layout. Missing fields fall back to [`PreviewConfig::default`].
#[derive(Resource, Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub schema_version: u32,
    /// Directory under `assets/` holding `{layer}/{style}.png` sheets.
    pub asset_root: String,
    pub sheet: SheetLayout,
    pub animation: AnimationSettings,
    pub shades: GreyShadeTable,
    /// Keep source alpha on recolored pixels.
    pub preserve_alpha: bool,
    /// Layer names from back to front.
    pub z_order: Vec<String>,
    /// Layer drawn under everything else whether or not the host sets it.
    pub base_body: BaseBodyDef,
    /// Display pixels per sprite pixel.
    pub display_scale: f32,
    pub movement: MovementDef,
    pub background: BackgroundDef,
    /// Horizontal distance between characters in the four-direction scene,
    /// in sprite pixels.
    pub four_way_spacing: f32,
    pub update_policy: UpdatePolicy,
    /// Seed for the dev-tools color randomizer.
    pub dev_seed: u64,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            schema_version: 1,
            asset_root: "sprites".to_string(),
            sheet: SheetLayout::default(),
            animation: AnimationSettings::default(),
            shades: GreyShadeTable::default(),
            preserve_alpha: true,
            z_order: ["Body", "Pants", "Shirt", "Shoes", "Hair", "Gloves", "Hat"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            base_body: BaseBodyDef::default(),
            display_scale: 3.0,
            movement: MovementDef::default(),
            background: BackgroundDef::default(),
            four_way_spacing: 64.0,
            update_policy: UpdatePolicy::Drop,
            dev_seed: 0x5EED,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BaseBodyDef {
    pub layer: String,
    pub style: String,
    pub color: Rgb,
}

impl Default for BaseBodyDef {
    fn default() -> Self {
        Self {
            layer: "Body".to_string(),
            style: "Base".to_string(),
            color: Rgb::new(0xE0, 0xB0, 0x90),
        }
    }
}

impl BaseBodyDef {
    pub fn layer(&self) -> Layer {
        Layer::new(&self.layer, &self.style, self.color)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MovementDef {
    /// Sprite pixels per second before display scaling.
    pub speed: f32,
    /// Distance kept from the background edge, in sprite pixels.
    pub margin: f32,
}

impl Default for MovementDef {
    fn default() -> Self {
        Self {
            speed: 60.0,
            margin: 24.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackgroundDef {
    /// Optional background image under `assets/`.
    pub path: Option<String>,
    /// Background size in sprite pixels; movement is clamped inside it.
    pub width: f32,
    pub height: f32,
}

impl Default for BackgroundDef {
    fn default() -> Self {
        Self {
            path: None,
            width: 320.0,
            height: 192.0,
        }
    }
}

// ============================================================================
// Style catalog (catalog.ron)
// ============================================================================

/// Styles and suggested colors offered for one layer.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LayerCatalogDef {
    pub layer: String,
    pub styles: Vec<String>,
    #[serde(default)]
    pub palette: Vec<Rgb>,
}
