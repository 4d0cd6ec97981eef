//! Customization layers and the layer set owned by the host page.
//!
//! A character is composed of layers (body, hair, shirt...) stacked in a
//! fixed z-order. Each layer picks a style and an accent color; the sentinel
//! style `"None"` means the slot draws nothing.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use bevy::prelude::*;

use super::{Rgb, TextureKey};

/// Style value meaning "draw nothing for this layer".
pub const NONE_STYLE: &str = "None";

/// One customizable slot with its current selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    pub name: String,
    pub style: String,
    pub color: Rgb,
}

impl Layer {
    pub fn new(name: impl Into<String>, style: impl Into<String>, color: Rgb) -> Self {
        Self {
            name: name.into(),
            style: style.into(),
            color,
        }
    }

    pub fn is_none(&self) -> bool {
        self.style == NONE_STYLE
    }

    pub fn texture_key(&self) -> TextureKey {
        TextureKey::new(&self.name, &self.style, self.color)
    }

    pub fn sheet_key(&self) -> SheetKey {
        SheetKey::new(&self.name, &self.style)
    }
}

/// Style and color chosen for a layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSelection {
    pub style: String,
    pub color: Rgb,
}

/// Full customization state, keyed by layer name.
///
/// Serializes to the host's JSON shape:
/// `{"Hair": {"style": "Spiky", "color": "#FF0000"}}`.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerSet {
    layers: BTreeMap<String, LayerSelection>,
}

impl LayerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, name: &str, style: &str, color: Rgb) -> Self {
        self.set(name, style, color);
        self
    }

    pub fn set(&mut self, name: &str, style: &str, color: Rgb) {
        self.layers.insert(
            name.to_string(),
            LayerSelection {
                style: style.to_string(),
                color,
            },
        );
    }

    pub fn set_style(&mut self, name: &str, style: &str) {
        if let Some(selection) = self.layers.get_mut(name) {
            selection.style = style.to_string();
        }
    }

    pub fn set_color(&mut self, name: &str, color: Rgb) {
        if let Some(selection) = self.layers.get_mut(name) {
            selection.color = color;
        }
    }

    pub fn get(&self, name: &str) -> Option<Layer> {
        self.layers
            .get(name)
            .map(|s| Layer::new(name, &s.style, s.color))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.layers.contains_key(name)
    }

    /// Layers in processing order.
    pub fn iter(&self) -> impl Iterator<Item = Layer> + '_ {
        self.layers
            .iter()
            .map(|(name, s)| Layer::new(name, &s.style, s.color))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.layers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Copy of this set with `base` added unless a layer of the same name
    /// is already present.
    pub fn with_base(&self, base: &Layer) -> LayerSet {
        let mut set = self.clone();
        if !set.contains(&base.name) {
            set.set(&base.name, &base.style, base.color);
        }
        set
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Identity of an uncolored base spritesheet.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SheetKey {
    pub layer: String,
    pub style: String,
}

impl SheetKey {
    pub fn new(layer: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            layer: layer.into(),
            style: style.into(),
        }
    }

    /// Asset path following the `{root}/{layer}/{style}.png` convention.
    pub fn path(&self, asset_root: &str) -> String {
        let root = asset_root.trim_end_matches('/');
        if root.is_empty() {
            format!("{}/{}.png", self.layer, self.style)
        } else {
            format!("{}/{}/{}.png", root, self.layer, self.style)
        }
    }
}

/// Z coordinate for a layer given the back-to-front order table.
/// Layers missing from the table draw in front of all known layers.
pub fn layer_z_index(order: &[String], layer: &str) -> f32 {
    let position = order
        .iter()
        .position(|name| name == layer)
        .unwrap_or(order.len());
    position as f32 * 0.01
}
