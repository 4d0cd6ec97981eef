//! StyleCatalog resource providing lookups of selectable styles per layer.

use bevy::prelude::*;
use std::collections::HashMap;

use super::data::*;
use crate::sprites::{NONE_STYLE, Rgb};

/// Styles and palettes available for each layer, in catalog order.
#[derive(Resource, Debug, Default)]
pub struct StyleCatalog {
    pub layers: HashMap<String, LayerCatalogDef>,
    pub order: Vec<String>,
}

impl StyleCatalog {
    pub fn from_defs(defs: Vec<LayerCatalogDef>) -> Self {
        let mut catalog = Self::default();
        for def in defs {
            if !catalog.layers.contains_key(&def.layer) {
                catalog.order.push(def.layer.clone());
            }
            catalog.layers.insert(def.layer.clone(), def);
        }
        catalog
    }

    pub fn get(&self, layer: &str) -> Option<&LayerCatalogDef> {
        self.layers.get(layer)
    }

    /// Style following `current` for a layer, wrapping through "None".
    pub fn next_style(&self, layer: &str, current: &str) -> Option<String> {
        let def = self.layers.get(layer)?;
        let mut cycle: Vec<&str> = def.styles.iter().map(String::as_str).collect();
        cycle.push(NONE_STYLE);

        let next = match cycle.iter().position(|s| *s == current) {
            Some(i) => cycle[(i + 1) % cycle.len()],
            None => cycle[0],
        };
        Some(next.to_string())
    }

    pub fn palette(&self, layer: &str) -> &[Rgb] {
        self.layers
            .get(layer)
            .map(|d| d.palette.as_slice())
            .unwrap_or(&[])
    }

    /// Returns a summary of loaded catalog counts for logging.
    pub fn summary(&self) -> String {
        let lines: Vec<String> = self
            .order
            .iter()
            .filter_map(|name| self.layers.get(name))
            .map(|d| format!(" - {}: {} styles", d.layer, d.styles.len()))
            .collect();
        format!(
            "StyleCatalog loaded ({} layers, {} styles):\n{}",
            self.order.len(),
            self.total_styles(),
            lines.join("\n")
        )
    }

    pub fn total_styles(&self) -> usize {
        self.layers.values().map(|d| d.styles.len()).sum()
    }
}
