//! Per-scene cache of colorized spritesheets.

use bevy::prelude::*;
use std::collections::HashMap;

use super::{ColorizeOptions, GreyShadeTable, PixelBuffer, SheetLayout, TextureKey, colorize};

/// Maps [`TextureKey`]s to realized textures for one preview scene.
///
/// Every texture shares one atlas layout slicing the sheet into the fixed
/// frame grid. The cache owns its handles; [`TextureCache::release_all`]
/// must only run once no sprite references them anymore.
#[derive(Debug, Default)]
pub struct TextureCache {
    sheet: SheetLayout,
    shades: GreyShadeTable,
    preserve_alpha: bool,
    textures: HashMap<TextureKey, Handle<Image>>,
    atlas_layout: Option<Handle<TextureAtlasLayout>>,
    colorize_calls: usize,
}

impl TextureCache {
    pub fn new(sheet: SheetLayout, shades: GreyShadeTable, preserve_alpha: bool) -> Self {
        Self {
            sheet,
            shades,
            preserve_alpha,
            ..default()
        }
    }

    /// Return the texture for `key`, colorizing `source` on first request.
    pub fn get_or_create(
        &mut self,
        key: &TextureKey,
        source: &PixelBuffer,
        images: &mut Assets<Image>,
    ) -> Handle<Image> {
        if let Some(handle) = self.textures.get(key) {
            return handle.clone();
        }

        if source.width() < self.sheet.sheet_width() || source.height() < self.sheet.sheet_height()
        {
            warn!(
                "Sheet for {} is {}x{}, smaller than the {}x{} frame grid",
                key,
                source.width(),
                source.height(),
                self.sheet.sheet_width(),
                self.sheet.sheet_height()
            );
        }

        let options = ColorizeOptions {
            preserve_alpha: self.preserve_alpha,
            cache_key: Some(key.clone()),
        };
        let colorized = colorize(source, key.color, &self.shades, &options);
        self.colorize_calls += 1;

        let handle = images.add(colorized.into_image());
        self.textures.insert(key.clone(), handle.clone());
        handle
    }

    /// Shared atlas layout for every texture in this cache.
    pub fn atlas_layout(
        &mut self,
        layouts: &mut Assets<TextureAtlasLayout>,
    ) -> Handle<TextureAtlasLayout> {
        if let Some(handle) = &self.atlas_layout {
            return handle.clone();
        }

        let layout = TextureAtlasLayout::from_grid(
            UVec2::new(self.sheet.frame_width, self.sheet.frame_height),
            self.sheet.columns,
            self.sheet.rows,
            None,
            None,
        );
        let handle = layouts.add(layout);
        self.atlas_layout = Some(handle.clone());
        handle
    }

    /// Drop every cached texture and the atlas layout from the asset stores.
    /// Returns how many textures were released.
    pub fn release_all(
        &mut self,
        images: &mut Assets<Image>,
        layouts: &mut Assets<TextureAtlasLayout>,
    ) -> usize {
        let released = self.textures.len();
        for (_, handle) in self.textures.drain() {
            images.remove(&handle);
        }
        if let Some(handle) = self.atlas_layout.take() {
            layouts.remove(&handle);
        }
        released
    }

    pub fn contains(&self, key: &TextureKey) -> bool {
        self.textures.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Number of times the colorizer actually ran.
    pub fn colorize_calls(&self) -> usize {
        self.colorize_calls
    }
}
