//! Spritesheet colorization.
//!
//! Replaces every grey-mask pixel of a source sheet with the matching shade
//! of a target color. The colorizer itself is stateless; results are cached
//! per scene by [`super::TextureCache`] using [`TextureKey`].

use bevy::asset::RenderAssetUsages;
use bevy::prelude::*;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use std::fmt;

use super::{GreyShadeTable, PreviewError, Rgb};

/// Identity of a colorized texture: which sheet, recolored to which color.
///
/// Displayed as `{layer}_{style}_{#RRGGBB}`, the format both preview
/// variants use when sharing a cache.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TextureKey {
    pub layer: String,
    pub style: String,
    pub color: Rgb,
}

impl TextureKey {
    pub fn new(layer: impl Into<String>, style: impl Into<String>, color: Rgb) -> Self {
        Self {
            layer: layer.into(),
            style: style.into(),
            color,
        }
    }
}

impl fmt::Display for TextureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}_{}", self.layer, self.style, self.color.to_hex())
    }
}

/// Options for a single colorization pass.
#[derive(Debug, Clone)]
pub struct ColorizeOptions {
    /// Keep the source alpha on recolored pixels (otherwise force opaque).
    pub preserve_alpha: bool,
    /// Key the result will be cached under, used for tracing only.
    pub cache_key: Option<TextureKey>,
}

impl Default for ColorizeOptions {
    fn default() -> Self {
        Self {
            preserve_alpha: true,
            cache_key: None,
        }
    }
}

/// A decoded RGBA8 image, row-major, 4 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wrap raw RGBA8 bytes. Returns `None` if the length does not match the
    /// dimensions.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(4)?;
        (data.len() == expected).then_some(Self {
            width,
            height,
            data,
        })
    }

    /// Read a loaded Bevy image into a pixel buffer, converting to RGBA8 if
    /// needed. `path` is only used for error reporting.
    pub fn from_image(image: &Image, path: &str) -> Result<Self, PreviewError> {
        let decode_error = |reason: String| PreviewError::Decode {
            path: path.to_string(),
            reason,
        };

        let format = image.texture_descriptor.format;
        let converted;
        let rgba = match format {
            TextureFormat::Rgba8UnormSrgb | TextureFormat::Rgba8Unorm => image,
            other => {
                converted = image
                    .convert(TextureFormat::Rgba8UnormSrgb)
                    .ok_or_else(|| decode_error(format!("unsupported texture format {:?}", other)))?;
                &converted
            }
        };

        let data = rgba
            .data
            .as_ref()
            .ok_or_else(|| decode_error("image has no CPU-side pixel data".to_string()))?;

        Self::from_raw(rgba.width(), rgba.height(), data.clone()).ok_or_else(|| {
            decode_error(format!(
                "pixel data length {} does not match {}x{}",
                data.len(),
                rgba.width(),
                rgba.height()
            ))
        })
    }

    /// Turn the buffer into a drawable Bevy image.
    pub fn into_image(self) -> Image {
        Image::new(
            Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
            TextureDimension::D2,
            self.data,
            TextureFormat::Rgba8UnormSrgb,
            RenderAssetUsages::default(),
        )
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ])
    }
}

/// Produce a recolored copy of `source`.
///
/// Transparent pixels and pixels outside the grey mask are copied unchanged.
pub fn colorize(
    source: &PixelBuffer,
    target: Rgb,
    table: &GreyShadeTable,
    options: &ColorizeOptions,
) -> PixelBuffer {
    // One shade per bucket, computed once per pass
    let shades: Vec<Rgb> = (0..table.len())
        .map(|bucket| table.blend(target, table.shade_factor_of(bucket)))
        .collect();

    let mut data = source.data.clone();
    let mut recolored = 0usize;

    for pixel in data.chunks_exact_mut(4) {
        if pixel[3] == 0 {
            continue;
        }

        let Some(bucket) = table.grey_level_of([pixel[0], pixel[1], pixel[2], pixel[3]]) else {
            continue;
        };

        let shade = shades[bucket];
        pixel[0] = shade.r;
        pixel[1] = shade.g;
        pixel[2] = shade.b;
        if !options.preserve_alpha {
            pixel[3] = 255;
        }
        recolored += 1;
    }

    if let Some(key) = &options.cache_key {
        debug!("Colorized {} ({} pixels recolored)", key, recolored);
    }

    PixelBuffer {
        width: source.width,
        height: source.height,
        data,
    }
}
