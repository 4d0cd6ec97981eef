//! Color mapping for greyscale sprite masks.
//!
//! Source spritesheets paint their recolorable regions in a handful of grey
//! levels. Each grey level maps to a shade of the target accent color, so a
//! darker grey in the source becomes a darker variant of the same hue.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use super::PreviewError;

/// An opaque RGB color, written as `#RRGGBB` in data files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RRGGBB`, `RRGGBB` or the short `#RGB` form.
    pub fn from_hex(input: &str) -> Result<Self, PreviewError> {
        let invalid = || PreviewError::InvalidColor {
            input: input.to_string(),
        };

        let trimmed = input.trim();
        let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
        // from_str_radix alone would accept a sign
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());

        match digits.len() {
            6 => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            3 => {
                // #ABC expands to #AABBCC
                let expand = |s: &str| channel(s).map(|v| v * 17);
                Ok(Self::new(
                    expand(&digits[0..1])?,
                    expand(&digits[1..2])?,
                    expand(&digits[2..3])?,
                ))
            }
            _ => Err(invalid()),
        }
    }

    /// Uppercase `#RRGGBB`.
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = PreviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for Rgb {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgb {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Rgb::from_hex(&raw).map_err(serde::de::Error::custom)
    }
}

/// Reference grey levels used to find recolorable pixels.
///
/// Levels are strictly ascending (darkest first). A pixel belongs to the
/// nearest level by Euclidean RGB distance, but only when that distance is
/// within `tolerance`; anything further away (outlines, highlights, colored
/// detail) is left alone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GreyShadeTable {
    levels: Vec<u8>,
    tolerance: f32,
    min_brightness: f32,
}

impl Default for GreyShadeTable {
    fn default() -> Self {
        Self {
            levels: vec![64, 96, 128, 160, 192, 224],
            tolerance: 24.0,
            min_brightness: 0.4,
        }
    }
}

impl GreyShadeTable {
    /// Build a table, rejecting empty or non-ascending level lists.
    pub fn new(levels: Vec<u8>, tolerance: f32, min_brightness: f32) -> Result<Self, String> {
        let table = Self {
            levels,
            tolerance,
            min_brightness,
        };
        table.check()?;
        Ok(table)
    }

    /// Structural checks shared by [`GreyShadeTable::new`] and config validation.
    pub fn check(&self) -> Result<(), String> {
        if self.levels.is_empty() {
            return Err("grey shade table has no levels".to_string());
        }
        if self.levels.windows(2).any(|w| w[0] >= w[1]) {
            return Err(format!(
                "grey shade levels must be strictly ascending, got {:?}",
                self.levels
            ));
        }
        if self.tolerance.is_nan() || self.tolerance < 0.0 {
            return Err(format!("tolerance must be >= 0, got {}", self.tolerance));
        }
        if !(0.0..=1.0).contains(&self.min_brightness) {
            return Err(format!(
                "min_brightness must be within [0, 1], got {}",
                self.min_brightness
            ));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Bucket index of the nearest grey level, or `None` if the pixel is not
    /// part of the grey mask. Transparent pixels never match.
    pub fn grey_level_of(&self, pixel: [u8; 4]) -> Option<usize> {
        if pixel[3] == 0 {
            return None;
        }

        let (r, g, b) = (pixel[0] as f32, pixel[1] as f32, pixel[2] as f32);
        let mut best: Option<(usize, f32)> = None;

        for (index, &level) in self.levels.iter().enumerate() {
            let l = level as f32;
            let distance = ((r - l).powi(2) + (g - l).powi(2) + (b - l).powi(2)).sqrt();
            // Ties keep the darker bucket
            if best.is_none_or(|(_, d)| distance < d) {
                best = Some((index, distance));
            }
        }

        best.filter(|&(_, distance)| distance <= self.tolerance)
            .map(|(index, _)| index)
    }

    /// Position of a bucket between darkest (0.0) and lightest (1.0).
    pub fn shade_factor_of(&self, bucket: usize) -> f32 {
        let last = self.levels.len().saturating_sub(1);
        if last == 0 {
            return 1.0;
        }
        bucket.min(last) as f32 / last as f32
    }

    /// Shade `base` for a given factor using this table's brightness floor.
    pub fn blend(&self, base: Rgb, factor: f32) -> Rgb {
        blend(base, factor, self.min_brightness)
    }
}

/// Shaded variant of `base`: factor 1.0 returns `base`, factor 0.0 scales
/// every channel by `min_brightness`. Hue is preserved.
pub fn blend(base: Rgb, factor: f32, min_brightness: f32) -> Rgb {
    let factor = factor.clamp(0.0, 1.0);
    let scale = min_brightness + (1.0 - min_brightness) * factor;
    let channel = |c: u8| (c as f32 * scale).round().clamp(0.0, 255.0) as u8;
    Rgb::new(channel(base.r), channel(base.g), channel(base.b))
}
