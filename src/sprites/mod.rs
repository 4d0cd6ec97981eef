//! Sprites module for layered, recolorable character sprites.
//!
//! This module handles:
//! - Mapping greyscale mask pixels to shades of an accent color
//! - Colorizing spritesheets and caching the results per scene
//! - Keeping every layer of a direction on the same walk-cycle frame
//! - Deciding which sprites to create, swap or destroy on a layer change

pub mod animation;
pub mod cache;
pub mod color;
pub mod colorize;
pub mod error;
pub mod layers;
pub mod scene;

#[cfg(test)]
mod tests;

pub use animation::*;
pub use cache::*;
pub use color::*;
pub use colorize::*;
pub use error::*;
pub use layers::*;
pub use scene::*;
