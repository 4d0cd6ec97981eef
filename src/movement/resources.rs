//! Movement domain: tuning and input resources.

use bevy::prelude::*;

use crate::content::PreviewConfig;

#[derive(Resource, Debug, Clone)]
pub struct MovementTuning {
    /// Sprite pixels per second.
    pub speed: f32,
    /// Display pixels per sprite pixel.
    pub display_scale: f32,
    /// Background size in sprite pixels.
    pub bounds: Vec2,
    /// Distance kept from the background edge, in sprite pixels.
    pub margin: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self::from_config(&PreviewConfig::default())
    }
}

impl MovementTuning {
    pub fn from_config(config: &PreviewConfig) -> Self {
        Self {
            speed: config.movement.speed,
            display_scale: config.display_scale,
            bounds: Vec2::new(config.background.width, config.background.height),
            margin: config.movement.margin,
        }
    }

    /// On-screen speed, so movement looks the same at every display scale.
    pub fn scaled_speed(&self) -> f32 {
        self.speed * self.display_scale
    }

    /// Half-extents of the area the character may occupy, in display pixels.
    /// Never negative, even if the margin exceeds the background.
    pub fn walkable_half_extents(&self) -> Vec2 {
        ((self.bounds * 0.5 - Vec2::splat(self.margin)) * self.display_scale).max(Vec2::ZERO)
    }

    /// Clamp a display-space position into the walkable rectangle centered
    /// on the origin.
    pub fn clamp_position(&self, position: Vec2) -> Vec2 {
        let half = self.walkable_half_extents();
        position.clamp(-half, half)
    }
}

#[derive(Resource, Debug, Default)]
pub struct MovementInput {
    pub axis: Vec2,
}

/// Axis contributed by the on-screen direction buttons.
#[derive(Resource, Debug, Default)]
pub struct TouchMovement {
    pub axis: Vec2,
}
