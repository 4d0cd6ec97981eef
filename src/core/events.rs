//! Core domain: events for layer updates.

use bevy::ecs::message::Message;

/// Event fired when a layer-set update has been applied to the scene
#[derive(Debug)]
pub struct LayerUpdateCompleted {
    /// Sprite operations performed.
    pub ops: usize,
    /// Layers left unchanged because their sheet failed to load.
    pub skipped: Vec<String>,
}

impl Message for LayerUpdateCompleted {}

/// Event fired when a layer-set change arrived while an update was running
/// and was not applied
#[derive(Debug)]
pub struct LayerUpdateDropped;

impl Message for LayerUpdateDropped {}
