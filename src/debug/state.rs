//! Debug domain: state for the host-emulating dev tools.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Resource tracking debug mode state
#[derive(Resource, Debug)]
pub struct DebugState {
    /// Whether the hotkey panel is visible
    pub ui_visible: bool,
    /// Seed the color generator was created from
    pub seed: u64,
    /// Color generator, reproducible per seed
    pub rng: ChaCha8Rng,
    /// Message to display temporarily in debug UI
    pub status_message: Option<(String, f32)>,
}

impl DebugState {
    pub fn new(seed: u64) -> Self {
        Self {
            ui_visible: false,
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
            status_message: None,
        }
    }

    /// Set a status message that will fade after a duration
    pub fn set_message(&mut self, message: impl Into<String>, duration: f32) {
        self.status_message = Some((message.into(), duration));
    }
}
