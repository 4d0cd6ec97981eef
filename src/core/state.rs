//! Core domain: which preview scene is on screen.

use bevy::prelude::*;

#[derive(States, Debug, Hash, Eq, PartialEq, Clone, Copy, Default)]
pub enum PreviewMode {
    #[default]
    Boot,
    /// One movable character.
    SingleCharacter,
    /// The character four times, one per facing direction.
    FourDirection,
}

impl PreviewMode {
    /// The other scene variant; `Boot` goes to the single character.
    pub fn toggled(self) -> Self {
        match self {
            PreviewMode::SingleCharacter => PreviewMode::FourDirection,
            PreviewMode::FourDirection | PreviewMode::Boot => PreviewMode::SingleCharacter,
        }
    }
}
