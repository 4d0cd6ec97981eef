//! Movement domain: system modules for preview movement.

pub(crate) mod input;
pub(crate) mod movement;

pub(crate) use input::read_input;
pub(crate) use movement::{apply_movement, update_facing};
