//! Core domain: shared resources exposed to the host.

use bevy::prelude::*;

/// True while the active scene is still loading its first layer set.
/// The host shows a spinner overlay while this is set.
#[derive(Resource, Debug)]
pub struct PreviewLoading {
    pub loading: bool,
}

impl Default for PreviewLoading {
    fn default() -> Self {
        Self { loading: true }
    }
}

impl PreviewLoading {
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn begin(&mut self) {
        self.loading = true;
    }

    pub fn finish(&mut self) {
        self.loading = false;
    }
}
