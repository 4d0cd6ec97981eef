//! Error type for sprite loading and colorization failures.

/// Failures that can occur while preparing a layer for display.
///
/// None of these are fatal: the preview logs them and skips the affected
/// layer for the current update.
#[derive(Debug, Clone, PartialEq)]
pub enum PreviewError {
    /// The spritesheet could not be fetched from the asset source.
    AssetLoad { path: String, reason: String },
    /// The spritesheet loaded but could not be read as RGBA8 pixels.
    Decode { path: String, reason: String },
    /// A color string was not a valid hex color.
    InvalidColor { input: String },
}

impl std::fmt::Display for PreviewError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PreviewError::AssetLoad { path, reason } => {
                write!(f, "Failed to load spritesheet {}: {}", path, reason)
            }
            PreviewError::Decode { path, reason } => {
                write!(f, "Failed to decode spritesheet {}: {}", path, reason)
            }
            PreviewError::InvalidColor { input } => {
                write!(f, "Invalid color '{}', expected #RRGGBB", input)
            }
        }
    }
}

impl std::error::Error for PreviewError {}
