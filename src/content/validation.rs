//! Validation for preview settings and their references into the catalog.

use super::data::*;
use super::registry::StyleCatalog;
use crate::sprites::{Direction, DirectionAnimation, NONE_STYLE};

/// A validation error with context about what failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub source_type: &'static str,
    pub source_id: String,
    pub field: &'static str,
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} '{}' has invalid field '{}': {}",
            self.source_type, self.source_id, self.field, self.message
        )
    }
}

/// Helper macro for recording a failed check
macro_rules! check {
    ($errors:expr, $cond:expr, $source_type:expr, $source_id:expr, $field:expr, $($msg:tt)+) => {
        if !$cond {
            $errors.push(ValidationError {
                source_type: $source_type,
                source_id: $source_id.to_string(),
                field: $field,
                message: format!($($msg)+),
            });
        }
    };
}

fn validate_animation(
    errors: &mut Vec<ValidationError>,
    label: &str,
    animation: &DirectionAnimation,
    columns: u32,
) {
    check!(
        errors,
        !animation.sequence.is_empty(),
        "Animation",
        label,
        "sequence",
        "frame sequence is empty"
    );
    for pose in &animation.sequence {
        check!(
            errors,
            (*pose as u32) < columns,
            "Animation",
            label,
            "sequence",
            "pose {} is outside the {} columns of the sheet",
            pose,
            columns
        );
    }
    check!(
        errors,
        animation.frame_rate.is_finite() && animation.frame_rate > 0.0,
        "Animation",
        label,
        "frame_rate",
        "frame rate must be positive and finite, got {}",
        animation.frame_rate
    );
}

/// Validate preview settings and the catalog against them.
/// Returns a list of validation errors, empty if everything is consistent.
pub fn validate_config(config: &PreviewConfig, catalog: &StyleCatalog) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    // Sheet grid
    let sheet = &config.sheet;
    check!(
        errors,
        sheet.frame_width > 0 && sheet.frame_height > 0,
        "Sheet",
        "preview",
        "frame_width/frame_height",
        "frame size must be non-zero, got {}x{}",
        sheet.frame_width,
        sheet.frame_height
    );
    check!(
        errors,
        sheet.columns > 0,
        "Sheet",
        "preview",
        "columns",
        "sheet needs at least one pose column"
    );
    check!(
        errors,
        sheet.rows as usize >= Direction::ALL.len(),
        "Sheet",
        "preview",
        "rows",
        "sheet needs one row per direction, got {}",
        sheet.rows
    );

    // Animation
    validate_animation(&mut errors, "default", &config.animation.default, sheet.columns);
    for (direction, animation) in &config.animation.overrides {
        validate_animation(&mut errors, direction.label(), animation, sheet.columns);
    }

    // Shade table
    if let Err(message) = config.shades.check() {
        errors.push(ValidationError {
            source_type: "Shades",
            source_id: "preview".to_string(),
            field: "shades",
            message,
        });
    }

    // Layer order
    check!(
        errors,
        config.z_order.contains(&config.base_body.layer),
        "Layer",
        config.base_body.layer,
        "z_order",
        "base body layer is missing from z_order"
    );
    for (i, name) in config.z_order.iter().enumerate() {
        check!(
            errors,
            !config.z_order[..i].contains(name),
            "Layer",
            name,
            "z_order",
            "listed more than once"
        );
    }
    check!(
        errors,
        config.base_body.style != NONE_STYLE,
        "Layer",
        config.base_body.layer,
        "base_body.style",
        "base body cannot use the \"{}\" style",
        NONE_STYLE
    );

    // Display and movement
    check!(
        errors,
        config.display_scale > 0.0,
        "Display",
        "preview",
        "display_scale",
        "scale must be positive, got {}",
        config.display_scale
    );
    check!(
        errors,
        config.movement.speed >= 0.0,
        "Movement",
        "preview",
        "speed",
        "speed cannot be negative, got {}",
        config.movement.speed
    );
    check!(
        errors,
        config.movement.margin >= 0.0
            && config.movement.margin * 2.0 < config.background.width
            && config.movement.margin * 2.0 < config.background.height,
        "Movement",
        "preview",
        "margin",
        "margin {} leaves no room inside a {}x{} background",
        config.movement.margin,
        config.background.width,
        config.background.height
    );

    // Catalog layers
    for name in &catalog.order {
        let Some(def) = catalog.get(name) else {
            continue;
        };
        check!(
            errors,
            config.z_order.contains(&def.layer),
            "Catalog",
            def.layer,
            "layer",
            "layer has no z_order entry"
        );
        check!(
            errors,
            !def.styles.iter().any(|s| s == NONE_STYLE),
            "Catalog",
            def.layer,
            "styles",
            "\"{}\" is implicit and must not be listed",
            NONE_STYLE
        );
    }

    errors
}
