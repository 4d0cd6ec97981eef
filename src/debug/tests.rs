//! Debug domain: tests for the host-emulating layer edits.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use super::systems::{cycle_layer_style, randomize_colors};
use crate::content::{LayerCatalogDef, StyleCatalog};
use crate::sprites::{LayerSet, Rgb};

fn catalog() -> StyleCatalog {
    StyleCatalog::from_defs(vec![
        LayerCatalogDef {
            layer: "Hair".to_string(),
            styles: vec!["Spiky".to_string(), "Long".to_string()],
            palette: vec![Rgb::new(255, 0, 0), Rgb::new(0, 0, 255)],
        },
        LayerCatalogDef {
            layer: "Hat".to_string(),
            styles: vec!["Wizard".to_string()],
            palette: vec![],
        },
    ])
}

#[test]
fn test_cycle_adds_missing_layer_with_palette_color() {
    let mut set = LayerSet::new();
    let style = cycle_layer_style(&mut set, &catalog(), "Hair");

    assert_eq!(style.as_deref(), Some("Spiky"));
    assert_eq!(set.get("Hair").unwrap().color, Rgb::new(255, 0, 0));
}

#[test]
fn test_cycle_walks_styles_then_none() {
    let catalog = catalog();
    let mut set = LayerSet::new().with("Hat", "Wizard", Rgb::WHITE);

    assert_eq!(cycle_layer_style(&mut set, &catalog, "Hat").as_deref(), Some("None"));
    assert_eq!(cycle_layer_style(&mut set, &catalog, "Hat").as_deref(), Some("Wizard"));
    assert_eq!(cycle_layer_style(&mut set, &catalog, "Cape"), None);
    assert!(!set.contains("Cape"));
}

#[test]
fn test_randomize_is_reproducible_and_uses_palette() {
    let catalog = catalog();
    let base = LayerSet::new()
        .with("Hair", "Spiky", Rgb::WHITE)
        .with("Hat", "Wizard", Rgb::WHITE);

    let mut first = base.clone();
    randomize_colors(&mut first, &catalog, &mut ChaCha8Rng::seed_from_u64(7));
    let mut second = base.clone();
    randomize_colors(&mut second, &catalog, &mut ChaCha8Rng::seed_from_u64(7));

    assert_eq!(first, second);
    assert!(catalog.palette("Hair").contains(&first.get("Hair").unwrap().color));
}
