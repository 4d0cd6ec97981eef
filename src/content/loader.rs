//! Loader for preview data files at startup.

use ron::Options;
use std::fs;
use std::path::Path;

use super::data::*;
use super::registry::StyleCatalog;
use crate::sprites::LayerSet;

/// Error type for content loading failures.
#[derive(Debug)]
pub struct ContentLoadError {
    pub file: String,
    pub message: String,
}

impl std::fmt::Display for ContentLoadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Failed to load {}: {}", self.file, self.message)
    }
}

/// Create RON options with extensions enabled for more flexible parsing.
fn ron_options() -> Options {
    Options::default().with_default_extension(ron::extensions::Extensions::IMPLICIT_SOME)
}

fn read_file(path: &Path) -> Result<String, ContentLoadError> {
    fs::read_to_string(path).map_err(|e| ContentLoadError {
        file: path.display().to_string(),
        message: format!("IO error: {}", e),
    })
}

/// Parse a single RON struct.
pub fn parse_single<T>(file_name: &str, contents: &str) -> Result<T, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    ron_options()
        .from_str(contents)
        .map_err(|e| ContentLoadError {
            file: file_name.to_string(),
            message: format!("Parse error: {}", e),
        })
}

/// Parse a RON file containing a DataFile<T> wrapper.
pub fn parse_data_file<T>(file_name: &str, contents: &str) -> Result<Vec<T>, ContentLoadError>
where
    T: for<'de> serde::Deserialize<'de>,
{
    parse_single::<DataFile<T>>(file_name, contents).map(|data| data.items)
}

/// Parse the host's JSON layer document.
pub fn parse_layer_set(file_name: &str, contents: &str) -> Result<LayerSet, ContentLoadError> {
    LayerSet::from_json(contents).map_err(|e| ContentLoadError {
        file: file_name.to_string(),
        message: format!("Parse error: {}", e),
    })
}

pub fn load_preview_config(path: &Path) -> Result<PreviewConfig, ContentLoadError> {
    let contents = read_file(path)?;
    parse_single(&path.display().to_string(), &contents)
}

pub fn load_catalog(path: &Path) -> Result<StyleCatalog, ContentLoadError> {
    let contents = read_file(path)?;
    parse_data_file::<LayerCatalogDef>(&path.display().to_string(), &contents)
        .map(StyleCatalog::from_defs)
}

pub fn load_layer_set(path: &Path) -> Result<LayerSet, ContentLoadError> {
    let contents = read_file(path)?;
    parse_layer_set(&path.display().to_string(), &contents)
}

/// Everything read from `assets/data/`.
#[derive(Debug, Default)]
pub struct LoadedContent {
    pub config: PreviewConfig,
    pub catalog: StyleCatalog,
    pub layers: LayerSet,
}

/// Load all preview data from `base_path`. Files that fail to load are
/// replaced by defaults and reported in the returned error list.
pub fn load_all_content(base_path: &Path) -> (LoadedContent, Vec<ContentLoadError>) {
    let mut content = LoadedContent::default();
    let mut errors = Vec::new();

    match load_preview_config(&base_path.join("preview.ron")) {
        Ok(config) => content.config = config,
        Err(e) => errors.push(e),
    }
    match load_catalog(&base_path.join("catalog.ron")) {
        Ok(catalog) => content.catalog = catalog,
        Err(e) => errors.push(e),
    }
    match load_layer_set(&base_path.join("layers.json")) {
        Ok(layers) => content.layers = layers,
        Err(e) => errors.push(e),
    }

    (content, errors)
}
