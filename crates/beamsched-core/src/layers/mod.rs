pub mod builtin;
pub mod schema;

use crate::error::BeamError;
use schema::LayerMap;
use std::collections::HashSet;
use std::path::Path;

/// Load a layer map from a JSON file.
pub fn load_layer_map(path: &Path) -> Result<LayerMap, BeamError> {
    let content = std::fs::read_to_string(path).map_err(|e| BeamError::LayerMapLoad {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    parse_layer_map(&content, path)
}

/// Parse a layer map from a JSON string.
pub fn parse_layer_map(json: &str, source: &Path) -> Result<LayerMap, BeamError> {
    let map: LayerMap = serde_json::from_str(json).map_err(|e| BeamError::LayerMapLoad {
        path: source.to_path_buf(),
        reason: e.to_string(),
    })?;
    validate_layer_map(&map)?;
    Ok(map)
}

/// Validate that a layer map is usable.
pub fn validate_layer_map(map: &LayerMap) -> Result<(), BeamError> {
    if !map.tolerance.is_finite() || map.tolerance <= 0.0 {
        return Err(BeamError::LayerMapInvalid(format!(
            "tolerance must be a positive number, got {}",
            map.tolerance
        )));
    }

    let mut seen = HashSet::new();
    for (role, name) in map.roles() {
        let key = name.trim().to_lowercase();
        if key.is_empty() {
            return Err(BeamError::LayerMapInvalid(format!(
                "layer for {role} must not be empty"
            )));
        }
        if !seen.insert(key) {
            return Err(BeamError::LayerMapInvalid(format!(
                "layer '{}' is assigned to more than one role",
                name.trim()
            )));
        }
    }

    Ok(())
}
