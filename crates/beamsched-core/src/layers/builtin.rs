use crate::error::BeamError;
use crate::layers::schema::LayerMap;

const DEFAULT_LAYERS_JSON: &str = include_str!("../../../../layers/default.json");

/// Available predefined layer maps.
pub const PRESETS: &[&str] = &["default"];

/// Load a predefined layer map by name.
pub fn load_preset(name: &str) -> Result<LayerMap, BeamError> {
    match name {
        "default" => {
            let map: LayerMap = serde_json::from_str(DEFAULT_LAYERS_JSON)?;
            Ok(map)
        }
        _ => Err(BeamError::LayerMapInvalid(format!(
            "unknown preset '{}'. Available: {}",
            name,
            PRESETS.join(", ")
        ))),
    }
}
