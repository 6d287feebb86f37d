use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum BeamError {
    #[error("failed to read drawing snapshot: {0}")]
    Snapshot(String),

    #[error("no beam ID labels found on layer '{layer}'. Nothing to tabulate")]
    NoBeamLabels { layer: String },

    #[error("failed to load layer map from {path}: {reason}")]
    LayerMapLoad { path: PathBuf, reason: String },

    #[error("invalid layer map: {0}")]
    LayerMapInvalid(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
