use serde::{Deserialize, Serialize};

/// Names the drawing layer that carries each kind of annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerMap {
    pub name: String,
    pub description: Option<String>,
    /// Beam mark labels, e.g. "B1 300x600".
    pub id_layer: String,
    /// Longitudinal reinforcement callouts.
    pub rebar_layer: String,
    /// Stirrup callouts ("8@150").
    pub stirrup_layer: String,
    pub dimension_layer: String,
    /// Beam outline lines or polygons.
    pub boundary_layer: String,
    /// Auxiliary steel lines, only used by the single-beam workflow.
    pub steel_layer: String,
    pub level_layer: String,
    /// Coordinate tolerance for orientation and range checks.
    pub tolerance: f64,
}

impl Default for LayerMap {
    fn default() -> Self {
        Self {
            name: "default".into(),
            description: None,
            id_layer: "B_NO".into(),
            rebar_layer: "B_TEXT".into(),
            stirrup_layer: "ring text".into(),
            dimension_layer: "B_DIM".into(),
            boundary_layer: "B_BOX".into(),
            steel_layer: "B_STEEL".into(),
            level_layer: "LEVEL".into(),
            tolerance: 1e-3,
        }
    }
}

/// The role a layer plays in the extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerRole {
    Id,
    Rebar,
    Stirrup,
    Dimension,
    Boundary,
    Steel,
    Level,
}

impl LayerMap {
    /// All (role, layer name) pairs in a stable order.
    pub fn roles(&self) -> [(LayerRole, &str); 7] {
        [
            (LayerRole::Id, self.id_layer.as_str()),
            (LayerRole::Rebar, self.rebar_layer.as_str()),
            (LayerRole::Stirrup, self.stirrup_layer.as_str()),
            (LayerRole::Dimension, self.dimension_layer.as_str()),
            (LayerRole::Boundary, self.boundary_layer.as_str()),
            (LayerRole::Steel, self.steel_layer.as_str()),
            (LayerRole::Level, self.level_layer.as_str()),
        ]
    }

    /// Resolve a primitive's layer to its role. Matching ignores case and
    /// surrounding whitespace.
    pub fn role_of(&self, layer: &str) -> Option<LayerRole> {
        let layer = layer.trim();
        self.roles()
            .into_iter()
            .find(|(_, name)| name.trim().eq_ignore_ascii_case(layer))
            .map(|(role, _)| role)
    }
}

impl std::fmt::Display for LayerRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LayerRole::Id => "beam ID labels",
            LayerRole::Rebar => "reinforcement labels",
            LayerRole::Stirrup => "stirrup labels",
            LayerRole::Dimension => "dimension marks",
            LayerRole::Boundary => "beam boundary",
            LayerRole::Steel => "auxiliary steel lines (single beam)",
            LayerRole::Level => "level label",
        };
        write!(f, "{s}")
    }
}
