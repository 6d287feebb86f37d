use crate::error::BeamError;
use crate::extraction::PrimitiveSource;
use crate::model::Primitive;
use serde::Deserialize;

/// Snapshot backend reading the JSON export of a drawing.
///
/// Accepts either `{ "primitives": [...] }` or a bare array of primitives.
/// Elements of an unrecognized kind are dropped.
pub struct JsonSnapshot;

impl JsonSnapshot {
    pub fn new() -> Self {
        JsonSnapshot
    }
}

impl Default for JsonSnapshot {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
struct SnapshotDocument {
    primitives: Vec<Primitive>,
}

impl PrimitiveSource for JsonSnapshot {
    fn read_primitives(&self, bytes: &[u8]) -> Result<Vec<Primitive>, BeamError> {
        let Some(first) = bytes.iter().find(|b| !b.is_ascii_whitespace()) else {
            return Err(BeamError::Snapshot("snapshot is empty".into()));
        };

        let parsed = if *first == b'[' {
            serde_json::from_slice::<Vec<Primitive>>(bytes)
        } else {
            serde_json::from_slice::<SnapshotDocument>(bytes).map(|doc| doc.primitives)
        };
        let mut primitives =
            parsed.map_err(|e| BeamError::Snapshot(format!("invalid snapshot JSON: {e}")))?;

        let total = primitives.len();
        primitives.retain(|p| !matches!(p, Primitive::Other));
        if primitives.len() < total {
            log::trace!(
                "skipped {} primitive(s) of unrecognized kind",
                total - primitives.len()
            );
        }
        log::debug!("read {} primitive(s) from JSON snapshot", primitives.len());
        Ok(primitives)
    }

    fn backend_name(&self) -> &str {
        "json-snapshot"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Category;

    const LINE: &str = r#"{"kind":"line","layer":"B_BOX",
        "start":{"x":0,"y":0},"end":{"x":0,"y":600}}"#;

    #[test]
    fn test_wrapped_document() {
        let json = format!(r#"{{"primitives":[{LINE}]}}"#);
        let prims = JsonSnapshot::new().read_primitives(json.as_bytes()).unwrap();
        assert_eq!(prims.len(), 1);
        assert_eq!(prims[0].category(), Category::Line);
    }

    #[test]
    fn test_bare_array() {
        let json = format!("[{LINE}, {LINE}]");
        let prims = JsonSnapshot::new().read_primitives(json.as_bytes()).unwrap();
        assert_eq!(prims.len(), 2);
    }

    #[test]
    fn test_polyline_closed_defaults_false() {
        let json = r#"[{"kind":"polyline","layer":"B_BOX",
            "vertices":[{"x":0,"y":0},{"x":10,"y":0}]}]"#;
        let prims = JsonSnapshot::new().read_primitives(json.as_bytes()).unwrap();
        assert!(matches!(prims[0], Primitive::Polyline { closed: false, .. }));
    }

    #[test]
    fn test_empty_input_rejected() {
        let err = JsonSnapshot::new().read_primitives(b"  \n").unwrap_err();
        assert!(matches!(err, BeamError::Snapshot(_)));
    }

    #[test]
    fn test_unknown_kind_skipped() {
        let json = format!(
            r#"[{{"kind":"hatch","layer":"B_BOX","pattern":"ANSI31"}},
                {LINE},
                {{"kind":"circle","layer":"B_NO","center":{{"x":0,"y":0}},"radius":5}}]"#
        );
        let prims = JsonSnapshot::new().read_primitives(json.as_bytes()).unwrap();
        assert_eq!(prims.len(), 1);
        assert_eq!(prims[0].category(), Category::Line);
    }

    #[test]
    fn test_malformed_known_kind_reports_position() {
        let json = r#"{"primitives":[
            {"kind":"label","layer":"B_NO","text":"B1 300x600"}
        ]}"#;
        let err = JsonSnapshot::new().read_primitives(json.as_bytes()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("missing field `bounds`"), "{msg}");
        assert!(msg.contains("line"), "{msg}");
        assert!(!msg.contains("untagged"), "{msg}");
    }
}
