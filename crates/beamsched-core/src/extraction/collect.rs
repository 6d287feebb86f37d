use crate::layers::schema::{LayerMap, LayerRole};
use crate::model::{Bounds, DimensionMark, Point, Primitive, Segment, TextItem};

/// Primitives partitioned by the role of their layer.
#[derive(Debug, Clone, Default)]
pub struct Collected {
    pub id_labels: Vec<TextItem>,
    pub rebar_labels: Vec<TextItem>,
    pub stirrup_labels: Vec<TextItem>,
    pub dimensions: Vec<DimensionMark>,
    pub boundary_lines: Vec<Segment>,
    pub boundary_polygons: Vec<Bounds>,
    /// Auxiliary steel lines; only the single-beam workflow reads these.
    pub steel_lines: Vec<Segment>,
    /// Level label text. The last one seen wins.
    pub level: Option<String>,
}

/// Partition primitives into typed buckets by (layer role, category).
///
/// Combinations with no meaning (a dimension on the rebar layer, a line on
/// an unknown layer) are dropped without error.
pub fn collect(primitives: &[Primitive], layers: &LayerMap) -> Collected {
    let mut out = Collected::default();

    for prim in primitives {
        let Some(role) = layers.role_of(prim.layer()) else {
            log::trace!("ignoring {} on unmapped layer '{}'", prim.category(), prim.layer());
            continue;
        };

        match (role, prim) {
            (LayerRole::Id, Primitive::Label { text, bounds, .. }) => {
                out.id_labels.push(TextItem::new(text.as_str(), *bounds));
            }
            (LayerRole::Rebar, Primitive::Label { text, bounds, .. }) => {
                out.rebar_labels.push(TextItem::new(text.as_str(), *bounds));
            }
            (LayerRole::Stirrup, Primitive::Label { text, bounds, .. }) => {
                out.stirrup_labels.push(TextItem::new(text.as_str(), *bounds));
            }
            (LayerRole::Level, Primitive::Label { text, .. }) => {
                out.level = Some(text.trim().to_string());
            }
            (
                LayerRole::Dimension,
                Primitive::Dimension {
                    text_anchor,
                    measurement,
                    ..
                },
            ) => {
                out.dimensions.push(DimensionMark {
                    text_anchor: *text_anchor,
                    measurement: *measurement,
                });
            }
            (LayerRole::Boundary, Primitive::Line { start, end, .. }) => {
                out.boundary_lines.push(Segment::new(*start, *end));
            }
            (LayerRole::Boundary, Primitive::Polygon { vertices, .. })
            | (
                LayerRole::Boundary,
                Primitive::Polyline {
                    vertices,
                    closed: true,
                    ..
                },
            ) => {
                if let Some(bounds) = Bounds::enclosing(vertices.iter().copied()) {
                    out.boundary_polygons.push(bounds);
                }
            }
            (
                LayerRole::Boundary,
                Primitive::Polyline {
                    vertices,
                    closed: false,
                    ..
                },
            ) => {
                out.boundary_lines.extend(segments(vertices));
            }
            (LayerRole::Steel, Primitive::Line { start, end, .. }) => {
                out.steel_lines.push(Segment::new(*start, *end));
            }
            (
                LayerRole::Steel,
                Primitive::Polyline {
                    vertices,
                    closed: false,
                    ..
                },
            ) => {
                out.steel_lines.extend(segments(vertices));
            }
            _ => {
                log::trace!(
                    "ignoring {} on layer '{}' ({})",
                    prim.category(),
                    prim.layer(),
                    role
                );
            }
        }
    }

    log::debug!(
        "collected {} ID, {} rebar, {} stirrup, {} dimension, {} boundary line(s), {} polygon(s)",
        out.id_labels.len(),
        out.rebar_labels.len(),
        out.stirrup_labels.len(),
        out.dimensions.len(),
        out.boundary_lines.len(),
        out.boundary_polygons.len()
    );

    out
}

/// Consecutive segments of an open polyline.
fn segments(vertices: &[Point]) -> impl Iterator<Item = Segment> + '_ {
    vertices.windows(2).map(|w| Segment::new(w[0], w[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn label(layer: &str, text: &str, x: f64, y: f64) -> Primitive {
        Primitive::Label {
            layer: layer.into(),
            text: text.into(),
            bounds: Bounds::new(Point::new(x - 10.0, y - 5.0), Point::new(x + 10.0, y + 5.0)),
        }
    }

    fn line(layer: &str, x1: f64, y1: f64, x2: f64, y2: f64) -> Primitive {
        Primitive::Line {
            layer: layer.into(),
            start: Point::new(x1, y1),
            end: Point::new(x2, y2),
        }
    }

    #[test]
    fn test_partition_by_layer_and_category() {
        let prims = vec![
            label("B_NO", "B1 300x600", 0.0, 0.0),
            label("B_TEXT", "2T20(T)", 100.0, -50.0),
            label("ring text", "8@150", 100.0, 0.0),
            Primitive::Dimension {
                layer: "B_DIM".into(),
                text_anchor: Point::new(500.0, 0.0),
                measurement: 1500.0,
                bounds: None,
            },
            line("B_BOX", 0.0, 0.0, 0.0, 600.0),
            line("B_STEEL", 0.0, 50.0, 900.0, 50.0),
        ];
        let c = collect(&prims, &LayerMap::default());
        assert_eq!(c.id_labels.len(), 1);
        assert_eq!(c.rebar_labels[0].text, "2T20(T)");
        assert_eq!(c.stirrup_labels.len(), 1);
        assert_eq!(c.dimensions[0].measurement, 1500.0);
        assert_eq!(c.boundary_lines.len(), 1);
        assert_eq!(c.steel_lines.len(), 1);
    }

    #[test]
    fn test_unrecognized_combinations_ignored() {
        let prims = vec![
            line("B_TEXT", 0.0, 0.0, 1.0, 1.0),
            label("B_BOX", "stray", 0.0, 0.0),
            label("A-ANNO", "note", 0.0, 0.0),
            Primitive::Polygon {
                layer: "B_DIM".into(),
                vertices: vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)],
            },
            Primitive::Other,
        ];
        let c = collect(&prims, &LayerMap::default());
        assert!(c.id_labels.is_empty());
        assert!(c.rebar_labels.is_empty());
        assert!(c.boundary_lines.is_empty());
        assert!(c.boundary_polygons.is_empty());
        assert!(c.dimensions.is_empty());
    }

    #[test]
    fn test_last_level_label_wins() {
        let prims = vec![
            label("LEVEL", "+3.00", 0.0, 0.0),
            label("LEVEL", " +6.00 ", 0.0, 0.0),
        ];
        let c = collect(&prims, &LayerMap::default());
        assert_eq!(c.level.as_deref(), Some("+6.00"));
    }

    #[test]
    fn test_polylines_split_by_closure() {
        let square = vec![
            Point::new(0.0, 0.0),
            Point::new(3000.0, 0.0),
            Point::new(3000.0, 600.0),
            Point::new(0.0, 600.0),
        ];
        let prims = vec![
            Primitive::Polyline {
                layer: "B_BOX".into(),
                vertices: square.clone(),
                closed: true,
            },
            Primitive::Polyline {
                layer: "B_BOX".into(),
                vertices: square,
                closed: false,
            },
        ];
        let c = collect(&prims, &LayerMap::default());
        assert_eq!(c.boundary_polygons.len(), 1);
        assert_eq!(c.boundary_polygons[0].max, Point::new(3000.0, 600.0));
        assert_eq!(c.boundary_lines.len(), 3);
    }
}
