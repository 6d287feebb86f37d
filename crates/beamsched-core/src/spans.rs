use crate::model::{Bounds, Point, Segment, TextItem, Zone};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Half-width of the span built around a lone ID label when the drawing has
/// no boundary geometry at all.
pub const FALLBACK_HALF_WIDTH: f64 = 1000.0;

/// Vertical boundary positions closer than this many tolerances do not form
/// a span.
const MIN_SPAN_TOLERANCES: f64 = 10.0;

/// Where a span's extent came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanSource {
    Polygon,
    BoundaryLines,
    LineExtent,
    LabelFallback,
}

/// Horizontal extent and top/bottom dividing line of one beam.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min_x: f64,
    pub max_x: f64,
    /// Labels below this line are bottom bars, at or above it top bars.
    pub center_y: f64,
    /// Index of the owning boundary polygon, if the span came from one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub polygon: Option<usize>,
    pub source: SpanSource,
}

impl Span {
    pub fn length(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn is_valid(&self) -> bool {
        self.max_x > self.min_x
    }

    pub fn left_zone_max_x(&self) -> f64 {
        self.min_x + self.length() / 3.0
    }

    pub fn right_zone_min_x(&self) -> f64 {
        self.max_x - self.length() / 3.0
    }

    /// Zone of an X position. Both thresholds are inclusive, left first.
    pub fn zone_of(&self, x: f64) -> Zone {
        if x <= self.left_zone_max_x() {
            Zone::Left
        } else if x >= self.right_zone_min_x() {
            Zone::Right
        } else {
            Zone::Mid
        }
    }

    pub fn contains_x(&self, x: f64, tolerance: f64) -> bool {
        x >= self.min_x - tolerance && x <= self.max_x + tolerance
    }

    /// Whether `x` lies in the right third, up to the span edge.
    pub fn in_right_band(&self, x: f64) -> bool {
        x >= self.right_zone_min_x() && x <= self.max_x
    }

    /// Whether `x` lies in the left third, from the span edge.
    pub fn in_left_band(&self, x: f64) -> bool {
        x >= self.min_x && x <= self.left_zone_max_x()
    }
}

/// Geometry the resolver works from.
#[derive(Debug, Clone, Copy)]
pub struct SpanInputs<'a> {
    pub polygons: &'a [Bounds],
    pub lines: &'a [Segment],
    /// Extra lines folded into the extent fallback only.
    pub aux_lines: &'a [Segment],
    pub rebar_labels: &'a [TextItem],
    pub id_labels: &'a [TextItem],
    pub tolerance: f64,
}

/// Resolve every beam span in a multi-beam drawing, ordered left to right.
///
/// Tried in order: one span per boundary polygon; one span per adjacent pair
/// of vertical boundary lines; a single span over the extent of all lines; a
/// single span padded around the first ID label. Always returns at least one
/// span.
pub fn resolve_spans(inputs: &SpanInputs<'_>) -> Vec<Span> {
    let mut spans = polygon_spans(inputs);
    if spans.is_empty() {
        spans = line_pair_spans(inputs);
    }
    if spans.is_empty() {
        spans.push(fallback_span(inputs));
    }
    spans.sort_by(|a, b| a.min_x.total_cmp(&b.min_x));
    spans
}

/// Resolve the one span of a single-beam drawing.
///
/// Polygons are merged into one extent; otherwise the extent of boundary and
/// auxiliary lines is used, then the ID label fallback.
pub fn resolve_single_span(inputs: &SpanInputs<'_>) -> Span {
    let merged = inputs
        .polygons
        .iter()
        .filter(|b| b.width() > inputs.tolerance)
        .fold(None, |acc: Option<Bounds>, b| {
            Some(acc.map_or(*b, |a| a.union(b)))
        });

    match merged {
        Some(bounds) => {
            log::debug!("single span from {} polygon(s)", inputs.polygons.len());
            Span {
                min_x: bounds.min.x,
                max_x: bounds.max.x,
                center_y: bounds.center().y,
                polygon: (inputs.polygons.len() == 1).then_some(0),
                source: SpanSource::Polygon,
            }
        }
        None => fallback_span(inputs),
    }
}

fn polygon_spans(inputs: &SpanInputs<'_>) -> Vec<Span> {
    let spans: Vec<Span> = inputs
        .polygons
        .iter()
        .enumerate()
        .filter(|(_, b)| b.width() > inputs.tolerance)
        .map(|(i, b)| Span {
            min_x: b.min.x,
            max_x: b.max.x,
            center_y: b.center().y,
            polygon: Some(i),
            source: SpanSource::Polygon,
        })
        .collect();

    if !spans.is_empty() {
        log::debug!("resolved {} span(s) from boundary polygons", spans.len());
    }
    spans
}

fn line_pair_spans(inputs: &SpanInputs<'_>) -> Vec<Span> {
    let tol = inputs.tolerance;
    let xs = vertical_positions(inputs.lines, tol);
    if xs.len() < 2 {
        return Vec::new();
    }

    let horizontals: Vec<&Segment> = inputs
        .lines
        .iter()
        .filter(|s| s.is_horizontal(tol))
        .collect();

    let mut spans = Vec::new();
    for pair in xs.windows(2) {
        let (min_x, max_x) = (pair[0], pair[1]);
        if max_x - min_x < MIN_SPAN_TOLERANCES * tol {
            log::debug!("skipping sliver between x={min_x} and x={max_x}");
            continue;
        }
        let center_y = line_center_y(min_x, max_x, &horizontals, tol)
            .or_else(|| median_label_y(min_x, max_x, inputs.rebar_labels))
            .unwrap_or(0.0);
        spans.push(Span {
            min_x,
            max_x,
            center_y,
            polygon: None,
            source: SpanSource::BoundaryLines,
        });
    }

    log::debug!(
        "resolved {} span(s) from {} vertical boundary position(s)",
        spans.len(),
        xs.len()
    );
    spans
}

/// Distinct X positions of vertical lines, sorted. Positions equal after
/// rounding to three decimals are averaged into one.
fn vertical_positions(lines: &[Segment], tol: f64) -> Vec<f64> {
    let mut groups: BTreeMap<i64, (f64, usize)> = BTreeMap::new();
    for seg in lines.iter().filter(|s| s.is_vertical(tol)) {
        let x = (seg.start.x + seg.end.x) / 2.0;
        let key = (x * 1000.0).round() as i64;
        let entry = groups.entry(key).or_insert((0.0, 0));
        entry.0 += x;
        entry.1 += 1;
    }
    groups
        .values()
        .map(|(sum, count)| sum / *count as f64)
        .collect()
}

/// Midpoint of the Y extent of horizontal lines overlapping the span. Needs
/// at least two such lines.
fn line_center_y(min_x: f64, max_x: f64, horizontals: &[&Segment], tol: f64) -> Option<f64> {
    let overlapping: Vec<&&Segment> = horizontals
        .iter()
        .filter(|h| h.max_x().min(max_x) - h.min_x().max(min_x) > tol)
        .collect();
    if overlapping.len() < 2 {
        return None;
    }
    let low = overlapping.iter().map(|h| h.min_y()).fold(f64::INFINITY, f64::min);
    let high = overlapping
        .iter()
        .map(|h| h.max_y())
        .fold(f64::NEG_INFINITY, f64::max);
    Some((low + high) / 2.0)
}

fn median_label_y(min_x: f64, max_x: f64, labels: &[TextItem]) -> Option<f64> {
    let mut ys: Vec<f64> = labels
        .iter()
        .map(TextItem::center)
        .filter(|c| c.x >= min_x && c.x <= max_x)
        .map(|c| c.y)
        .collect();
    if ys.is_empty() {
        return None;
    }
    ys.sort_by(f64::total_cmp);
    let mid = ys.len() / 2;
    if ys.len() % 2 == 0 {
        Some((ys[mid - 1] + ys[mid]) / 2.0)
    } else {
        Some(ys[mid])
    }
}

fn fallback_span(inputs: &SpanInputs<'_>) -> Span {
    let extent = Bounds::enclosing(
        inputs
            .lines
            .iter()
            .chain(inputs.aux_lines)
            .flat_map(|s| [s.start, s.end]),
    );

    if let Some(bounds) = extent {
        log::debug!("span from extent of all lines");
        return Span {
            min_x: bounds.min.x,
            max_x: bounds.max.x,
            center_y: bounds.center().y,
            polygon: None,
            source: SpanSource::LineExtent,
        };
    }

    let anchor = inputs
        .id_labels
        .first()
        .map(TextItem::center)
        .unwrap_or_default();
    log::debug!(
        "no boundary geometry; padding {} around ({}, {})",
        FALLBACK_HALF_WIDTH,
        anchor.x,
        anchor.y
    );
    label_span(anchor)
}

fn label_span(anchor: Point) -> Span {
    Span {
        min_x: anchor.x - FALLBACK_HALF_WIDTH,
        max_x: anchor.x + FALLBACK_HALF_WIDTH,
        center_y: anchor.y,
        polygon: None,
        source: SpanSource::LabelFallback,
    }
}
