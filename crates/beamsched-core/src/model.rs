use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding extent of a primitive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    pub fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Smallest bounds enclosing every point. None for an empty iterator.
    pub fn enclosing<I: IntoIterator<Item = Point>>(points: I) -> Option<Bounds> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Bounds::new(first, first);
        for p in iter {
            bounds.min.x = bounds.min.x.min(p.x);
            bounds.min.y = bounds.min.y.min(p.y);
            bounds.max.x = bounds.max.x.max(p.x);
            bounds.max.y = bounds.max.y.max(p.y);
        }
        Some(bounds)
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        Bounds {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// Midpoint of the extent, used as the classification position.
    pub fn center(&self) -> Point {
        Point::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }
}

/// A geometric item read from the drawing, tagged with its layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Label {
        layer: String,
        text: String,
        bounds: Bounds,
    },
    Line {
        layer: String,
        start: Point,
        end: Point,
    },
    Polyline {
        layer: String,
        vertices: Vec<Point>,
        #[serde(default)]
        closed: bool,
    },
    Polygon {
        layer: String,
        vertices: Vec<Point>,
    },
    Dimension {
        layer: String,
        text_anchor: Point,
        /// Measured length in millimeters.
        measurement: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        bounds: Option<Bounds>,
    },
    /// Any kind this crate does not read (hatches, circles, blocks).
    #[serde(other)]
    Other,
}

impl Primitive {
    pub fn layer(&self) -> &str {
        match self {
            Primitive::Label { layer, .. }
            | Primitive::Line { layer, .. }
            | Primitive::Polyline { layer, .. }
            | Primitive::Polygon { layer, .. }
            | Primitive::Dimension { layer, .. } => layer,
            Primitive::Other => "",
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Primitive::Label { .. } => Category::Label,
            Primitive::Line { .. } => Category::Line,
            Primitive::Polyline { .. } => Category::Polyline,
            Primitive::Polygon { .. } => Category::Polygon,
            Primitive::Dimension { .. } => Category::Dimension,
            Primitive::Other => Category::Other,
        }
    }

    pub fn bounds(&self) -> Option<Bounds> {
        match self {
            Primitive::Label { bounds, .. } => Some(*bounds),
            Primitive::Line { start, end, .. } => Bounds::enclosing([*start, *end]),
            Primitive::Polyline { vertices, .. } | Primitive::Polygon { vertices, .. } => {
                Bounds::enclosing(vertices.iter().copied())
            }
            Primitive::Dimension {
                bounds,
                text_anchor,
                ..
            } => bounds.or_else(|| Bounds::enclosing([*text_anchor])),
            Primitive::Other => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Label,
    Line,
    Polyline,
    Polygon,
    Dimension,
    Other,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Label => write!(f, "label"),
            Category::Line => write!(f, "line"),
            Category::Polyline => write!(f, "polyline"),
            Category::Polygon => write!(f, "polygon"),
            Category::Dimension => write!(f, "dimension"),
            Category::Other => write!(f, "other"),
        }
    }
}

/// A text label with its visual center precomputed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    pub text: String,
    pub bounds: Bounds,
}

impl TextItem {
    pub fn new(text: impl Into<String>, bounds: Bounds) -> Self {
        Self {
            text: text.into(),
            bounds,
        }
    }

    pub fn center(&self) -> Point {
        self.bounds.center()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn min_x(&self) -> f64 {
        self.start.x.min(self.end.x)
    }

    pub fn max_x(&self) -> f64 {
        self.start.x.max(self.end.x)
    }

    pub fn min_y(&self) -> f64 {
        self.start.y.min(self.end.y)
    }

    pub fn max_y(&self) -> f64 {
        self.start.y.max(self.end.y)
    }

    pub fn is_vertical(&self, tolerance: f64) -> bool {
        (self.end.x - self.start.x).abs() <= tolerance
            && (self.end.y - self.start.y).abs() > tolerance
    }

    pub fn is_horizontal(&self, tolerance: f64) -> bool {
        (self.end.y - self.start.y).abs() <= tolerance
            && (self.end.x - self.start.x).abs() > tolerance
    }
}

/// A dimension mark: measured length anchored at its text position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DimensionMark {
    pub text_anchor: Point,
    pub measurement: f64,
}

/// One of the three thirds of a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Left,
    Mid,
    Right,
}

impl Zone {
    pub const ALL: [Zone; 3] = [Zone::Left, Zone::Mid, Zone::Right];
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Left => write!(f, "left"),
            Zone::Mid => write!(f, "mid"),
            Zone::Right => write!(f, "right"),
        }
    }
}

/// A value kept per zone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ZoneMap<T> {
    pub left: T,
    pub mid: T,
    pub right: T,
}

impl<T> ZoneMap<T> {
    pub fn get(&self, zone: Zone) -> &T {
        match zone {
            Zone::Left => &self.left,
            Zone::Mid => &self.mid,
            Zone::Right => &self.right,
        }
    }

    pub fn get_mut(&mut self, zone: Zone) -> &mut T {
        match zone {
            Zone::Left => &mut self.left,
            Zone::Mid => &mut self.mid,
            Zone::Right => &mut self.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_center() {
        let b = Bounds::new(Point::new(0.0, 10.0), Point::new(100.0, 30.0));
        assert_eq!(b.center(), Point::new(50.0, 20.0));
    }

    #[test]
    fn test_enclosing_empty_is_none() {
        assert!(Bounds::enclosing(std::iter::empty::<Point>()).is_none());
    }

    #[test]
    fn test_line_bounds_unordered_endpoints() {
        let line = Primitive::Line {
            layer: "B_BOX".into(),
            start: Point::new(500.0, 0.0),
            end: Point::new(-500.0, 20.0),
        };
        let b = line.bounds().unwrap();
        assert_eq!(b.min, Point::new(-500.0, 0.0));
        assert_eq!(b.max, Point::new(500.0, 20.0));
    }

    #[test]
    fn test_segment_orientation() {
        let v = Segment::new(Point::new(10.0, 0.0), Point::new(10.0005, 600.0));
        assert!(v.is_vertical(1e-3));
        assert!(!v.is_horizontal(1e-3));

        let h = Segment::new(Point::new(0.0, 300.0), Point::new(9000.0, 300.0));
        assert!(h.is_horizontal(1e-3));
        assert!(!h.is_vertical(1e-3));

        let dot = Segment::new(Point::new(1.0, 1.0), Point::new(1.0, 1.0));
        assert!(!dot.is_vertical(1e-3));
        assert!(!dot.is_horizontal(1e-3));
    }

    #[test]
    fn test_primitive_tagged_json() {
        let json = r#"{"kind":"label","layer":"B_NO","text":"B1 300x600",
            "bounds":{"min":{"x":0,"y":0},"max":{"x":200,"y":50}}}"#;
        let p: Primitive = serde_json::from_str(json).unwrap();
        assert_eq!(p.category(), Category::Label);
        assert_eq!(p.layer(), "B_NO");
    }

    #[test]
    fn test_unrecognized_kind_is_other() {
        let json = r#"{"kind":"circle","layer":"B_BOX","radius":5}"#;
        let p: Primitive = serde_json::from_str(json).unwrap();
        assert_eq!(p, Primitive::Other);
        assert_eq!(p.category(), Category::Other);
        assert!(p.bounds().is_none());
    }
}
