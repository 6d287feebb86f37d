//! Output schema of the beam schedule and the sink interface renderers
//! implement.

use crate::classify::BeamRecord;
use crate::error::BeamError;
use crate::parsing::values::mm_to_m;

/// One output column: its header, its unit and how a record fills it.
#[derive(Clone, Copy)]
pub struct Column {
    pub name: &'static str,
    pub unit: Option<&'static str>,
    pub format: fn(&BeamRecord) -> String,
}

impl std::fmt::Debug for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Column")
            .field("name", &self.name)
            .field("unit", &self.unit)
            .finish()
    }
}

impl Column {
    pub fn value(&self, record: &BeamRecord) -> String {
        (self.format)(record)
    }
}

/// Number of shear legs reported for every beam.
pub const SHEAR_LEGS: &str = "2";

const fn text(name: &'static str, format: fn(&BeamRecord) -> String) -> Column {
    Column {
        name,
        unit: None,
        format,
    }
}

fn empty(_: &BeamRecord) -> String {
    String::new()
}

const fn blank(name: &'static str) -> Column {
    text(name, empty)
}

/// The schedule columns, in output order.
pub static COLUMNS: [Column; 24] = [
    text("BeamId", |r| r.mark.clone()),
    Column {
        name: "Width",
        unit: Some("m"),
        format: |r| format!("{:.2}", mm_to_m(r.width, 2)),
    },
    Column {
        name: "Depth",
        unit: Some("m"),
        format: |r| format!("{:.2}", mm_to_m(r.depth, 2)),
    },
    text("Level", |r| r.level.clone()),
    text("Left_bottom", |r| r.left_bottom.clone()),
    Column {
        name: "BottomLeftAtDist",
        unit: Some("m"),
        format: |r| r.left_at_dist.clone(),
    },
    text("Mid_bottom", |r| r.mid_bottom.clone()),
    blank("CurtailAtDist"),
    text("Right_bottom", |r| r.right_bottom.clone()),
    blank("BottomRightAtDist"),
    blank("BentUp"),
    text("Left_top", |r| r.left_top.clone()),
    Column {
        name: "LeftAtDist",
        unit: Some("m"),
        format: |r| r.left_at_dist.clone(),
    },
    text("Mid_top", |r| r.mid_top.clone()),
    text("Right_top", |r| r.right_top.clone()),
    Column {
        name: "RightAtDist",
        unit: Some("m"),
        format: |r| r.right_at_dist.clone(),
    },
    blank("SFR"),
    text("ShearLegs", |_| SHEAR_LEGS.to_string()),
    Column {
        name: "LeftStirrupDia",
        unit: Some("mm"),
        format: |r| r.left_stirrup_dia.clone(),
    },
    Column {
        name: "LeftStirrupSpace",
        unit: Some("mm"),
        format: |r| r.left_stirrup_space.clone(),
    },
    Column {
        name: "MidStirrupDia",
        unit: Some("mm"),
        format: |r| r.mid_stirrup_dia.clone(),
    },
    Column {
        name: "MidStirrupSpace",
        unit: Some("mm"),
        format: |r| r.mid_stirrup_space.clone(),
    },
    Column {
        name: "RightStirrupDia",
        unit: Some("mm"),
        format: |r| r.right_stirrup_dia.clone(),
    },
    Column {
        name: "RightStirrupSpace",
        unit: Some("mm"),
        format: |r| r.right_stirrup_space.clone(),
    },
];

/// Look up a column by name (case-insensitive).
pub fn column(name: &str) -> Option<&'static Column> {
    COLUMNS.iter().find(|c| c.name.eq_ignore_ascii_case(name))
}

/// A record's cells in column order, keyed by column name.
pub fn row(record: &BeamRecord) -> Vec<(&'static str, String)> {
    COLUMNS.iter().map(|c| (c.name, c.value(record))).collect()
}

/// Renders finished records. Implemented by the output layer.
pub trait RecordSink {
    fn emit(&mut self, records: &[BeamRecord], columns: &[Column]) -> Result<(), BeamError>;
}

/// Hand the finished records and the schedule schema to a sink.
pub fn emit_records(records: &[BeamRecord], sink: &mut dyn RecordSink) -> Result<(), BeamError> {
    sink.emit(records, &COLUMNS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::zones::ZoneAssignment;
    use crate::parsing::parse_beam_id;
    use crate::spans::{Span, SpanSource};

    fn record() -> BeamRecord {
        let span = Span {
            min_x: 0.0,
            max_x: 9000.0,
            center_y: 300.0,
            polygon: None,
            source: SpanSource::Polygon,
        };
        let mut zones = ZoneAssignment::default();
        zones.bottom.left.push("2T20(T)".into());
        zones.dimensions.left = Some("1.5".into());
        BeamRecord::build(&parse_beam_id("B1 300x625"), "+3.00", span, &zones)
    }

    #[test]
    fn test_column_order() {
        let names: Vec<&str> = COLUMNS.iter().map(|c| c.name).collect();
        assert_eq!(names.len(), 24);
        assert_eq!(names[0], "BeamId");
        assert_eq!(names[5], "BottomLeftAtDist");
        assert_eq!(names[11], "Left_top");
        assert_eq!(names[17], "ShearLegs");
        assert_eq!(names[23], "RightStirrupSpace");
    }

    #[test]
    fn test_unit_conversion() {
        let r = record();
        assert_eq!(column("width").unwrap().value(&r), "0.30");
        assert_eq!(column("Depth").unwrap().value(&r), "0.63");
    }

    #[test]
    fn test_row_values() {
        let cells = row(&record());
        let get = |name: &str| {
            cells
                .iter()
                .find(|(n, _)| *n == name)
                .map(|(_, v)| v.as_str())
                .unwrap()
        };
        assert_eq!(get("BeamId"), "B1");
        assert_eq!(get("Level"), "+3.00");
        assert_eq!(get("Left_bottom"), "2T20(T)");
        assert_eq!(get("LeftAtDist"), "1.5");
        assert_eq!(get("BottomLeftAtDist"), "1.5");
        assert_eq!(get("BottomRightAtDist"), "");
        assert_eq!(get("ShearLegs"), "2");
        assert_eq!(get("SFR"), "");
    }

    struct Capture(Vec<Vec<String>>);

    impl RecordSink for Capture {
        fn emit(&mut self, records: &[BeamRecord], columns: &[Column]) -> Result<(), BeamError> {
            self.0 = records
                .iter()
                .map(|r| columns.iter().map(|c| c.value(r)).collect())
                .collect();
            Ok(())
        }
    }

    #[test]
    fn test_emit_records_uses_schema() {
        let mut sink = Capture(Vec::new());
        emit_records(&[record()], &mut sink).unwrap();
        assert_eq!(sink.0.len(), 1);
        assert_eq!(sink.0[0].len(), COLUMNS.len());
        assert_eq!(sink.0[0][1], "0.30");
    }
}
