use beamsched_core::classify::{BeamRecord, SkippedItem};
use beamsched_core::emit::{Column, RecordSink};
use beamsched_core::error::BeamError;
use std::io::Write;

/// Plain-text schedule table, one beam per row.
pub struct TableSink<W: Write> {
    out: W,
}

impl<W: Write> TableSink<W> {
    pub fn new(out: W) -> Self {
        TableSink { out }
    }
}

fn header(column: &Column) -> String {
    match column.unit {
        Some(unit) => format!("{} ({})", column.name, unit),
        None => column.name.to_string(),
    }
}

impl<W: Write> RecordSink for TableSink<W> {
    fn emit(&mut self, records: &[BeamRecord], columns: &[Column]) -> Result<(), BeamError> {
        if records.is_empty() {
            writeln!(self.out, "No beams found.")?;
            return Ok(());
        }

        let headers: Vec<String> = columns.iter().map(header).collect();
        let rows: Vec<Vec<String>> = records
            .iter()
            .map(|r| columns.iter().map(|c| c.value(r)).collect())
            .collect();

        let widths: Vec<usize> = headers
            .iter()
            .enumerate()
            .map(|(i, h)| {
                rows.iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(h.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        let line = |cells: &[String]| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{cell:<width$}"))
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        };

        writeln!(self.out, "{}", line(headers.as_slice()))?;
        let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        writeln!(self.out, "{}", "-".repeat(total))?;
        for row in &rows {
            writeln!(self.out, "{}", line(row.as_slice()))?;
        }
        self.out.flush()?;
        Ok(())
    }
}

/// Report annotations that did not make it into the schedule.
pub fn print_skipped(skipped: &[SkippedItem]) {
    if skipped.is_empty() {
        return;
    }
    println!("\n{} item(s) skipped:", skipped.len());
    for item in skipped {
        println!("  [{}] '{}': {}", item.layer, item.text, item.reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use beamsched_core::classify::Workflow;
    use beamsched_core::emit::{emit_records, COLUMNS};
    use beamsched_core::layers::schema::LayerMap;
    use beamsched_core::model::{Bounds, Point, Primitive};

    fn records() -> Vec<BeamRecord> {
        let prims = vec![
            Primitive::Label {
                layer: "B_NO".into(),
                text: "B1 300x600".into(),
                bounds: Bounds::new(Point::new(4400.0, 900.0), Point::new(4600.0, 950.0)),
            },
            Primitive::Label {
                layer: "B_TEXT".into(),
                text: "2T20(T)".into(),
                bounds: Bounds::new(Point::new(4400.0, 80.0), Point::new(4600.0, 120.0)),
            },
            Primitive::Polygon {
                layer: "B_BOX".into(),
                vertices: vec![
                    Point::new(0.0, 0.0),
                    Point::new(9000.0, 0.0),
                    Point::new(9000.0, 600.0),
                    Point::new(0.0, 600.0),
                ],
            },
        ];
        beamsched_core::schedule_primitives(&prims, &LayerMap::default(), Workflow::Single)
            .unwrap()
            .records
    }

    fn render(records: &[BeamRecord]) -> String {
        let mut buf = Vec::new();
        emit_records(records, &mut TableSink::new(&mut buf)).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_header_carries_units() {
        let text = render(&records());
        let first = text.lines().next().unwrap();
        assert!(first.starts_with("BeamId  Width (m)  Depth (m)  Level"));
        assert!(first.ends_with("RightStirrupSpace (mm)"));
    }

    #[test]
    fn test_row_values_aligned() {
        let text = render(&records());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].chars().all(|c| c == '-'));
        let header = lines[0];
        let row = lines[2];
        assert_eq!(header.find("Width"), row.find("0.30"));
        assert!(row.contains("2T20(T)"));
    }

    #[test]
    fn test_empty_schedule() {
        let mut buf = Vec::new();
        TableSink::new(&mut buf).emit(&[], &COLUMNS).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "No beams found.\n");
    }
}
