use beamsched_core::classify::{BeamRecord, ScheduleResult};
use beamsched_core::emit::{emit_records, Column, RecordSink};
use beamsched_core::error::BeamError;
use serde_json::{json, Map, Value};

/// Collects records as JSON objects keyed by column name.
#[derive(Default)]
pub struct JsonSink {
    rows: Vec<Value>,
}

impl RecordSink for JsonSink {
    fn emit(&mut self, records: &[BeamRecord], columns: &[Column]) -> Result<(), BeamError> {
        self.rows = records
            .iter()
            .map(|r| {
                let row: Map<String, Value> = columns
                    .iter()
                    .map(|c| (c.name.to_string(), Value::String(c.value(r))))
                    .collect();
                Value::Object(row)
            })
            .collect();
        Ok(())
    }
}

pub fn render(result: &ScheduleResult) -> Result<String, BeamError> {
    let mut sink = JsonSink::default();
    emit_records(&result.records, &mut sink)?;
    let doc = json!({
        "workflow": result.workflow,
        "beams": sink.rows,
        "skipped": result.skipped,
    });
    Ok(serde_json::to_string_pretty(&doc)?)
}

pub fn print(result: &ScheduleResult) -> Result<(), BeamError> {
    println!("{}", render(result)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use beamsched_core::classify::Workflow;
    use beamsched_core::layers::schema::LayerMap;
    use beamsched_core::model::{Bounds, Point, Primitive};

    #[test]
    fn test_rows_keyed_by_column() {
        let prims = vec![Primitive::Label {
            layer: "B_NO".into(),
            text: "B2 250x500".into(),
            bounds: Bounds::new(Point::new(0.0, 0.0), Point::new(200.0, 50.0)),
        }];
        let result =
            beamsched_core::schedule_primitives(&prims, &LayerMap::default(), Workflow::Single)
                .unwrap();

        let doc: Value = serde_json::from_str(&render(&result).unwrap()).unwrap();
        assert_eq!(doc["workflow"], "single");
        let beam = &doc["beams"][0];
        assert_eq!(beam["BeamId"], "B2");
        assert_eq!(beam["Width"], "0.25");
        assert_eq!(beam["ShearLegs"], "2");
        assert_eq!(beam["Mid_top"], "");
        assert_eq!(doc["skipped"], json!([]));
    }
}
