use beamsched_core::classify::Workflow;
use beamsched_core::emit::emit_records;
use beamsched_core::error::BeamError;
use beamsched_core::extraction::snapshot::JsonSnapshot;
use beamsched_core::layers::builtin;
use std::path::PathBuf;

use crate::output;

pub fn run(
    workflow: Workflow,
    snapshot_file: PathBuf,
    layer_file: Option<PathBuf>,
    output_format: &str,
    output_file: Option<PathBuf>,
) -> Result<(), BeamError> {
    let layers = match layer_file {
        Some(path) => beamsched_core::layers::load_layer_map(&path)?,
        None => builtin::load_preset("default")?,
    };
    log::info!("using layer map '{}'", layers.name);

    let bytes = std::fs::read(&snapshot_file)?;
    let result =
        beamsched_core::schedule_snapshot(&bytes, &JsonSnapshot::new(), &layers, workflow)?;

    if let Some(path) = output_file {
        // Saved schedules are always JSON
        std::fs::write(&path, output::json::render(&result)?)?;
        eprintln!(
            "Tabulated {} beam(s), written to {}",
            result.records.len(),
            path.display()
        );
        if !result.skipped.is_empty() {
            eprintln!("  {} item(s) skipped", result.skipped.len());
        }
        return Ok(());
    }

    match output_format {
        "json" => output::json::print(&result)?,
        _ => {
            let mut sink = output::table::TableSink::new(std::io::stdout().lock());
            emit_records(&result.records, &mut sink)?;
            output::table::print_skipped(&result.skipped);
        }
    }

    Ok(())
}
