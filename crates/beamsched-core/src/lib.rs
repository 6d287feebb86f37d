pub mod classify;
pub mod emit;
pub mod error;
pub mod extraction;
pub mod layers;
pub mod model;
pub mod parsing;
pub mod spans;

use classify::{ScheduleResult, Workflow};
use error::BeamError;
use extraction::PrimitiveSource;
use layers::schema::LayerMap;
use model::Primitive;

/// Main API entry point: read a drawing snapshot and build its beam schedule.
///
/// The snapshot bytes are decoded by `source`, partitioned by `layers`, and
/// run through the requested workflow.
pub fn schedule_snapshot(
    snapshot: &[u8],
    source: &dyn PrimitiveSource,
    layers: &LayerMap,
    workflow: Workflow,
) -> Result<ScheduleResult, BeamError> {
    let primitives = source.read_primitives(snapshot)?;
    log::info!(
        "{} primitive(s) from {}",
        primitives.len(),
        source.backend_name()
    );
    schedule_primitives(&primitives, layers, workflow)
}

/// Build the beam schedule from primitives already in memory.
pub fn schedule_primitives(
    primitives: &[Primitive],
    layers: &LayerMap,
    workflow: Workflow,
) -> Result<ScheduleResult, BeamError> {
    let collected = extraction::collect(primitives, layers);
    classify::schedule(&collected, layers, workflow)
}
