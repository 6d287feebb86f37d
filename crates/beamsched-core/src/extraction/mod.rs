pub mod collect;
pub mod snapshot;

use crate::error::BeamError;
use crate::model::Primitive;

pub use collect::{collect, Collected};

/// Trait for drawing snapshot backends.
pub trait PrimitiveSource: Send + Sync {
    /// Decode the raw snapshot bytes into a flat list of primitives.
    fn read_primitives(&self, bytes: &[u8]) -> Result<Vec<Primitive>, BeamError>;

    /// Name of this backend (for diagnostics).
    fn backend_name(&self) -> &str;
}
