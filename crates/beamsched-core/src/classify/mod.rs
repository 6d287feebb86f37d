pub mod boundary;
pub mod engine;
pub mod outcome;
pub mod zones;

pub use engine::schedule;
pub use outcome::{BeamRecord, ScheduleResult, SkipReason, SkippedItem, Workflow};
