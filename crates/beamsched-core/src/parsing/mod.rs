pub mod beam_id;
pub mod callouts;
pub mod values;

pub use beam_id::{parse_beam_id, BeamId};
pub use callouts::{bar_kind, merge_texts, parse_stirrup, BarKind, Stirrup};
