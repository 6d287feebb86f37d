pub mod layers;
pub mod schedule;
