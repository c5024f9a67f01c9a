//! Domain layer for stage orchestration.

pub mod transition;
pub mod tuning;
