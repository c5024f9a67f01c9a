//! Application layer for stage orchestration.

pub mod orchestrator;
