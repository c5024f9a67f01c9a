//! All-Star quest — headless runner.
//!
//! Wires the orchestrator to a frame source and an autopilot player so the
//! whole stage sequence can be played without a presentation layer.

pub mod autopilot;
pub mod config;
pub mod runner;
