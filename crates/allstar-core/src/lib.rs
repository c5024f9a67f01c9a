//! All-Star Core — shared simulation abstractions.
//!
//! This crate defines the traits and small value types that every challenge
//! engine and the stage orchestrator depend on: time, randomness, stages,
//! stage-relative input, and the commentary collaborator seam. It contains
//! no engine logic.

pub mod challenge;
pub mod clock;
pub mod commentary;
pub mod error;
pub mod geometry;
pub mod rng;
pub mod scheduler;
pub mod stage;
pub mod timing;
pub mod tuning;
