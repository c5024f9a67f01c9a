//! All-Star quest — stage orchestration.
//!
//! Owns the current stage, runs the active challenge engine, advances through
//! the fixed stage order and dispatches commentary for every transition
//! without ever waiting on it.

pub mod application;
pub mod domain;
