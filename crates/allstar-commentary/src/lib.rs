//! All-Star quest — stage-transition commentary.
//!
//! Requests a short motivational line from an external source on every stage
//! transition, falls back to a local pool when the source fails, and keeps
//! the banner showing only the newest answer.

pub mod application;
pub mod domain;
