//! All-Star quest — Sleep pulse-sync challenge.
//!
//! Rings expand from the centre at a steady cadence; tapping while a ring
//! crosses the sweet-spot radius builds recovery, tapping at any other time
//! costs it.

pub mod application;
pub mod domain;
