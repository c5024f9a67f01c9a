//! All-Star quest — Football moving-target and keeper challenge.
//!
//! Three rounds of a target that orbits faster, wider and with a tighter hit
//! window each round, followed by a penalty against a bouncing goalkeeper.

pub mod application;
pub mod domain;
