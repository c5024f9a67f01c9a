//! All-Star quest — Gym rhythm-sync challenge.
//!
//! The player holds input to lift a weight against gravity and keep it inside
//! an oscillating target band. Time in the band builds progress; time outside
//! drains it.

pub mod application;
pub mod domain;
