pub mod state;
pub mod tuning;
