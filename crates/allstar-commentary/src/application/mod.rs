pub mod offline;
pub mod service;
