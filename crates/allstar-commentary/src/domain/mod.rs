pub mod banner;
pub mod commentary;
pub mod fallback;
