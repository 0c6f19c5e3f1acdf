//! Application services layer.

pub mod error;
pub mod render;
pub mod repos;
pub mod session;
pub mod templates;
