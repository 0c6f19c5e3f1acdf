//! Domain layer: the template document model.

pub mod document;
pub mod payload;
pub mod style;
