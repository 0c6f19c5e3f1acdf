//! Letterpress: compose email templates from ordered content blocks, keep a
//! saved history and export the result as static HTML.

pub mod application;
pub mod config;
pub mod domain;
pub mod infra;
