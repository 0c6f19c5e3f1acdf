//! Infrastructure adapters and runtime bootstrap.

pub mod db;
pub mod error;
pub mod http;
pub mod layout;
pub mod memory;
pub mod telemetry;
