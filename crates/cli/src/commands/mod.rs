//! CLI command implementations.

pub mod file;
pub mod value;
