//! Java-compatible property files with layered, expandable configuration.
//!
//! This crate reads and writes the properties text format, resolves `${name}`
//! references between values, and layers property sources (command line,
//! environment, profile files) behind one lookup trait with typed accessors
//! and optional per-value encryption.

pub mod arguments;
pub mod combined;
pub mod configuration;
pub mod constants;
pub mod encryption;
pub mod environment;
mod error;
pub mod expander;
pub mod properties;
mod source;

pub use arguments::Arguments;
pub use combined::Combined;
pub use configuration::{ConfigLoader, Configuration};
pub use encryption::{Algorithm, decrypt, encrypt};
pub use environment::{Environment, normalize_env_name};
pub use error::{PropsError, Result};
pub use expander::Expander;
pub use properties::Properties;
pub use source::PropertySource;
