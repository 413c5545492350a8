//! Error types for property loading, typed parsing and value encryption.
//!
//! Responsibilities:
//! - Define error variants for every fallible operation in the crate.
//! - Provide conversion from lower-level errors (I/O, base64).
//!
//! Does NOT handle:
//! - Malformed escapes in property text (resolved to U+FFFD, never an error).
//! - Unresolved references during expansion (left in place, never an error).
//!
//! Invariants:
//! - Typed-accessor errors carry the key, the raw value and the reason.
//! - Decryption errors never include the password.

use thiserror::Error;

/// Errors that can occur while reading, writing or interpreting properties.
#[derive(Error, Debug)]
pub enum PropsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read property file at {path}")]
    File {
        path: std::path::PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A property value could not be parsed into the requested type.
    ///
    /// The caller's default stays authoritative: typed accessors return this
    /// instead of the default, and callers recover it with `unwrap_or(default)`.
    #[error("invalid {kind} value {key}={value}: {reason}")]
    InvalidValue {
        kind: &'static str,
        key: String,
        value: String,
        reason: String,
    },

    #[error("missing algorithm")]
    MissingAlgorithm,

    #[error("unknown algorithm {0}")]
    UnknownAlgorithm(String),

    #[error("Invalid key size: expected 16, 24 or 32 bytes, got {0}")]
    InvalidKeySize(usize),

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Decryption failed: {0}")]
    Decryption(String),

    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
}

impl PropsError {
    pub(crate) fn invalid_value(
        kind: &'static str,
        key: &str,
        value: &str,
        reason: impl std::fmt::Display,
    ) -> Self {
        PropsError::InvalidValue {
            kind,
            key: key.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PropsError>;
