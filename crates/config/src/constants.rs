//! Centralized constants for the props workspace.
//!
//! Default tokens and tags shared between the library and the CLI, kept in
//! one place to avoid duplicating magic strings.

// =============================================================================
// Expansion
// =============================================================================

/// Default token that opens a property reference.
pub const DEFAULT_EXPANSION_PREFIX: &str = "${";

/// Default token that closes a property reference.
pub const DEFAULT_EXPANSION_SUFFIX: &str = "}";

/// Lengthening rewrite rounds allowed when no explicit limit is configured.
pub const MAX_GROWING_ROUNDS: usize = 256;

/// Largest value, in bytes, a rewrite round may produce.
pub const MAX_EXPANDED_LEN: usize = 1 << 20;

// =============================================================================
// Sources
// =============================================================================

/// Default prefix for property arguments on the command line.
pub const DEFAULT_ARGUMENT_PREFIX: &str = "--";

/// File extension used by the convention loader.
pub const PROPERTIES_EXTENSION: &str = "properties";

// =============================================================================
// Typed Accessors
// =============================================================================

/// Default `chrono` format used when parsing dates.
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Encryption
// =============================================================================

/// Tag for a value that is marked for encryption but still plaintext.
pub const ENCRYPT_NONE_TAG: &str = "[enc:0]";

/// Tag for a value encrypted with AES-GCM.
pub const ENCRYPT_AES_GCM_TAG: &str = "[enc:1]";

/// Nonce size in bytes for AES-GCM.
pub const AES_GCM_NONCE_LEN: usize = 12;

/// Accepted AES key sizes in bytes.
pub const AES_KEY_SIZES: [usize; 3] = [16, 24, 32];
