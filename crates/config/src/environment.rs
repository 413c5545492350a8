//! Property source backed by OS environment variables.
//!
//! Responsibilities:
//! - Look up property names as environment variables.
//! - Optionally normalize dotted property names to POSIX variable names.
//!
//! Invariants:
//! - Variables set to the empty string are present.
//! - Variables whose name or value is not valid Unicode are treated as absent.

use crate::source::PropertySource;

/// Reads properties from the process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct Environment {
    /// Convert requested names to POSIX-style variable names before lookup.
    ///
    /// Lowercase ASCII letters are uppercased, ASCII letters and digits are
    /// kept, and every other character becomes `_`. For example `foo.bar.baz`
    /// becomes `FOO_BAR_BAZ` and `$my-test#val_1` becomes `_MY_TEST_VAL_1`.
    pub normalize: bool,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an environment source that normalizes names before lookup.
    pub fn normalized() -> Self {
        Self { normalize: true }
    }
}

/// Converts a property name into a POSIX environment variable name.
pub fn normalize_env_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_uppercase()
            } else {
                '_'
            }
        })
        .collect()
}

impl PropertySource for Environment {
    fn get(&self, name: &str) -> Option<String> {
        let var = if self.normalize {
            normalize_env_name(name)
        } else {
            name.to_string()
        };
        if var.is_empty() || var.contains(['=', '\0']) {
            return None;
        }
        std::env::var_os(&var).and_then(|value| value.into_string().ok())
    }

    fn names(&self) -> Vec<String> {
        std::env::vars_os()
            .filter_map(|(name, _)| name.into_string().ok())
            .collect()
    }
}
