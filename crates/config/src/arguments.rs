//! Property source backed by command-line arguments.
//!
//! Property arguments share a common prefix and use `key=value` form; every
//! other argument is ignored. With the prefix `--prop.`, the command
//!
//! ```text
//! cmd -a -1 -z --prop.1=a --prop.2=b --prop.3 --log=debug
//! ```
//!
//! has the properties `1=a` and `2=b`, and the names `1`, `2` and `3`.

use std::collections::HashSet;

use crate::constants::DEFAULT_ARGUMENT_PREFIX;
use crate::source::PropertySource;

/// Reads properties from command-line arguments.
#[derive(Debug, Clone)]
pub struct Arguments {
    prefix: String,
    args: Vec<String>,
}

impl Default for Arguments {
    fn default() -> Self {
        Self::new()
    }
}

impl Arguments {
    /// Read the current process arguments with the default `--` prefix.
    pub fn new() -> Self {
        Self::from_args(std::env::args())
    }

    /// Read the given arguments with the default `--` prefix.
    pub fn from_args<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            prefix: DEFAULT_ARGUMENT_PREFIX.to_string(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// Use a different common prefix. An empty prefix restores the default.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        self.prefix = if prefix.is_empty() {
            DEFAULT_ARGUMENT_PREFIX.to_string()
        } else {
            prefix
        };
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }
}

impl PropertySource for Arguments {
    fn get(&self, name: &str) -> Option<String> {
        self.args.iter().find_map(|arg| {
            arg.strip_prefix(self.prefix.as_str())
                .and_then(|rest| rest.strip_prefix(name))
                .and_then(|rest| rest.strip_prefix('='))
                .map(str::to_string)
        })
    }

    fn names(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        self.args
            .iter()
            .filter_map(|arg| arg.strip_prefix(self.prefix.as_str()))
            .map(|rest| rest.split_once('=').map_or(rest, |(name, _)| name))
            .filter(|name| seen.insert(*name))
            .map(str::to_string)
            .collect()
    }
}
