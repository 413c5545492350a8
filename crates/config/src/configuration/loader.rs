//! Convention-based configuration loader.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` that stacks property sources in
//!   priority order and wraps them in an `Expander`.
//! - Locate and parse `<prefix>.properties` and `<prefix>-<profile>.properties`.
//!
//! Does NOT handle:
//! - Typed parsing of values (see `Configuration`).
//!
//! Invariants / Assumptions:
//! - Arguments take precedence over the environment, which takes precedence
//!   over profile files (in the order given), which take precedence over the
//!   base file.
//! - A path that does not exist or is not a regular file is skipped; a file
//!   that exists but cannot be read fails the whole build.

use std::path::{Path, PathBuf};

use crate::arguments::Arguments;
use crate::combined::Combined;
use crate::constants::PROPERTIES_EXTENSION;
use crate::environment::Environment;
use crate::error::{PropsError, Result};
use crate::expander::Expander;
use crate::properties::Properties;

use super::Configuration;

/// Builder that assembles the conventional layered configuration.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    prefix: String,
    dir: PathBuf,
    profiles: Vec<String>,
    arguments: Option<Arguments>,
    environment: Option<Environment>,
    limit: usize,
}

impl ConfigLoader {
    /// Create a loader for files named after `prefix` in the current directory.
    ///
    /// Process arguments and the normalized environment are enabled by default.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            dir: PathBuf::from("."),
            profiles: Vec::new(),
            arguments: Some(Arguments::new()),
            environment: Some(Environment::normalized()),
            limit: 0,
        }
    }

    /// Directory holding the property files.
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    /// Add a profile. Earlier profiles take precedence over later ones.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profiles.push(profile.into());
        self
    }

    /// Add several profiles, highest priority first.
    pub fn with_profiles<I, P>(mut self, profiles: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        self.profiles.extend(profiles.into_iter().map(Into::into));
        self
    }

    /// Replace the command-line argument source.
    pub fn with_arguments(mut self, arguments: Arguments) -> Self {
        self.arguments = Some(arguments);
        self
    }

    /// Do not read command-line arguments.
    pub fn without_arguments(mut self) -> Self {
        self.arguments = None;
        self
    }

    /// Replace the environment source.
    pub fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = Some(environment);
        self
    }

    /// Do not read environment variables.
    pub fn without_environment(mut self) -> Self {
        self.environment = None;
        self
    }

    /// Limit the expander's rewrite rounds; 0 means unlimited.
    pub fn with_expansion_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Path of the file for `profile`, or of the base file when `None`.
    pub fn file_path(&self, profile: Option<&str>) -> PathBuf {
        let stem = match profile {
            Some(profile) => format!("{}-{}", self.prefix, profile),
            None => self.prefix.clone(),
        };
        self.dir.join(format!("{}.{}", stem, PROPERTIES_EXTENSION))
    }

    /// Build the configuration.
    ///
    /// # Errors
    ///
    /// Returns `PropsError::File` if an existing property file cannot be read.
    pub fn build(self) -> Result<Configuration> {
        let mut combined = Combined::new();

        if let Some(arguments) = self.arguments.clone() {
            combined.push(arguments);
        }
        if let Some(environment) = self.environment {
            combined.push(environment);
        }

        for profile in &self.profiles {
            let path = self.file_path(Some(profile));
            if let Some(props) = load_if_file(&path)? {
                combined.push(props);
            }
        }

        let base = self.file_path(None);
        if let Some(props) = load_if_file(&base)? {
            combined.push(props);
        }

        tracing::debug!(
            prefix = %self.prefix,
            sources = combined.len(),
            "configuration assembled"
        );

        let expander = Expander::new(combined).with_limit(self.limit);
        Ok(Configuration::new(expander))
    }
}

/// Reads `path` when it names a regular file.
fn load_if_file(path: &Path) -> Result<Option<Properties>> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => {}
        _ => {
            tracing::trace!(path = %path.display(), "no property file");
            return Ok(None);
        }
    }

    let text = std::fs::read_to_string(path).map_err(|source| PropsError::File {
        path: path.to_path_buf(),
        source,
    })?;
    let props: Properties = text.parse()?;
    tracing::debug!(path = %path.display(), entries = props.len(), "loaded property file");
    Ok(Some(props))
}
