//! Application configuration on top of property sources.
//!
//! Responsibilities:
//! - Provide typed accessors (int, float, bool, duration, date, byte size,
//!   metric size, encrypted values) over any `PropertySource`.
//! - Assemble the conventional layered source: arguments, environment, profile
//!   files, base file (see `loader.rs`).
//!
//! Does NOT handle:
//! - Text parsing of property files (see `properties`).
//! - Reference expansion (see `expander.rs`).
//!
//! Invariants:
//! - An absent property yields `Ok(default)`.
//! - A present property that fails to parse yields `Err(PropsError::InvalidValue)`
//!   naming the key, the raw value and the reason; the default passed in is
//!   the value to use in that case, recovered with `unwrap_or(default)`.

mod loader;
mod units;

use std::fmt;
use std::time::Duration;

use chrono::NaiveDate;

use crate::constants::DEFAULT_DATE_FORMAT;
use crate::encryption;
use crate::error::{PropsError, Result};
use crate::source::PropertySource;

pub use loader::ConfigLoader;

/// An application's configuration parameters, read from a property source.
pub struct Configuration {
    props: Box<dyn PropertySource + Send + Sync>,
    date_format: String,
    strict_bool: bool,
}

impl Configuration {
    /// Create a configuration reading from `props`.
    pub fn new(props: impl PropertySource + Send + Sync + 'static) -> Self {
        Self {
            props: Box::new(props),
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            strict_bool: false,
        }
    }

    /// Build a configuration by convention.
    ///
    /// Lookups go through an expander over, in priority order:
    /// 1. command-line arguments (`--name=value`),
    /// 2. environment variables (names normalized, `app.port` -> `APP_PORT`),
    /// 3. `<dir>/<prefix>-<profile>.properties` for each profile, in order,
    /// 4. `<dir>/<prefix>.properties`.
    ///
    /// Missing files are skipped.
    ///
    /// # Errors
    ///
    /// Returns `PropsError::File` if an existing file cannot be read.
    pub fn from_convention<I, P>(
        dir: impl Into<std::path::PathBuf>,
        prefix: &str,
        profiles: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<String>,
    {
        ConfigLoader::new(prefix)
            .with_dir(dir)
            .with_profiles(profiles)
            .build()
    }

    /// Set the `chrono` format used by [`Configuration::parse_date`].
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    /// Accept only `true` and `false` in [`Configuration::parse_bool`].
    pub fn with_strict_bool(mut self, strict: bool) -> Self {
        self.strict_bool = strict;
        self
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    pub fn strict_bool(&self) -> bool {
        self.strict_bool
    }

    fn parse_with<T, E: fmt::Display>(
        &self,
        key: &str,
        default: T,
        kind: &'static str,
        parse: impl FnOnce(&str) -> std::result::Result<T, E>,
    ) -> Result<T> {
        match self.props.get(key) {
            None => Ok(default),
            Some(value) => {
                parse(&value).map_err(|reason| PropsError::invalid_value(kind, key, &value, reason))
            }
        }
    }

    /// Parse a property as a base-10 integer.
    pub fn parse_int(&self, key: &str, default: i64) -> Result<i64> {
        self.parse_with(key, default, "int", |v| v.parse::<i64>())
    }

    /// Parse a property as a floating point number.
    pub fn parse_float(&self, key: &str, default: f64) -> Result<f64> {
        self.parse_with(key, default, "float", |v| v.parse::<f64>())
    }

    /// Parse a property as a boolean.
    ///
    /// In strict mode only `true` and `false` are accepted. Otherwise, ignoring
    /// case, `true t yes y 1 on` are true and `false f no n 0 off` are false.
    pub fn parse_bool(&self, key: &str, default: bool) -> Result<bool> {
        let strict = self.strict_bool;
        self.parse_with(key, default, "bool", |v| {
            if strict {
                return match v {
                    "true" => Ok(true),
                    "false" => Ok(false),
                    _ => Err("expected true or false"),
                };
            }
            match v.to_ascii_lowercase().as_str() {
                "true" | "t" | "yes" | "y" | "1" | "on" => Ok(true),
                "false" | "f" | "no" | "n" | "0" | "off" => Ok(false),
                _ => Err("not a boolean"),
            }
        })
    }

    /// Parse a property as a duration such as `300ms`, `1.5h` or `2h45m`.
    pub fn parse_duration(&self, key: &str, default: Duration) -> Result<Duration> {
        self.parse_with(key, default, "duration", units::parse_duration)
    }

    /// Parse a property as a date using the configured date format.
    pub fn parse_date(&self, key: &str, default: NaiveDate) -> Result<NaiveDate> {
        let format = self.date_format.as_str();
        self.parse_with(key, default, "date", |v| NaiveDate::parse_from_str(v, format))
    }

    /// Parse a property as a byte count.
    ///
    /// The format is `<num> <suffix>`, where the space and suffix are optional
    /// and `<num>` may be fractional. Suffixes: `k M G T P E` (powers of 1000)
    /// and `Ki Mi Gi Ti Pi Ei` (powers of 1024).
    pub fn parse_byte_size(&self, key: &str, default: u64) -> Result<u64> {
        self.parse_with(key, default, "size", units::parse_byte_size)
    }

    /// Parse a property as a number with an optional metric prefix.
    ///
    /// Supported suffixes, largest first: `Y Z E P T G M k h da`, none,
    /// `d c m u n p f a z y`.
    pub fn parse_size(&self, key: &str, default: f64) -> Result<f64> {
        self.parse_with(key, default, "size", units::parse_metric_size)
    }

    /// Decrypt a property value produced by [`encryption::encrypt`].
    pub fn decrypt(&self, password: &str, key: &str, default: &str) -> Result<String> {
        self.parse_with(key, default.to_string(), "encrypted", |v| {
            encryption::decrypt(password, v)
        })
    }
}

impl PropertySource for Configuration {
    fn get(&self, name: &str) -> Option<String> {
        self.props.get(name)
    }

    fn get_default(&self, name: &str, default: &str) -> String {
        self.props.get_default(name, default)
    }

    fn names(&self) -> Vec<String> {
        self.props.names()
    }
}

impl fmt::Debug for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Configuration")
            .field("date_format", &self.date_format)
            .field("strict_bool", &self.strict_bool)
            .finish_non_exhaustive()
    }
}
