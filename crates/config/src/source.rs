//! The lookup capability shared by every property source.
//!
//! Responsibilities:
//! - Define `PropertySource`, the three-operation contract implemented by the
//!   store, the environment and argument readers, the combiner and the expander.
//! - Forward the contract through references and smart pointers so sources
//!   can be wrapped by reference or by ownership.
//!
//! Invariants:
//! - `names()` is unordered and free of duplicates.
//! - `get_default()` never consults anything `get()` would not.

use std::sync::Arc;

/// A readable set of named string values.
pub trait PropertySource {
    /// Returns the value for `name`, or `None` when the source does not have it.
    fn get(&self, name: &str) -> Option<String>;

    /// Returns the value for `name`, or `default` when the source does not have it.
    fn get_default(&self, name: &str, default: &str) -> String {
        self.get(name).unwrap_or_else(|| default.to_string())
    }

    /// Returns every name known to the source.
    fn names(&self) -> Vec<String>;
}

impl<T: PropertySource + ?Sized> PropertySource for &T {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }

    fn get_default(&self, name: &str, default: &str) -> String {
        (**self).get_default(name, default)
    }

    fn names(&self) -> Vec<String> {
        (**self).names()
    }
}

impl<T: PropertySource + ?Sized> PropertySource for Box<T> {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }

    fn get_default(&self, name: &str, default: &str) -> String {
        (**self).get_default(name, default)
    }

    fn names(&self) -> Vec<String> {
        (**self).names()
    }
}

impl<T: PropertySource + ?Sized> PropertySource for Arc<T> {
    fn get(&self, name: &str) -> Option<String> {
        (**self).get(name)
    }

    fn get_default(&self, name: &str, default: &str) -> String {
        (**self).get_default(name, default)
    }

    fn names(&self) -> Vec<String> {
        (**self).names()
    }
}
