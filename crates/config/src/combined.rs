//! Prioritized lookup across several property sources.
//!
//! Invariants:
//! - Sources are consulted in insertion order; the first one that has a name wins.
//! - `names()` is the de-duplicated union of every source's names.

use std::collections::HashSet;
use std::fmt;

use crate::source::PropertySource;

type BoxedSource = Box<dyn PropertySource + Send + Sync>;

/// Property lookups across multiple sources in priority order.
#[derive(Default)]
pub struct Combined {
    sources: Vec<BoxedSource>,
}

impl Combined {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source with lower priority than every source already added.
    pub fn with_source(mut self, source: impl PropertySource + Send + Sync + 'static) -> Self {
        self.push(source);
        self
    }

    /// Append a source with lower priority than every source already added.
    pub fn push(&mut self, source: impl PropertySource + Send + Sync + 'static) {
        self.sources.push(Box::new(source));
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}

impl PropertySource for Combined {
    fn get(&self, name: &str) -> Option<String> {
        self.sources.iter().find_map(|source| source.get(name))
    }

    fn names(&self) -> Vec<String> {
        let unique: HashSet<String> = self
            .sources
            .iter()
            .flat_map(|source| source.names())
            .collect();
        unique.into_iter().collect()
    }
}

impl fmt::Debug for Combined {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Combined")
            .field("sources", &self.sources.len())
            .finish()
    }
}
