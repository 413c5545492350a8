//! Reference expansion over any property source.
//!
//! Responsibilities:
//! - Wrap a `PropertySource` and resolve `${name}` references in its values.
//! - Resolve nested references (`${one${two}}`) and references introduced by
//!   substitution, by rewriting the whole string until it stops changing.
//!
//! Does NOT handle:
//! - Reporting unresolved references; they are left in the output verbatim.
//!
//! Invariants:
//! - The expander holds no per-call state; the cycle guard lives on the stack of
//!   a single top-level call, so `&Expander` can be shared across threads.
//! - Expansion always terminates: a string already seen in the current call is
//!   returned as-is, `limit` (when non-zero) caps the number of rewrite rounds
//!   including those spent on nested names, and self-growing values stop after
//!   `MAX_GROWING_ROUNDS` lengthening rounds or at `MAX_EXPANDED_LEN` bytes.

use std::collections::HashSet;

use crate::constants::{
    DEFAULT_EXPANSION_PREFIX, DEFAULT_EXPANSION_SUFFIX, MAX_EXPANDED_LEN, MAX_GROWING_ROUNDS,
};
use crate::source::PropertySource;

/// A property source that expands references to other properties.
///
/// For example, the properties:
///
/// ```text
/// color.alert = red
/// color.text = black
/// css.alert = border: 1px solid ${color.alert}; color: ${color.text};
/// ```
///
/// give `css.alert` the value `border: 1px solid red; color: black;`.
#[derive(Debug, Clone)]
pub struct Expander<S> {
    prefix: String,
    suffix: String,
    limit: usize,
    source: S,
}

/// Rewrite rounds spent by one top-level call, nested names included.
#[derive(Debug, Default)]
struct Rounds {
    total: usize,
    growing: usize,
}

impl<S: PropertySource> Expander<S> {
    /// Create an expander with the default `${` prefix and `}` suffix and no limit.
    pub fn new(source: S) -> Self {
        Self {
            prefix: DEFAULT_EXPANSION_PREFIX.to_string(),
            suffix: DEFAULT_EXPANSION_SUFFIX.to_string(),
            limit: 0,
            source,
        }
    }

    /// Use a different token to open references. Empty tokens are ignored.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        if !prefix.is_empty() {
            self.prefix = prefix;
        }
        self
    }

    /// Use a different token to close references. Empty tokens are ignored.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        let suffix = suffix.into();
        if !suffix.is_empty() {
            self.suffix = suffix;
        }
        self
    }

    /// Limit the number of whole-string rewrite rounds; 0 means unlimited.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Expand every reference in `value` against the wrapped source.
    pub fn expand(&self, value: &str) -> String {
        self.expand_with(value.to_string(), &mut HashSet::new(), &mut Rounds::default())
    }

    fn expand_with(
        &self,
        value: String,
        seen: &mut HashSet<String>,
        rounds: &mut Rounds,
    ) -> String {
        let mut current = value;
        loop {
            if !current.contains(self.prefix.as_str()) || !current.contains(self.suffix.as_str()) {
                return current;
            }
            if seen.contains(&current) {
                tracing::trace!(value = %current, "expansion cycle detected");
                return current;
            }
            if self.limit > 0 && rounds.total >= self.limit {
                tracing::trace!(limit = self.limit, "expansion limit reached");
                return current;
            }
            seen.insert(current.clone());
            rounds.total += 1;

            let next = self.rewrite(&current, seen, rounds);
            if next == current {
                return next;
            }
            if next.len() > MAX_EXPANDED_LEN {
                tracing::warn!(
                    len = next.len(),
                    "expanded value exceeds {} bytes, stopping",
                    MAX_EXPANDED_LEN
                );
                return current;
            }
            if self.limit == 0 && next.len() > current.len() {
                rounds.growing += 1;
                if rounds.growing > MAX_GROWING_ROUNDS {
                    tracing::warn!(
                        rounds = rounds.growing,
                        "expanded value keeps growing, stopping"
                    );
                    return current;
                }
            }
            current = next;
        }
    }

    /// Performs one left-to-right pass replacing every top-level reference.
    fn rewrite(&self, value: &str, seen: &mut HashSet<String>, rounds: &mut Rounds) -> String {
        let prefix = self.prefix.as_str();
        let suffix = self.suffix.as_str();
        let mut out = String::with_capacity(value.len());
        let mut rest = value;

        while let Some(open) = rest.find(prefix) {
            out.push_str(&rest[..open]);
            let body = &rest[open + prefix.len()..];

            let Some(close) = self.find_close(body) else {
                // No matching suffix: the remainder is plain text.
                out.push_str(&rest[open..]);
                return out;
            };

            let raw = &body[..close];
            let name = if raw.contains(prefix) {
                // Names see the enclosing states but not their siblings';
                // rounds are shared so they count toward the limit.
                self.expand_with(raw.to_string(), &mut seen.clone(), rounds)
            } else {
                raw.to_string()
            };
            match self.source.get(&name) {
                Some(resolved) => out.push_str(&resolved),
                None => {
                    out.push_str(prefix);
                    out.push_str(&name);
                    out.push_str(suffix);
                }
            }
            rest = &body[close + suffix.len()..];
        }

        out.push_str(rest);
        out
    }

    /// Finds the byte offset of the suffix closing a reference whose prefix
    /// ends right before `body`, skipping over nested references.
    fn find_close(&self, body: &str) -> Option<usize> {
        let prefix = self.prefix.as_str();
        let suffix = self.suffix.as_str();
        let mut depth = 0usize;

        for (i, _) in body.char_indices() {
            let tail = &body[i..];
            if tail.starts_with(suffix) {
                if depth == 0 {
                    return Some(i);
                }
                depth -= 1;
            } else if tail.starts_with(prefix) {
                depth += 1;
            }
        }
        None
    }
}

impl<S: PropertySource> PropertySource for Expander<S> {
    /// Returns the expanded value; found status matches the wrapped source.
    fn get(&self, name: &str) -> Option<String> {
        self.source
            .get(name)
            .map(|value| self.expand(&value))
    }

    /// Expands the source's value, or the default when the source has none.
    fn get_default(&self, name: &str, default: &str) -> String {
        self.expand(&self.source.get_default(name, default))
    }

    fn names(&self) -> Vec<String> {
        self.source.names()
    }
}
