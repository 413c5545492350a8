//! In-memory property store with properties-format reading and writing.
//!
//! Responsibilities:
//! - Hold decoded `name -> value` pairs in an unordered map.
//! - Parse properties text into the store (delegated to `scanner`).
//! - Serialize the store back to properties text (delegated to `writer`).
//!
//! Does NOT handle:
//! - Reference expansion (see `expander.rs`).
//! - Locking: mutation goes through `&mut self`; sharing a store between
//!   threads that mutate it requires external synchronization.
//!
//! Invariants:
//! - Keys are unique; a later `set` or a later line with the same key wins.
//! - Iteration and serialization order are unspecified.
//! - A failed read leaves the store untouched.

mod scanner;
mod writer;

use std::collections::HashMap;
use std::collections::hash_map;
use std::io::{Read, Write};
use std::str::FromStr;

use crate::error::{PropsError, Result};
use crate::source::PropertySource;

/// An unordered set of properties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Properties {
    values: HashMap<String, String>,
}

impl Properties {
    /// Create an empty property set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a new property set from properties-format text.
    ///
    /// # Errors
    ///
    /// Returns `PropsError::Io` if the reader fails or the input is not UTF-8.
    pub fn read<R: Read>(reader: R) -> Result<Self> {
        let mut props = Self::new();
        props.load(reader)?;
        Ok(props)
    }

    /// Parse properties-format text from the reader into this set.
    ///
    /// Existing entries with the same keys are overwritten. The whole input is
    /// read before anything is inserted, so a read failure changes nothing.
    pub fn load<R: Read>(&mut self, mut reader: R) -> Result<()> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        self.load_str(&text);
        Ok(())
    }

    /// Parse properties-format text into this set.
    pub fn load_str(&mut self, text: &str) {
        let before = self.values.len();
        scanner::scan(text, |key, value| {
            self.values.insert(key, value);
        });
        tracing::trace!(
            added = self.values.len().saturating_sub(before),
            total = self.values.len(),
            "parsed properties"
        );
    }

    /// Write the set in properties format, one `key=value` line per entry.
    ///
    /// # Errors
    ///
    /// Returns `PropsError::Io` if the writer fails; output may be partial.
    pub fn write<W: Write + ?Sized>(&self, writer: &mut W) -> Result<()> {
        let written = writer::write_entries(writer, &self.values)?;
        tracing::trace!(written, "wrote properties");
        Ok(())
    }

    /// Set a property value, replacing any existing value.
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// Remove a property, returning its value if it was set.
    pub fn remove(&mut self, name: &str) -> Option<String> {
        self.values.remove(name)
    }

    /// Remove every property.
    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate over all entries in unspecified order.
    pub fn iter(&self) -> hash_map::Iter<'_, String, String> {
        self.values.iter()
    }
}

impl PropertySource for Properties {
    fn get(&self, name: &str) -> Option<String> {
        self.values.get(name).cloned()
    }

    fn names(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}

impl FromStr for Properties {
    type Err = PropsError;

    fn from_str(s: &str) -> Result<Self> {
        let mut props = Self::new();
        props.load_str(s);
        Ok(props)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Properties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut props = Self::new();
        props.extend(iter);
        props
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Properties {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (name, value) in iter {
            self.set(name, value);
        }
    }
}

impl<'a> IntoIterator for &'a Properties {
    type Item = (&'a String, &'a String);
    type IntoIter = hash_map::Iter<'a, String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::other("read failed"))
        }
    }

    fn sorted(mut names: Vec<String>) -> Vec<String> {
        names.sort();
        names
    }

    #[test]
    fn test_new_is_empty() {
        let props = Properties::new();
        assert!(props.is_empty());
        assert_eq!(props.len(), 0);
    }

    #[test]
    fn test_read_simple() {
        let props = Properties::read("\nkey1=a\nkey2=b\nkey3=c\n".as_bytes()).unwrap();
        let want: Properties = [("key1", "a"), ("key2", "b"), ("key3", "c")]
            .into_iter()
            .collect();
        assert_eq!(props, want);
    }

    #[test]
    fn test_read_keys() {
        let text = "\nkey1=a\nkey2:b\nkey3 c\nkey4 = d\nkey5 : e\nkey6   f\nkey7\nkey8=g\nkey9=\nkey10\nkey11";
        let props = Properties::read(text.as_bytes()).unwrap();
        let want: Properties = [
            ("key1", "a"),
            ("key2", "b"),
            ("key3", "c"),
            ("key4", "d"),
            ("key5", "e"),
            ("key6", "f"),
            ("key7", ""),
            ("key8", "g"),
            ("key9", ""),
            ("key10", ""),
            ("key11", ""),
        ]
        .into_iter()
        .collect();
        assert_eq!(props, want);
        assert!(props.contains("key7"));
    }

    #[test]
    fn test_read_escapes() {
        let text = "\\key0=123
key\\n1=a\\nb\\n
key\\t2:c\\td
key\\f3 e\\ff
key\\\\4=g\\\\h
key\\r5:i\\rj
key\\z6 k\\3l
key\\u005a7=m\\u2126n
key\\uuu00478=o\\uzp
key\\uD834\\uDD1E9=q\\uD800\\uDC00r
key\\
    \\f10=s\\
\t\\ft
key11=\\u
key12=\\uZ
key13 \\t =abc
key14
";
        let props = Properties::read(text.as_bytes()).unwrap();
        let want: Properties = [
            ("key0", "123"),
            ("key\n1", "a\nb\n"),
            ("key\t2", "c\td"),
            ("key\x0c3", "e\x0cf"),
            ("key\\4", "g\\h"),
            ("key\r5", "i\rj"),
            ("keyz6", "k3l"),
            ("keyZ7", "m\u{2126}n"),
            ("keyG8", "o\u{FFFD}p"),
            ("key\u{1D11E}9", "q\u{10000}r"),
            ("key\x0c10", "s\x0ct"),
            ("key11", "\u{FFFD}"),
            ("key12", "\u{FFFD}"),
            ("key13", "\t =abc"),
            ("key14", ""),
        ]
        .into_iter()
        .collect();
        assert_eq!(props, want);
    }

    #[test]
    fn test_read_error_returns_no_store() {
        let result = Properties::read(FailingReader);
        assert!(matches!(result, Err(PropsError::Io(_))));
    }

    #[test]
    fn test_load_error_leaves_store_untouched() {
        let mut props: Properties = [("key", "value")].into_iter().collect();
        assert!(props.load(FailingReader).is_err());
        assert_eq!(props.get("key").as_deref(), Some("value"));
        assert_eq!(props.len(), 1);
    }

    #[test]
    fn test_read_rejects_invalid_utf8() {
        let bytes: &[u8] = &[b'k', b'=', 0xff, 0xfe];
        assert!(Properties::read(bytes).is_err());
    }

    #[test]
    fn test_get_and_default() {
        let mut props = Properties::new();
        props.set("key1", "foo");

        assert_eq!(props.get("key1").as_deref(), Some("foo"));
        assert_eq!(props.get("key2"), None);
        assert_eq!(props.get_default("key1", "bar"), "foo");
        assert_eq!(props.get_default("key2", "bar"), "bar");
    }

    #[test]
    fn test_set_overwrites() {
        let mut props = Properties::new();
        props.set("key1", "foo");
        props.set("key1", "bar");
        assert_eq!(props.get("key1").as_deref(), Some("bar"));
    }

    #[test]
    fn test_later_line_overwrites() {
        let props: Properties = "k=1\nk=2\n".parse().unwrap();
        assert_eq!(props.get("k").as_deref(), Some("2"));
    }

    #[test]
    fn test_remove_and_clear() {
        let mut props = Properties::new();
        props.set("key1", "foo");
        props.set("key2", "bar");
        assert_eq!(props.len(), 2);

        assert_eq!(props.remove("key1").as_deref(), Some("foo"));
        assert_eq!(props.remove("key1"), None);

        props.clear();
        assert!(props.is_empty());
    }

    #[test]
    fn test_names() {
        let props: Properties = [("key1", "foo"), ("key2", "bar")].into_iter().collect();
        assert_eq!(sorted(props.names()), vec!["key1", "key2"]);
    }

    #[test]
    fn test_write_then_read() {
        let props: Properties = [("a", " leading"), ("b c", "x=y"), ("\u{e9}", "\u{1F600}")]
            .into_iter()
            .collect();

        let mut buf = Vec::new();
        props.write(&mut buf).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let mut lines: Vec<&str> = text.lines().collect();
        lines.sort();
        assert_eq!(
            lines,
            vec!["\\u00e9=\\ud83d\\ude00", "a=\\ leading", "b\\ c=x\\=y"]
        );

        let reread = Properties::read(text.as_bytes()).unwrap();
        assert_eq!(reread, props);
    }
}
