//! Property-based tests for the properties format and reference expansion.
//!
//! These tests verify, with randomly generated inputs:
//! - Writing a store and reading it back yields the same store, for arbitrary
//!   Unicode keys and values including supplementary-plane characters.
//! - Expansion is idempotent: expanding an already expanded value changes nothing.
//! - Self-referencing chains terminate.

use proptest::prelude::*;

use props_config::{Expander, Properties, PropertySource};

/// Strategy for strings that stress the escaper: structural characters,
/// whitespace, control characters, BMP and astral code points.
fn tricky_string() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        Just(" ".to_string()),
        Just("\t".to_string()),
        Just("\n".to_string()),
        Just("\r".to_string()),
        Just("\x0c".to_string()),
        Just("\\".to_string()),
        Just("=".to_string()),
        Just(":".to_string()),
        Just("#".to_string()),
        Just("!".to_string()),
        Just("\u{FFFD}".to_string()),
        Just("\u{1D11E}".to_string()),
        "[a-z0-9]{1,4}",
        any::<char>().prop_map(String::from),
    ];
    prop::collection::vec(piece, 0..12).prop_map(|parts| parts.concat())
}

/// Strategy for values built from plain words and reference tokens.
fn templated_value() -> impl Strategy<Value = String> {
    let piece = prop_oneof![
        Just("${".to_string()),
        Just("}".to_string()),
        Just("a".to_string()),
        Just("b".to_string()),
        Just("c".to_string()),
        Just("-".to_string()),
    ];
    prop::collection::vec(piece, 0..16).prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn prop_write_then_read_roundtrip(
        entries in prop::collection::hash_map(tricky_string(), tricky_string(), 0..8)
    ) {
        let props: Properties = entries.into_iter().collect();

        let mut buf = Vec::new();
        props.write(&mut buf).unwrap();
        let reread = Properties::read(buf.as_slice()).unwrap();

        prop_assert_eq!(reread, props);
    }

    #[test]
    fn prop_any_string_roundtrips(key in any::<String>(), value in any::<String>()) {
        let mut props = Properties::new();
        props.set(key.clone(), value.clone());

        let mut buf = Vec::new();
        props.write(&mut buf).unwrap();
        let reread = Properties::read(buf.as_slice()).unwrap();

        prop_assert_eq!(reread.get(&key), Some(value));
        prop_assert_eq!(reread.len(), 1);
    }

    #[test]
    fn prop_expansion_is_idempotent(
        value in templated_value(),
        a in "[A-Z]{0,3}",
        b in "[A-Z]{0,3}",
    ) {
        let props: Properties = [("a", a), ("b", b)].into_iter().collect();
        let expander = Expander::new(props);

        let once = expander.expand(&value);
        let twice = expander.expand(&once);
        prop_assert_eq!(twice, once);
    }

    #[test]
    fn prop_reference_chains_terminate(len in 1usize..12, cyclic in any::<bool>()) {
        let mut props = Properties::new();
        for i in 0..len {
            let next = if i + 1 == len {
                if cyclic { "${k0}".to_string() } else { "end".to_string() }
            } else {
                format!("${{k{}}}", i + 1)
            };
            props.set(format!("k{}", i), next);
        }
        let expander = Expander::new(props);

        let got = expander.get("k0").unwrap();
        if cyclic {
            prop_assert!(got.starts_with("${k"), "expected unresolved reference, got {:?}", got);
        } else {
            prop_assert_eq!(got, "end");
        }
    }
}
