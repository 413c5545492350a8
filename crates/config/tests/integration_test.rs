//! Integration tests for parsing, expansion and layered lookup.
//!
//! These tests drive the public API end to end: text is parsed into a store,
//! stores are layered behind `Combined` and `Expander`, and the convention
//! loader assembles files, environment and arguments into a `Configuration`.

use std::fs;
use std::time::Duration;

use props_config::{
    Algorithm, Arguments, Combined, ConfigLoader, Environment, Expander, Properties, PropertySource,
    PropsError, encrypt,
};
use serial_test::serial;
use tempfile::TempDir;

fn parse(text: &str) -> Properties {
    text.parse().expect("text should parse")
}

#[test]
fn test_continuation_joins_lines() {
    let props = parse("key1=abc\\\n    def\n");
    assert_eq!(props.get("key1").as_deref(), Some("abcdef"));
}

#[test]
fn test_separator_variants() {
    let props = parse("key1=a\nkey2:b\nkey3 c\nkey4 = d\nkey5\t:\te\n");
    for (key, value) in [
        ("key1", "a"),
        ("key2", "b"),
        ("key3", "c"),
        ("key4", "d"),
        ("key5", "e"),
    ] {
        assert_eq!(props.get(key).as_deref(), Some(value), "key {}", key);
    }
    assert_eq!(props.len(), 5);
}

#[test]
fn test_escapes_decode_alike_in_key_and_value() {
    let props = parse("key\\n1=a\\nb\\n\n");
    assert_eq!(props.get("key\n1").as_deref(), Some("a\nb\n"));
}

#[test]
fn test_comment_only_input_is_empty() {
    let props = parse("# first\n! second\n\n   # indented\n");
    assert!(props.is_empty());
}

#[test]
fn test_nested_reference() {
    let props = parse("one2=A\ntwo=2\n");
    let expander = Expander::new(props);
    assert_eq!(expander.expand("foo${one${two}}bar"), "fooAbar");
}

#[test]
fn test_unresolved_reference_preserved() {
    let expander = Expander::new(Properties::new());
    assert_eq!(expander.expand("foo${zzz}bar"), "foo${zzz}bar");
}

#[test]
fn test_mutual_cycle_terminates() {
    let expander = Expander::new(parse("a=${b}\nb=${a}\n"));
    assert_eq!(expander.get("a").as_deref(), Some("${b}"));
    assert_eq!(expander.get("b").as_deref(), Some("${a}"));
}

#[test]
fn test_depth_limit_leaves_innermost_reference() {
    let props = parse("key=${level1}\nlevel1=${level2}\nlevel2=${level3}\nlevel3=done\n");

    let limited = Expander::new(&props).with_limit(2);
    assert_eq!(limited.get("key").as_deref(), Some("${level3}"));

    let unlimited = Expander::new(&props);
    assert_eq!(unlimited.get("key").as_deref(), Some("done"));
}

#[test]
fn test_write_then_parse_keeps_supplementary_planes() {
    let props = parse("clef=\\ud834\\udd1e\nemoji\\u2603=\\u00e9t\\u00e9\n");
    assert_eq!(props.get("clef").as_deref(), Some("\u{1D11E}"));

    let mut buf = Vec::new();
    props.write(&mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert!(text.is_ascii());

    let reread: Properties = text.parse().unwrap();
    assert_eq!(reread, props);
}

#[test]
fn test_combined_expander_resolves_across_layers() {
    let overrides = parse("host=prod.example.com\n");
    let defaults = parse("host=localhost\nport=8080\nurl=http://${host}:${port}/\n");

    let combined = Combined::new().with_source(overrides).with_source(defaults);
    let expander = Expander::new(combined);

    assert_eq!(
        expander.get("url").as_deref(),
        Some("http://prod.example.com:8080/")
    );
    let mut names = expander.names();
    names.sort();
    assert_eq!(names, vec!["host", "port", "url"]);
}

#[test]
#[serial]
fn test_environment_layer_with_normalized_names() {
    temp_env::with_vars(
        [
            ("PROPS_IT_DB_HOST", Some("db.internal")),
            ("PROPS_IT_DB_PORT", Some("")),
        ],
        || {
            let files = parse("props.it.db.host=localhost\nprops.it.db.url=${props.it.db.host}/app\n");
            let combined = Combined::new()
                .with_source(Environment::normalized())
                .with_source(files);
            let expander = Expander::new(combined);

            assert_eq!(
                expander.get("props.it.db.url").as_deref(),
                Some("db.internal/app")
            );
            assert_eq!(expander.get("props.it.db.port").as_deref(), Some(""));
        },
    );
}

fn write_fixture(dir: &TempDir) {
    fs::write(
        dir.path().join("app.properties"),
        "# base\nname=app\nport=8080\ntimeout=30s\nlimit=10Mi\nmotd=${name} on ${port}\nenabled=yes\n",
    )
    .unwrap();
    fs::write(dir.path().join("app-prod.properties"), "port=443\nenabled=off\n").unwrap();
}

#[test]
#[serial]
fn test_convention_loader_layers() {
    let dir = TempDir::new().unwrap();
    write_fixture(&dir);

    let vars = [
        ("NAME", Some("from-env")),
        ("PORT", None),
        ("MOTD", None),
        ("TIMEOUT", None),
        ("LIMIT", None),
        ("ENABLED", None),
        ("MISSING", None),
    ];
    temp_env::with_vars(vars, || {
        let config = ConfigLoader::new("app")
            .with_dir(dir.path())
            .with_profile("prod")
            .with_arguments(Arguments::from_args(["prog", "--timeout=2m"]))
            .build()
            .unwrap();

        assert_eq!(config.parse_int("port", 0).unwrap(), 443);
        assert_eq!(config.get("motd").as_deref(), Some("from-env on 443"));
        assert_eq!(
            config.parse_duration("timeout", Duration::ZERO).unwrap(),
            Duration::from_secs(120)
        );
        assert_eq!(config.parse_byte_size("limit", 0).unwrap(), 10 * 1024 * 1024);
        assert!(!config.parse_bool("enabled", true).unwrap());
        assert_eq!(config.parse_int("missing", 7).unwrap(), 7);
    });
}

#[test]
fn test_typed_accessor_error_carries_key_and_value() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("app.properties"), "port=eighty\n").unwrap();

    let config = ConfigLoader::new("app")
        .with_dir(dir.path())
        .with_arguments(Arguments::from_args(["prog"]))
        .without_environment()
        .build()
        .unwrap();

    let err = config.parse_int("port", 80).unwrap_err();
    match &err {
        PropsError::InvalidValue { key, value, .. } => {
            assert_eq!(key, "port");
            assert_eq!(value, "eighty");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(config.parse_int("port", 80).unwrap_or(80), 80);
}

#[test]
fn test_encrypted_value_in_file() {
    let password = "0123456789abcdef";
    let sealed = encrypt(Algorithm::AesGcm, password, "s3cret").unwrap();

    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("app.properties"),
        format!("db.password={}\n", sealed),
    )
    .unwrap();

    let config = ConfigLoader::new("app")
        .with_dir(dir.path())
        .with_arguments(Arguments::from_args(["prog"]))
        .without_environment()
        .build()
        .unwrap();

    assert_eq!(
        config.decrypt(password, "db.password", "").unwrap(),
        "s3cret"
    );
    assert!(config.decrypt("fedcba9876543210", "db.password", "").is_err());
}
