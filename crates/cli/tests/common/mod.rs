//! Shared test utilities for props-cli integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic CLI command factory.
//!
//! Invariants / Assumptions:
//! - Password environment variables from the host never leak into a test.

use assert_cmd::Command;

/// A 16-byte password usable as an AES-128 key.
pub const PASSWORD: &str = "1234567890123456";

/// A 32-byte password usable as an AES-256 key.
#[allow(dead_code)]
pub const PASSWORD_256: &str = "12345678901234567890123456789012";

/// Returns a hermetic `props-cli` command for integration testing.
pub fn props_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("props-cli");

    cmd.env_remove("PROPS_PASSWORD")
        .env_remove("PROPS_OLD_PASSWORD")
        .env_remove("PROPS_NEW_PASSWORD")
        .env_remove("RUST_LOG");

    cmd
}

/// Runs `props-cli encrypt` and returns the tagged ciphertext.
#[allow(dead_code)]
pub fn encrypt_value(value: &str, password: &str) -> String {
    let output = props_cmd()
        .args(["encrypt", "--value", value, "--password", password])
        .output()
        .expect("props-cli should run");
    assert!(output.status.success(), "encrypt failed: {:?}", output);
    String::from_utf8(output.stdout)
        .expect("stdout should be UTF-8")
        .trim_end()
        .to_string()
}
