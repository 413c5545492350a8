//! Whole-file commands: encrypt-file, decrypt-file and recrypt-file.
//!
//! Responsibilities:
//! - Rewrite every line carrying an encryption tag, keeping the text before
//!   the tag untouched.
//! - Write the result to the output path (the input path by default).
//!
//! Does NOT handle:
//! - Parsing the file as properties; lines are matched textually, so tagged
//!   values in comments are rewritten too.
//!
//! Invariants:
//! - The output is only written once every tagged line was rewritten.
//! - Every output line ends with `\n`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use props_config::constants::{ENCRYPT_AES_GCM_TAG, ENCRYPT_NONE_TAG};
use props_config::{Algorithm, decrypt, encrypt};
use secrecy::ExposeSecret;

use super::value::require_cipher;
use crate::error::CliError;
use crate::password;

pub fn run_encrypt_file(
    path: &Path,
    password: Option<String>,
    alg: Algorithm,
    output: Option<PathBuf>,
) -> Result<()> {
    require_file(path)?;
    require_cipher(alg)?;
    let password = password::resolve_key(password, "Password", "password")?;

    let count = rewrite_file(path, output, ENCRYPT_NONE_TAG, |tail| {
        let plain = &tail[ENCRYPT_NONE_TAG.len()..];
        encrypt(alg, password.expose_secret(), plain).context("unable to encrypt property")
    })?;
    println!("{} properties encrypted", count);
    Ok(())
}

pub fn run_decrypt_file(path: &Path, password: Option<String>, output: Option<PathBuf>) -> Result<()> {
    require_file(path)?;
    let password = password::resolve(password, "Password")?;

    let count = rewrite_file(path, output, ENCRYPT_AES_GCM_TAG, |tail| {
        let plain = decrypt(password.expose_secret(), tail).context("unable to decrypt property")?;
        Ok(format!("{}{}", ENCRYPT_NONE_TAG, plain))
    })?;
    println!("{} properties decrypted", count);
    Ok(())
}

pub fn run_recrypt_file(
    path: &Path,
    oldpass: Option<String>,
    newpass: Option<String>,
    alg: Algorithm,
    output: Option<PathBuf>,
) -> Result<()> {
    require_file(path)?;
    require_cipher(alg)?;
    let oldpass = password::resolve(oldpass, "Old Password")?;
    let newpass = password::resolve_key(newpass, "New Password", "newpass")?;

    let count = rewrite_file(path, output, ENCRYPT_AES_GCM_TAG, |tail| {
        let plain = decrypt(oldpass.expose_secret(), tail).context("unable to decrypt property")?;
        encrypt(alg, newpass.expose_secret(), &plain).context("unable to encrypt property")
    })?;
    println!("{} properties re-encrypted", count);
    Ok(())
}

fn require_file(path: &Path) -> Result<(), CliError> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(()),
        _ => Err(CliError::Usage(format!(
            "the path parameter must be an existing, readable file: {}",
            path.display()
        ))),
    }
}

fn rewrite_file(
    path: &Path,
    output: Option<PathBuf>,
    tag: &str,
    replace: impl FnMut(&str) -> Result<String>,
) -> Result<usize> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("unable to read property file {}", path.display()))?;

    let (rewritten, count) = rewrite_lines(&text, tag, replace)?;

    let output = output.unwrap_or_else(|| path.to_path_buf());
    fs::write(&output, rewritten)
        .with_context(|| format!("unable to write output {}", output.display()))?;

    tracing::debug!(
        input = %path.display(),
        output = %output.display(),
        count,
        "rewrote property file"
    );
    Ok(count)
}

/// Replaces, on every line containing `tag`, the tail starting at the tag.
///
/// Returns the new text and the number of lines replaced.
fn rewrite_lines(
    text: &str,
    tag: &str,
    mut replace: impl FnMut(&str) -> Result<String>,
) -> Result<(String, usize)> {
    let mut out = String::with_capacity(text.len());
    let mut count = 0;

    for line in text.lines() {
        match line.find(tag) {
            Some(i) => {
                let (head, tail) = line.split_at(i);
                out.push_str(head);
                out.push_str(&replace(tail)?);
                count += 1;
            }
            None => out.push_str(line),
        }
        out.push('\n');
    }

    Ok((out, count))
}
