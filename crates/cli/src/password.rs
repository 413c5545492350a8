//! Password resolution for the encryption commands.
//!
//! Responsibilities:
//! - Accept a password from a flag or environment variable.
//! - Prompt without echo when none was given.
//! - Validate AES key lengths for passwords used to encrypt.
//!
//! Invariants:
//! - Passwords are held as `SecretString` once resolved and never logged.
//! - An empty flag value counts as missing.

use props_config::encryption::is_valid_key_len;
use secrecy::{ExposeSecret, SecretString};

use crate::error::CliError;

/// Returns the supplied password, or prompts for one on the terminal.
pub fn resolve(supplied: Option<String>, prompt: &'static str) -> Result<SecretString, CliError> {
    if let Some(password) = supplied.filter(|p| !p.is_empty()) {
        return Ok(SecretString::new(password.into()));
    }

    tracing::debug!(prompt, "no password supplied, prompting");
    let input = dialoguer::Password::new()
        .with_prompt(prompt)
        .allow_empty_password(false)
        .interact()
        .map_err(|source| CliError::PasswordPrompt { prompt, source })?;
    Ok(SecretString::new(input.into()))
}

/// Like [`resolve`], but rejects passwords that are not a valid AES key.
pub fn resolve_key(
    supplied: Option<String>,
    prompt: &'static str,
    flag: &str,
) -> Result<SecretString, CliError> {
    let password = resolve(supplied, prompt)?;
    if !is_valid_key_len(password.expose_secret()) {
        return Err(CliError::Usage(format!(
            "the {} parameter must be 16, 24, or 32 bytes",
            flag
        )));
    }
    Ok(password)
}
