//! Single-value commands: encrypt, decrypt and recrypt.

use anyhow::{Context, Result};
use props_config::{Algorithm, decrypt, encrypt};
use secrecy::ExposeSecret;

use crate::error::CliError;
use crate::password;

/// Only AES-GCM produces ciphertext; `[enc:0]` is a marker, not an algorithm to encrypt with.
pub(crate) fn require_cipher(alg: Algorithm) -> Result<(), CliError> {
    if alg != Algorithm::AesGcm {
        return Err(CliError::Usage(format!(
            "the alg parameter must be {}, got {}",
            Algorithm::AesGcm,
            alg
        )));
    }
    Ok(())
}

pub fn run_encrypt(value: &str, password: Option<String>, alg: Algorithm) -> Result<()> {
    require_cipher(alg)?;
    let password = password::resolve_key(password, "Password", "password")?;

    let sealed = encrypt(alg, password.expose_secret(), value).context("encrypt error")?;
    println!("{}", sealed);
    Ok(())
}

pub fn run_decrypt(value: &str, password: Option<String>) -> Result<()> {
    let password = password::resolve(password, "Password")?;

    let plain = decrypt(password.expose_secret(), value).context("decrypt error")?;
    println!("{}", plain);
    Ok(())
}

pub fn run_recrypt(
    value: &str,
    oldpass: Option<String>,
    newpass: Option<String>,
    alg: Algorithm,
) -> Result<()> {
    require_cipher(alg)?;
    let oldpass = password::resolve(oldpass, "Old Password")?;
    let newpass = password::resolve_key(newpass, "New Password", "newpass")?;

    let plain = decrypt(oldpass.expose_secret(), value).context("decrypt error")?;
    let sealed = encrypt(alg, newpass.expose_secret(), &plain).context("encrypt error")?;
    println!("{}", sealed);
    Ok(())
}
