//! Per-value encryption for property files.
//!
//! Responsibilities:
//! - Tag values with the algorithm used to protect them (`[enc:0]`, `[enc:1]`).
//! - Encrypt and decrypt single values with AES-GCM.
//!
//! Does NOT handle:
//! - Rewriting whole property files (see the `props-cli` binary).
//! - Prompting for or storing passwords.
//!
//! Invariants:
//! - The password bytes are the raw AES key and must be 16, 24 or 32 bytes long.
//! - Encrypted payloads are `base64url(nonce || ciphertext || tag)` with padding,
//!   using a fresh random 12-byte nonce per value.

use std::fmt;
use std::str::FromStr;

use aes_gcm::aead::consts::U12;
use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::aes::Aes192;
use aes_gcm::{Aes128Gcm, Aes256Gcm, AesGcm, Nonce};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE;

use crate::constants::{
    AES_GCM_NONCE_LEN, AES_KEY_SIZES, ENCRYPT_AES_GCM_TAG, ENCRYPT_NONE_TAG,
};
use crate::error::{PropsError, Result};

type Aes192Gcm = AesGcm<Aes192, U12>;

/// Algorithms a property value can be tagged with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// Marked for encryption but still plaintext.
    None,
    /// AES-GCM with a 128, 192 or 256-bit key.
    #[default]
    AesGcm,
}

impl Algorithm {
    /// The tag written in front of values protected by this algorithm.
    pub const fn tag(self) -> &'static str {
        match self {
            Algorithm::None => ENCRYPT_NONE_TAG,
            Algorithm::AesGcm => ENCRYPT_AES_GCM_TAG,
        }
    }

    /// Look up the algorithm for a tag such as `[enc:1]`.
    pub fn from_tag(tag: &str) -> Result<Self> {
        match tag {
            ENCRYPT_NONE_TAG => Ok(Algorithm::None),
            ENCRYPT_AES_GCM_TAG => Ok(Algorithm::AesGcm),
            other => Err(PropsError::UnknownAlgorithm(other.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Algorithm {
    type Err = PropsError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_tag(s)
    }
}

/// Returns whether a password has a usable AES key length.
pub fn is_valid_key_len(password: &str) -> bool {
    AES_KEY_SIZES.contains(&password.len())
}

/// Encrypt `value` with `algorithm`, returning the tagged result.
///
/// # Errors
///
/// Returns `PropsError::InvalidKeySize` if the password is not 16, 24 or 32
/// bytes for AES-GCM, or `PropsError::Encryption` if sealing fails.
pub fn encrypt(algorithm: Algorithm, password: &str, value: &str) -> Result<String> {
    match algorithm {
        Algorithm::None => Ok(format!("{}{}", ENCRYPT_NONE_TAG, value)),
        Algorithm::AesGcm => {
            let cipher = Cipher::new(password.as_bytes())?;
            let sealed = cipher.seal(value.as_bytes())?;
            Ok(format!("{}{}", ENCRYPT_AES_GCM_TAG, URL_SAFE.encode(sealed)))
        }
    }
}

/// Decrypt a value produced by [`encrypt`].
///
/// The algorithm is taken from the tag at the start of the value.
pub fn decrypt(password: &str, value: &str) -> Result<String> {
    let end = value.find(']').ok_or(PropsError::MissingAlgorithm)?;
    let (tag, payload) = value.split_at(end + 1);

    match Algorithm::from_tag(tag)? {
        Algorithm::None => Ok(payload.to_string()),
        Algorithm::AesGcm => {
            let sealed = URL_SAFE.decode(payload)?;
            if sealed.len() <= AES_GCM_NONCE_LEN {
                return Err(PropsError::Decryption(
                    "encrypted value too small".to_string(),
                ));
            }
            let cipher = Cipher::new(password.as_bytes())?;
            let plaintext = cipher.open(&sealed)?;
            String::from_utf8(plaintext)
                .map_err(|_| PropsError::Decryption("plaintext is not valid UTF-8".to_string()))
        }
    }
}

/// AES-GCM keyed by the password length.
enum Cipher {
    Aes128(Box<Aes128Gcm>),
    Aes192(Box<Aes192Gcm>),
    Aes256(Box<Aes256Gcm>),
}

impl Cipher {
    fn new(key: &[u8]) -> Result<Self> {
        let invalid = |_| PropsError::InvalidKeySize(key.len());
        match key.len() {
            16 => Ok(Cipher::Aes128(Box::new(
                Aes128Gcm::new_from_slice(key).map_err(invalid)?,
            ))),
            24 => Ok(Cipher::Aes192(Box::new(
                Aes192Gcm::new_from_slice(key).map_err(invalid)?,
            ))),
            32 => Ok(Cipher::Aes256(Box::new(
                Aes256Gcm::new_from_slice(key).map_err(invalid)?,
            ))),
            other => Err(PropsError::InvalidKeySize(other)),
        }
    }

    /// Returns `nonce || ciphertext || tag`.
    fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>> {
        let nonce = Aes128Gcm::generate_nonce(&mut OsRng);
        let ciphertext = match self {
            Cipher::Aes128(c) => c.encrypt(&nonce, plaintext),
            Cipher::Aes192(c) => c.encrypt(&nonce, plaintext),
            Cipher::Aes256(c) => c.encrypt(&nonce, plaintext),
        }
        .map_err(|e| PropsError::Encryption(e.to_string()))?;

        let mut sealed = Vec::with_capacity(AES_GCM_NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);
        Ok(sealed)
    }

    /// Opens `nonce || ciphertext || tag`. The caller checks the length.
    fn open(&self, sealed: &[u8]) -> Result<Vec<u8>> {
        let (nonce, ciphertext) = sealed.split_at(AES_GCM_NONCE_LEN);
        let nonce = Nonce::<U12>::from_slice(nonce);
        match self {
            Cipher::Aes128(c) => c.decrypt(nonce, ciphertext),
            Cipher::Aes192(c) => c.decrypt(nonce, ciphertext),
            Cipher::Aes256(c) => c.decrypt(nonce, ciphertext),
        }
        .map_err(|e| PropsError::Decryption(e.to_string()))
    }
}
