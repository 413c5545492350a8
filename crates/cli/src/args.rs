//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Read passwords from flags or environment variables.
//!
//! Non-responsibilities:
//! - Does not execute commands (see `dispatch` module).
//! - Does not prompt for missing passwords (see `password` module).

use clap::{Parser, Subcommand};
use props_config::Algorithm;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "props-cli")]
#[command(about = "Encrypt and decrypt values in property files", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  props-cli encrypt --value s3cret\n  props-cli decrypt --value '[enc:1]...'\n  props-cli encrypt-file --path app.properties\n  PROPS_PASSWORD=0123456789abcdef props-cli decrypt-file --path app.properties --output plain.properties\n"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Encrypt a value for use in a property file
    Encrypt {
        /// Plaintext value to encrypt
        #[arg(long)]
        value: String,

        /// Password used as the AES key (16, 24 or 32 bytes)
        #[arg(long, env = "PROPS_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Encryption algorithm tag
        #[arg(long, default_value = "[enc:1]")]
        alg: Algorithm,
    },

    /// Decrypt an encrypted property value
    Decrypt {
        /// Encrypted value, including its algorithm tag
        #[arg(long, allow_hyphen_values = true)]
        value: String,

        /// Password the value was encrypted with
        #[arg(long, env = "PROPS_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Re-encrypt a property value with a new password
    Recrypt {
        /// Encrypted value to re-encrypt
        #[arg(long, allow_hyphen_values = true)]
        value: String,

        /// Password the value is currently encrypted with
        #[arg(long, env = "PROPS_OLD_PASSWORD", hide_env_values = true)]
        oldpass: Option<String>,

        /// New password (16, 24 or 32 bytes)
        #[arg(long, env = "PROPS_NEW_PASSWORD", hide_env_values = true)]
        newpass: Option<String>,

        /// Encryption algorithm tag
        #[arg(long, default_value = "[enc:1]")]
        alg: Algorithm,
    },

    /// Encrypt every `[enc:0]` value in a property file
    #[command(alias = "encryptFile")]
    EncryptFile {
        /// Property file to encrypt
        #[arg(long, value_name = "FILE")]
        path: PathBuf,

        /// Password used as the AES key (16, 24 or 32 bytes)
        #[arg(long, env = "PROPS_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Encryption algorithm tag
        #[arg(long, default_value = "[enc:1]")]
        alg: Algorithm,

        /// Output file (defaults to the input file)
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Decrypt every `[enc:1]` value in a property file
    #[command(alias = "decryptFile")]
    DecryptFile {
        /// Property file to decrypt
        #[arg(long, value_name = "FILE")]
        path: PathBuf,

        /// Password the values were encrypted with
        #[arg(long, env = "PROPS_PASSWORD", hide_env_values = true)]
        password: Option<String>,

        /// Output file (defaults to the input file)
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Re-encrypt every `[enc:1]` value in a property file with a new password
    #[command(alias = "recryptFile")]
    RecryptFile {
        /// Property file to re-encrypt
        #[arg(long, value_name = "FILE")]
        path: PathBuf,

        /// Password the values are currently encrypted with
        #[arg(long, env = "PROPS_OLD_PASSWORD", hide_env_values = true)]
        oldpass: Option<String>,

        /// New password (16, 24 or 32 bytes)
        #[arg(long, env = "PROPS_NEW_PASSWORD", hide_env_values = true)]
        newpass: Option<String>,

        /// Encryption algorithm tag
        #[arg(long, default_value = "[enc:1]")]
        alg: Algorithm,

        /// Output file (defaults to the input file)
        #[arg(long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}
