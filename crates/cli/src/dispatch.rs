//! Command dispatch logic.
//!
//! Responsibilities:
//! - Route parsed CLI arguments to the matching command handler.
//!
//! Does NOT handle:
//! - CLI structure definitions (see `args` module).
//! - Exit code mapping (see `error` module).

use anyhow::Result;

use crate::args::{Cli, Commands};
use crate::commands;

/// Dispatch CLI commands to their respective handlers.
pub(crate) fn run_command(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Encrypt {
            value,
            password,
            alg,
        } => commands::value::run_encrypt(&value, password, alg),
        Commands::Decrypt { value, password } => commands::value::run_decrypt(&value, password),
        Commands::Recrypt {
            value,
            oldpass,
            newpass,
            alg,
        } => commands::value::run_recrypt(&value, oldpass, newpass, alg),
        Commands::EncryptFile {
            path,
            password,
            alg,
            output,
        } => commands::file::run_encrypt_file(&path, password, alg, output),
        Commands::DecryptFile {
            path,
            password,
            output,
        } => commands::file::run_decrypt_file(&path, password, output),
        Commands::RecryptFile {
            path,
            oldpass,
            newpass,
            alg,
            output,
        } => commands::file::run_recrypt_file(&path, oldpass, newpass, alg, output),
    }
}
