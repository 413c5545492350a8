//! CLI errors and exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map `CliError` and `PropsError` variants to exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//! - Argument parsing failures (clap exits with its own usage code 2).
//!
//! Invariants:
//! - Exit codes 1-4 are reserved for specific error categories.

use props_config::PropsError;
use thiserror::Error;

/// Errors raised by the CLI itself, before any property work starts.
#[derive(Error, Debug)]
pub enum CliError {
    /// A flag value was present but unusable.
    #[error("{0}")]
    Usage(String),

    /// No password was given and none could be read from the terminal.
    #[error("unable to read {prompt} from the terminal")]
    PasswordPrompt {
        prompt: &'static str,
        #[source]
        source: dialoguer::Error,
    },
}

/// Structured exit codes for props-cli.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unhandled or generic failure.
    GeneralError = 1,

    /// Usage error - missing or invalid flags, unreadable password prompt.
    ///
    /// Scripts should fix the invocation and not retry.
    UsageError = 2,

    /// I/O error - the property file could not be read or written.
    IoError = 3,

    /// Crypto error - wrong password, corrupt ciphertext, unknown tag.
    CryptoError = 4,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&CliError> for ExitCode {
    fn from(_: &CliError) -> Self {
        ExitCode::UsageError
    }
}

impl From<&PropsError> for ExitCode {
    fn from(err: &PropsError) -> Self {
        match err {
            PropsError::Io(_) | PropsError::File { .. } => ExitCode::IoError,

            PropsError::MissingAlgorithm
            | PropsError::UnknownAlgorithm(_)
            | PropsError::InvalidKeySize(_)
            | PropsError::Encryption(_)
            | PropsError::Decryption(_)
            | PropsError::Base64(_) => ExitCode::CryptoError,

            PropsError::InvalidValue { .. } => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no known error is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(cli_err) = cause.downcast_ref::<CliError>() {
                return ExitCode::from(cli_err);
            }
            if let Some(props_err) = cause.downcast_ref::<PropsError>() {
                return ExitCode::from(props_err);
            }
            if cause.is::<std::io::Error>() {
                return ExitCode::IoError;
            }
        }

        ExitCode::GeneralError
    }
}
