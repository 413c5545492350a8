//! props-cli - Encrypt and decrypt values in Java-style property files.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Encrypt, decrypt and re-encrypt single values or every tagged value in a file.
//!
//! Does NOT handle:
//! - Property parsing or cryptography (see `crates/config`).
//!
//! Invariants:
//! - Logs go to stderr so command output on stdout stays scriptable.
//! - Every failure exits with a structured code from `error::ExitCode`.

mod args;
mod commands;
mod dispatch;
mod error;
mod password;

use args::Cli;
use clap::Parser;
use dispatch::run_command;
use error::{ExitCode, ExitCodeExt};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let exit_code = match run_command(cli) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("{:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(exit_code.as_i32());
}
