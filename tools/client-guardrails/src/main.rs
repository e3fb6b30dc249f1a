//! CLI entry point for the client guardrails.
//!
//! Takes an optional path to the `client/` directory and defaults to the
//! workspace copy next to this tool.

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

use camino::Utf8PathBuf;

fn main() -> ExitCode {
    let client_dir = env::args()
        .nth(1)
        .map_or_else(default_client_dir, Utf8PathBuf::from);
    let outcome = client_guardrails::check_client(&client_dir);
    let mut stderr = io::stderr().lock();
    match outcome {
        Ok(()) => {
            let _ = writeln!(stderr, "{client_dir}: guardrails pass");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let _ = writeln!(stderr, "{err}");
            ExitCode::FAILURE
        }
    }
}

fn default_client_dir() -> Utf8PathBuf {
    Utf8PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../client")
}
