//! Command-line entry point for the token top-up report generator.
//!
//! Loads configuration, runs the report pipeline, and maps failures to a
//! non-zero exit code. The report itself goes to stdout; logs and errors
//! go to stderr so the report stream stays clean.

mod config;
mod run;

use std::io::{self, Write};
use std::process::ExitCode;

use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::ReportSettings;
use crate::run::RunError;

fn main() -> ExitCode {
    init_tracing();

    let settings = match ReportSettings::load() {
        Ok(settings) => settings,
        Err(err) => return report_failure(&RunError::from(err)),
    };

    let mut stdout = io::stdout().lock();
    match run::run(&settings, &mut stdout) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => report_failure(&err),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    if let Err(err) = fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %err, "tracing init failed");
    }
}

fn report_failure(err: &RunError) -> ExitCode {
    drop(writeln!(io::stderr().lock(), "{err}"));
    ExitCode::FAILURE
}
