//! Diagnostic logging through `tracing`.
//!
//! The full-screen chat owns the terminal, so it only logs when a
//! `--debug-log` file is given. One-shot subcommands log warnings to stderr.

use std::error::Error;
use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

pub const LOG_ENV: &str = "ASKBOX_LOG";
pub const DEFAULT_DIRECTIVE: &str = "askbox=info";
const STDERR_DIRECTIVE: &str = "askbox=warn";

/// Filter from `ASKBOX_LOG` when it parses, otherwise `fallback`.
pub fn build_filter(env_value: Option<&str>, fallback: &str) -> EnvFilter {
    env_value
        .filter(|value| !value.trim().is_empty())
        .and_then(|value| EnvFilter::try_new(value).ok())
        .unwrap_or_else(|| EnvFilter::new(fallback))
}

pub fn init_tracing(debug_log: Option<&Path>, interactive: bool) -> Result<(), Box<dyn Error>> {
    let env_value = std::env::var(LOG_ENV).ok();

    match debug_log {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            tracing_subscriber::fmt()
                .with_env_filter(build_filter(env_value.as_deref(), DEFAULT_DIRECTIVE))
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
                .map_err(|err| -> Box<dyn Error> { err })?;
        }
        None if interactive => {}
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(build_filter(env_value.as_deref(), STDERR_DIRECTIVE))
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|err| -> Box<dyn Error> { err })?;
        }
    }
    Ok(())
}
