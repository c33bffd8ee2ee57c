//! # termfolio
//!
//! Parses the command line, sets up file logging and runs the REPL on the
//! controlling terminal.

use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use termfolio::cmd_args::CommandLineArgs;
use termfolio::config::{LOG_FILE_ENV_VAR, LOG_LEVEL_ENV_VAR};
use termfolio::io::{TerminalEventStream, TerminalRenderStream};
use termfolio::AppController;
use tracing_subscriber::{fmt::time::ChronoLocal, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing_subscriber()?;
    let cmd_args = CommandLineArgs::parse();
    tracing::debug!("Starting with {:?}", cmd_args);

    let mut app = AppController::with_io_streams(
        cmd_args,
        TerminalEventStream::new(),
        TerminalRenderStream::new(),
    )?;
    app.run().await
}

/// Log to the file named by the environment, if any. The terminal itself
/// is the UI, so nothing is logged there.
fn init_tracing_subscriber() -> Result<()> {
    let Ok(path) = std::env::var(LOG_FILE_ENV_VAR) else {
        return Ok(());
    };
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {path}"))?;

    let mut filter =
        EnvFilter::try_from_env(LOG_LEVEL_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    for directive in ["reqwest=warn", "hyper=warn", "hyper_util=warn", "rustls=warn"] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_timer(ChronoLocal::rfc_3339())
        .init();
    Ok(())
}
