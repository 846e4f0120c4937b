//! CLI module for sse-notify.
//!
//! This module provides command-line interface functionality including:
//! - Argument parsing
//! - Version display
//! - Tailing a stream to stdout
//!
//! # Usage
//!
//! ```ignore
//! use sse_notify::cli::{parse_args, run_cli_command};
//!
//! let command = parse_args(std::env::args());
//! if let Err(e) = run_cli_command(command).await {
//!     eprintln!("Error: {}", e);
//!     std::process::exit(1);
//! }
//! ```

pub mod args;
pub mod output;

pub use args::{parse_args, CliCommand, TailArgs, USAGE};

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use std::io::Write;

use crate::config::NotifyConfig;
use crate::connector::{Connector, Subscription};

/// Package version, as printed by `--version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

fn version_line() -> String {
    format!("sse-notify {}", VERSION)
}

/// Run a parsed CLI command to completion.
pub async fn run_cli_command(command: CliCommand) -> Result<()> {
    match command {
        CliCommand::Version => {
            println!("{}", version_line());
            Ok(())
        }
        CliCommand::Help => {
            println!("{}", USAGE);
            Ok(())
        }
        CliCommand::Invalid(reason) => Err(eyre!("{}\n{}", reason, USAGE)),
        CliCommand::Tail(args) => run_tail(args).await,
    }
}

/// Build the subscription configuration for `args` on top of the environment.
pub fn tail_config(args: &TailArgs) -> NotifyConfig {
    let mut config = NotifyConfig::from_env().with_reconnect(args.reconnect);
    for (name, value) in &args.headers {
        config = config.with_header(name.clone(), value.clone());
    }
    config
}

/// Subscribe to `args.url` and print events until the stream is done.
///
/// Ctrl-C stops the subscription at the next reconnect boundary; a second
/// Ctrl-C exits immediately.
pub async fn run_tail(args: TailArgs) -> Result<()> {
    let config = tail_config(&args);
    let connector = Connector::from_config(config).wrap_err("failed to build HTTP client")?;
    let mut subscription = Subscription::spawn(connector, args.url.clone());

    let cancel = subscription.cancel_handle();
    let mut interrupted = false;
    ctrlc::set_handler(move || {
        if interrupted {
            std::process::exit(130);
        }
        interrupted = true;
        tracing::info!("interrupt received, stopping after the current stream");
        cancel.cancel();
    })
    .wrap_err("failed to install Ctrl-C handler")?;

    let stdout = std::io::stdout();
    while let Some(event) = subscription.recv().await {
        let line = if args.json {
            output::format_json(&event, chrono::Utc::now())?
        } else {
            output::format_plain(&event)
        };
        let mut out = stdout.lock();
        writeln!(out, "{}", line)?;
        out.flush()?;
    }

    let finished = subscription.join().await?;
    if !finished.state.last_event_id.is_empty() {
        tracing::info!("last event id: {}", finished.state.last_event_id);
    }
    finished
        .result
        .wrap_err_with(|| format!("subscription to {} failed", args.url))
}
