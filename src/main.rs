use color_eyre::Result;
use sse_notify::cli::{parse_args, run_cli_command};
use tracing_subscriber::EnvFilter;

/// Log to stderr so stdout carries nothing but events.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    init_tracing();

    let command = parse_args(std::env::args());
    run_cli_command(command).await
}
