//! rfs: filesystem commands on a remote host
//!
//! Each invocation runs exactly one remote command through the system ssh
//! client.

mod cli;
mod commands;
mod config;
mod error;

use clap::Parser;
use colored::Colorize;
use remote_fs::RemoteFs;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::Cli;
use error::Result;

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let default_path = config::default_config_path();
    let config = config::resolve(
        cli.config.as_deref(),
        default_path.as_deref(),
        &cli.overrides,
    )?;
    tracing::debug!(
        user = config.user(),
        host = config.host(),
        port = config.port(),
        root = config.root_dir(),
        "Resolved connection"
    );

    let fs = RemoteFs::new(config)?;
    commands::execute(&fs, cli.command, &mut std::io::stdout()).await
}

/// Logs go to stderr so listings on stdout stay machine-readable.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .try_init();

    if verbose {
        tracing::debug!("Verbose mode enabled");
    }
}
