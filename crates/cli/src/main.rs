// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! ag - input/output gate demo CLI

#![cfg_attr(test, allow(clippy::unwrap_used))]

mod commands;
mod counter;
mod settings;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{config, counter as counter_cmd};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "ag",
    version,
    about = "Actor gates - serialize async state access without locks"
)]
struct Cli {
    /// Gate configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run concurrent increments against a gated counter
    Counter(counter_cmd::CounterArgs),
    /// Print the effective gate configuration
    Config,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    setup_logging();

    let cli = Cli::parse();
    let gate_config = settings::resolve(cli.config.as_deref())?;

    match cli.command {
        Commands::Counter(args) => counter_cmd::counter(args, gate_config).await?,
        Commands::Config => config::config(&gate_config)?,
    }

    Ok(())
}

fn setup_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}
