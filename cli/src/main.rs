// SPDX-License-Identifier: MIT OR Apache-2.0

//! Goban CLI - play Go from the terminal
//!
//! Reads one command per line from stdin (`play D4`, `pass`, `resign`,
//! `score`, `show`, `new`, `quit`) and prints the board after each move.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use goban_cli::config::{default_config_path, load_config, CliConfig};
use goban_cli::session::{Command, Reply, Session};
use std::io::{self, BufRead};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Command-line arguments
#[derive(Parser, Debug)]
#[clap(name = "goban-cli", about = "Play Go in the terminal", version)]
struct Args {
    /// Board size (1-25); overrides the config file
    #[clap(short, long)]
    size: Option<u8>,

    /// Path to a config.toml; defaults to the platform config directory
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Log filter such as "debug" or "goban_core=debug"; RUST_LOG wins if set
    #[clap(long)]
    log_level: Option<String>,

    /// Let the built-in engine play White
    #[clap(long)]
    engine_white: bool,
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("Invalid log filter: {}", level))?;

    // Logs go to stderr so they never interleave with the board on stdout
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}

fn resolve_config(args: &Args) -> Result<CliConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => match default_config_path() {
            Ok(path) => load_config(&path)?,
            Err(e) => {
                eprintln!("Warning: {:#}; using defaults", e);
                CliConfig::default()
            }
        },
    };

    if let Some(size) = args.size {
        config.game.board_size = size;
    }
    if let Some(level) = &args.log_level {
        config.log_level = level.clone();
    }
    if args.engine_white {
        config.engine_white = true;
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = resolve_config(&args)?;
    init_logging(&config.log_level)?;
    tracing::debug!(?config, "Configuration loaded");

    let mut session = Session::new(config.game, config.engine_white)?;
    println!("{}", session.status());

    for line in io::stdin().lock().lines() {
        let line = line.context("Failed to read from stdin")?;

        let command = match Command::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                eprintln!("{}", e);
                continue;
            }
        };

        match session.execute(command) {
            Ok(Reply::Text(text)) => println!("{}", text),
            Ok(Reply::Quit) => break,
            Err(e) => eprintln!("Error: {:#}", e),
        }
    }

    Ok(())
}
