//! `bout` command-line driver.
//!
//! Runs a single bout from content files and prints the result as JSON.
//!
//! ```bash
//! bout simulate --player crates/game/content/data/players/disciple.ron --enemy mountain_bandit --pretty
//! bout catalog --data-dir crates/game/content/data
//! ```

mod commands;
mod config;
mod dirs;
mod logging;

use anyhow::Result;
use clap::Parser;
use commands::{Catalog, Simulate};
use config::ClientConfig;

/// Deterministic qi combat simulator
#[derive(Parser)]
#[command(name = "bout")]
#[command(about = "Simulate PvE qi combat bouts", long_about = None)]
#[command(version)]
struct Cli {
    /// Also write logs to a file in the log directory
    #[arg(long, global = true)]
    log_file: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Run one bout and write the result as JSON
    Simulate(Simulate),

    /// List technique, status and enemy ids
    Catalog(Catalog),
}

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let config = ClientConfig::from_env();

    let _guard = logging::setup_logging(&config, cli.log_file)?;

    match cli.command {
        Command::Simulate(cmd) => cmd.execute(&config),
        Command::Catalog(cmd) => cmd.execute(&config),
    }
}
