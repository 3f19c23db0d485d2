//! Run one bout and write the result as JSON.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use combat_content::PlayerLoader;
use combat_core::{CombatEngine, CombatResult, PcgRng};
use tracing::info;

use super::Content;
use crate::config::ClientConfig;

/// Run one bout and write the result as JSON
#[derive(Parser)]
pub struct Simulate {
    /// Player combat data (RON)
    #[arg(short, long, value_name = "FILE")]
    player: PathBuf,

    /// Enemy id from the roster
    #[arg(short, long, value_name = "ID")]
    enemy: String,

    /// Content directory (defaults to the embedded content)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Bout seed (defaults to one derived from the clock)
    #[arg(short, long, value_name = "SEED")]
    seed: Option<u64>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,

    /// Write the result to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

impl Simulate {
    pub fn execute(self, config: &ClientConfig) -> Result<()> {
        let data_dir = config.data_dir(self.data_dir);
        let content = Content::load(data_dir.as_deref())?;

        let player = PlayerLoader::load(&self.player)?;
        let enemy = content.roster.get(&self.enemy).with_context(|| {
            format!(
                "Unknown enemy '{}'. Run `bout catalog` to list enemy ids",
                self.enemy
            )
        })?;

        let seed = config.seed(self.seed).unwrap_or_else(clock_seed);
        info!(seed, player = %player.name, enemy = %enemy.name, "Simulating bout");

        let rng = PcgRng;
        let engine = CombatEngine::new(content.catalogs.env(&rng, &content.config));
        let result = engine.simulate(&player, enemy, seed);

        let summary = result.summary();
        info!(
            winner = %summary.winner,
            duration = summary.duration,
            player_damage = summary.player.damage_dealt,
            enemy_damage = summary.enemy.damage_dealt,
            entries = result.log.len(),
            "Bout finished"
        );

        let json = render_result(&result, self.pretty)?;
        match &self.output {
            Some(path) => write_output(path, &json),
            None => {
                let mut stdout = std::io::stdout().lock();
                writeln!(stdout, "{json}")?;
                Ok(())
            }
        }
    }
}

fn render_result(result: &CombatResult, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(result)
    } else {
        serde_json::to_string(result)
    };
    json.context("Failed to serialize bout result")
}

fn write_output(path: &Path, json: &str) -> Result<()> {
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write result: {}", path.display()))?;
    info!("Result written to {}", path.display());
    Ok(())
}

/// Seed for unseeded runs. Logged so the bout can be replayed with `--seed`.
fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos() as u64
}
