//! List the ids available to `simulate`.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use super::Content;
use crate::config::ClientConfig;

/// List technique, status and enemy ids
#[derive(Parser)]
pub struct Catalog {
    /// Content directory (defaults to the embedded content)
    #[arg(short, long, value_name = "DIR")]
    data_dir: Option<PathBuf>,
}

impl Catalog {
    pub fn execute(self, config: &ClientConfig) -> Result<()> {
        let data_dir = config.data_dir(self.data_dir);
        let content = Content::load(data_dir.as_deref())?;

        let mut stdout = std::io::stdout().lock();
        write_catalog(&mut stdout, &content)?;
        Ok(())
    }
}

fn write_catalog(out: &mut impl Write, content: &Content) -> std::io::Result<()> {
    writeln!(out, "Techniques:")?;
    for technique in content.catalogs.techniques.iter() {
        writeln!(
            out,
            "  {:<16} {:<8} cd {:>4.1}  qi {:>4.1}  {}",
            technique.id.as_str(),
            technique.kind.as_ref(),
            technique.cooldown,
            technique.qi_cost_base,
            technique.name
        )?;
    }

    writeln!(out, "Statuses:")?;
    for status in content.catalogs.statuses.iter() {
        writeln!(
            out,
            "  {:<16} {:<8} {}",
            status.id.as_str(),
            status.kind.as_ref(),
            status.name
        )?;
    }

    writeln!(out, "Enemies:")?;
    for enemy in content.roster.iter() {
        writeln!(
            out,
            "  {:<16} hp {:>4}  {}",
            enemy.id, enemy.stats.max_hp, enemy.name
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_embedded_content() {
        let content = Content::load(None).unwrap();
        let mut buffer = Vec::new();
        write_catalog(&mut buffer, &content).unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.starts_with("Techniques:"));
        assert!(text.contains("iron_fist"));
        assert!(text.contains("stun"));
        assert!(text.contains("mountain_bandit"));
    }
}
