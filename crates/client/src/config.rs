//! Client configuration read from the process environment.
use std::env;
use std::path::PathBuf;

/// Settings shared by every subcommand. Command-line flags take precedence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClientConfig {
    pub data_dir: Option<PathBuf>,
    pub seed: Option<u64>,
    pub log_dir: Option<PathBuf>,
    pub log_to_file: bool,
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `CONTENT_DATA_DIR` - Content directory (default: embedded content)
    /// - `BOUT_SEED` - Bout seed (default: derived from the clock)
    /// - `BOUT_LOG_DIR` - Log directory (default: platform-specific)
    /// - `BOUT_LOG_FILE` - Write logs to a file as well as stderr (default: false)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self {
            data_dir: lookup("CONTENT_DATA_DIR").map(PathBuf::from),
            seed: parse_value(lookup("BOUT_SEED")),
            log_dir: lookup("BOUT_LOG_DIR").map(PathBuf::from),
            log_to_file: false,
        };

        // Accept just setting the variable without a value as "true"
        if let Some(raw) = lookup("BOUT_LOG_FILE") {
            config.log_to_file = raw.parse().unwrap_or(raw.is_empty());
        }

        config
    }

    /// Data directory from the flag, then the environment.
    pub fn data_dir(&self, flag: Option<PathBuf>) -> Option<PathBuf> {
        flag.or_else(|| self.data_dir.clone())
    }

    /// Seed from the flag, then the environment.
    pub fn seed(&self, flag: Option<u64>) -> Option<u64> {
        flag.or(self.seed)
    }
}

fn parse_value<T>(raw: Option<String>) -> Option<T>
where
    T: std::str::FromStr,
{
    raw?.trim().parse().ok()
}
