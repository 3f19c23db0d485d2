//! Platform-specific directory utilities.

use std::path::PathBuf;

/// Get the platform-specific log directory for `bout`
///
/// Follows platform conventions:
/// - macOS: `~/Library/Caches/bout/logs`
/// - Linux: `~/.cache/bout/logs` (or `$XDG_CACHE_HOME/bout/logs`)
/// - Windows: `%LOCALAPPDATA%\bout\logs`
/// - Fallback: `/tmp/bout/logs`
pub fn log_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "bout")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("/tmp/bout"))
        .join("logs")
}
