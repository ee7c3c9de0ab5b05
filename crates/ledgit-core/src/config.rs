//! Configuration module for Ledgit.
//!
//! Provides typed configuration structs that map to the YAML configuration
//! file, with loading, validation of defaults, and platform-appropriate
//! default paths.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Top-level configuration for Ledgit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub sync: SyncTuning,
    pub logging: LoggingConfig,
}

/// Timing and bound knobs for the sync subsystem.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncTuning {
    /// How long the success phase is shown before the machine auto-resets.
    pub success_display_ms: u64,
    /// On-screen lifetime of a sync notification.
    pub notification_duration_ms: u64,
    /// Maximum notifications retained by the store (oldest evicted first).
    pub max_visible_notifications: usize,
}

impl Default for SyncTuning {
    fn default() -> Self {
        Self {
            success_display_ms: 2_000,
            notification_duration_ms: 5_000,
            max_visible_notifications: 3,
        }
    }
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
    /// Path to the log file.
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("ledgit");
        Self {
            level: "info".to_string(),
            file: data_dir.join("ledgit.log"),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/ledgit/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("ledgit")
            .join("config.yaml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.sync.success_display_ms, 2_000);
        assert_eq!(config.sync.notification_duration_ms, 5_000);
        assert_eq!(config.sync.max_visible_notifications, 3);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_from_yaml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "sync:\n  success_display_ms: 1500\n  notification_duration_ms: 4000\n  max_visible_notifications: 3\nlogging:\n  level: debug\n  file: /tmp/ledgit.log\n"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.sync.success_display_ms, 1_500);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_load_or_default_on_missing_file() {
        let config = Config::load_or_default(Path::new("/nonexistent/ledgit.yaml"));
        assert_eq!(config.sync.max_visible_notifications, 3);
    }

    #[test]
    fn test_default_path_ends_with_config_yaml() {
        let path = Config::default_path();
        assert!(path.ends_with("ledgit/config.yaml"));
    }
}
