//! Runtime feature toggles.
//!
//! Operators can flip error logging and usage statistics while the bot is running
//! by editing the settings file. The file is re-read at every point of use, so
//! nothing here is cached.
//!
//! ```json
//! {
//!   "errorLogging": { "enabled": true },
//!   "commandStats": { "enabled": true, "trackServers": true, "trackUsers": false }
//! }
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Snapshot of the settings file at the time it was read.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeSettings {
    #[serde(default)]
    pub error_logging: ErrorLoggingSettings,
    /// Absent block means statistics are disabled.
    #[serde(default)]
    pub command_stats: Option<CommandStatsSettings>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ErrorLoggingSettings {
    #[serde(default = "enabled")]
    pub enabled: bool,
}

impl Default for ErrorLoggingSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommandStatsSettings {
    #[serde(default = "enabled")]
    pub enabled: bool,
    #[serde(default = "enabled")]
    pub track_servers: bool,
    #[serde(default = "enabled")]
    pub track_users: bool,
}

fn enabled() -> bool {
    true
}

impl RuntimeSettings {
    pub fn error_logging_enabled(&self) -> bool {
        self.error_logging.enabled
    }

    /// Returns the statistics options only when statistics are switched on.
    pub fn command_stats(&self) -> Option<&CommandStatsSettings> {
        self.command_stats.as_ref().filter(|stats| stats.enabled)
    }
}

/// Location of the settings file.
#[derive(Debug, Clone)]
pub struct SettingsSource {
    path: PathBuf,
}

impl SettingsSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the settings file as it is right now.
    ///
    /// A missing file yields the defaults (error logging on, statistics off). An
    /// unreadable or malformed file also yields the defaults and logs a warning, so a
    /// bad edit never takes the bot down.
    pub async fn load(&self) -> RuntimeSettings {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return RuntimeSettings::default();
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to read settings file {}: {}",
                    self.path.display(),
                    e
                );
                return RuntimeSettings::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(
                    "Failed to parse settings file {}: {}",
                    self.path.display(),
                    e
                );
                RuntimeSettings::default()
            }
        }
    }
}
