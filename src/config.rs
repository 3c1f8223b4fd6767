use std::path::PathBuf;

use crate::error::{config::ConfigError, AppError};

const DEFAULT_DATABASE_URL: &str = "sqlite://gatebot.db?mode=rwc";
const DEFAULT_COMMAND_PREFIX: &str = "!";
const DEFAULT_ERRORS_DIR: &str = "errors";
const DEFAULT_SETTINGS_PATH: &str = "settings.json";
const DEFAULT_HANDLERS_DIR: &str = "handlers";

/// Static bot configuration loaded once from the environment.
///
/// Feature toggles that operators flip while the bot is running live in
/// `RuntimeSettings` instead, which is re-read at each point of use.
pub struct Config {
    pub discord_bot_token: String,
    pub database_url: String,

    pub owner_id: u64,
    pub admin_ids: Vec<u64>,
    pub dev_guild_ids: Vec<u64>,

    /// Prefix for message commands. An empty prefix disables them.
    pub command_prefix: String,
    pub command_logs_channel_id: Option<u64>,

    pub errors_dir: PathBuf,
    pub settings_path: PathBuf,
    pub handlers_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            discord_bot_token: required("DISCORD_BOT_TOKEN")?,
            database_url: optional("DATABASE_URL")
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            owner_id: parse_id("BOT_OWNER_ID", &required("BOT_OWNER_ID")?)?,
            admin_ids: parse_id_list("BOT_ADMIN_IDS")?,
            dev_guild_ids: parse_id_list("DEV_GUILD_IDS")?,
            command_prefix: std::env::var("COMMAND_PREFIX")
                .unwrap_or_else(|_| DEFAULT_COMMAND_PREFIX.to_string()),
            command_logs_channel_id: optional("COMMAND_LOGS_CHANNEL_ID")
                .map(|value| parse_id("COMMAND_LOGS_CHANNEL_ID", &value))
                .transpose()?,
            errors_dir: optional("ERRORS_DIR")
                .unwrap_or_else(|| DEFAULT_ERRORS_DIR.to_string())
                .into(),
            settings_path: optional("SETTINGS_PATH")
                .unwrap_or_else(|| DEFAULT_SETTINGS_PATH.to_string())
                .into(),
            handlers_dir: optional("HANDLERS_DIR")
                .unwrap_or_else(|| DEFAULT_HANDLERS_DIR.to_string())
                .into(),
        })
    }
}

fn required(name: &str) -> Result<String, ConfigError> {
    optional(name).ok_or_else(|| ConfigError::MissingEnvVar(name.to_string()))
}

/// Reads an environment variable, treating an empty value as unset.
fn optional(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_id(name: &str, value: &str) -> Result<u64, ConfigError> {
    value.trim().parse::<u64>().map_err(|_| ConfigError::InvalidId {
        name: name.to_string(),
        value: value.to_string(),
    })
}

/// Parses a comma separated list of Discord IDs, e.g. `"123,456"`.
fn parse_id_list(name: &str) -> Result<Vec<u64>, ConfigError> {
    let Some(raw) = optional(name) else {
        return Ok(Vec::new());
    };

    raw.split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| parse_id(name, value))
        .collect()
}
