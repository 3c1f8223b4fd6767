//! Command usage statistics.
//!
//! One usage document exists per (command name, command kind). Each document keeps
//! a running total plus per-server and per-user counter lists. The lists hold at most
//! one entry per ID and are kept sorted by use count, highest first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A single per-server or per-user counter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageCounter {
    pub id: String,
    /// Display name at the time of the most recent use.
    pub name: String,
    pub uses: u64,
}

/// Usage document for one command.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandUsage {
    pub command_name: String,
    pub command_kind: String,
    pub total_uses: u64,
    pub servers: Vec<UsageCounter>,
    pub users: Vec<UsageCounter>,
    pub last_used_at: DateTime<Utc>,
}

/// A single successful invocation to be counted.
#[derive(Debug, Clone)]
pub struct RecordUsageParam {
    pub command_name: String,
    /// `slash` or `prefix`.
    pub command_kind: String,
    pub user_id: u64,
    pub user_tag: String,
    /// Guild ID and name; `None` for direct messages, which are never counted per server.
    pub guild: Option<(u64, String)>,
}

/// Which counter lists to update for an invocation.
#[derive(Debug, Clone, Copy)]
pub struct UsageTracking {
    pub servers: bool,
    pub users: bool,
}

impl CommandUsage {
    /// Creates an empty usage document.
    pub fn new(command_name: String, command_kind: String, now: DateTime<Utc>) -> Self {
        Self {
            command_name,
            command_kind,
            total_uses: 0,
            servers: Vec::new(),
            users: Vec::new(),
            last_used_at: now,
        }
    }

    /// Converts an entity model to a usage domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(CommandUsage)` - The converted domain model
    /// - `Err(AppError::JsonErr)` - A stored counter list is not a valid counter array
    pub fn from_entity(entity: entity::command_stats::Model) -> Result<Self, AppError> {
        Ok(Self {
            command_name: entity.command_name,
            command_kind: entity.command_kind,
            total_uses: entity.total_uses.max(0) as u64,
            servers: serde_json::from_value(entity.servers)?,
            users: serde_json::from_value(entity.users)?,
            last_used_at: entity.last_used_at,
        })
    }

    /// Counts one invocation.
    ///
    /// Always bumps the total and the last-used timestamp. The per-server list is only
    /// touched for guild invocations with server tracking on, the per-user list only
    /// with user tracking on. Display names are refreshed on every use.
    pub fn record(&mut self, param: &RecordUsageParam, tracking: UsageTracking, now: DateTime<Utc>) {
        self.total_uses += 1;
        self.last_used_at = now;

        if tracking.servers {
            if let Some((guild_id, guild_name)) = &param.guild {
                bump(&mut self.servers, guild_id.to_string(), guild_name);
            }
        }

        if tracking.users {
            bump(&mut self.users, param.user_id.to_string(), &param.user_tag);
        }
    }
}

fn bump(counters: &mut Vec<UsageCounter>, id: String, name: &str) {
    match counters.iter_mut().find(|counter| counter.id == id) {
        Some(counter) => {
            counter.uses += 1;
            counter.name = name.to_string();
        }
        None => counters.push(UsageCounter {
            id,
            name: name.to_string(),
            uses: 1,
        }),
    }

    // Stable sort keeps earlier entries ahead on ties
    counters.sort_by(|a, b| b.uses.cmp(&a.uses));
}
