//! Command stats factory for creating usage documents.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test command usage documents.
///
/// Counter lists are stored as raw JSON so tests can seed documents in states
/// the recorder itself would never write (unsorted lists, for example).
pub struct CommandStatsFactory<'a> {
    db: &'a DatabaseConnection,
    command_name: String,
    command_kind: String,
    total_uses: i64,
    servers: serde_json::Value,
    users: serde_json::Value,
}

impl<'a> CommandStatsFactory<'a> {
    /// Creates a new CommandStatsFactory with zero uses and empty counter lists.
    pub fn new(db: &'a DatabaseConnection, command_name: &str, command_kind: &str) -> Self {
        Self {
            db,
            command_name: command_name.to_string(),
            command_kind: command_kind.to_string(),
            total_uses: 0,
            servers: serde_json::json!([]),
            users: serde_json::json!([]),
        }
    }

    pub fn total_uses(mut self, total_uses: i64) -> Self {
        self.total_uses = total_uses;
        self
    }

    /// Sets the per-server counter list, e.g.
    /// `json!([{"id": "1", "name": "Guild", "uses": 3}])`.
    pub fn servers(mut self, servers: serde_json::Value) -> Self {
        self.servers = servers;
        self
    }

    /// Sets the per-user counter list, e.g.
    /// `json!([{"id": "1", "name": "user#0001", "uses": 3}])`.
    pub fn users(mut self, users: serde_json::Value) -> Self {
        self.users = users;
        self
    }

    /// Builds and inserts the usage document into the database.
    pub async fn build(self) -> Result<entity::command_stats::Model, DbErr> {
        entity::command_stats::ActiveModel {
            id: ActiveValue::NotSet,
            command_name: ActiveValue::Set(self.command_name),
            command_kind: ActiveValue::Set(self.command_kind),
            total_uses: ActiveValue::Set(self.total_uses),
            servers: ActiveValue::Set(self.servers),
            users: ActiveValue::Set(self.users),
            last_used_at: ActiveValue::Set(Utc::now()),
        }
        .insert(self.db)
        .await
    }
}

/// Creates an empty usage document for the given command.
pub async fn create_command_stats(
    db: &DatabaseConnection,
    command_name: &str,
    command_kind: &str,
) -> Result<entity::command_stats::Model, DbErr> {
    CommandStatsFactory::new(db, command_name, command_kind)
        .build()
        .await
}
