//! Gate configuration factory for creating per-guild join/leave settings.

use crate::factory::helpers::next_id;
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test gate configuration records.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::gate_config::GateConfigFactory;
///
/// let config = GateConfigFactory::new(&db)
///     .guild_id("987654321")
///     .join_channel("111")
///     .join_enabled(true)
///     .build()
///     .await?;
/// ```
pub struct GateConfigFactory<'a> {
    db: &'a DatabaseConnection,
    guild_id: String,
    join_channel_id: Option<String>,
    leave_channel_id: Option<String>,
    join_enabled: bool,
    leave_enabled: bool,
}

impl<'a> GateConfigFactory<'a> {
    /// Creates a new GateConfigFactory with default values.
    ///
    /// Defaults:
    /// - guild_id: auto-incremented snowflake
    /// - channels: `None`
    /// - enabled flags: `false`
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            guild_id: next_id().to_string(),
            join_channel_id: None,
            leave_channel_id: None,
            join_enabled: false,
            leave_enabled: false,
        }
    }

    pub fn guild_id(mut self, guild_id: impl Into<String>) -> Self {
        self.guild_id = guild_id.into();
        self
    }

    pub fn join_channel(mut self, channel_id: impl Into<String>) -> Self {
        self.join_channel_id = Some(channel_id.into());
        self
    }

    pub fn leave_channel(mut self, channel_id: impl Into<String>) -> Self {
        self.leave_channel_id = Some(channel_id.into());
        self
    }

    pub fn join_enabled(mut self, enabled: bool) -> Self {
        self.join_enabled = enabled;
        self
    }

    pub fn leave_enabled(mut self, enabled: bool) -> Self {
        self.leave_enabled = enabled;
        self
    }

    /// Builds and inserts the gate configuration into the database.
    ///
    /// # Returns
    /// - `Ok(entity::gate_config::Model)` - Created record
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::gate_config::Model, DbErr> {
        entity::gate_config::ActiveModel {
            id: ActiveValue::NotSet,
            guild_id: ActiveValue::Set(self.guild_id),
            join_channel_id: ActiveValue::Set(self.join_channel_id),
            leave_channel_id: ActiveValue::Set(self.leave_channel_id),
            join_enabled: ActiveValue::Set(self.join_enabled),
            leave_enabled: ActiveValue::Set(self.leave_enabled),
        }
        .insert(self.db)
        .await
    }
}

/// Creates a gate configuration with default values.
///
/// Shorthand for `GateConfigFactory::new(db).build().await`.
pub async fn create_gate_config(
    db: &DatabaseConnection,
) -> Result<entity::gate_config::Model, DbErr> {
    GateConfigFactory::new(db).build().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TestBuilder;
    use entity::prelude::*;

    #[tokio::test]
    async fn creates_gate_config_with_defaults() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_table(GateConfig)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let config = create_gate_config(db).await?;

        assert!(!config.guild_id.is_empty());
        assert!(config.join_channel_id.is_none());
        assert!(!config.join_enabled);
        assert!(!config.leave_enabled);

        Ok(())
    }

    #[tokio::test]
    async fn creates_gate_config_with_custom_values() -> Result<(), DbErr> {
        let test = TestBuilder::new()
            .with_table(GateConfig)
            .build()
            .await
            .unwrap();
        let db = test.db.as_ref().unwrap();

        let config = GateConfigFactory::new(db)
            .guild_id("987654321")
            .leave_channel("555")
            .leave_enabled(true)
            .build()
            .await?;

        assert_eq!(config.guild_id, "987654321");
        assert_eq!(config.leave_channel_id, Some("555".to_string()));
        assert!(config.leave_enabled);
        assert!(!config.join_enabled);

        Ok(())
    }
}
