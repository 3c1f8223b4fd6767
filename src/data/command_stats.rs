use sea_orm::{
    sea_query::OnConflict, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};

use crate::{error::AppError, model::command_stats::CommandUsage};

pub struct CommandStatsRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CommandStatsRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the usage document for a command.
    ///
    /// # Arguments
    /// - `command_name`: Registered name of the command
    /// - `command_kind`: `slash` or `prefix`
    ///
    /// # Returns
    /// - `Ok(Some(CommandUsage))`: Command has been used before
    /// - `Ok(None)`: No usage recorded yet
    /// - `Err(AppError)`: Database error or undecodable counter list
    pub async fn find(
        &self,
        command_name: &str,
        command_kind: &str,
    ) -> Result<Option<CommandUsage>, AppError> {
        let entity = self.find_entity(command_name, command_kind).await?;

        entity.map(CommandUsage::from_entity).transpose()
    }

    /// Saves a usage document, inserting it when none exists for its key.
    ///
    /// Upserts on the unique (name, kind) pair, so concurrent first uses of a command
    /// never fail on the index. The caller's read-modify-write is not transactional;
    /// two concurrent saves can lose one update, which is acceptable for usage
    /// statistics.
    pub async fn save(&self, usage: &CommandUsage) -> Result<CommandUsage, AppError> {
        let model = entity::prelude::CommandStats::insert(entity::command_stats::ActiveModel {
            command_name: ActiveValue::Set(usage.command_name.clone()),
            command_kind: ActiveValue::Set(usage.command_kind.clone()),
            total_uses: ActiveValue::Set(usage.total_uses as i64),
            servers: ActiveValue::Set(serde_json::to_value(&usage.servers)?),
            users: ActiveValue::Set(serde_json::to_value(&usage.users)?),
            last_used_at: ActiveValue::Set(usage.last_used_at),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::columns([
                entity::command_stats::Column::CommandName,
                entity::command_stats::Column::CommandKind,
            ])
            .update_columns([
                entity::command_stats::Column::TotalUses,
                entity::command_stats::Column::Servers,
                entity::command_stats::Column::Users,
                entity::command_stats::Column::LastUsedAt,
            ])
            .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        CommandUsage::from_entity(model)
    }

    async fn find_entity(
        &self,
        command_name: &str,
        command_kind: &str,
    ) -> Result<Option<entity::command_stats::Model>, AppError> {
        let entity = entity::prelude::CommandStats::find()
            .filter(entity::command_stats::Column::CommandName.eq(command_name))
            .filter(entity::command_stats::Column::CommandKind.eq(command_kind))
            .one(self.db)
            .await?;

        Ok(entity)
    }
}
