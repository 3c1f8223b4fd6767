use migration::OnConflict;
use sea_orm::{ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

use crate::{
    error::AppError,
    model::gate_config::{GateConfig, GateSide, SetGateChannelParam},
};

pub struct GateConfigRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GateConfigRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds the greeting configuration for a guild.
    ///
    /// # Returns
    /// - `Ok(Some(GateConfig))`: Guild has a configuration record
    /// - `Ok(None)`: Guild has never been configured
    /// - `Err(AppError)`: Database error or malformed stored ID
    pub async fn find_by_guild_id(&self, guild_id: u64) -> Result<Option<GateConfig>, AppError> {
        let entity = entity::prelude::GateConfig::find()
            .filter(entity::gate_config::Column::GuildId.eq(guild_id.to_string()))
            .one(self.db)
            .await?;

        entity.map(GateConfig::from_entity).transpose()
    }

    /// Points one side of a guild's greetings at a channel and switches that side on.
    ///
    /// Creates the guild's record if it does not exist yet; the other side keeps its
    /// current values (or no channel and disabled for a new record).
    pub async fn set_channel(&self, param: SetGateChannelParam) -> Result<GateConfig, AppError> {
        let channel_id = Some(param.channel_id.to_string());
        let is_join = param.side == GateSide::Join;

        let (channel_column, enabled_column) = match param.side {
            GateSide::Join => (
                entity::gate_config::Column::JoinChannelId,
                entity::gate_config::Column::JoinEnabled,
            ),
            GateSide::Leave => (
                entity::gate_config::Column::LeaveChannelId,
                entity::gate_config::Column::LeaveEnabled,
            ),
        };

        let model = entity::prelude::GateConfig::insert(entity::gate_config::ActiveModel {
            guild_id: ActiveValue::Set(param.guild_id.to_string()),
            join_channel_id: ActiveValue::Set(if is_join { channel_id.clone() } else { None }),
            leave_channel_id: ActiveValue::Set(if is_join { None } else { channel_id }),
            join_enabled: ActiveValue::Set(is_join),
            leave_enabled: ActiveValue::Set(!is_join),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(entity::gate_config::Column::GuildId)
                .update_columns([channel_column, enabled_column])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        GateConfig::from_entity(model)
    }

    /// Writes a whole configuration record back, inserting it if missing.
    pub async fn save(&self, config: &GateConfig) -> Result<GateConfig, AppError> {
        let model = entity::prelude::GateConfig::insert(entity::gate_config::ActiveModel {
            guild_id: ActiveValue::Set(config.guild_id.to_string()),
            join_channel_id: ActiveValue::Set(config.join_channel_id.map(|id| id.to_string())),
            leave_channel_id: ActiveValue::Set(config.leave_channel_id.map(|id| id.to_string())),
            join_enabled: ActiveValue::Set(config.join_enabled),
            leave_enabled: ActiveValue::Set(config.leave_enabled),
            ..Default::default()
        })
        .on_conflict(
            OnConflict::column(entity::gate_config::Column::GuildId)
                .update_columns([
                    entity::gate_config::Column::JoinChannelId,
                    entity::gate_config::Column::LeaveChannelId,
                    entity::gate_config::Column::JoinEnabled,
                    entity::gate_config::Column::LeaveEnabled,
                ])
                .to_owned(),
        )
        .exec_with_returning(self.db)
        .await?;

        GateConfig::from_entity(model)
    }
}
