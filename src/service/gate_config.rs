//! Join/leave greeting configuration.

use sea_orm::DatabaseConnection;

use crate::{
    data::gate_config::GateConfigRepository,
    error::AppError,
    model::gate_config::{GateConfig, GateSide, SetGateChannelParam},
};

/// Result of flipping one side of a guild's greetings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// No channel has been set for that side yet.
    NoChannel,
    /// The side is now on (`true`) or off (`false`).
    Toggled(bool),
}

pub struct GateConfigService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> GateConfigService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Points one side at a channel and switches it on.
    pub async fn set_channel(&self, param: SetGateChannelParam) -> Result<GateConfig, AppError> {
        GateConfigRepository::new(self.db).set_channel(param).await
    }

    /// Flips one side on or off. Requires a channel to be set for that side first.
    pub async fn toggle(&self, guild_id: u64, side: GateSide) -> Result<ToggleOutcome, AppError> {
        let repo = GateConfigRepository::new(self.db);

        let Some(mut config) = repo.find_by_guild_id(guild_id).await? else {
            return Ok(ToggleOutcome::NoChannel);
        };

        if config.channel(side).is_none() {
            return Ok(ToggleOutcome::NoChannel);
        }

        let enabled = !config.enabled(side);
        config.set_enabled(side, enabled);
        repo.save(&config).await?;

        Ok(ToggleOutcome::Toggled(enabled))
    }

    /// Channel to greet in for a membership event, if that side is configured and on.
    pub async fn active_channel(
        &self,
        guild_id: u64,
        side: GateSide,
    ) -> Result<Option<u64>, AppError> {
        let config = GateConfigRepository::new(self.db)
            .find_by_guild_id(guild_id)
            .await?;

        Ok(config.and_then(|config| config.active_channel(side)))
    }
}
