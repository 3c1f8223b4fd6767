//! Usage statistics recorder.

use chrono::Utc;
use sea_orm::DatabaseConnection;

use crate::{
    data::command_stats::CommandStatsRepository,
    error::AppError,
    model::command_stats::{CommandUsage, RecordUsageParam, UsageTracking},
};

pub struct CommandStatsService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CommandStatsService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Counts one successful invocation against the command's usage document.
    ///
    /// Creates the document on first use. Reads and writes without a transaction,
    /// so concurrent invocations of the same command may lose an update.
    ///
    /// # Returns
    /// - `Ok(CommandUsage)` - The document as saved
    /// - `Err(AppError)` - Store failure; the caller logs and drops it
    pub async fn record(
        &self,
        param: RecordUsageParam,
        tracking: UsageTracking,
    ) -> Result<CommandUsage, AppError> {
        let repo = CommandStatsRepository::new(self.db);
        let now = Utc::now();

        let mut usage = repo
            .find(&param.command_name, &param.command_kind)
            .await?
            .unwrap_or_else(|| {
                CommandUsage::new(param.command_name.clone(), param.command_kind.clone(), now)
            });

        usage.record(&param, tracking, now);

        repo.save(&usage).await
    }

    /// Current usage document for a command, if it was ever used.
    pub async fn get(
        &self,
        command_name: &str,
        command_kind: &str,
    ) -> Result<Option<CommandUsage>, AppError> {
        CommandStatsRepository::new(self.db)
            .find(command_name, command_kind)
            .await
    }
}
