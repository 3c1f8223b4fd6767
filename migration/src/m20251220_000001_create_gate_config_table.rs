use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GateConfig::Table)
                    .if_not_exists()
                    .col(pk_auto(GateConfig::Id))
                    .col(string_uniq(GateConfig::GuildId))
                    .col(string_null(GateConfig::JoinChannelId))
                    .col(string_null(GateConfig::LeaveChannelId))
                    .col(boolean(GateConfig::JoinEnabled).default(false))
                    .col(boolean(GateConfig::LeaveEnabled).default(false))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(GateConfig::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum GateConfig {
    Table,
    Id,
    GuildId,
    JoinChannelId,
    LeaveChannelId,
    JoinEnabled,
    LeaveEnabled,
}
