use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CommandStats::Table)
                    .if_not_exists()
                    .col(pk_auto(CommandStats::Id))
                    .col(string(CommandStats::CommandName))
                    .col(string(CommandStats::CommandKind))
                    .col(big_integer(CommandStats::TotalUses).default(0))
                    .col(json(CommandStats::Servers))
                    .col(json(CommandStats::Users))
                    .col(timestamp(CommandStats::LastUsedAt))
                    .to_owned(),
            )
            .await?;

        // One usage document per (command name, command kind)
        manager
            .create_index(
                Index::create()
                    .name("idx_command_stats_name_kind")
                    .table(CommandStats::Table)
                    .col(CommandStats::CommandName)
                    .col(CommandStats::CommandKind)
                    .unique()
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_command_stats_name_kind")
                    .table(CommandStats::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CommandStats::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum CommandStats {
    Table,
    Id,
    CommandName,
    CommandKind,
    TotalUses,
    Servers,
    Users,
    LastUsedAt,
}
