use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "command_stats")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub command_name: String,
    pub command_kind: String,
    pub total_uses: i64,
    pub servers: Json,
    pub users: Json,
    pub last_used_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
