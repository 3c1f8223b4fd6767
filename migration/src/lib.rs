pub use sea_orm_migration::prelude::*;

mod m20251220_000001_create_gate_config_table;
mod m20251220_000002_create_command_stats_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20251220_000001_create_gate_config_table::Migration),
            Box::new(m20251220_000002_create_command_stats_table::Migration),
        ]
    }
}
