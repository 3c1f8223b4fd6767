use std::sync::Arc;

use crate::{commands, config::Config, dispatch::registry::CommandRegistry, error::AppError};

/// Connects to the Sqlite database and runs pending migrations.
///
/// Establishes a connection pool using the connection string from configuration, then
/// runs all pending SeaORM migrations so the `command_stats` and `gate_config` tables
/// exist before the bot accepts events.
///
/// # Arguments
/// - `config` - Application configuration containing the database URL
///
/// # Returns
/// - `Ok(DatabaseConnection)` - Connected database with migrations applied
/// - `Err(AppError)` - Failed to connect to database or run migrations
pub async fn connect_to_database(config: &Config) -> Result<sea_orm::DatabaseConnection, AppError> {
    use migration::{Migrator, MigratorTrait};
    use sea_orm::{ConnectOptions, Database};

    let mut opt = ConnectOptions::new(&config.database_url);
    opt.sqlx_logging(false);

    let db = Database::connect(opt).await?;

    Migrator::up(&db, None).await?;

    Ok(db)
}

/// Creates the command registry with every builtin handler registered.
pub async fn build_registry() -> Arc<CommandRegistry> {
    let registry = Arc::new(CommandRegistry::new());

    let builtins = commands::builtins();
    let count = builtins.len();
    for descriptor in builtins {
        registry.register(descriptor).await;
    }

    tracing::info!("Registered {} builtin handlers", count);

    registry
}
