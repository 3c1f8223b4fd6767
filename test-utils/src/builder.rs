use entity::prelude::*;
use sea_orm::{
    sea_query::{Index, IndexCreateStatement, TableCreateStatement},
    EntityTrait, Schema,
};

use crate::{context::TestContext, error::TestError};

/// Builder for creating test contexts with customizable database schemas.
///
/// Provides a fluent interface for configuring test environments with in-memory SQLite
/// databases. Use the builder pattern to add entity tables, then call `build()` to
/// create the configured test context.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::builder::TestBuilder;
/// use entity::prelude::GateConfig;
///
/// let test = TestBuilder::new()
///     .with_table(GateConfig)
///     .with_command_stats_table()
///     .build()
///     .await?;
/// ```
pub struct TestBuilder {
    /// CREATE TABLE statements executed in insertion order during `build()`.
    tables: Vec<TableCreateStatement>,
    /// CREATE INDEX statements executed after every table exists.
    indexes: Vec<IndexCreateStatement>,
}

impl TestBuilder {
    /// Creates a new test builder with no tables configured.
    ///
    /// # Returns
    /// - New `TestBuilder` instance with empty table configuration
    pub fn new() -> Self {
        Self {
            tables: Vec::new(),
            indexes: Vec::new(),
        }
    }

    /// Adds an entity table to the test database schema.
    ///
    /// Generates a CREATE TABLE statement from the provided SeaORM entity using SQLite
    /// backend syntax. The table will be created when `build()` is called.
    ///
    /// # Arguments
    /// - `entity` - SeaORM entity model implementing `EntityTrait` to create table for
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_table<E: EntityTrait>(mut self, entity: E) -> Self {
        let schema = Schema::new(sea_orm::DbBackend::Sqlite);
        self.tables.push(schema.create_table_from_entity(entity));
        self
    }

    /// Adds an index to the test database schema.
    ///
    /// Entities cannot declare composite unique keys, so tables that rely on one for
    /// upserts add it here the way their migration does.
    ///
    /// # Arguments
    /// - `index` - CREATE INDEX statement, executed after all tables are created
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_index(mut self, index: IndexCreateStatement) -> Self {
        self.indexes.push(index);
        self
    }

    /// Adds the `command_stats` table with its unique (name, kind) index.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_command_stats_table(self) -> Self {
        self.with_table(CommandStats).with_index(
            Index::create()
                .name("idx_command_stats_name_kind")
                .table(CommandStats)
                .col(entity::command_stats::Column::CommandName)
                .col(entity::command_stats::Column::CommandKind)
                .unique()
                .to_owned(),
        )
    }

    /// Adds every table the bot reads or writes.
    ///
    /// Use this when testing the dispatcher end to end, where both the usage
    /// recorder and the gate configuration commands touch the store.
    ///
    /// # Returns
    /// - `Self` - Builder instance for method chaining
    pub fn with_bot_tables(self) -> Self {
        self.with_table(GateConfig).with_command_stats_table()
    }

    /// Builds and initializes the test context with configured tables.
    ///
    /// # Returns
    /// - `Ok(TestContext)` - Fully initialized test context with database and tables ready
    /// - `Err(TestError::Database)`- Failed to connect to database or create tables or indexes
    pub async fn build(self) -> Result<TestContext, TestError> {
        let mut setup = TestContext::new();

        setup.with_tables(self.tables).await?;
        setup.with_indexes(self.indexes).await?;

        Ok(setup)
    }
}

impl Default for TestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
