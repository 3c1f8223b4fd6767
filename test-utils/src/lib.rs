//! Gatebot Test Utils
//!
//! Provides shared testing utilities for the gatebot workspace. This crate offers a builder
//! for creating test contexts backed by in-memory SQLite databases, factories for store
//! records, and factories for Serenity API objects.
//!
//! # Overview
//!
//! - **TestBuilder**: Fluent builder for configuring test environments
//! - **TestContext**: Test environment containing the database connection
//! - **TestError**: Error types that can occur during test setup
//! - **factory**: Store record factories (gate configuration, command stats)
//! - **serenity**: Serenity object factories (guilds, roles, users)
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::builder::TestBuilder;
//! use entity::prelude::GateConfig;
//!
//! #[tokio::test]
//! async fn test_gate_config() -> Result<(), TestError> {
//!     let test = TestBuilder::new()
//!         .with_table(GateConfig)
//!         .build()
//!         .await?;
//!
//!     let db = test.db.unwrap();
//!     // Perform database operations...
//!
//!     Ok(())
//! }
//! ```

pub mod builder;
pub mod context;
pub mod error;
pub mod factory;
pub mod serenity;
