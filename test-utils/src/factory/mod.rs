//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating store records with sensible defaults,
//! reducing boilerplate in tests. Each record type has its own factory module with both a
//! `Factory` struct for customization and a `create_*` convenience function.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     let config = factory::create_gate_config(&db).await?;
//!     let stats = factory::create_command_stats(&db, "ban", "slash").await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Available Factories
//!
//! - `gate_config` - Create per-guild join/leave configuration records
//! - `command_stats` - Create command usage documents
//! - `helpers` - Shared ID generation

pub mod command_stats;
pub mod gate_config;
pub mod helpers;

pub use command_stats::create_command_stats;
pub use gate_config::create_gate_config;
