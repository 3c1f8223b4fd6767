//! Test factories for creating Serenity API objects.
//!
//! This module provides factory functions for creating mock Serenity structs
//! (Guild, Role, User) for testing purposes. These factories create
//! valid Serenity objects by deserializing JSON, simulating what Discord's API
//! would return.
//!
//! # Overview
//!
//! When testing code that interacts with Discord's API via Serenity, you often
//! need to create mock Serenity structs. These factories provide a consistent
//! way to create these objects with sensible defaults while allowing customization
//! of key fields.
//!
//! # Usage
//!
//! ```rust,ignore
//! use test_utils::serenity::{guild::create_test_guild, role::create_test_role};
//!
//! #[tokio::test]
//! async fn test_guild_sync() {
//!     // Create a test guild owned by user 42
//!     let mut guild = create_test_guild(123456789, "Test Guild", 42);
//!
//!     // Create test roles
//!     let admin_role = create_test_role(111111111, "Admin", 10, Permissions::ADMINISTRATOR);
//!     let member_role = create_test_role(222222222, "Member", 1, Permissions::empty());
//!
//!     guild.roles.insert(admin_role.id, admin_role);
//!     guild.roles.insert(member_role.id, member_role);
//! }
//! ```
//!
//! # Available Factories
//!
//! - `guild::create_test_guild` - Create Serenity Guild objects
//! - `role::create_test_role` - Create Serenity Role objects
//! - `user::create_test_user` - Create Serenity User objects

pub mod guild;
pub mod role;
pub mod user;

// Re-export commonly used functions for convenience
pub use guild::create_test_guild;
pub use role::create_test_role;
pub use user::create_test_user;
