//! Discord integration.
//!
//! The handler converts gateway events into inbound events for the dispatcher.
//! `SerenityPlatform` is the other direction: it answers events, posts messages and
//! performs moderation actions through the client's HTTP handle.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Guild data for names, roles and permission computation
//! - `GUILD_MESSAGES` / `DIRECT_MESSAGES` - Prefix commands
//! - `MESSAGE_CONTENT` - Reading the prefix command text (privileged intent)
//! - `GUILD_MEMBERS` - Member join and leave events (privileged intent)
//!
//! Privileged intents must be enabled in the Discord Developer Portal for the bot
//! application.

pub mod handler;
pub mod permissions;
pub mod platform;
pub mod start;
