use serenity::all::{Context, EventHandler, GuildId, Interaction, Member, Message, Ready, User};
use serenity::async_trait;
use std::sync::Arc;

use crate::dispatch::dispatcher::Dispatcher;

pub mod interaction;
pub mod member;
pub mod message;
pub mod ready;

/// Discord bot event handler
///
/// Converts gateway events into inbound events and hands them to the dispatcher.
pub struct Handler {
    pub dispatcher: Arc<Dispatcher>,
    pub command_prefix: String,
}

impl Handler {
    pub fn new(dispatcher: Arc<Dispatcher>, command_prefix: String) -> Self {
        Self {
            dispatcher,
            command_prefix,
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    /// Called when the bot is ready and connected to Discord
    async fn ready(&self, ctx: Context, ready: Ready) {
        ready::handle_ready(&self.dispatcher, ctx, ready).await;
    }

    /// Called for slash commands, component interactions and modal submissions
    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        interaction::handle_interaction_create(&self.dispatcher, ctx, interaction).await;
    }

    /// Called when a message is sent in a channel
    async fn message(&self, ctx: Context, message: Message) {
        message::handle_message(&self.dispatcher, &self.command_prefix, ctx, message).await;
    }

    /// Called when a member joins a guild
    async fn guild_member_addition(&self, ctx: Context, new_member: Member) {
        member::handle_guild_member_addition(&self.dispatcher, ctx, new_member).await;
    }

    /// Called when a member leaves a guild
    async fn guild_member_removal(
        &self,
        ctx: Context,
        guild_id: GuildId,
        user: User,
        member_data_if_available: Option<Member>,
    ) {
        member::handle_guild_member_removal(
            &self.dispatcher,
            ctx,
            guild_id,
            user,
            member_data_if_available,
        )
        .await;
    }
}
