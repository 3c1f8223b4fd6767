//! Serenity implementations of the reply and moderation seams.

use serenity::{
    all::{
        Cache, ChannelId, CreateAllowedMentions, CreateInteractionResponse,
        CreateInteractionResponseFollowup, CreateInteractionResponseMessage, CreateMessage,
        GuildId, Http, MessageId, UserId,
    },
    async_trait,
};
use std::sync::{Arc, OnceLock};

use crate::{
    bot::permissions::GuildHierarchy,
    commands::moderation::Moderation,
    dispatch::{
        event::ReplyTarget,
        reply::{Reply, Responder},
    },
    error::{ActionError, ResponderError},
};

struct Connection {
    http: Arc<Http>,
    cache: Arc<Cache>,
}

/// Talks to Discord through the client's HTTP handle and cache.
///
/// Created before the client so it can be shared with the dispatcher, and connected
/// once the client exists. Calls made before that fail with `NotConnected`.
#[derive(Default)]
pub struct SerenityPlatform {
    connection: OnceLock<Connection>,
}

impl SerenityPlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn connect(&self, http: Arc<Http>, cache: Arc<Cache>) {
        if self.connection.set(Connection { http, cache }).is_err() {
            tracing::warn!("Discord platform was already connected");
        }
    }

    fn connection(&self) -> Result<&Connection, ResponderError> {
        self.connection.get().ok_or(ResponderError::NotConnected)
    }

    async fn member_roles(
        &self,
        connection: &Connection,
        guild_id: u64,
        user_id: u64,
    ) -> Result<Vec<u64>, ActionError> {
        let member = connection
            .http
            .get_member(GuildId::new(guild_id), UserId::new(user_id))
            .await?;

        Ok(member.roles.iter().map(|role| role.get()).collect())
    }
}

/// Only user mentions ping. Reply text can carry user input (kick reasons, guild
/// names), so `@everyone`, `@here` and role mentions render as plain text.
fn allowed_mentions() -> CreateAllowedMentions {
    CreateAllowedMentions::new().all_users(true).replied_user(true)
}

fn response_message(reply: &Reply) -> CreateInteractionResponseMessage {
    CreateInteractionResponseMessage::new()
        .content(&reply.content)
        .ephemeral(reply.ephemeral)
        .allowed_mentions(allowed_mentions())
}

fn followup_message(reply: &Reply) -> CreateInteractionResponseFollowup {
    CreateInteractionResponseFollowup::new()
        .content(&reply.content)
        .ephemeral(reply.ephemeral)
        .allowed_mentions(allowed_mentions())
}

fn channel_message(reply: &Reply) -> CreateMessage {
    CreateMessage::new()
        .content(&reply.content)
        .allowed_mentions(allowed_mentions())
}

#[async_trait]
impl Responder for SerenityPlatform {
    async fn reply(
        &self,
        target: &ReplyTarget,
        reply: &Reply,
        followup: bool,
    ) -> Result<(), ResponderError> {
        let connection = self.connection()?;

        match target {
            ReplyTarget::Interaction { id, token } if !followup => {
                let response = CreateInteractionResponse::Message(response_message(reply));

                connection
                    .http
                    .create_interaction_response((*id).into(), token, &response, Vec::new())
                    .await?;
            }
            ReplyTarget::Interaction { token, .. } => {
                connection
                    .http
                    .create_followup_message(token, &followup_message(reply), Vec::new())
                    .await?;
            }
            ReplyTarget::Message {
                channel_id,
                message_id,
            } => {
                let channel_id = ChannelId::new(*channel_id);
                let message = channel_message(reply)
                    .reference_message((channel_id, MessageId::new(*message_id)));

                channel_id.send_message(&connection.http, message).await?;
            }
            ReplyTarget::None => {}
        }

        Ok(())
    }

    async fn send(&self, channel_id: u64, reply: &Reply) -> Result<(), ResponderError> {
        let connection = self.connection()?;
        ChannelId::new(channel_id)
            .send_message(&connection.http, channel_message(reply))
            .await?;

        Ok(())
    }
}

#[async_trait]
impl Moderation for SerenityPlatform {
    async fn can_moderate(&self, guild_id: u64, target_id: u64) -> Result<bool, ActionError> {
        let connection = self.connection()?;
        let bot_id = connection.cache.current_user().id.get();

        if bot_id == target_id {
            return Ok(false);
        }

        let guild = connection.http.get_guild(GuildId::new(guild_id)).await?;
        let bot_roles = self.member_roles(connection, guild_id, bot_id).await?;
        let target_roles = self.member_roles(connection, guild_id, target_id).await?;

        let hierarchy = GuildHierarchy::from_partial(&guild);

        Ok(hierarchy.outranks(bot_id, &bot_roles, target_id, &target_roles))
    }

    async fn kick(&self, guild_id: u64, target_id: u64, reason: &str) -> Result<(), ActionError> {
        let connection = self.connection()?;

        connection
            .http
            .kick_member(GuildId::new(guild_id), UserId::new(target_id), Some(reason))
            .await?;

        Ok(())
    }

    async fn ban(&self, guild_id: u64, target_id: u64, reason: &str) -> Result<(), ActionError> {
        let connection = self.connection()?;

        connection
            .http
            .ban_user(GuildId::new(guild_id), UserId::new(target_id), 0, Some(reason))
            .await?;

        Ok(())
    }
}
