//! Kick and ban commands.
//!
//! Both commands go through the [`Moderation`] trait so they can be exercised
//! without a gateway connection.

use serenity::{all::Permissions, async_trait};
use std::sync::Arc;

use crate::{
    dispatch::{
        action::{Action, ActionContext},
        descriptor::{HandlerDescriptor, Namespace, OptionKind, OptionSpec},
        reply::Reply,
    },
    error::ActionError,
};

const DEFAULT_REASON: &str = "No reason provided";

/// Member moderation on the platform.
#[async_trait]
pub trait Moderation: Send + Sync {
    /// Whether the bot outranks `target_id` in the guild's role hierarchy and may act
    /// on them.
    async fn can_moderate(&self, guild_id: u64, target_id: u64) -> Result<bool, ActionError>;

    async fn kick(&self, guild_id: u64, target_id: u64, reason: &str) -> Result<(), ActionError>;

    async fn ban(&self, guild_id: u64, target_id: u64, reason: &str) -> Result<(), ActionError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModerationKind {
    Kick,
    Ban,
}

impl ModerationKind {
    fn verb(&self) -> &'static str {
        match self {
            ModerationKind::Kick => "kick",
            ModerationKind::Ban => "ban",
        }
    }

    fn past_tense(&self) -> &'static str {
        match self {
            ModerationKind::Kick => "kicked",
            ModerationKind::Ban => "banned",
        }
    }

    fn permission(&self) -> Permissions {
        match self {
            ModerationKind::Kick => Permissions::KICK_MEMBERS,
            ModerationKind::Ban => Permissions::BAN_MEMBERS,
        }
    }
}

/// Removes the `target` member from the guild.
pub struct ModerateMember {
    kind: ModerationKind,
}

impl ModerateMember {
    pub fn new(kind: ModerationKind) -> Self {
        Self { kind }
    }
}

#[async_trait]
impl Action for ModerateMember {
    async fn execute(&self, ctx: &ActionContext) -> Result<(), ActionError> {
        let guild_id = ctx.guild_id()?;
        let target_id = ctx.args.require_user("target")?;
        let reason = ctx
            .args
            .string("reason")
            .filter(|reason| !reason.trim().is_empty())
            .unwrap_or(DEFAULT_REASON);

        let moderation = &ctx.state.moderation;

        if !moderation.can_moderate(guild_id, target_id).await? {
            return ctx
                .reply(Reply::new(format!(
                    "I cannot {} this user (they may have a higher role).",
                    self.kind.verb()
                )))
                .await;
        }

        match self.kind {
            ModerationKind::Kick => moderation.kick(guild_id, target_id, reason).await?,
            ModerationKind::Ban => moderation.ban(guild_id, target_id, reason).await?,
        }

        tracing::info!(
            "User {} {} {} from guild {}: {}",
            ctx.event.actor.id,
            self.kind.past_tense(),
            target_id,
            guild_id,
            reason
        );

        ctx.reply(Reply::new(format!(
            "**<@{}>** was {} for: {}",
            target_id,
            self.kind.past_tense(),
            reason
        )))
        .await
    }
}

fn template(kind: ModerationKind, name: &str, namespace: Namespace) -> HandlerDescriptor {
    let description = match kind {
        ModerationKind::Kick => "Kick a member from the server.",
        ModerationKind::Ban => "Ban a user from the guild.",
    };

    HandlerDescriptor::slash(name, Arc::new(ModerateMember::new(kind)))
        .into_namespace(namespace)
        .description(description)
        .option(
            OptionSpec::new(
                "target",
                &format!("Member to {}", kind.verb()),
                OptionKind::User,
            )
            .required(),
        )
        .option(OptionSpec::new(
            "reason",
            &format!("Reason to {}", kind.verb()),
            OptionKind::String,
        ))
        .user_permissions(kind.permission())
        .bot_permissions(kind.permission())
}

pub fn kick_template(name: &str, namespace: Namespace) -> HandlerDescriptor {
    template(ModerationKind::Kick, name, namespace)
}

pub fn ban_template(name: &str, namespace: Namespace) -> HandlerDescriptor {
    template(ModerationKind::Ban, name, namespace)
}
