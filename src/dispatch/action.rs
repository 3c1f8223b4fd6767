//! The executable part of a handler.

use serenity::async_trait;
use std::sync::Arc;

use crate::{
    dispatch::{
        args::CommandArgs,
        event::InboundEvent,
        reply::{Reply, ReplyHandle},
    },
    error::ActionError,
    state::BotState,
};

/// Handler body invoked once per admitted event.
///
/// Returning an error marks the invocation as a fault: it is logged, written to the
/// error sink and answered with a generic failure reply if nothing was sent yet.
/// Expected refusals (a target the bot cannot kick, a guild with no channel set)
/// should be replied to directly and return `Ok(())`.
#[async_trait]
pub trait Action: Send + Sync {
    async fn execute(&self, ctx: &ActionContext) -> Result<(), ActionError>;
}

/// Everything an action can see and use.
#[derive(Clone)]
pub struct ActionContext {
    pub event: Arc<InboundEvent>,
    pub args: CommandArgs,
    pub state: BotState,
    reply: Arc<ReplyHandle>,
}

impl ActionContext {
    pub fn new(
        event: Arc<InboundEvent>,
        args: CommandArgs,
        state: BotState,
        reply: Arc<ReplyHandle>,
    ) -> Self {
        Self {
            event,
            args,
            state,
            reply,
        }
    }

    /// Answers the triggering event.
    pub async fn reply(&self, reply: Reply) -> Result<(), ActionError> {
        self.reply.send(reply).await?;
        Ok(())
    }

    /// Guild the event came from, or `ActionError::NotInGuild` for direct messages.
    pub fn guild_id(&self) -> Result<u64, ActionError> {
        self.event.origin.guild_id().ok_or(ActionError::NotInGuild)
    }
}
