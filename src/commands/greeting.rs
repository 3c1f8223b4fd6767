//! Welcome and goodbye listeners.

use serenity::async_trait;
use std::sync::Arc;

use crate::{
    dispatch::{
        action::{Action, ActionContext},
        descriptor::{HandlerDescriptor, Namespace},
        event::EventTrigger,
        reply::Reply,
    },
    error::ActionError,
    model::gate_config::GateSide,
    service::gate_config::GateConfigService,
};

/// Posts a greeting to the guild's active channel for one side.
///
/// Does nothing when the side has no channel or is switched off.
pub struct Greet {
    side: GateSide,
}

impl Greet {
    fn message(&self, member_id: u64, guild_name: &str) -> String {
        match self.side {
            GateSide::Join => format!("Hello <@{}>, welcome to **{}**!", member_id, guild_name),
            GateSide::Leave => format!("<@{}> has left **{}**. Goodbye!", member_id, guild_name),
        }
    }
}

#[async_trait]
impl Action for Greet {
    async fn execute(&self, ctx: &ActionContext) -> Result<(), ActionError> {
        let guild_id = ctx.guild_id()?;

        let Some(channel_id) = GateConfigService::new(&ctx.state.db)
            .active_channel(guild_id, self.side)
            .await?
        else {
            return Ok(());
        };

        let guild_name = ctx.event.origin.guild_name().unwrap_or_default();
        let content = self.message(ctx.event.actor.id, guild_name);

        ctx.state
            .responder
            .send(channel_id, &Reply::new(content))
            .await?;

        Ok(())
    }
}

fn template(side: GateSide, name: &str, namespace: Namespace) -> HandlerDescriptor {
    let trigger = match side {
        GateSide::Join => EventTrigger::MemberJoin,
        GateSide::Leave => EventTrigger::MemberLeave,
    };

    HandlerDescriptor::listener(name, trigger, Arc::new(Greet { side })).into_namespace(namespace)
}

pub fn join_template(name: &str, namespace: Namespace) -> HandlerDescriptor {
    template(GateSide::Join, name, namespace)
}

pub fn leave_template(name: &str, namespace: Namespace) -> HandlerDescriptor {
    template(GateSide::Leave, name, namespace)
}
