//! Join/leave greeting setup commands.

use serenity::{all::Permissions, async_trait};
use std::sync::Arc;

use crate::{
    dispatch::{
        action::{Action, ActionContext},
        descriptor::{HandlerDescriptor, Namespace, OptionKind, OptionSpec},
        reply::Reply,
    },
    error::ActionError,
    model::gate_config::{GateSide, SetGateChannelParam},
    service::gate_config::{GateConfigService, ToggleOutcome},
};

/// Points one greeting side at the `channel` option and switches it on.
pub struct SetGateChannel {
    side: GateSide,
}

#[async_trait]
impl Action for SetGateChannel {
    async fn execute(&self, ctx: &ActionContext) -> Result<(), ActionError> {
        let guild_id = ctx.guild_id()?;
        let channel_id = ctx.args.require_channel("channel")?;

        GateConfigService::new(&ctx.state.db)
            .set_channel(SetGateChannelParam {
                guild_id,
                side: self.side,
                channel_id,
            })
            .await?;

        ctx.reply(Reply::new(format!("Channel is set in <#{}>.", channel_id)))
            .await
    }
}

/// Flips one greeting side on or off.
pub struct ToggleGate {
    side: GateSide,
}

#[async_trait]
impl Action for ToggleGate {
    async fn execute(&self, ctx: &ActionContext) -> Result<(), ActionError> {
        let guild_id = ctx.guild_id()?;

        let outcome = GateConfigService::new(&ctx.state.db)
            .toggle(guild_id, self.side)
            .await?;

        let content = match outcome {
            ToggleOutcome::NoChannel => "Please set a channel first.".to_string(),
            ToggleOutcome::Toggled(enabled) => format!(
                "{} messages are now **{}**.",
                match self.side {
                    GateSide::Join => "Join",
                    GateSide::Leave => "Leave",
                },
                if enabled { "ON" } else { "OFF" }
            ),
        };

        ctx.reply(Reply::new(content)).await
    }
}

fn setup_template(side: GateSide, name: &str, namespace: Namespace) -> HandlerDescriptor {
    let description = match side {
        GateSide::Join => "Set the channel new members are welcomed in",
        GateSide::Leave => "Set the channel departing members are announced in",
    };

    HandlerDescriptor::slash(name, Arc::new(SetGateChannel { side }))
        .into_namespace(namespace)
        .description(description)
        .option(
            OptionSpec::new(
                "channel",
                "The channel to send messages to",
                OptionKind::Channel,
            )
            .required(),
        )
        .user_permissions(Permissions::ADMINISTRATOR)
}

fn toggle_template(side: GateSide, name: &str, namespace: Namespace) -> HandlerDescriptor {
    let description = match side {
        GateSide::Join => "Toggle messages in the welcome channel",
        GateSide::Leave => "Toggle messages in the goodbye channel",
    };

    HandlerDescriptor::slash(name, Arc::new(ToggleGate { side }))
        .into_namespace(namespace)
        .description(description)
        .user_permissions(Permissions::ADMINISTRATOR)
}

pub fn welcome_setup_template(name: &str, namespace: Namespace) -> HandlerDescriptor {
    setup_template(GateSide::Join, name, namespace)
}

pub fn goodbye_setup_template(name: &str, namespace: Namespace) -> HandlerDescriptor {
    setup_template(GateSide::Leave, name, namespace)
}

pub fn toggle_welcome_template(name: &str, namespace: Namespace) -> HandlerDescriptor {
    toggle_template(GateSide::Join, name, namespace)
}

pub fn toggle_goodbye_template(name: &str, namespace: Namespace) -> HandlerDescriptor {
    toggle_template(GateSide::Leave, name, namespace)
}
