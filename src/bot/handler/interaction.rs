//! Interaction handler: slash commands, component interactions and modal submissions.

use serenity::all::{
    ChannelId, CommandInteraction, ComponentInteraction, ComponentInteractionDataKind,
    ComponentType, Context, GuildId, Interaction, Member, ModalInteraction, ResolvedValue, User,
};

use crate::dispatch::{
    args::{ArgValue, CommandArgs},
    dispatcher::Dispatcher,
    event::{
        Actor, CommandInvocation, ComponentInteraction as InboundComponent, EventPayload,
        InboundEvent, Origin, RawArgs, ReplyTarget,
    },
};

/// Handles an interaction by converting it and dispatching it.
///
/// Autocomplete and ping interactions are ignored.
pub async fn handle_interaction_create(
    dispatcher: &Dispatcher,
    ctx: Context,
    interaction: Interaction,
) {
    let event = match &interaction {
        Interaction::Command(command) => from_command(&ctx, command),
        Interaction::Component(component) => from_component(&ctx, component),
        Interaction::Modal(modal) => from_modal(&ctx, modal),
        _ => return,
    };

    tracing::debug!("Dispatching interaction {}", interaction.id());

    dispatcher.dispatch(event).await;
}

fn from_command(ctx: &Context, command: &CommandInteraction) -> InboundEvent {
    let invocation = CommandInvocation {
        name: command.data.name.clone(),
        args: RawArgs::Options(command_args(command)),
    };

    InboundEvent {
        actor: actor(&command.user, command.member.as_deref()),
        origin: origin(ctx, command.guild_id, command.channel_id),
        bot_permissions: command.app_permissions,
        reply_target: ReplyTarget::Interaction {
            id: command.id.get(),
            token: command.token.clone(),
        },
        payload: EventPayload::Slash(invocation),
    }
}

fn from_component(ctx: &Context, component: &ComponentInteraction) -> InboundEvent {
    let (component_type, values) = component_kind(&component.data.kind);

    InboundEvent {
        actor: actor(&component.user, component.member.as_ref()),
        origin: origin(ctx, component.guild_id, component.channel_id),
        bot_permissions: component.app_permissions,
        reply_target: ReplyTarget::Interaction {
            id: component.id.get(),
            token: component.token.clone(),
        },
        payload: EventPayload::Component(InboundComponent {
            custom_id: component.data.custom_id.clone(),
            component_type: Some(component_type),
            values,
        }),
    }
}

fn from_modal(ctx: &Context, modal: &ModalInteraction) -> InboundEvent {
    InboundEvent {
        actor: actor(&modal.user, modal.member.as_ref()),
        origin: origin(ctx, modal.guild_id, modal.channel_id),
        bot_permissions: modal.app_permissions,
        reply_target: ReplyTarget::Interaction {
            id: modal.id.get(),
            token: modal.token.clone(),
        },
        payload: EventPayload::Component(InboundComponent {
            custom_id: modal.data.custom_id.clone(),
            component_type: None,
            values: Vec::new(),
        }),
    }
}

fn actor(user: &User, member: Option<&Member>) -> Actor {
    Actor {
        id: user.id.get(),
        tag: user.tag(),
        role_ids: member
            .map(|member| member.roles.iter().map(|role| role.get()).collect())
            .unwrap_or_default(),
        permissions: member.and_then(|member| member.permissions),
    }
}

fn origin(ctx: &Context, guild_id: Option<GuildId>, channel_id: ChannelId) -> Origin {
    match guild_id {
        Some(guild_id) => Origin::Guild {
            guild_id: guild_id.get(),
            guild_name: guild_id.name(&ctx.cache).unwrap_or_default(),
            channel_id: Some(channel_id.get()),
        },
        None => Origin::Direct {
            channel_id: channel_id.get(),
        },
    }
}

/// Converts resolved slash command options. Subcommands and attachments are not
/// used by any handler and are skipped.
fn command_args(command: &CommandInteraction) -> CommandArgs {
    let mut args = CommandArgs::new();

    for option in command.data.options() {
        let value = match option.value {
            ResolvedValue::String(value) => ArgValue::String(value.to_string()),
            ResolvedValue::Integer(value) => ArgValue::Integer(value),
            ResolvedValue::Number(value) => ArgValue::String(value.to_string()),
            ResolvedValue::Boolean(value) => ArgValue::Boolean(value),
            ResolvedValue::User(user, _) => ArgValue::User(user.id.get()),
            ResolvedValue::Channel(channel) => ArgValue::Channel(channel.id.get()),
            ResolvedValue::Role(role) => ArgValue::Role(role.id.get()),
            _ => continue,
        };
        args.insert(option.name, value);
    }

    args
}

/// Component type and selected values of a component interaction.
fn component_kind(kind: &ComponentInteractionDataKind) -> (ComponentType, Vec<String>) {
    match kind {
        ComponentInteractionDataKind::Button => (ComponentType::Button, Vec::new()),
        ComponentInteractionDataKind::StringSelect { values } => {
            (ComponentType::StringSelect, values.clone())
        }
        ComponentInteractionDataKind::UserSelect { values } => (
            ComponentType::UserSelect,
            values.iter().map(|id| id.to_string()).collect(),
        ),
        ComponentInteractionDataKind::RoleSelect { values } => (
            ComponentType::RoleSelect,
            values.iter().map(|id| id.to_string()).collect(),
        ),
        ComponentInteractionDataKind::MentionableSelect { values } => (
            ComponentType::MentionableSelect,
            values.iter().map(|id| id.to_string()).collect(),
        ),
        ComponentInteractionDataKind::ChannelSelect { values } => (
            ComponentType::ChannelSelect,
            values.iter().map(|id| id.to_string()).collect(),
        ),
        ComponentInteractionDataKind::Unknown(kind) => (ComponentType::Unknown(*kind), Vec::new()),
        #[allow(unreachable_patterns)]
        _ => (ComponentType::Unknown(0), Vec::new()),
    }
}
