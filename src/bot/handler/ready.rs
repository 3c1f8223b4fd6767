//! Ready event handler for bot initialization.
//!
//! Fired once per connection after the gateway handshake. Besides logging the
//! connection, it publishes every registered slash command to Discord so the
//! command list matches the registry, including handlers loaded from sources.

use serenity::all::{
    Command, CommandOptionType, Context, CreateCommand, CreateCommandOption, Ready,
};

use crate::dispatch::{
    descriptor::{HandlerDescriptor, Namespace, OptionKind},
    dispatcher::Dispatcher,
};

/// Handles the ready event when the bot connects to Discord.
pub async fn handle_ready(dispatcher: &Dispatcher, ctx: Context, ready: Ready) {
    tracing::info!("{} is connected to Discord", ready.user.name);

    let descriptors = dispatcher.registry().descriptors(Namespace::Slash).await;
    let commands: Vec<CreateCommand> = descriptors
        .iter()
        .filter(|descriptor| !descriptor.policy.disabled)
        .map(|descriptor| build_command(descriptor))
        .collect();

    match Command::set_global_commands(&ctx.http, commands).await {
        Ok(registered) => tracing::info!("Registered {} slash commands", registered.len()),
        Err(e) => tracing::error!("Failed to register slash commands: {}", e),
    }
}

fn build_command(descriptor: &HandlerDescriptor) -> CreateCommand {
    let mut command =
        CreateCommand::new(&descriptor.name).description(description_or_name(descriptor));

    for option in &descriptor.options {
        command = command.add_option(
            CreateCommandOption::new(
                option_type(option.kind),
                &option.name,
                &option.description,
            )
            .required(option.required),
        );
    }

    if !descriptor.policy.user_permissions.is_empty() {
        command = command.default_member_permissions(descriptor.policy.user_permissions);
    }

    command
}

/// Discord rejects commands without a description.
fn description_or_name(descriptor: &HandlerDescriptor) -> String {
    if descriptor.description.trim().is_empty() {
        descriptor.name.clone()
    } else {
        descriptor.description.clone()
    }
}

fn option_type(kind: OptionKind) -> CommandOptionType {
    match kind {
        OptionKind::String => CommandOptionType::String,
        OptionKind::Integer => CommandOptionType::Integer,
        OptionKind::Boolean => CommandOptionType::Boolean,
        OptionKind::User => CommandOptionType::User,
        OptionKind::Channel => CommandOptionType::Channel,
        OptionKind::Role => CommandOptionType::Role,
    }
}
