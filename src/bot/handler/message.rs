//! Message handler for prefix commands.

use serenity::all::{Context, GuildId, Message, Permissions};

use crate::{
    bot::permissions::GuildHierarchy,
    dispatch::{
        dispatcher::Dispatcher,
        event::{Actor, CommandInvocation, EventPayload, InboundEvent, Origin, RawArgs, ReplyTarget},
    },
};

/// Guild data needed for one prefix invocation, copied out of the cache.
struct GuildSnapshot {
    name: String,
    actor_permissions: Permissions,
    bot_permissions: Option<Permissions>,
}

/// Handle message creation in a channel
///
/// Messages from bots and messages that do not start with the prefix are ignored.
pub async fn handle_message(
    dispatcher: &Dispatcher,
    command_prefix: &str,
    ctx: Context,
    message: Message,
) {
    if message.author.bot {
        return;
    }

    let Some((name, tokens)) = parse_prefix_command(&message.content, command_prefix) else {
        return;
    };

    let role_ids: Vec<u64> = message
        .member
        .as_ref()
        .map(|member| member.roles.iter().map(|role| role.get()).collect())
        .unwrap_or_default();

    let (origin, permissions, bot_permissions) = match message.guild_id {
        Some(guild_id) => {
            let snapshot = snapshot_guild(&ctx, guild_id, message.author.id.get(), &role_ids);
            let origin = Origin::Guild {
                guild_id: guild_id.get(),
                guild_name: snapshot
                    .as_ref()
                    .map(|snapshot| snapshot.name.clone())
                    .unwrap_or_default(),
                channel_id: Some(message.channel_id.get()),
            };

            match snapshot {
                Some(snapshot) => (
                    origin,
                    Some(snapshot.actor_permissions),
                    snapshot.bot_permissions,
                ),
                None => (origin, None, None),
            }
        }
        None => (
            Origin::Direct {
                channel_id: message.channel_id.get(),
            },
            None,
            None,
        ),
    };

    tracing::debug!("Prefix command '{}' from {}", name, message.author.tag());

    let event = InboundEvent {
        actor: Actor {
            id: message.author.id.get(),
            tag: message.author.tag(),
            role_ids,
            permissions,
        },
        origin,
        bot_permissions,
        reply_target: ReplyTarget::Message {
            channel_id: message.channel_id.get(),
            message_id: message.id.get(),
        },
        payload: EventPayload::Prefix(CommandInvocation {
            name,
            args: RawArgs::Tokens(tokens),
        }),
    };

    dispatcher.dispatch(event).await;
}

/// Splits `content` into a command name and argument tokens.
///
/// Returns `None` when the prefix is empty, the content does not start with it, or
/// nothing follows it. The name keeps its case; the registry resolves names
/// case-insensitively.
pub fn parse_prefix_command(content: &str, prefix: &str) -> Option<(String, Vec<String>)> {
    if prefix.is_empty() {
        return None;
    }

    let rest = content.trim_start().strip_prefix(prefix)?;
    let mut tokens = rest.split_whitespace().map(str::to_string);
    let name = tokens.next()?;

    Some((name, tokens.collect()))
}

/// Reads the guild name and computed permissions from the cache.
///
/// Cache guards are released before returning so nothing is held across an await.
fn snapshot_guild(
    ctx: &Context,
    guild_id: GuildId,
    author_id: u64,
    author_roles: &[u64],
) -> Option<GuildSnapshot> {
    let bot_id = ctx.cache.current_user().id;
    let guild = ctx.cache.guild(guild_id)?;
    let hierarchy = GuildHierarchy::from_guild(&guild);

    let bot_permissions = guild.members.get(&bot_id).map(|member| {
        let roles: Vec<u64> = member.roles.iter().map(|role| role.get()).collect();
        hierarchy.permissions(bot_id.get(), &roles)
    });

    Some(GuildSnapshot {
        name: guild.name.clone(),
        actor_permissions: hierarchy.permissions(author_id, author_roles),
        bot_permissions,
    })
}
