//! Platform-neutral inbound events.
//!
//! The serenity adapter converts gateway events into `InboundEvent`s so the dispatch
//! core never touches serenity's model types beyond permission bitsets and the
//! component type enum.

use serenity::all::{ComponentType, Permissions};

use crate::dispatch::args::CommandArgs;

/// The user that triggered an event.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: u64,
    /// Display tag used in replies, audit lines and usage statistics.
    pub tag: String,
    pub role_ids: Vec<u64>,
    /// Guild permissions of the actor; `None` in direct messages or when unknown.
    pub permissions: Option<Permissions>,
}

/// Where an event happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    Guild {
        guild_id: u64,
        guild_name: String,
        /// Membership events have no channel.
        channel_id: Option<u64>,
    },
    Direct {
        channel_id: u64,
    },
}

impl Origin {
    pub fn guild_id(&self) -> Option<u64> {
        match self {
            Origin::Guild { guild_id, .. } => Some(*guild_id),
            Origin::Direct { .. } => None,
        }
    }

    pub fn guild_name(&self) -> Option<&str> {
        match self {
            Origin::Guild { guild_name, .. } => Some(guild_name),
            Origin::Direct { .. } => None,
        }
    }

    pub fn channel_id(&self) -> Option<u64> {
        match self {
            Origin::Guild { channel_id, .. } => *channel_id,
            Origin::Direct { channel_id } => Some(*channel_id),
        }
    }

    pub fn is_direct(&self) -> bool {
        matches!(self, Origin::Direct { .. })
    }
}

/// How to answer an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyTarget {
    Interaction { id: u64, token: String },
    Message { channel_id: u64, message_id: u64 },
    /// Membership events cannot be answered directly.
    None,
}

/// Which command namespace an invocation belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    Slash,
    Prefix,
}

impl CommandKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::Slash => "slash",
            CommandKind::Prefix => "prefix",
        }
    }
}

/// Arguments as delivered by the platform.
#[derive(Debug, Clone)]
pub enum RawArgs {
    /// Slash command options already resolved by Discord.
    Options(CommandArgs),
    /// Whitespace separated tokens after a prefix command name.
    Tokens(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct CommandInvocation {
    /// Name as typed by the user; may be an alias.
    pub name: String,
    pub args: RawArgs,
}

/// A button press, select menu choice or modal submission.
#[derive(Debug, Clone)]
pub struct ComponentInteraction {
    pub custom_id: String,
    /// `None` for modal submissions.
    pub component_type: Option<ComponentType>,
    pub values: Vec<String>,
}

#[derive(Debug, Clone)]
pub enum EventPayload {
    Slash(CommandInvocation),
    Prefix(CommandInvocation),
    Component(ComponentInteraction),
    MemberJoin,
    MemberLeave,
}

/// Generic platform events listeners can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventTrigger {
    InteractionCreate,
    MemberJoin,
    MemberLeave,
}

impl EventTrigger {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventTrigger::InteractionCreate => "interactionCreate",
            EventTrigger::MemberJoin => "guildMemberAdd",
            EventTrigger::MemberLeave => "guildMemberRemove",
        }
    }
}

#[derive(Debug, Clone)]
pub struct InboundEvent {
    pub actor: Actor,
    pub origin: Origin,
    /// The bot's own permissions in the origin guild, where known.
    pub bot_permissions: Option<Permissions>,
    pub reply_target: ReplyTarget,
    pub payload: EventPayload,
}

impl InboundEvent {
    /// Listener trigger this event fans out to, if any.
    ///
    /// Prefix invocations have no listeners.
    pub fn trigger(&self) -> Option<EventTrigger> {
        match self.payload {
            EventPayload::Slash(_) | EventPayload::Component(_) => {
                Some(EventTrigger::InteractionCreate)
            }
            EventPayload::MemberJoin => Some(EventTrigger::MemberJoin),
            EventPayload::MemberLeave => Some(EventTrigger::MemberLeave),
            EventPayload::Prefix(_) => None,
        }
    }

    /// The command namespace and invocation, for slash and prefix events.
    pub fn command(&self) -> Option<(CommandKind, &CommandInvocation)> {
        match &self.payload {
            EventPayload::Slash(invocation) => Some((CommandKind::Slash, invocation)),
            EventPayload::Prefix(invocation) => Some((CommandKind::Prefix, invocation)),
            _ => None,
        }
    }

    pub fn component(&self) -> Option<&ComponentInteraction> {
        match &self.payload {
            EventPayload::Component(component) => Some(component),
            _ => None,
        }
    }
}
