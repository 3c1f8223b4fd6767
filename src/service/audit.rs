//! Command audit log.
//!
//! Posts one line per successful command invocation to the configured log channel.

use chrono::{DateTime, Utc};

use crate::{
    dispatch::{
        event::{CommandKind, InboundEvent},
        reply::{Reply, Responder},
    },
    error::ResponderError,
};

/// One executed command, ready to be posted.
#[derive(Debug, Clone, PartialEq)]
pub struct AuditEntry {
    pub user_tag: String,
    pub user_id: u64,
    /// Command as invoked, including its `/` or prefix.
    pub command: String,
    /// Guild name and ID; `None` for direct messages.
    pub guild: Option<(String, u64)>,
    pub executed_at: DateTime<Utc>,
}

impl AuditEntry {
    /// Builds an entry for a command event. `invoked_as` is the name the user typed.
    pub fn for_command(
        event: &InboundEvent,
        kind: CommandKind,
        invoked_as: &str,
        command_prefix: &str,
        executed_at: DateTime<Utc>,
    ) -> Self {
        let command = match kind {
            CommandKind::Slash => format!("/{}", invoked_as),
            CommandKind::Prefix => format!("{}{}", command_prefix, invoked_as),
        };

        let guild = event
            .origin
            .guild_id()
            .zip(event.origin.guild_name())
            .map(|(id, name)| (name.to_string(), id));

        Self {
            user_tag: event.actor.tag.clone(),
            user_id: event.actor.id,
            command,
            guild,
            executed_at,
        }
    }

    pub fn render(&self) -> String {
        let server = match &self.guild {
            Some((name, id)) => format!("{} ({})", name, id),
            None => "Direct Message".to_string(),
        };

        format!(
            "## Command Executed\n**User** : {} ({})\n**Command** : `{}`\n**Server** : {}\n**Timestamp** : <t:{}:F>",
            self.user_tag,
            self.user_id,
            self.command,
            server,
            self.executed_at.timestamp()
        )
    }
}

/// Posts an audit entry to `channel_id`.
pub async fn emit(
    responder: &dyn Responder,
    channel_id: u64,
    entry: &AuditEntry,
) -> Result<(), ResponderError> {
    responder.send(channel_id, &Reply::new(entry.render())).await
}
