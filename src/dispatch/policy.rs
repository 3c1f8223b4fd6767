//! Authorization checks and denial replies.
//!
//! Everything here is a pure function of the descriptor, the event and the bot's
//! identity. Throttling state lives in [`crate::dispatch::throttle`].

use serenity::all::Permissions;
use std::time::Duration;

use crate::dispatch::{
    descriptor::{HandlerDescriptor, Namespace},
    event::InboundEvent,
    permission::permission_names,
    reply::Reply,
};

/// Who the bot considers privileged.
#[derive(Debug, Clone, Default)]
pub struct BotIdentity {
    pub owner_id: u64,
    pub admin_ids: Vec<u64>,
    pub dev_guild_ids: Vec<u64>,
}

impl BotIdentity {
    pub fn is_owner(&self, user_id: u64) -> bool {
        self.owner_id == user_id
    }

    pub fn is_admin(&self, user_id: u64) -> bool {
        self.admin_ids.contains(&user_id)
    }
}

/// Why a handler did not run.
#[derive(Debug, Clone, PartialEq)]
pub enum Denial {
    Disabled,
    AdminOnly,
    OwnerOnly,
    /// Dev-only handler outside a developer guild. Never answered.
    DevOnly,
    MissingUserPermissions(Vec<&'static str>),
    /// Permission or role gated handler invoked in a direct message.
    GuildOnly,
    MissingRole,
    MissingBotPermissions(Vec<&'static str>),
    Cooldown(Duration),
    RateLimited(Duration),
}

impl Denial {
    /// Reply explaining the denial, or `None` for silent denials.
    pub fn message(&self, descriptor: &HandlerDescriptor) -> Option<Reply> {
        let is_listener = descriptor.namespace == Namespace::Event;

        let content = match self {
            Denial::Disabled => {
                "`⛔` | This command is currently disabled. Please try again later.".to_string()
            }
            Denial::AdminOnly => {
                "`❌` | This command is admin-only. You cannot run this command.".to_string()
            }
            Denial::OwnerOnly => {
                "`❌` | This command is owner-only. You cannot run this command.".to_string()
            }
            Denial::DevOnly => return None,
            Denial::MissingUserPermissions(missing) if is_listener => {
                format!("❌ **Missing Permissions**\nYou need: {}", missing.join(", "))
            }
            Denial::MissingUserPermissions(missing) => format!(
                "`❌` | You lack the necessary permissions to execute this command: ```{}```",
                missing.join(", ")
            ),
            Denial::GuildOnly => "`❌` | This command can only be used in a server.".to_string(),
            Denial::MissingRole => {
                "`❌` | You don't have the required role(s) to use this command.".to_string()
            }
            Denial::MissingBotPermissions(missing) if is_listener => {
                format!("❌ **Missing Permissions**\nI need: {}", missing.join(", "))
            }
            Denial::MissingBotPermissions(missing) => format!(
                "`❌` | I lack the necessary permissions to execute this command: ```{}```",
                missing.join(", ")
            ),
            Denial::Cooldown(remaining) if is_listener => {
                let time = format_remaining(*remaining);
                match &descriptor.policy.cooldown_message {
                    Some(template) => template.replace("{time}", &time),
                    None => format!("⏱️ Please wait {} before using this again.", time),
                }
            }
            Denial::Cooldown(remaining) => format!(
                "`❌` | Please wait **{:.1}** more second(s) before reusing the `{}` command.",
                remaining.as_secs_f64(),
                descriptor.name
            ),
            Denial::RateLimited(retry_after) => format!(
                "⚠️ You're doing that too much! Try again in {}.",
                format_remaining(*retry_after)
            ),
        };

        Some(Reply::ephemeral(content))
    }
}

/// Runs the identity and permission checks in order, stopping at the first failure.
///
/// Order: disabled, admin-only and owner-only, dev-only guild gate, invoker
/// permissions, role gate, bot permissions.
pub fn authorize(
    descriptor: &HandlerDescriptor,
    event: &InboundEvent,
    identity: &BotIdentity,
) -> Result<(), Denial> {
    let policy = &descriptor.policy;
    let actor = &event.actor;

    if policy.disabled {
        return Err(Denial::Disabled);
    }

    if policy.admin_only && !identity.is_admin(actor.id) {
        return Err(Denial::AdminOnly);
    }

    if policy.owner_only && !identity.is_owner(actor.id) {
        return Err(Denial::OwnerOnly);
    }

    if policy.dev_only {
        let in_dev_guild = event
            .origin
            .guild_id()
            .is_some_and(|guild_id| identity.dev_guild_ids.contains(&guild_id));
        if !in_dev_guild {
            return Err(Denial::DevOnly);
        }
    }

    if !policy.user_permissions.is_empty() {
        if event.origin.is_direct() {
            return Err(Denial::GuildOnly);
        }

        let missing = missing_permissions(policy.user_permissions, actor.permissions);
        if !missing.is_empty() {
            return Err(Denial::MissingUserPermissions(missing));
        }
    }

    if !policy.required_roles.is_empty() {
        if event.origin.is_direct() {
            return Err(Denial::GuildOnly);
        }

        if !has_required_role(&policy.required_roles, &actor.role_ids) {
            return Err(Denial::MissingRole);
        }
    }

    if !policy.bot_permissions.is_empty() {
        if event.origin.is_direct() {
            return Err(Denial::GuildOnly);
        }

        // Unknown bot permissions are left for Discord to enforce on the API call
        if let Some(held) = event.bot_permissions {
            let missing = missing_permissions(policy.bot_permissions, Some(held));
            if !missing.is_empty() {
                return Err(Denial::MissingBotPermissions(missing));
            }
        }
    }

    Ok(())
}

/// Names of the required permissions not held. Administrator implies everything.
pub fn missing_permissions(required: Permissions, held: Option<Permissions>) -> Vec<&'static str> {
    let held = held.unwrap_or_else(Permissions::empty);
    if held.contains(Permissions::ADMINISTRATOR) {
        return Vec::new();
    }

    permission_names(required & !held)
}

/// Empty requirement passes; otherwise at least one role must be held.
pub fn has_required_role(required: &[u64], held: &[u64]) -> bool {
    required.is_empty() || required.iter().any(|role| held.contains(role))
}

/// Formats a wait as `Xh Ym`, `Xm Ys` or `Xs`, rounding partial seconds up.
pub fn format_remaining(remaining: Duration) -> String {
    let mut seconds = remaining.as_secs();
    if remaining.subsec_nanos() > 0 {
        seconds += 1;
    }

    let minutes = seconds / 60;
    let hours = minutes / 60;

    if hours > 0 {
        format!("{}h {}m", hours, minutes % 60)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds % 60)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::{
        action::{Action, ActionContext},
        event::{Actor, CommandInvocation, EventPayload, Origin, RawArgs, ReplyTarget},
    };
    use crate::error::ActionError;
    use serenity::async_trait;
    use std::sync::Arc;

    struct Noop;

    #[async_trait]
    impl Action for Noop {
        async fn execute(&self, _ctx: &ActionContext) -> Result<(), ActionError> {
            Ok(())
        }
    }

    fn identity() -> BotIdentity {
        BotIdentity {
            owner_id: 1,
            admin_ids: vec![2],
            dev_guild_ids: vec![500],
        }
    }

    fn event(actor_id: u64, origin: Origin, permissions: Option<Permissions>) -> InboundEvent {
        InboundEvent {
            actor: Actor {
                id: actor_id,
                tag: format!("user{}", actor_id),
                role_ids: vec![10],
                permissions,
            },
            origin,
            bot_permissions: Some(Permissions::KICK_MEMBERS),
            reply_target: ReplyTarget::None,
            payload: EventPayload::Slash(CommandInvocation {
                name: "test".to_string(),
                args: RawArgs::Tokens(Vec::new()),
            }),
        }
    }

    fn guild(guild_id: u64) -> Origin {
        Origin::Guild {
            guild_id,
            guild_name: "Guild".to_string(),
            channel_id: Some(900),
        }
    }

    fn command() -> HandlerDescriptor {
        HandlerDescriptor::slash("test", Arc::new(Noop))
    }

    #[test]
    fn disabled_wins_over_everything() {
        let descriptor = command().disabled().admin_only();

        let result = authorize(&descriptor, &event(3, guild(1), None), &identity());

        assert_eq!(result, Err(Denial::Disabled));
    }

    #[test]
    fn admin_only_rejects_non_admin() {
        let descriptor = command().admin_only();

        assert_eq!(
            authorize(&descriptor, &event(3, guild(1), None), &identity()),
            Err(Denial::AdminOnly)
        );
        assert!(authorize(&descriptor, &event(2, guild(1), None), &identity()).is_ok());
    }

    #[test]
    fn owner_only_accepts_owner() {
        let descriptor = command().owner_only();

        assert_eq!(
            authorize(&descriptor, &event(2, guild(1), None), &identity()),
            Err(Denial::OwnerOnly)
        );
        assert!(authorize(&descriptor, &event(1, guild(1), None), &identity()).is_ok());
    }

    #[test]
    fn dev_only_is_silent_outside_dev_guilds() {
        let descriptor = command().dev_only();

        let denial = authorize(&descriptor, &event(3, guild(1), None), &identity()).unwrap_err();

        assert_eq!(denial, Denial::DevOnly);
        assert!(denial.message(&descriptor).is_none());
        assert!(authorize(&descriptor, &event(3, guild(500), None), &identity()).is_ok());
    }

    #[test]
    fn reports_missing_user_permissions_by_name() {
        let descriptor = command().user_permissions(Permissions::KICK_MEMBERS);

        let denial = authorize(
            &descriptor,
            &event(3, guild(1), Some(Permissions::SEND_MESSAGES)),
            &identity(),
        )
        .unwrap_err();

        assert_eq!(denial, Denial::MissingUserPermissions(vec!["KickMembers"]));
        let reply = denial.message(&descriptor).unwrap();
        assert!(reply.content.contains("KickMembers"));
    }

    #[test]
    fn administrator_satisfies_any_permission() {
        let descriptor = command().user_permissions(Permissions::BAN_MEMBERS);

        let result = authorize(
            &descriptor,
            &event(3, guild(1), Some(Permissions::ADMINISTRATOR)),
            &identity(),
        );

        assert!(result.is_ok());
    }

    #[test]
    fn permission_gate_rejects_direct_messages() {
        let descriptor = command().user_permissions(Permissions::KICK_MEMBERS);

        let result = authorize(
            &descriptor,
            &event(3, Origin::Direct { channel_id: 5 }, None),
            &identity(),
        );

        assert_eq!(result, Err(Denial::GuildOnly));
    }

    #[test]
    fn role_gate_needs_one_matching_role() {
        let gated = command().required_roles(vec![10, 11]);
        let other = command().required_roles(vec![12]);

        assert!(authorize(&gated, &event(3, guild(1), None), &identity()).is_ok());
        assert_eq!(
            authorize(&other, &event(3, guild(1), None), &identity()),
            Err(Denial::MissingRole)
        );
        assert_eq!(
            authorize(&gated, &event(3, Origin::Direct { channel_id: 5 }, None), &identity()),
            Err(Denial::GuildOnly)
        );
    }

    #[test]
    fn bot_permissions_checked_last() {
        let descriptor = command()
            .user_permissions(Permissions::BAN_MEMBERS)
            .bot_permissions(Permissions::BAN_MEMBERS);

        let user_denial = authorize(&descriptor, &event(3, guild(1), None), &identity());
        assert_eq!(
            user_denial,
            Err(Denial::MissingUserPermissions(vec!["BanMembers"]))
        );

        let bot_denial = authorize(
            &descriptor,
            &event(3, guild(1), Some(Permissions::BAN_MEMBERS)),
            &identity(),
        );
        assert_eq!(
            bot_denial,
            Err(Denial::MissingBotPermissions(vec!["BanMembers"]))
        );
    }

    #[test]
    fn has_required_role_with_empty_requirement() {
        assert!(has_required_role(&[], &[]));
        assert!(!has_required_role(&[1], &[]));
    }

    #[test]
    fn formats_remaining_time() {
        assert_eq!(format_remaining(Duration::from_secs(42)), "42s");
        assert_eq!(format_remaining(Duration::from_millis(1500)), "2s");
        assert_eq!(format_remaining(Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_remaining(Duration::from_secs(3 * 3600 + 61)), "3h 1m");
    }

    #[test]
    fn command_cooldown_message_uses_one_decimal() {
        let descriptor = command();

        let reply = Denial::Cooldown(Duration::from_millis(2400))
            .message(&descriptor)
            .unwrap();

        assert!(reply.content.contains("**2.4**"));
        assert!(reply.content.contains("`test`"));
    }

    #[test]
    fn listener_cooldown_uses_custom_template() {
        let descriptor = HandlerDescriptor::listener(
            "button",
            crate::dispatch::event::EventTrigger::InteractionCreate,
            Arc::new(Noop),
        )
        .cooldown_message("Slow down, {time} left");

        let reply = Denial::Cooldown(Duration::from_secs(90))
            .message(&descriptor)
            .unwrap();

        assert_eq!(reply.content, "Slow down, 1m 30s left");
        assert!(reply.ephemeral);
    }
}
