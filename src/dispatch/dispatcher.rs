//! Dispatch core.
//!
//! Every inbound event runs through the same pipeline, stopping at the first step
//! that rejects it:
//!
//! 1. Resolve the command by name, or collect the listeners for the event's trigger
//! 2. Authorize (see [`crate::dispatch::policy::authorize`])
//! 3. Cooldown
//! 4. Rate limit
//! 5. Execute the action exactly once
//! 6. Record usage statistics and the audit log entry in the background
//! 7. Contain faults: log, write to the error sink, answer generically once
//!
//! Denials and unknown commands are answered but never treated as errors.

use chrono::Utc;
use std::{any::Any, sync::Arc, time::Instant};

use crate::{
    dispatch::{
        action::ActionContext,
        args::{parse_tokens, CommandArgs},
        descriptor::{HandlerDescriptor, Namespace, RateLimitScope},
        event::{CommandInvocation, CommandKind, EventTrigger, InboundEvent, RawArgs},
        policy::{authorize, BotIdentity, Denial},
        registry::CommandRegistry,
        reply::{Reply, ReplyHandle},
        throttle::{CooldownStore, RateLimitStore, ThrottleKey},
    },
    error::ActionError,
    model::command_stats::{RecordUsageParam, UsageTracking},
    service::{
        audit::{self, AuditEntry},
        command_stats::CommandStatsService,
        error_sink::ErrorSink,
    },
    settings::SettingsSource,
    state::BotState,
};

/// Reply sent when a handler fails and has not answered yet.
pub const GENERIC_FAILURE: &str = "There was an error while executing this command!";

/// Throttle qualifier for handlers without a custom ID filter.
const GLOBAL_QUALIFIER: &str = "global";

/// What happened to one handler for one event.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Executed { handler: String },
    Denied { handler: String, denial: Denial },
    Failed { handler: String },
    Unknown { name: String, suggestions: Vec<String> },
}

/// Where best-effort side effects go.
#[derive(Debug, Clone)]
pub struct Recording {
    pub settings: SettingsSource,
    pub error_sink: ErrorSink,
    pub command_logs_channel_id: Option<u64>,
    /// Prefix shown in audit entries for prefix commands.
    pub command_prefix: String,
}

pub struct Dispatcher {
    registry: Arc<CommandRegistry>,
    cooldowns: Arc<CooldownStore>,
    rate_limits: Arc<RateLimitStore>,
    identity: BotIdentity,
    state: BotState,
    recording: Recording,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<CommandRegistry>,
        state: BotState,
        identity: BotIdentity,
        recording: Recording,
    ) -> Self {
        Self {
            registry,
            cooldowns: Arc::new(CooldownStore::new()),
            rate_limits: Arc::new(RateLimitStore::new()),
            identity,
            state,
            recording,
        }
    }

    pub fn registry(&self) -> &Arc<CommandRegistry> {
        &self.registry
    }

    pub fn cooldowns(&self) -> Arc<CooldownStore> {
        self.cooldowns.clone()
    }

    pub fn rate_limits(&self) -> Arc<RateLimitStore> {
        self.rate_limits.clone()
    }

    /// Dispatches one inbound event.
    ///
    /// Command events produce one outcome for the command. Events with a listener
    /// trigger additionally produce one outcome per admitted listener, in name order.
    /// All handlers reached by one event share its reply state.
    pub async fn dispatch(&self, event: InboundEvent) -> Vec<Outcome> {
        let event = Arc::new(event);
        let reply = Arc::new(ReplyHandle::new(
            self.state.responder.clone(),
            event.reply_target.clone(),
        ));

        let mut outcomes = Vec::new();

        if let Some((kind, invocation)) = event.command() {
            outcomes.push(self.dispatch_command(kind, invocation, &event, &reply).await);
        }

        if let Some(trigger) = event.trigger() {
            outcomes.extend(self.dispatch_listeners(trigger, &event, &reply).await);
        }

        outcomes
    }

    async fn dispatch_command(
        &self,
        kind: CommandKind,
        invocation: &CommandInvocation,
        event: &Arc<InboundEvent>,
        reply: &Arc<ReplyHandle>,
    ) -> Outcome {
        let namespace = match kind {
            CommandKind::Slash => Namespace::Slash,
            CommandKind::Prefix => Namespace::Prefix,
        };

        let Some(descriptor) = self.registry.resolve(namespace, &invocation.name).await else {
            return self.unknown_command(kind, &invocation.name, reply).await;
        };

        let args = match &invocation.args {
            RawArgs::Options(args) => args.clone(),
            RawArgs::Tokens(tokens) => parse_tokens(&descriptor.options, tokens),
        };

        let outcome = self
            .run(&descriptor, event, reply, args, GLOBAL_QUALIFIER)
            .await;

        if matches!(outcome, Outcome::Executed { .. }) {
            self.record(kind, &descriptor, &invocation.name, event);
        }

        outcome
    }

    async fn unknown_command(&self, kind: CommandKind, name: &str, reply: &ReplyHandle) -> Outcome {
        tracing::warn!("Unknown {} command: \"{}\"", kind.as_str(), name);

        let suggestions = match kind {
            CommandKind::Slash => Vec::new(),
            CommandKind::Prefix => self.registry.suggest(Namespace::Prefix, name).await,
        };

        if !suggestions.is_empty() {
            reply
                .send_if_unanswered(Reply::new(format!(
                    "`🤔` | Command not found. Did you mean: {}?",
                    suggestions.join(", ")
                )))
                .await;
        }

        Outcome::Unknown {
            name: name.to_string(),
            suggestions,
        }
    }

    async fn dispatch_listeners(
        &self,
        trigger: EventTrigger,
        event: &Arc<InboundEvent>,
        reply: &Arc<ReplyHandle>,
    ) -> Vec<Outcome> {
        let mut outcomes = Vec::new();

        for descriptor in self.registry.listeners(trigger).await {
            if !self.registry.admit(&descriptor, event).await {
                continue;
            }

            let qualifier = match event.component() {
                Some(component) if !descriptor.custom_ids.is_empty() => {
                    component.custom_id.as_str()
                }
                _ => GLOBAL_QUALIFIER,
            };

            outcomes.push(
                self.run(&descriptor, event, reply, CommandArgs::new(), qualifier)
                    .await,
            );
        }

        outcomes
    }

    /// Policy chain, execution and fault containment for one resolved handler.
    async fn run(
        &self,
        descriptor: &Arc<HandlerDescriptor>,
        event: &Arc<InboundEvent>,
        reply: &Arc<ReplyHandle>,
        args: CommandArgs,
        qualifier: &str,
    ) -> Outcome {
        let handler = descriptor.name.clone();

        if let Err(denial) = self.check_policy(descriptor, event, qualifier).await {
            tracing::debug!(
                "Denied {} handler \"{}\" for user {}: {:?}",
                descriptor.namespace.as_str(),
                handler,
                event.actor.id,
                denial
            );

            if let Some(message) = denial.message(descriptor) {
                reply.send_if_unanswered(message).await;
            }

            return Outcome::Denied { handler, denial };
        }

        let ctx = ActionContext::new(event.clone(), args, self.state.clone(), reply.clone());

        match execute(descriptor.clone(), ctx).await {
            Ok(()) => {
                tracing::debug!(
                    "Executed {} handler \"{}\" for user {}",
                    descriptor.namespace.as_str(),
                    handler,
                    event.actor.id
                );
                Outcome::Executed { handler }
            }
            Err(e) => {
                self.contain(descriptor, event, reply, e).await;
                Outcome::Failed { handler }
            }
        }
    }

    /// Authorization, then cooldown, then rate limit.
    async fn check_policy(
        &self,
        descriptor: &HandlerDescriptor,
        event: &InboundEvent,
        qualifier: &str,
    ) -> Result<(), Denial> {
        authorize(descriptor, event, &self.identity)?;

        let handler = format!("{}:{}", descriptor.namespace.as_str(), descriptor.name);
        let actor_id = event.actor.id;
        let now = Instant::now();

        if let Some(cooldown) = descriptor.policy.cooldown {
            let key = ThrottleKey::new(&handler, qualifier, actor_id.to_string());
            if let Some(remaining) = self.cooldowns.check_and_set(key, cooldown, now).await {
                return Err(Denial::Cooldown(remaining));
            }
        }

        if let Some(limit) = &descriptor.policy.rate_limit {
            let scope_id = match limit.scope {
                RateLimitScope::User => actor_id,
                RateLimitScope::Guild => event.origin.guild_id().unwrap_or(actor_id),
                RateLimitScope::Channel => event.origin.channel_id().unwrap_or(actor_id),
            };
            let subject = format!("{}-{}", limit.scope.as_str(), scope_id);
            let key = ThrottleKey::new(&handler, qualifier, subject);

            if let Some(retry_after) = self.rate_limits.check(key, limit, now).await {
                return Err(Denial::RateLimited(retry_after));
            }
        }

        Ok(())
    }

    async fn contain(
        &self,
        descriptor: &HandlerDescriptor,
        event: &InboundEvent,
        reply: &ReplyHandle,
        error: ActionError,
    ) {
        tracing::error!(
            "Error executing {} handler \"{}\": {}",
            descriptor.namespace.as_str(),
            descriptor.name,
            error
        );

        let context = format!(
            "{} handler \"{}\" failed for user {} ({})",
            descriptor.namespace.as_str(),
            descriptor.name,
            event.actor.tag,
            event.actor.id
        );
        self.recording.error_sink.record(&context, &error).await;

        reply
            .send_if_unanswered(Reply::ephemeral(GENERIC_FAILURE))
            .await;
    }

    /// Spawns the usage statistics upsert and the audit log post.
    fn record(
        &self,
        kind: CommandKind,
        descriptor: &HandlerDescriptor,
        invoked_as: &str,
        event: &InboundEvent,
    ) {
        let db = self.state.db.clone();
        let settings = self.recording.settings.clone();
        let param = RecordUsageParam {
            command_name: descriptor.name.clone(),
            command_kind: kind.as_str().to_string(),
            user_id: event.actor.id,
            user_tag: event.actor.tag.clone(),
            guild: event
                .origin
                .guild_id()
                .zip(event.origin.guild_name())
                .map(|(id, name)| (id, name.to_string())),
        };

        tokio::spawn(async move {
            let runtime = settings.load().await;
            let Some(stats) = runtime.command_stats() else {
                return;
            };

            let tracking = UsageTracking {
                servers: stats.track_servers,
                users: stats.track_users,
            };
            let command_name = param.command_name.clone();

            if let Err(e) = CommandStatsService::new(&db).record(param, tracking).await {
                tracing::warn!("Failed to record usage for command {}: {}", command_name, e);
            }
        });

        if let Some(channel_id) = self.recording.command_logs_channel_id {
            let entry = AuditEntry::for_command(
                event,
                kind,
                invoked_as,
                &self.recording.command_prefix,
                Utc::now(),
            );
            let responder = self.state.responder.clone();

            tokio::spawn(async move {
                if let Err(e) = audit::emit(responder.as_ref(), channel_id, &entry).await {
                    tracing::warn!(
                        "Failed to post audit log entry to channel {}: {}",
                        channel_id,
                        e
                    );
                }
            });
        }
    }
}

/// Runs the action on its own task so a panic becomes an `ActionError`.
async fn execute(descriptor: Arc<HandlerDescriptor>, ctx: ActionContext) -> Result<(), ActionError> {
    let task = tokio::spawn(async move { descriptor.action.execute(&ctx).await });

    match task.await {
        Ok(result) => result,
        Err(e) if e.is_panic() => Err(ActionError::Panicked(panic_message(e.into_panic()))),
        Err(_) => Err(ActionError::Cancelled),
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
