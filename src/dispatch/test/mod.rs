use serenity::{
    all::{ComponentType, Permissions},
    async_trait,
};
use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};
use tempfile::TempDir;
use test_utils::{builder::TestBuilder, context::TestContext};

use crate::{
    commands::moderation::Moderation,
    dispatch::{
        action::{Action, ActionContext},
        args::{ArgValue, CommandArgs},
        descriptor::HandlerDescriptor,
        dispatcher::{Dispatcher, Outcome, Recording},
        event::{
            Actor, CommandInvocation, ComponentInteraction, EventPayload, InboundEvent, Origin,
            RawArgs, ReplyTarget,
        },
        policy::{BotIdentity, Denial},
        registry::CommandRegistry,
        reply::{Reply, Responder},
    },
    error::{ActionError, ResponderError},
    model::command_stats::CommandUsage,
    service::{command_stats::CommandStatsService, error_sink::ErrorSink},
    settings::SettingsSource,
    state::BotState,
};

mod containment;
mod listener;

pub const OWNER_ID: u64 = 1;
pub const ADMIN_ID: u64 = 2;
pub const USER_ID: u64 = 10;
pub const GUILD_ID: u64 = 100;
pub const CHANNEL_ID: u64 = 200;
pub const DEV_GUILD_ID: u64 = 500;
pub const LOG_CHANNEL_ID: u64 = 900;

const STATS_ENABLED: &str =
    r#"{ "commandStats": { "enabled": true, "trackServers": true, "trackUsers": true } }"#;

/// Captures every reply and channel message instead of talking to Discord.
#[derive(Default)]
pub struct RecordingResponder {
    replies: Mutex<Vec<(ReplyTarget, Reply, bool)>>,
    sent: Mutex<Vec<(u64, Reply)>>,
}

impl RecordingResponder {
    pub fn replies(&self) -> Vec<Reply> {
        self.replies
            .lock()
            .unwrap()
            .iter()
            .map(|(_, reply, _)| reply.clone())
            .collect()
    }

    pub fn followups(&self) -> Vec<bool> {
        self.replies
            .lock()
            .unwrap()
            .iter()
            .map(|(_, _, followup)| *followup)
            .collect()
    }

    pub fn sent(&self) -> Vec<(u64, Reply)> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Responder for RecordingResponder {
    async fn reply(
        &self,
        target: &ReplyTarget,
        reply: &Reply,
        followup: bool,
    ) -> Result<(), ResponderError> {
        self.replies
            .lock()
            .unwrap()
            .push((target.clone(), reply.clone(), followup));
        Ok(())
    }

    async fn send(&self, channel_id: u64, reply: &Reply) -> Result<(), ResponderError> {
        self.sent.lock().unwrap().push((channel_id, reply.clone()));
        Ok(())
    }
}

/// Moderation stub with a fixed hierarchy answer.
pub struct StubModeration {
    pub can_moderate: bool,
    pub kicked: Mutex<Vec<(u64, u64, String)>>,
    pub banned: Mutex<Vec<(u64, u64, String)>>,
}

impl StubModeration {
    pub fn new(can_moderate: bool) -> Self {
        Self {
            can_moderate,
            kicked: Mutex::new(Vec::new()),
            banned: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Moderation for StubModeration {
    async fn can_moderate(&self, _guild_id: u64, _target_id: u64) -> Result<bool, ActionError> {
        Ok(self.can_moderate)
    }

    async fn kick(&self, guild_id: u64, target_id: u64, reason: &str) -> Result<(), ActionError> {
        self.kicked
            .lock()
            .unwrap()
            .push((guild_id, target_id, reason.to_string()));
        Ok(())
    }

    async fn ban(&self, guild_id: u64, target_id: u64, reason: &str) -> Result<(), ActionError> {
        self.banned
            .lock()
            .unwrap()
            .push((guild_id, target_id, reason.to_string()));
        Ok(())
    }
}

/// Counts executions without replying.
#[derive(Default)]
pub struct Counting {
    count: AtomicUsize,
}

impl Counting {
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Action for Counting {
    async fn execute(&self, _ctx: &ActionContext) -> Result<(), ActionError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Replies with a fixed text.
pub struct Answering(pub &'static str);

#[async_trait]
impl Action for Answering {
    async fn execute(&self, ctx: &ActionContext) -> Result<(), ActionError> {
        ctx.reply(Reply::new(self.0)).await
    }
}

/// Optionally replies, then fails.
pub struct Failing {
    pub reply_first: bool,
}

#[async_trait]
impl Action for Failing {
    async fn execute(&self, ctx: &ActionContext) -> Result<(), ActionError> {
        if self.reply_first {
            ctx.reply(Reply::new("working on it")).await?;
        }
        Err(ActionError::MissingArgument("target".to_string()))
    }
}

pub struct Panicking;

#[async_trait]
impl Action for Panicking {
    async fn execute(&self, _ctx: &ActionContext) -> Result<(), ActionError> {
        panic!("handler exploded");
    }
}

pub struct Harness {
    pub test: TestContext,
    pub dir: TempDir,
    pub responder: Arc<RecordingResponder>,
    pub moderation: Arc<StubModeration>,
    pub registry: Arc<CommandRegistry>,
    pub dispatcher: Dispatcher,
}

impl Harness {
    /// Dispatcher over an empty registry, with statistics switched on and the
    /// audit log going to `LOG_CHANNEL_ID`.
    pub async fn new() -> Self {
        Self::with_moderation(true).await
    }

    pub async fn with_moderation(can_moderate: bool) -> Self {
        let test = TestBuilder::new().with_bot_tables().build().await.unwrap();
        let db = test.db.clone().unwrap();
        let dir = tempfile::tempdir().unwrap();

        let settings_path = dir.path().join("settings.json");
        std::fs::write(&settings_path, STATS_ENABLED).unwrap();
        let settings = SettingsSource::new(settings_path);

        let responder = Arc::new(RecordingResponder::default());
        let moderation = Arc::new(StubModeration::new(can_moderate));
        let registry = Arc::new(CommandRegistry::new());

        let state = BotState::new(db, responder.clone(), moderation.clone());
        let identity = BotIdentity {
            owner_id: OWNER_ID,
            admin_ids: vec![ADMIN_ID],
            dev_guild_ids: vec![DEV_GUILD_ID],
        };
        let recording = Recording {
            settings: settings.clone(),
            error_sink: ErrorSink::new(dir.path().join("errors"), settings),
            command_logs_channel_id: Some(LOG_CHANNEL_ID),
            command_prefix: "!".to_string(),
        };

        let dispatcher = Dispatcher::new(registry.clone(), state, identity, recording);

        Self {
            test,
            dir,
            responder,
            moderation,
            registry,
            dispatcher,
        }
    }

    pub async fn register(&self, descriptor: HandlerDescriptor) {
        self.registry.register(descriptor).await;
    }

    pub async fn dispatch(&self, event: InboundEvent) -> Vec<Outcome> {
        self.dispatcher.dispatch(event).await
    }

    pub fn error_files(&self) -> Vec<PathBuf> {
        match std::fs::read_dir(self.dir.path().join("errors")) {
            Ok(entries) => entries.map(|entry| entry.unwrap().path()).collect(),
            Err(_) => Vec::new(),
        }
    }

    /// Polls for the usage document written by the background recorder.
    pub async fn wait_for_usage(&self, name: &str, kind: &str) -> Option<CommandUsage> {
        let db = self.test.db.as_ref().unwrap();

        for _ in 0..50 {
            let usage = CommandStatsService::new(db).get(name, kind).await.unwrap();
            if usage.is_some() {
                return usage;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        None
    }

    /// Polls for channel messages posted by background tasks or listeners.
    pub async fn wait_for_sent(&self, count: usize) -> Vec<(u64, Reply)> {
        for _ in 0..50 {
            let sent = self.responder.sent();
            if sent.len() >= count {
                return sent;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        self.responder.sent()
    }
}

pub fn action<A: Action + 'static>(action: A) -> Arc<dyn Action> {
    Arc::new(action)
}

pub fn actor(id: u64) -> Actor {
    Actor {
        id,
        tag: format!("user{}", id),
        role_ids: Vec::new(),
        permissions: Some(Permissions::empty()),
    }
}

fn guild_origin() -> Origin {
    Origin::Guild {
        guild_id: GUILD_ID,
        guild_name: "Test Guild".to_string(),
        channel_id: Some(CHANNEL_ID),
    }
}

pub fn slash(name: &str, args: CommandArgs) -> InboundEvent {
    InboundEvent {
        actor: actor(USER_ID),
        origin: guild_origin(),
        bot_permissions: Some(Permissions::all()),
        reply_target: ReplyTarget::Interaction {
            id: 1,
            token: "token".to_string(),
        },
        payload: EventPayload::Slash(CommandInvocation {
            name: name.to_string(),
            args: RawArgs::Options(args),
        }),
    }
}

pub fn prefix(name: &str, tokens: &[&str]) -> InboundEvent {
    InboundEvent {
        actor: actor(USER_ID),
        origin: guild_origin(),
        bot_permissions: Some(Permissions::all()),
        reply_target: ReplyTarget::Message {
            channel_id: CHANNEL_ID,
            message_id: 1,
        },
        payload: EventPayload::Prefix(CommandInvocation {
            name: name.to_string(),
            args: RawArgs::Tokens(tokens.iter().map(|token| token.to_string()).collect()),
        }),
    }
}

pub fn component(custom_id: &str, component_type: ComponentType) -> InboundEvent {
    InboundEvent {
        actor: actor(USER_ID),
        origin: guild_origin(),
        bot_permissions: Some(Permissions::all()),
        reply_target: ReplyTarget::Interaction {
            id: 2,
            token: "token".to_string(),
        },
        payload: EventPayload::Component(ComponentInteraction {
            custom_id: custom_id.to_string(),
            component_type: Some(component_type),
            values: Vec::new(),
        }),
    }
}

pub fn member_join(member_id: u64) -> InboundEvent {
    InboundEvent {
        actor: actor(member_id),
        origin: Origin::Guild {
            guild_id: GUILD_ID,
            guild_name: "Test Guild".to_string(),
            channel_id: None,
        },
        bot_permissions: None,
        reply_target: ReplyTarget::None,
        payload: EventPayload::MemberJoin,
    }
}

pub fn member_leave(member_id: u64) -> InboundEvent {
    InboundEvent {
        payload: EventPayload::MemberLeave,
        ..member_join(member_id)
    }
}

pub fn by(mut event: InboundEvent, actor: Actor) -> InboundEvent {
    event.actor = actor;
    event
}

pub fn in_direct_message(mut event: InboundEvent) -> InboundEvent {
    event.origin = Origin::Direct {
        channel_id: CHANNEL_ID,
    };
    event.actor.permissions = None;
    event.bot_permissions = None;
    event
}

pub fn target_args(target_id: u64) -> CommandArgs {
    CommandArgs::new().with("target", ArgValue::User(target_id))
}

pub fn is_executed(outcome: &Outcome) -> bool {
    matches!(outcome, Outcome::Executed { .. })
}

pub fn denial(outcome: &Outcome) -> Option<&Denial> {
    match outcome {
        Outcome::Denied { denial, .. } => Some(denial),
        _ => None,
    }
}
