//! Handler descriptors: what a handler is called, when it runs and who may run it.

use serenity::all::{ComponentType, Permissions};
use std::{fmt, sync::Arc, time::Duration};

use crate::dispatch::{action::Action, event::EventTrigger};

/// Cooldown applied to commands that do not declare one.
pub const DEFAULT_COMMAND_COOLDOWN: Duration = Duration::from_secs(3);

/// Longest cooldown or rate-limit window a throttle entry can hold.
pub const MAX_THROTTLE_DURATION: Duration = Duration::from_secs(365 * 24 * 60 * 60);

/// Separate name tables in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Slash,
    Prefix,
    Event,
}

impl Namespace {
    pub fn as_str(&self) -> &'static str {
        match self {
            Namespace::Slash => "slash",
            Namespace::Prefix => "prefix",
            Namespace::Event => "event",
        }
    }

    pub fn is_command(&self) -> bool {
        !matches!(self, Namespace::Event)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    String,
    Integer,
    Boolean,
    User,
    Channel,
    Role,
}

/// A declared command option.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionSpec {
    pub name: String,
    pub description: String,
    pub kind: OptionKind,
    pub required: bool,
}

impl OptionSpec {
    pub fn new(name: &str, description: &str, kind: OptionKind) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            kind,
            required: false,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// What a rate limit counts against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateLimitScope {
    User,
    Guild,
    Channel,
}

impl RateLimitScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            RateLimitScope::User => "user",
            RateLimitScope::Guild => "guild",
            RateLimitScope::Channel => "channel",
        }
    }
}

/// At most `max` executions per `window` for each scoped ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimit {
    pub max: u32,
    pub window: Duration,
    pub scope: RateLimitScope,
}

/// Policy attributes checked before a handler runs.
#[derive(Debug, Clone, PartialEq)]
pub struct Policy {
    pub disabled: bool,
    pub admin_only: bool,
    pub owner_only: bool,
    /// Only runs in the configured developer guilds; elsewhere it is silently ignored.
    pub dev_only: bool,
    pub user_permissions: Permissions,
    pub bot_permissions: Permissions,
    /// Actor needs at least one of these roles. Empty means no role gate.
    pub required_roles: Vec<u64>,
    pub cooldown: Option<Duration>,
    /// Listener cooldown reply; `{time}` is replaced with the remaining time.
    pub cooldown_message: Option<String>,
    pub rate_limit: Option<RateLimit>,
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            disabled: false,
            admin_only: false,
            owner_only: false,
            dev_only: false,
            user_permissions: Permissions::empty(),
            bot_permissions: Permissions::empty(),
            required_roles: Vec::new(),
            cooldown: None,
            cooldown_message: None,
            rate_limit: None,
        }
    }
}

/// A registered command or listener.
///
/// Descriptors are immutable once registered. Reloading replaces the whole
/// descriptor; dispatches already holding the old `Arc` finish with it.
#[derive(Clone)]
pub struct HandlerDescriptor {
    pub name: String,
    pub description: String,
    pub namespace: Namespace,
    pub aliases: Vec<String>,
    /// Event listeners only: which event they subscribe to.
    pub trigger: Option<EventTrigger>,
    /// Component interactions only run this handler when their custom ID is listed.
    pub custom_ids: Vec<String>,
    /// Declared component type filter. When absent the type is learned from the
    /// first matching interaction.
    pub component_type: Option<ComponentType>,
    pub options: Vec<OptionSpec>,
    pub policy: Policy,
    pub action: Arc<dyn Action>,
}

impl HandlerDescriptor {
    fn new(name: &str, namespace: Namespace, action: Arc<dyn Action>) -> Self {
        let cooldown = namespace.is_command().then_some(DEFAULT_COMMAND_COOLDOWN);

        Self {
            name: name.to_string(),
            description: String::new(),
            namespace,
            aliases: Vec::new(),
            trigger: None,
            custom_ids: Vec::new(),
            component_type: None,
            options: Vec::new(),
            policy: Policy {
                cooldown,
                ..Default::default()
            },
            action,
        }
    }

    /// A slash command with the default 3 second cooldown.
    pub fn slash(name: &str, action: Arc<dyn Action>) -> Self {
        Self::new(name, Namespace::Slash, action)
    }

    /// A prefix command with the default 3 second cooldown. Names are case-insensitive.
    pub fn prefix(name: &str, action: Arc<dyn Action>) -> Self {
        Self::new(&name.to_lowercase(), Namespace::Prefix, action)
    }

    /// An event listener. Listeners have no cooldown unless one is declared.
    pub fn listener(name: &str, trigger: EventTrigger, action: Arc<dyn Action>) -> Self {
        let mut descriptor = Self::new(name, Namespace::Event, action);
        descriptor.trigger = Some(trigger);
        descriptor
    }

    /// Re-targets this descriptor at another namespace, keeping its action and options.
    pub fn into_namespace(mut self, namespace: Namespace) -> Self {
        if namespace == self.namespace {
            return self;
        }

        if namespace == Namespace::Prefix {
            self.name = self.name.to_lowercase();
        }
        if self.namespace.is_command() != namespace.is_command() {
            self.policy.cooldown = namespace.is_command().then_some(DEFAULT_COMMAND_COOLDOWN);
        }
        self.namespace = namespace;
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn alias(mut self, alias: &str) -> Self {
        self.aliases.push(alias.to_lowercase());
        self
    }

    pub fn option(mut self, option: OptionSpec) -> Self {
        self.options.push(option);
        self
    }

    pub fn custom_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.custom_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn component_type(mut self, component_type: ComponentType) -> Self {
        self.component_type = Some(component_type);
        self
    }

    pub fn disabled(mut self) -> Self {
        self.policy.disabled = true;
        self
    }

    pub fn admin_only(mut self) -> Self {
        self.policy.admin_only = true;
        self
    }

    pub fn owner_only(mut self) -> Self {
        self.policy.owner_only = true;
        self
    }

    pub fn dev_only(mut self) -> Self {
        self.policy.dev_only = true;
        self
    }

    pub fn user_permissions(mut self, permissions: Permissions) -> Self {
        self.policy.user_permissions = permissions;
        self
    }

    pub fn bot_permissions(mut self, permissions: Permissions) -> Self {
        self.policy.bot_permissions = permissions;
        self
    }

    pub fn required_roles(mut self, roles: Vec<u64>) -> Self {
        self.policy.required_roles = roles;
        self
    }

    pub fn cooldown(mut self, cooldown: Option<Duration>) -> Self {
        self.policy.cooldown = cooldown;
        self
    }

    pub fn cooldown_message(mut self, message: &str) -> Self {
        self.policy.cooldown_message = Some(message.to_string());
        self
    }

    pub fn rate_limit(mut self, rate_limit: RateLimit) -> Self {
        self.policy.rate_limit = Some(rate_limit);
        self
    }

    /// Whether `name` is this descriptor's name or one of its aliases.
    pub fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.aliases.iter().any(|alias| alias == name)
    }
}

impl fmt::Debug for HandlerDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerDescriptor")
            .field("name", &self.name)
            .field("namespace", &self.namespace)
            .field("aliases", &self.aliases)
            .field("trigger", &self.trigger)
            .field("custom_ids", &self.custom_ids)
            .field("component_type", &self.component_type)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}
