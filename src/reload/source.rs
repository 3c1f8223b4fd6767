//! Handler source files.
//!
//! A handler source binds a compiled action to a name, a namespace and policy
//! attributes:
//!
//! ```json
//! {
//!   "name": "verify",
//!   "kind": "event",
//!   "action": "acknowledge",
//!   "trigger": "interactionCreate",
//!   "customId": ["verify-accept", "verify-decline"],
//!   "cooldown": 10,
//!   "cooldownMessage": "Slow down! Try again in {time}.",
//!   "rateLimit": { "max": 3, "window": 60000, "scope": "user" },
//!   "requiredRoles": ["123456789012345678"]
//! }
//! ```
//!
//! `cooldown` is in seconds, `rateLimit.window` in milliseconds. Attributes that are
//! omitted keep the action's defaults.

use serde::Deserialize;
use serenity::all::{ComponentType, Permissions};
use std::{path::Path, time::Duration};

use crate::{
    commands::ActionCatalog,
    dispatch::{
        descriptor::{
            HandlerDescriptor, Namespace, RateLimit, RateLimitScope, MAX_THROTTLE_DURATION,
        },
        event::EventTrigger,
        permission::parse_permission,
    },
    error::ReloadError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Slash,
    Prefix,
    Event,
}

impl From<SourceKind> for Namespace {
    fn from(kind: SourceKind) -> Self {
        match kind {
            SourceKind::Slash => Namespace::Slash,
            SourceKind::Prefix => Namespace::Prefix,
            SourceKind::Event => Namespace::Event,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum SourceTrigger {
    #[serde(rename = "interactionCreate")]
    InteractionCreate,
    #[serde(rename = "guildMemberAdd")]
    MemberJoin,
    #[serde(rename = "guildMemberRemove")]
    MemberLeave,
}

impl From<SourceTrigger> for EventTrigger {
    fn from(trigger: SourceTrigger) -> Self {
        match trigger {
            SourceTrigger::InteractionCreate => EventTrigger::InteractionCreate,
            SourceTrigger::MemberJoin => EventTrigger::MemberJoin,
            SourceTrigger::MemberLeave => EventTrigger::MemberLeave,
        }
    }
}

/// A single custom ID or a list of them.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum CustomIds {
    One(String),
    Many(Vec<String>),
}

impl CustomIds {
    fn into_vec(self) -> Vec<String> {
        match self {
            CustomIds::One(id) => vec![id],
            CustomIds::Many(ids) => ids,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceScope {
    #[default]
    User,
    Guild,
    Channel,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RateLimitSource {
    pub max: u32,
    /// Window length in milliseconds.
    pub window: u64,
    #[serde(default)]
    pub scope: SourceScope,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandlerSource {
    pub name: String,
    pub kind: SourceKind,
    /// Catalog name of the compiled action to run.
    pub action: String,
    pub description: Option<String>,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub trigger: Option<SourceTrigger>,
    pub custom_id: Option<CustomIds>,
    pub component_type: Option<String>,
    /// Seconds; `0` removes the cooldown.
    pub cooldown: Option<f64>,
    pub cooldown_message: Option<String>,
    pub rate_limit: Option<RateLimitSource>,
    #[serde(default)]
    pub admin_only: bool,
    #[serde(default)]
    pub owner_only: bool,
    #[serde(default)]
    pub dev_only: bool,
    #[serde(default)]
    pub disabled: bool,
    pub user_permissions: Option<Vec<String>>,
    pub bot_permissions: Option<Vec<String>>,
    #[serde(default)]
    pub required_roles: Vec<String>,
}

impl HandlerSource {
    pub fn parse(path: &Path, raw: &str) -> Result<Self, ReloadError> {
        serde_json::from_str(raw).map_err(|source| ReloadError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Builds the descriptor this source describes.
    ///
    /// Starts from the catalog action's defaults and applies every attribute the
    /// source sets.
    pub fn into_descriptor(self, catalog: &ActionCatalog) -> Result<HandlerDescriptor, ReloadError> {
        let namespace = Namespace::from(self.kind);
        let mut descriptor = catalog.instantiate(&self.action, &self.name, namespace)?;

        if namespace == Namespace::Event {
            let trigger = self.trigger.ok_or_else(|| ReloadError::MissingTrigger {
                name: self.name.clone(),
            })?;
            descriptor.trigger = Some(trigger.into());
        }

        if let Some(description) = &self.description {
            descriptor = descriptor.description(description);
        }
        for alias in &self.aliases {
            descriptor = descriptor.alias(alias);
        }
        if let Some(custom_ids) = self.custom_id.clone() {
            descriptor = descriptor.custom_ids(custom_ids.into_vec());
        }
        if let Some(component_type) = &self.component_type {
            descriptor =
                descriptor.component_type(parse_component_type(&self.name, component_type)?);
        }

        if let Some(seconds) = self.cooldown {
            let cooldown = if seconds > 0.0 {
                Some(parse_cooldown(&self.name, seconds)?)
            } else {
                None
            };
            descriptor = descriptor.cooldown(cooldown);
        }
        if let Some(message) = &self.cooldown_message {
            descriptor = descriptor.cooldown_message(message);
        }
        if let Some(rate_limit) = &self.rate_limit {
            descriptor = descriptor.rate_limit(RateLimit {
                max: rate_limit.max,
                window: parse_window(&self.name, rate_limit.window)?,
                scope: match rate_limit.scope {
                    SourceScope::User => RateLimitScope::User,
                    SourceScope::Guild => RateLimitScope::Guild,
                    SourceScope::Channel => RateLimitScope::Channel,
                },
            });
        }

        if self.admin_only {
            descriptor = descriptor.admin_only();
        }
        if self.owner_only {
            descriptor = descriptor.owner_only();
        }
        if self.dev_only {
            descriptor = descriptor.dev_only();
        }
        if self.disabled {
            descriptor = descriptor.disabled();
        }

        if let Some(names) = &self.user_permissions {
            descriptor = descriptor.user_permissions(parse_permissions(&self.name, names)?);
        }
        if let Some(names) = &self.bot_permissions {
            descriptor = descriptor.bot_permissions(parse_permissions(&self.name, names)?);
        }
        if !self.required_roles.is_empty() {
            let roles = self
                .required_roles
                .iter()
                .map(|role| {
                    role.parse::<u64>().map_err(|_| ReloadError::InvalidRole {
                        name: self.name.clone(),
                        role: role.clone(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            descriptor = descriptor.required_roles(roles);
        }

        Ok(descriptor)
    }
}

fn parse_permissions(name: &str, names: &[String]) -> Result<Permissions, ReloadError> {
    names.iter().try_fold(Permissions::empty(), |acc, permission| {
        parse_permission(permission)
            .map(|parsed| acc | parsed)
            .ok_or_else(|| ReloadError::UnknownPermission {
                name: name.to_string(),
                permission: permission.clone(),
            })
    })
}

fn parse_cooldown(name: &str, seconds: f64) -> Result<Duration, ReloadError> {
    Duration::try_from_secs_f64(seconds)
        .ok()
        .filter(|cooldown| *cooldown <= MAX_THROTTLE_DURATION)
        .ok_or_else(|| ReloadError::InvalidDuration {
            name: name.to_string(),
            field: "cooldown",
            value: seconds.to_string(),
        })
}

fn parse_window(name: &str, millis: u64) -> Result<Duration, ReloadError> {
    let window = Duration::from_millis(millis);
    if window > MAX_THROTTLE_DURATION {
        return Err(ReloadError::InvalidDuration {
            name: name.to_string(),
            field: "rateLimit.window",
            value: millis.to_string(),
        });
    }

    Ok(window)
}

fn parse_component_type(name: &str, value: &str) -> Result<ComponentType, ReloadError> {
    let component_type = match value.to_lowercase().as_str() {
        "button" => ComponentType::Button,
        "stringselect" | "select" => ComponentType::StringSelect,
        "userselect" => ComponentType::UserSelect,
        "roleselect" => ComponentType::RoleSelect,
        "mentionableselect" => ComponentType::MentionableSelect,
        "channelselect" => ComponentType::ChannelSelect,
        _ => {
            return Err(ReloadError::UnknownComponentType {
                name: name.to_string(),
                component_type: value.to_string(),
            })
        }
    };

    Ok(component_type)
}
