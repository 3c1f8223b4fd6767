//! Command arguments.
//!
//! Slash command options arrive typed from Discord. Prefix commands arrive as raw
//! tokens and are matched against the handler's declared options after resolution.

use std::collections::HashMap;

use crate::{
    dispatch::descriptor::{OptionKind, OptionSpec},
    error::ActionError,
};

#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    String(String),
    Integer(i64),
    Boolean(bool),
    User(u64),
    Channel(u64),
    Role(u64),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CommandArgs {
    values: HashMap<String, ArgValue>,
}

impl CommandArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ArgValue) {
        self.values.insert(name.into(), value);
    }

    pub fn with(mut self, name: impl Into<String>, value: ArgValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn string(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ArgValue::String(value)) => Some(value),
            _ => None,
        }
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.values.get(name) {
            Some(ArgValue::Integer(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn boolean(&self, name: &str) -> Option<bool> {
        match self.values.get(name) {
            Some(ArgValue::Boolean(value)) => Some(*value),
            _ => None,
        }
    }

    pub fn user(&self, name: &str) -> Option<u64> {
        match self.values.get(name) {
            Some(ArgValue::User(id)) => Some(*id),
            _ => None,
        }
    }

    pub fn channel(&self, name: &str) -> Option<u64> {
        match self.values.get(name) {
            Some(ArgValue::Channel(id)) => Some(*id),
            _ => None,
        }
    }

    pub fn role(&self, name: &str) -> Option<u64> {
        match self.values.get(name) {
            Some(ArgValue::Role(id)) => Some(*id),
            _ => None,
        }
    }

    pub fn require_user(&self, name: &str) -> Result<u64, ActionError> {
        self.user(name)
            .ok_or_else(|| ActionError::MissingArgument(name.to_string()))
    }

    pub fn require_channel(&self, name: &str) -> Result<u64, ActionError> {
        self.channel(name)
            .ok_or_else(|| ActionError::MissingArgument(name.to_string()))
    }
}

/// Matches prefix command tokens against declared options, in declaration order.
///
/// Each option consumes one token, except a trailing string option which takes the
/// rest of the line. Tokens that do not parse as the option's kind leave that option
/// unset; the action decides whether that is an error.
pub fn parse_tokens(options: &[OptionSpec], tokens: &[String]) -> CommandArgs {
    let mut args = CommandArgs::new();
    let mut remaining = tokens;

    for (index, option) in options.iter().enumerate() {
        let Some((first, rest)) = remaining.split_first() else {
            break;
        };

        let is_last = index + 1 == options.len();
        if is_last && option.kind == OptionKind::String {
            args.insert(option.name.clone(), ArgValue::String(remaining.join(" ")));
            break;
        }

        if let Some(value) = parse_token(option.kind, first) {
            args.insert(option.name.clone(), value);
        }
        remaining = rest;
    }

    args
}

fn parse_token(kind: OptionKind, token: &str) -> Option<ArgValue> {
    match kind {
        OptionKind::String => Some(ArgValue::String(token.to_string())),
        OptionKind::Integer => token.parse().ok().map(ArgValue::Integer),
        OptionKind::Boolean => match token.to_lowercase().as_str() {
            "true" | "yes" | "on" => Some(ArgValue::Boolean(true)),
            "false" | "no" | "off" => Some(ArgValue::Boolean(false)),
            _ => None,
        },
        OptionKind::User => parse_mention(token, &["<@!", "<@"]).map(ArgValue::User),
        OptionKind::Channel => parse_mention(token, &["<#"]).map(ArgValue::Channel),
        OptionKind::Role => parse_mention(token, &["<@&"]).map(ArgValue::Role),
    }
}

/// Accepts `<prefix123>` mentions or a bare ID.
fn parse_mention(token: &str, prefixes: &[&str]) -> Option<u64> {
    if let Ok(id) = token.parse() {
        return Some(id);
    }

    let inner = token.strip_suffix('>')?;
    prefixes
        .iter()
        .find_map(|prefix| inner.strip_prefix(prefix))
        .and_then(|id| id.parse().ok())
}
