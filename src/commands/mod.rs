//! Compiled actions and the catalog handler sources bind to.

pub mod acknowledge;
pub mod gate;
pub mod greeting;
pub mod moderation;
pub mod ping;

use std::collections::BTreeMap;

use crate::{
    dispatch::descriptor::{HandlerDescriptor, Namespace},
    error::ReloadError,
};

/// Builds a descriptor with the given name in the given namespace, carrying the
/// action's options and default policy.
pub type Template = fn(&str, Namespace) -> HandlerDescriptor;

const COMMANDS: &[Namespace] = &[Namespace::Slash, Namespace::Prefix];
const LISTENERS: &[Namespace] = &[Namespace::Event];

pub struct CatalogEntry {
    /// Namespaces the action may be registered in.
    pub namespaces: &'static [Namespace],
    pub template: Template,
}

/// Actions by catalog name.
pub struct ActionCatalog {
    entries: BTreeMap<&'static str, CatalogEntry>,
}

impl ActionCatalog {
    /// Every action compiled into the bot.
    pub fn standard() -> Self {
        let entries: [(&'static str, &'static [Namespace], Template); 10] = [
            ("ping", COMMANDS, ping::template),
            ("kick", COMMANDS, moderation::kick_template),
            ("ban", COMMANDS, moderation::ban_template),
            ("welcome-setup", COMMANDS, gate::welcome_setup_template),
            ("good-bye-setup", COMMANDS, gate::goodbye_setup_template),
            ("toggle-welcome-logs", COMMANDS, gate::toggle_welcome_template),
            ("toggle-goodbye-logs", COMMANDS, gate::toggle_goodbye_template),
            ("greet-join", LISTENERS, greeting::join_template),
            ("greet-leave", LISTENERS, greeting::leave_template),
            ("acknowledge", LISTENERS, acknowledge::template),
        ];

        let entries = entries
            .into_iter()
            .map(|(name, namespaces, template)| {
                (
                    name,
                    CatalogEntry {
                        namespaces,
                        template,
                    },
                )
            })
            .collect();

        Self { entries }
    }

    pub fn get(&self, action: &str) -> Option<&CatalogEntry> {
        self.entries.get(action)
    }

    /// Builds a descriptor for `action` registered as `name` in `namespace`.
    ///
    /// # Returns
    /// - `Ok(HandlerDescriptor)` - Descriptor with the action's default options and policy
    /// - `Err(ReloadError::UnknownAction)` - No such action
    /// - `Err(ReloadError::UnsupportedKind)` - The action cannot run in that namespace
    pub fn instantiate(
        &self,
        action: &str,
        name: &str,
        namespace: Namespace,
    ) -> Result<HandlerDescriptor, ReloadError> {
        let entry = self.get(action).ok_or_else(|| ReloadError::UnknownAction {
            name: name.to_string(),
            action: action.to_string(),
        })?;

        if !entry.namespaces.contains(&namespace) {
            return Err(ReloadError::UnsupportedKind {
                name: name.to_string(),
                action: action.to_string(),
                kind: namespace.as_str().to_string(),
            });
        }

        Ok((entry.template)(name, namespace))
    }
}

/// Handlers registered at startup before handler sources are loaded.
///
/// Every command is available both as a slash command and as a prefix command.
pub fn builtins() -> Vec<HandlerDescriptor> {
    let catalog = ActionCatalog::standard();
    let mut descriptors = Vec::new();

    for (name, entry) in &catalog.entries {
        if *name == "acknowledge" {
            continue;
        }

        for namespace in entry.namespaces {
            descriptors.push((entry.template)(name, *namespace));
        }
    }

    descriptors
}

/// The builtin registered under `name` in `namespace`, if any.
pub fn builtin(namespace: Namespace, name: &str) -> Option<HandlerDescriptor> {
    builtins()
        .into_iter()
        .find(|descriptor| descriptor.namespace == namespace && descriptor.name == name)
}
