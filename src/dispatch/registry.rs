//! Command registry.
//!
//! Holds one name table per namespace plus the component type binding table. All
//! tables sit behind a single `RwLock`, so a reload swaps a descriptor in one write
//! and concurrent resolves see either the old or the new descriptor.

use serenity::all::ComponentType;
use std::{collections::HashMap, sync::Arc};
use tokio::sync::RwLock;

use crate::dispatch::{
    descriptor::{HandlerDescriptor, Namespace},
    event::{EventPayload, EventTrigger, InboundEvent},
    suggest::suggest,
};

/// Namespace and name of a registered descriptor.
pub type HandlerId = (Namespace, String);

#[derive(Default)]
struct Tables {
    slash: HashMap<String, Arc<HandlerDescriptor>>,
    prefix: HashMap<String, Arc<HandlerDescriptor>>,
    events: HashMap<String, Arc<HandlerDescriptor>>,
    /// Component type learned from each custom ID filtered listener's first match.
    component_types: HashMap<String, ComponentType>,
}

impl Tables {
    fn table(&self, namespace: Namespace) -> &HashMap<String, Arc<HandlerDescriptor>> {
        match namespace {
            Namespace::Slash => &self.slash,
            Namespace::Prefix => &self.prefix,
            Namespace::Event => &self.events,
        }
    }

    fn table_mut(&mut self, namespace: Namespace) -> &mut HashMap<String, Arc<HandlerDescriptor>> {
        match namespace {
            Namespace::Slash => &mut self.slash,
            Namespace::Prefix => &mut self.prefix,
            Namespace::Event => &mut self.events,
        }
    }

    fn insert(&mut self, descriptor: HandlerDescriptor) -> Option<Arc<HandlerDescriptor>> {
        let namespace = descriptor.namespace;
        let name = descriptor.name.clone();

        if namespace == Namespace::Event {
            self.component_types.remove(&name);
        }
        self.table_mut(namespace).insert(name, Arc::new(descriptor))
    }

    fn remove(&mut self, namespace: Namespace, name: &str) -> Option<Arc<HandlerDescriptor>> {
        if namespace == Namespace::Event {
            self.component_types.remove(name);
        }
        self.table_mut(namespace).remove(name)
    }
}

#[derive(Default)]
pub struct CommandRegistry {
    tables: RwLock<Tables>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a descriptor, replacing any descriptor with the same name in its namespace.
    ///
    /// # Returns
    /// - `Some(previous)` - A descriptor was replaced
    /// - `None` - The name was new
    pub async fn register(&self, descriptor: HandlerDescriptor) -> Option<Arc<HandlerDescriptor>> {
        tracing::debug!(
            "Registering {} handler {}",
            descriptor.namespace.as_str(),
            descriptor.name
        );

        self.tables.write().await.insert(descriptor)
    }

    /// Removes a descriptor and its component type binding.
    pub async fn unregister(&self, namespace: Namespace, name: &str) -> Option<Arc<HandlerDescriptor>> {
        self.tables.write().await.remove(namespace, name)
    }

    /// Replaces `previous` with `descriptor` under one write lock.
    ///
    /// `previous` is the identity the replaced descriptor was registered under, which
    /// differs from the new one when a handler source renames its handler.
    pub async fn reload(&self, previous: Option<&HandlerId>, descriptor: HandlerDescriptor) {
        let mut tables = self.tables.write().await;

        if let Some((namespace, name)) = previous {
            tables.remove(*namespace, name);
        }
        tables.insert(descriptor);
    }

    /// Looks a name up in a namespace, falling back to aliases.
    ///
    /// Prefix command names are case-insensitive.
    pub async fn resolve(&self, namespace: Namespace, name: &str) -> Option<Arc<HandlerDescriptor>> {
        let name = match namespace {
            Namespace::Prefix => name.to_lowercase(),
            _ => name.to_string(),
        };

        let tables = self.tables.read().await;
        let table = tables.table(namespace);

        table
            .get(&name)
            .or_else(|| table.values().find(|descriptor| descriptor.answers_to(&name)))
            .cloned()
    }

    /// Up to three registered names close to an unknown `name`.
    pub async fn suggest(&self, namespace: Namespace, name: &str) -> Vec<String> {
        let tables = self.tables.read().await;

        suggest(name, tables.table(namespace).keys().map(String::as_str))
    }

    /// Listeners subscribed to `trigger`, ordered by name.
    pub async fn listeners(&self, trigger: EventTrigger) -> Vec<Arc<HandlerDescriptor>> {
        let tables = self.tables.read().await;

        let mut listeners: Vec<_> = tables
            .events
            .values()
            .filter(|descriptor| descriptor.trigger == Some(trigger))
            .cloned()
            .collect();
        listeners.sort_by(|a, b| a.name.cmp(&b.name));
        listeners
    }

    /// All descriptors in a namespace, ordered by name.
    pub async fn descriptors(&self, namespace: Namespace) -> Vec<Arc<HandlerDescriptor>> {
        let tables = self.tables.read().await;

        let mut descriptors: Vec<_> = tables.table(namespace).values().cloned().collect();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        descriptors
    }

    /// Applies the custom ID and component type filters of a listener to an event.
    ///
    /// Listeners without custom IDs admit every event of their trigger. Filtered
    /// listeners never admit slash commands or membership events, and only admit
    /// components whose custom ID is listed. The first admitted component fixes the
    /// listener's component type (unless one was declared); later components of a
    /// different type are rejected.
    pub async fn admit(&self, descriptor: &HandlerDescriptor, event: &InboundEvent) -> bool {
        if descriptor.custom_ids.is_empty() {
            return true;
        }

        let EventPayload::Component(component) = &event.payload else {
            return false;
        };

        if !descriptor.custom_ids.contains(&component.custom_id) {
            return false;
        }

        if let Some(declared) = descriptor.component_type {
            return component.component_type == Some(declared);
        }

        let mut tables = self.tables.write().await;
        match tables.component_types.get(&descriptor.name) {
            Some(bound) => component.component_type == Some(*bound),
            None => {
                if let Some(component_type) = component.component_type {
                    tracing::debug!(
                        "Bound listener {} to component type {:?}",
                        descriptor.name,
                        component_type
                    );
                    tables
                        .component_types
                        .insert(descriptor.name.clone(), component_type);
                }
                true
            }
        }
    }
}
