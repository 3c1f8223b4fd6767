use serenity::async_trait;
use std::sync::Arc;

use crate::{
    dispatch::{
        action::{Action, ActionContext},
        descriptor::{HandlerDescriptor, Namespace},
        event::EventTrigger,
        reply::Reply,
    },
    error::ActionError,
};

/// Confirms a button press or menu choice with an ephemeral reply.
///
/// Not registered at startup; handler sources bind it to their own custom IDs.
pub struct Acknowledge;

#[async_trait]
impl Action for Acknowledge {
    async fn execute(&self, ctx: &ActionContext) -> Result<(), ActionError> {
        let content = match ctx.event.component() {
            Some(component) if !component.values.is_empty() => {
                format!("Selected: {}", component.values.join(", "))
            }
            _ => "Done!".to_string(),
        };

        ctx.reply(Reply::ephemeral(content)).await
    }
}

pub fn template(name: &str, namespace: Namespace) -> HandlerDescriptor {
    HandlerDescriptor::listener(name, EventTrigger::InteractionCreate, Arc::new(Acknowledge))
        .into_namespace(namespace)
}
