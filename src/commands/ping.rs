use serenity::async_trait;
use std::sync::Arc;

use crate::{
    dispatch::{
        action::{Action, ActionContext},
        descriptor::{HandlerDescriptor, Namespace},
        reply::Reply,
    },
    error::ActionError,
};

/// Liveness check.
pub struct Ping;

#[async_trait]
impl Action for Ping {
    async fn execute(&self, ctx: &ActionContext) -> Result<(), ActionError> {
        ctx.reply(Reply::new("Pong!")).await
    }
}

pub fn template(name: &str, namespace: Namespace) -> HandlerDescriptor {
    HandlerDescriptor::slash(name, Arc::new(Ping))
        .into_namespace(namespace)
        .description("Check that the bot is responding")
}
