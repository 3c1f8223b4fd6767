//! Replies and the outbound messaging seam.

use serenity::async_trait;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::{dispatch::event::ReplyTarget, error::ResponderError};

/// Plain text reply. `ephemeral` only has an effect on interactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub content: String,
    pub ephemeral: bool,
}

impl Reply {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: false,
        }
    }

    pub fn ephemeral(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ephemeral: true,
        }
    }
}

/// Sends replies and channel messages on the platform.
#[async_trait]
pub trait Responder: Send + Sync {
    /// Answers an event. `followup` is set when the event was already answered once,
    /// which for interactions means a followup message instead of the initial response.
    async fn reply(
        &self,
        target: &ReplyTarget,
        reply: &Reply,
        followup: bool,
    ) -> Result<(), ResponderError>;

    /// Posts a message to a channel.
    async fn send(&self, channel_id: u64, reply: &Reply) -> Result<(), ResponderError>;
}

/// Per-event reply state shared by every handler the event reaches.
///
/// Tracks whether anything has been sent yet so the dispatcher can send at most one
/// generic failure reply, and only when the handler had not answered already.
pub struct ReplyHandle {
    responder: Arc<dyn Responder>,
    target: ReplyTarget,
    replied: AtomicBool,
}

impl ReplyHandle {
    pub fn new(responder: Arc<dyn Responder>, target: ReplyTarget) -> Self {
        Self {
            responder,
            target,
            replied: AtomicBool::new(false),
        }
    }

    pub fn has_replied(&self) -> bool {
        self.replied.load(Ordering::SeqCst)
    }

    /// Answers the event, propagating delivery failures to the caller.
    ///
    /// Events without a reply target (membership changes) accept and drop replies.
    pub async fn send(&self, reply: Reply) -> Result<(), ResponderError> {
        if self.target == ReplyTarget::None {
            tracing::debug!("Dropping reply to event without reply target: {}", reply.content);
            return Ok(());
        }

        let followup = self.has_replied();
        self.responder.reply(&self.target, &reply, followup).await?;
        self.replied.store(true, Ordering::SeqCst);

        Ok(())
    }

    /// Answers the event unless something was already sent. Failures are logged.
    pub async fn send_if_unanswered(&self, reply: Reply) {
        if self.has_replied() {
            return;
        }

        if let Err(e) = self.send(reply).await {
            tracing::warn!("Failed to send reply: {}", e);
        }
    }
}
