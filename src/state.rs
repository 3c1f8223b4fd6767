//! Shared state handed to every action.

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::{commands::moderation::Moderation, dispatch::reply::Responder};

/// Store connection and platform collaborators.
///
/// Cheap to clone: the connection is a pool and the collaborators are `Arc`s.
#[derive(Clone)]
pub struct BotState {
    pub db: DatabaseConnection,
    pub responder: Arc<dyn Responder>,
    pub moderation: Arc<dyn Moderation>,
}

impl BotState {
    pub fn new(
        db: DatabaseConnection,
        responder: Arc<dyn Responder>,
        moderation: Arc<dyn Moderation>,
    ) -> Self {
        Self {
            db,
            responder,
            moderation,
        }
    }
}
